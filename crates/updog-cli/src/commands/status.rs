//! Status command implementation.

use anyhow::Result;
use updog_core::{Config, GameKind};

use super::open_session;

pub fn run(config: &Config, game: GameKind, json: bool) -> Result<()> {
    let session = open_session(config, game);

    if json {
        println!("{}", serde_json::to_string_pretty(session.ui())?);
        return Ok(());
    }

    println!("{}", session.scoreboard());
    let roster = session.roster();
    println!(
        "Queue: {} waiting, {} completed",
        roster.queue().len(),
        roster.completed().len()
    );
    for (i, p) in roster.queue().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, p);
    }
    if !roster.completed().is_empty() {
        println!();
        print!("{}", session.standings());
    }
    Ok(())
}
