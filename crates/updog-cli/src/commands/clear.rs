//! Clear command implementation.

use anyhow::Result;
use updog_core::{Config, GameKind};

use super::open_session;

pub fn run(config: &Config, game: GameKind) -> Result<()> {
    let mut session = open_session(config, game);
    let teams = session.roster().all_participants().len();
    session.clear_all();
    println!("Cleared {} teams from {}", teams, game);
    Ok(())
}
