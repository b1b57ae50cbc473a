//! Games command implementation.

use anyhow::Result;
use updog_core::GameKind;

pub fn run() -> Result<()> {
    for game in GameKind::all() {
        let rules = game.rules();
        println!(
            "{:<14} {:<14} {:>3}s",
            game.slug(),
            game.display_name(),
            rules.round_seconds
        );
        let actions: Vec<String> = rules
            .actions
            .iter()
            .map(|a| format!("{}({})", a.id, a.points))
            .collect();
        println!("    buttons: {}", actions.join(" "));
        if !rules.toggles.is_empty() {
            let toggles: Vec<String> = rules
                .toggles
                .iter()
                .map(|t| format!("{}(+{})", t.id, t.points))
                .collect();
            println!("    toggles: {}", toggles.join(" "));
        }
    }
    Ok(())
}
