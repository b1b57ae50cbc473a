//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::export::ranked;
use crate::roster::{CompletedRound, Participant};
use crate::rules::{PhaseKind, RuleTable};
use crate::scoring::{RoundState, format_seconds};

/// Boxed view of the active round.
pub fn format_round_console(
    rules: &RuleTable,
    participant: Option<&Participant>,
    round: &RoundState,
    remaining_ms: u64,
) -> String {
    let mut output = String::new();
    let border = "━".repeat(50);
    let border_dim = border.dimmed();

    let team = match participant {
        Some(p) => p.team_name().bold().to_string(),
        None => "no active team".dimmed().to_string(),
    };

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  {} - {}", rules.game.display_name().bold(), team);
    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(
        output,
        "  SCORE  : {} (last {})",
        round.score(rules).to_string().green(),
        round.last_points()
    );
    let _ = writeln!(output, "  TIME   : {}", format_seconds(remaining_ms));

    let enabled = round.enabled_actions(rules);
    if enabled.is_empty() {
        let _ = writeln!(output, "  ACTIONS: {}", "-".dimmed());
    } else {
        let _ = writeln!(output, "  ACTIONS: {}", enabled.join(" ").cyan());
    }

    if !rules.toggles.is_empty() {
        let toggles: Vec<String> = rules
            .toggles
            .iter()
            .map(|t| {
                if round.is_toggled(t.id) {
                    format!("[x] {}", t.id).yellow().to_string()
                } else {
                    format!("[ ] {}", t.id)
                }
            })
            .collect();
        let _ = writeln!(output, "  TOGGLES: {}", toggles.join("  "));
    }

    if let Some(tracker) = round.phase() {
        let phase = match tracker.kind() {
            PhaseKind::Obstacle => "Obstacle".blue().to_string(),
            PhaseKind::Catch => "Catch".purple().to_string(),
        };
        let progress = tracker.phase.progress();
        let _ = writeln!(
            output,
            "  PHASE  : {} ({} marked, {} missed, {} cycles)",
            phase,
            progress.clicked.len(),
            progress.misses,
            tracker.cycles_completed
        );
    }

    if let Some(board) = round.board() {
        let _ = writeln!(
            output,
            "  BOARD  : {} marked, {} fireball, {} completed",
            board.normal().len(),
            board.bonus().len(),
            board.boards_completed()
        );
    }

    if round.is_finished() {
        let _ = writeln!(output, "  {}", "FINISHED".red().bold());
    }
    let _ = write!(output, "{}", border_dim);

    output
}

/// Ranked standings table for completed rounds.
pub fn format_standings_console(rules: &RuleTable, entries: &[CompletedRound]) -> String {
    let mut output = String::new();
    let columns = rules.template.columns;

    let header: Vec<&str> = columns.iter().map(|(_, c)| c.header()).collect();
    let _ = writeln!(
        output,
        "{}",
        format!("  #  {:<28} {}", "Team", header.join("  ")).bold()
    );

    for (rank, entry) in ranked(rules, entries).into_iter().enumerate() {
        let values: Vec<String> = columns
            .iter()
            .zip(&header)
            .map(|((_, column), title)| {
                format!("{:>width$}", entry.summary.cell_value(*column), width = title.len())
            })
            .collect();
        let line = format!(
            "{:>3}  {:<28} {}",
            rank + 1,
            entry.participant.team_name(),
            values.join("  ")
        );
        if rank == 0 {
            let _ = writeln!(output, "{}", line.green());
        } else {
            let _ = writeln!(output, "{}", line);
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::GameKind;
    use crate::scoring::RoundSummary;
    use chrono::Utc;

    #[test]
    fn test_round_console_contents() {
        let rules = GameKind::Boom.rules();
        let mut round = RoundState::new(rules);
        round.apply(rules, "1");
        let participant = Participant::new("Alex", "Pixel");
        let text = format_round_console(rules, Some(&participant), &round, 42_000);
        assert!(text.contains("Alex & Pixel"));
        assert!(text.contains("42.0"));
        assert!(text.contains("2a"));
        assert!(text.contains("sweet_spot"));
    }

    #[test]
    fn test_standings_rank_order() {
        let rules = GameKind::Greedy.rules();
        let entry = |handler: &str, total| CompletedRound {
            participant: Participant::new(handler, "Dog"),
            round: RoundState::default(),
            summary: RoundSummary {
                total,
                ..Default::default()
            },
            completed_at: Utc::now(),
        };
        let text = format_standings_console(rules, &[entry("Low", 3), entry("High", 30)]);
        let high = text.find("High").unwrap();
        let low = text.find("Low").unwrap();
        assert!(high < low);
    }
}
