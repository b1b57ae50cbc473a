use crate::roster::{CompletedRound, Participant};
use crate::rules::RuleTable;

const TEAM_HEADERS: [&str; 4] = ["Handler", "Dog", "UTN", "Height Division"];

const ROSTER_HEADERS: [&str; 5] = ["Handler", "Dog", "UTN", "Jump Height", "Height Division"];

/// Header line for a game's results CSV.
pub fn results_header(rules: &RuleTable) -> String {
    TEAM_HEADERS
        .iter()
        .copied()
        .chain(rules.template.columns.iter().map(|(_, c)| c.header()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Completed rounds as CSV, in completion order.
///
/// Cells are comma-joined without quoting; a comma inside a name shifts the
/// remaining columns of that line.
pub fn results_to_csv(rules: &RuleTable, entries: &[CompletedRound]) -> String {
    let mut lines = vec![results_header(rules)];
    for entry in entries {
        let p = &entry.participant;
        let mut cells = vec![
            p.handler.clone(),
            p.dog.clone(),
            p.registration_id.clone(),
            p.height_division.clone(),
        ];
        cells.extend(
            rules
                .template
                .columns
                .iter()
                .map(|(_, column)| entry.summary.cell_value(*column)),
        );
        lines.push(cells.join(","));
    }
    lines.join("\n") + "\n"
}

/// Participants (without scores) as CSV, suitable for re-import.
pub fn roster_to_csv(participants: &[&Participant]) -> String {
    let mut lines = vec![ROSTER_HEADERS.join(",")];
    lines.extend(participants.iter().map(|p| {
        [
            p.handler.as_str(),
            p.dog.as_str(),
            p.registration_id.as_str(),
            p.jump_height.as_str(),
            p.height_division.as_str(),
        ]
        .join(",")
    }));
    lines.join("\n") + "\n"
}
