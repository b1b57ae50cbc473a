use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::roster::{CompletedRound, Participant};
use crate::rules::GameKind;
use crate::scoring::{LogEntry, RoundSummary};

/// Per-round JSON export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonExport {
    pub game_mode: String,
    pub export_timestamp: DateTime<Utc>,
    pub participant_data: Participant,
    pub round_results: RoundResults,
    pub round_log: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResults {
    #[serde(flatten)]
    pub summary: RoundSummary,
    pub action_counts: BTreeMap<String, u32>,
    pub toggles: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl JsonExport {
    pub fn new(game: GameKind, entry: &CompletedRound) -> Self {
        Self::at(game, entry, Utc::now())
    }

    pub fn at(game: GameKind, entry: &CompletedRound, timestamp: DateTime<Utc>) -> Self {
        Self {
            game_mode: game.display_name().to_string(),
            export_timestamp: timestamp,
            participant_data: entry.participant.clone(),
            round_results: RoundResults {
                summary: entry.summary.clone(),
                action_counts: entry
                    .round
                    .counts()
                    .iter()
                    .filter(|(_, n)| **n > 0)
                    .map(|(id, n)| (id.clone(), *n))
                    .collect(),
                toggles: entry.round.active_toggles().map(str::to_string).collect(),
                completed_at: entry.completed_at,
            },
            round_log: entry.round.log().to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
