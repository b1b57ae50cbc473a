use serde::{Deserialize, Serialize};

use crate::rules::ExportColumn;

/// Aggregate results of one round, as exported and ranked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundSummary {
    pub total: i32,
    pub best_throw: i32,
    pub highest_zone: u8,
    pub bonus_points: i32,
    pub misses: u32,
    pub presses: u32,
    pub time_remaining_ms: Option<u64>,
    pub cycles_completed: u32,
    pub boards_completed: u32,
}

impl RoundSummary {
    /// Numeric value used when ranking by `column`.
    pub fn sort_value(&self, column: ExportColumn) -> i64 {
        match column {
            ExportColumn::Total => self.total as i64,
            ExportColumn::BestThrow => self.best_throw as i64,
            ExportColumn::HighestZone => self.highest_zone as i64,
            ExportColumn::BonusPoints => self.bonus_points as i64,
            ExportColumn::Misses => self.misses as i64,
            ExportColumn::TimeRemaining => self.time_remaining_ms.unwrap_or(0) as i64,
            ExportColumn::Cycles => self.cycles_completed as i64,
            ExportColumn::Boards => self.boards_completed as i64,
        }
    }

    /// Text written into an export cell for `column`.
    pub fn cell_value(&self, column: ExportColumn) -> String {
        match column {
            ExportColumn::TimeRemaining => self
                .time_remaining_ms
                .map(format_seconds)
                .unwrap_or_default(),
            other => self.sort_value(other).to_string(),
        }
    }
}

/// Milliseconds as whole seconds with one decimal, e.g. `12.4`.
pub fn format_seconds(ms: u64) -> String {
    format!("{}.{}", ms / 1000, (ms % 1000) / 100)
}
