use serde::{Deserialize, Serialize};

use crate::rules::GameKind;

/// Phase a Frizgility mark belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    Obstacle,
    Catch,
}

impl PhaseKind {
    pub fn other(&self) -> Self {
        match self {
            Self::Obstacle => Self::Catch,
            Self::Catch => Self::Obstacle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Gated: scores once, then stays disabled until the round resets.
    OneShot,
    /// Always enabled unless capped by `max_count` or the throw limit.
    Repeatable,
    /// Counts as a throw and a miss.
    Miss,
    /// Board cell mark. `bonus` marks score with the board multiplier.
    Cell { zone: u8, bonus: bool },
    /// Mark belonging to one half of a phased game.
    Phase(PhaseKind),
}

#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    pub id: &'static str,
    pub points: i32,
    pub kind: ActionKind,
    pub max_count: Option<u32>,
}

impl ActionSpec {
    pub const fn one_shot(id: &'static str, points: i32) -> Self {
        Self {
            id,
            points,
            kind: ActionKind::OneShot,
            max_count: None,
        }
    }

    pub const fn repeatable(id: &'static str, points: i32) -> Self {
        Self {
            id,
            points,
            kind: ActionKind::Repeatable,
            max_count: None,
        }
    }

    pub const fn capped(id: &'static str, points: i32, max_count: u32) -> Self {
        Self {
            id,
            points,
            kind: ActionKind::Repeatable,
            max_count: Some(max_count),
        }
    }

    pub const fn miss(id: &'static str) -> Self {
        Self {
            id,
            points: 0,
            kind: ActionKind::Miss,
            max_count: None,
        }
    }

    pub const fn cell(id: &'static str, zone: u8, points: i32, bonus: bool) -> Self {
        Self {
            id,
            points,
            kind: ActionKind::Cell { zone, bonus },
            max_count: None,
        }
    }

    pub const fn phase(id: &'static str, points: i32, phase: PhaseKind) -> Self {
        Self {
            id,
            points,
            kind: ActionKind::Phase(phase),
            max_count: None,
        }
    }

    /// Whether the action's availability is tracked by the action gate.
    pub fn is_gated(&self) -> bool {
        matches!(
            self.kind,
            ActionKind::OneShot | ActionKind::Cell { .. } | ActionKind::Phase(_)
        )
    }

    pub fn is_miss(&self) -> bool {
        matches!(self.kind, ActionKind::Miss)
    }
}

/// Boolean bonus that contributes `points` while active.
#[derive(Debug, Clone, Copy)]
pub struct ToggleSpec {
    pub id: &'static str,
    pub points: i32,
}

/// Bonus granted once every listed action has been pressed at least once.
#[derive(Debug, Clone, Copy)]
pub struct SetBonus {
    pub actions: &'static [&'static str],
    pub points: i32,
}

#[derive(Debug, Clone, Copy)]
pub enum Flow {
    /// Every non-gated action is enabled; optional cap on total throws.
    Open { press_limit: Option<u32> },
    /// Fixed successor table over one-shot actions.
    Chain {
        initial: &'static [&'static str],
        unlocks: &'static [(&'static str, &'static str)],
    },
    /// Two alternating phases with a distinct-click quota and a miss cap.
    Phased { quota: usize, miss_cap: u32 },
    /// Board of zones; complete when every zone carries a normal or bonus mark.
    Board { zones: &'static [u8] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRule {
    /// Sum of count * points over every action.
    Sum,
    /// Points of the most valuable action pressed so far.
    HighestReached,
}

/// Derived round value usable as an export column or sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportColumn {
    Total,
    BestThrow,
    HighestZone,
    BonusPoints,
    Misses,
    TimeRemaining,
    Cycles,
    Boards,
}

impl ExportColumn {
    pub fn header(&self) -> &'static str {
        match self {
            Self::Total => "Score",
            Self::BestThrow => "Best Throw",
            Self::HighestZone => "Highest Zone",
            Self::BonusPoints => "Bonus Points",
            Self::Misses => "Misses",
            Self::TimeRemaining => "Time Remaining",
            Self::Cycles => "Cycles",
            Self::Boards => "Boards",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortKey {
    pub column: ExportColumn,
    pub descending: bool,
}

impl SortKey {
    pub const fn desc(column: ExportColumn) -> Self {
        Self {
            column,
            descending: true,
        }
    }

    pub const fn asc(column: ExportColumn) -> Self {
        Self {
            column,
            descending: false,
        }
    }
}

/// Where a game's rows land inside its spreadsheet template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateLayout {
    pub file: &'static str,
    /// Zero-based row of the first participant.
    pub start_row: u32,
    pub handler_col: u32,
    pub dog_col: u32,
    pub columns: &'static [(u32, ExportColumn)],
}

/// Declarative scoring rules for one game.
#[derive(Debug)]
pub struct RuleTable {
    pub game: GameKind,
    pub actions: &'static [ActionSpec],
    pub toggles: &'static [ToggleSpec],
    pub flow: Flow,
    pub score: ScoreRule,
    pub set_bonus: Option<SetBonus>,
    /// Remaining whole seconds at finish are added to the score.
    pub time_bonus: bool,
    pub round_seconds: u32,
    pub undo_depth: usize,
    pub storage_key: &'static str,
    pub sort: &'static [SortKey],
    pub template: TemplateLayout,
}

impl RuleTable {
    pub fn action(&self, id: &str) -> Option<&'static ActionSpec> {
        self.actions.iter().find(|a| a.id == id)
    }

    pub fn toggle(&self, id: &str) -> Option<&'static ToggleSpec> {
        self.toggles.iter().find(|t| t.id == id)
    }

    /// Successor unlocked by pressing `id` in a chain game.
    pub fn successor(&self, id: &str) -> Option<&'static str> {
        match self.flow {
            Flow::Chain { unlocks, .. } => unlocks
                .iter()
                .find(|(from, _)| *from == id)
                .map(|(_, to)| *to),
            _ => None,
        }
    }

    /// Gated actions enabled on a fresh round.
    pub fn initial_enabled(&self) -> Vec<&'static str> {
        match self.flow {
            Flow::Open { .. } => Vec::new(),
            Flow::Chain { initial, .. } => initial.to_vec(),
            Flow::Phased { .. } => self.phase_actions(PhaseKind::Obstacle),
            Flow::Board { .. } => self.cell_actions(),
        }
    }

    pub fn phase_actions(&self, phase: PhaseKind) -> Vec<&'static str> {
        self.actions
            .iter()
            .filter(|a| a.kind == ActionKind::Phase(phase))
            .map(|a| a.id)
            .collect()
    }

    pub fn cell_actions(&self) -> Vec<&'static str> {
        self.actions
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Cell { .. }))
            .map(|a| a.id)
            .collect()
    }

    /// Both marks (normal and bonus) that target `zone`.
    pub fn zone_actions(&self, zone: u8) -> Vec<&'static str> {
        self.actions
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Cell { zone: z, .. } if z == zone))
            .map(|a| a.id)
            .collect()
    }

    pub fn is_chain(&self) -> bool {
        matches!(self.flow, Flow::Chain { .. })
    }
}
