//! Scoring state machine.
//!
//! This module contains the per-round scoring types:
//! - `RoundState` - action counts, toggles and gating for the active round
//! - `ActionGate` - clicked/enabled sets for gated actions
//! - `PhaseTracker` - Obstacle ⇄ Catch machine for phased games
//! - `BoardState` - board marks for coverage games
//! - `RoundSummary` - derived aggregates used by exports

mod board;
mod gate;
mod phase;
mod round;
mod summary;

pub use board::*;
pub use gate::*;
pub use phase::*;
pub use round::*;
pub use summary::*;
