//! Game definitions and their declarative rule tables.
//!
//! - `GameKind` - the supported games
//! - `RuleTable` - actions, toggles, unlock/phase/board flow, sort keys
//! - `tables` - one static table per game

mod game;
pub mod tables;
mod types;

pub use game::*;
pub use types::*;
