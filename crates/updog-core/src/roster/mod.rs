//! Participant roster.
//!
//! - `Participant` - a handler/dog team
//! - `Roster` - active participant, pending queue and completed rounds

mod participant;
mod queue;

pub use participant::*;
pub use queue::*;
