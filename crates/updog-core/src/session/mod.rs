//! Game session: the single owner of one game's state.
//!
//! Every mutation snapshots the previous `UiState` for undo and persists the
//! whole document afterwards. Invalid input is ignored rather than reported.

mod game;
mod lifecycle;

pub use game::*;
pub use lifecycle::*;
