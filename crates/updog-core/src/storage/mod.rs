//! Persistence of game state and exported results.
//!
//! - `KeyValueStore` - opaque load/save-by-name seam (`FileStore`, `MemoryStore`)
//! - `SavedGame` / `UiState` - the JSON document persisted per game
//! - `ExportArchive` - timestamped export files under the data directory

mod archive;
mod snapshot;
mod store;

pub use archive::*;
pub use snapshot::*;
pub use store::*;
