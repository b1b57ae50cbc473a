//! Export formats for completed rounds.
//!
//! - CSV results and roster text
//! - per-round JSON export documents
//! - ranked rows for spreadsheet templates
//! - colored console views

mod console;
mod json;
mod rows;
mod text;

pub use console::{format_round_console, format_standings_console};
pub use json::{JsonExport, RoundResults};
pub use rows::{
    AssetLoader, CsvTemplateWriter, DirAssetLoader, ExportRow, SpreadsheetWriter,
    compare_summaries, export_spreadsheet, ranked, sorted_export_rows,
};
pub use text::{results_header, results_to_csv, roster_to_csv};
