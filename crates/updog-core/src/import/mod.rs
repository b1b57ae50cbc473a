//! Roster import from CSV text and spreadsheet rows.

mod rows;
mod text;

pub use rows::parse_rows;
pub use text::{CsvReader, SpreadsheetReader, csv_rows, decode_import_bytes};

use tracing::{info, warn};

use crate::roster::Participant;

/// Parse CSV text into participants. Malformed input yields no participants.
pub fn parse_csv(text: &str) -> Vec<Participant> {
    match csv_rows(text) {
        Ok(rows) => parse_rows(&rows),
        Err(e) => {
            warn!("Failed to parse CSV import: {}", e);
            Vec::new()
        }
    }
}

/// Read a roster file through `reader`. Unreadable files yield no participants.
pub fn import_bytes<R: SpreadsheetReader + ?Sized>(reader: &R, bytes: &[u8]) -> Vec<Participant> {
    match reader.read_rows(bytes) {
        Ok(rows) => {
            let participants = parse_rows(&rows);
            info!(
                "Imported {} participants from {} rows",
                participants.len(),
                rows.len()
            );
            participants
        }
        Err(e) => {
            warn!("Failed to read import file: {}", e);
            Vec::new()
        }
    }
}
