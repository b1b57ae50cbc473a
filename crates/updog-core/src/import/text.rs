use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Decode imported file bytes to text.
///
/// A byte order mark selects UTF-8 or UTF-16; otherwise UTF-8 is tried and
/// Windows-1252 (the usual spreadsheet export encoding) is the fallback.
pub fn decode_import_bytes(bytes: &[u8]) -> String {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            warn!("Replaced invalid {} sequences in import", encoding.name());
        }
        return text.into_owned();
    }

    let (text, had_errors) = UTF_8.decode_without_bom_handling(bytes);
    if !had_errors {
        return text.into_owned();
    }

    debug!("Import is not valid UTF-8, decoding as Windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// Split CSV text into trimmed rows of cells.
///
/// Rows may have differing lengths; blank lines are skipped.
pub fn csv_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Source of rows for spreadsheet files (xlsx and similar).
///
/// The binary format lives outside this crate; implementations only need
/// to flatten the first sheet into rows of cell text.
pub trait SpreadsheetReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>>;
}

/// Reads CSV bytes through the spreadsheet seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvReader;

impl SpreadsheetReader for CsvReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<Vec<String>>> {
        let text = decode_import_bytes(bytes);
        csv_rows(&text).map_err(|e| match e {
            Error::Csv(e) => Error::Spreadsheet(e.to_string()),
            other => other,
        })
    }
}
