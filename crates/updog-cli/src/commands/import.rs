//! Import command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use updog_core::{Config, CsvReader, GameKind};

use super::open_session;

pub fn run(config: &Config, game: GameKind, file: &Path) -> Result<()> {
    let is_workbook = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx") || e.eq_ignore_ascii_case("xls"));
    if is_workbook {
        bail!("Spreadsheet workbooks are not readable here; save the sheet as CSV first");
    }

    let bytes = fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let mut session = open_session(config, game);
    let added = session.import_file(&CsvReader, &bytes);

    if added == 0 {
        println!("No teams found in {}", file.display());
    } else {
        println!("Imported {} teams into {}", added, game);
        if let Some(active) = session.active() {
            println!("Up now: {}", active);
        }
    }
    Ok(())
}
