//! Export command implementation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use updog_core::export::{CsvTemplateWriter, DirAssetLoader, ExportRow, JsonExport};
use updog_core::storage::ExportArchive;
use updog_core::{Config, GameKind};

use super::open_session;
use crate::cli::ExportFormat;

pub fn run(
    config: &Config,
    game: GameKind,
    format: ExportFormat,
    output: Option<&Path>,
    template: Option<&Path>,
) -> Result<()> {
    let session = open_session(config, game);
    let completed = session.roster().completed();

    let (kind, ext, content): (&str, &str, Vec<u8>) = match format {
        ExportFormat::Csv => ("results", "csv", session.results_csv().into_bytes()),
        ExportFormat::Roster => ("roster", "csv", session.roster_csv().into_bytes()),
        ExportFormat::Rows => {
            let text = format_rows(&session.export_rows());
            ("ranking", "tsv", text.into_bytes())
        }
        ExportFormat::Json => {
            let exports: Vec<JsonExport> = completed
                .iter()
                .map(|entry| JsonExport::new(game, entry))
                .collect();
            ("rounds", "json", serde_json::to_string_pretty(&exports)?.into_bytes())
        }
        ExportFormat::Sheet => {
            let filled = match template {
                Some(path) => {
                    let loader = |_: &str| fs::read(path).ok();
                    session.export_spreadsheet(&loader, &CsvTemplateWriter)?
                }
                None => {
                    let loader = DirAssetLoader::new(".").with_extension("csv");
                    session.export_spreadsheet(&loader, &CsvTemplateWriter)?
                }
            };
            match filled {
                Some(bytes) => ("sheet", "csv", bytes),
                None => {
                    println!("Nothing exported: no completed rounds or template not found");
                    return Ok(());
                }
            }
        }
    };

    let path = match output {
        Some(path) => {
            fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path.to_path_buf()
        }
        None => ExportArchive::new(&config.data_dir).write_bytes(game, kind, ext, &content)?,
    };
    println!(
        "Exported {} completed rounds to {}",
        completed.len(),
        path.display()
    );
    Ok(())
}

/// Ranked rows as `rank, handler, dog, values...` tab separated lines.
fn format_rows(rows: &[ExportRow]) -> String {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![(i + 1).to_string(), row.handler.clone(), row.dog.clone()];
            cells.extend(row.values.iter().map(|(_, v)| v.clone()));
            cells.join("\t") + "\n"
        })
        .collect()
}
