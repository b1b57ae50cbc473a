use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::import::{csv_rows, decode_import_bytes};
use crate::roster::CompletedRound;
use crate::rules::{RuleTable, SortKey, TemplateLayout};
use crate::scoring::RoundSummary;

/// One ranked participant, ready to be placed in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub handler: String,
    pub dog: String,
    /// Template column index and cell text, in layout order.
    pub values: Vec<(u32, String)>,
}

/// Compare two rounds by a game's sort keys.
pub fn compare_summaries(keys: &[SortKey], a: &RoundSummary, b: &RoundSummary) -> Ordering {
    keys.iter()
        .map(|key| {
            let ord = a.sort_value(key.column).cmp(&b.sort_value(key.column));
            if key.descending { ord.reverse() } else { ord }
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Completed rounds ranked by the game's sort keys.
///
/// Rounds equal on every key keep completion order.
pub fn ranked<'a>(rules: &RuleTable, entries: &'a [CompletedRound]) -> Vec<&'a CompletedRound> {
    let mut ranked: Vec<&CompletedRound> = entries.iter().collect();
    ranked.sort_by(|a, b| compare_summaries(rules.sort, &a.summary, &b.summary));
    ranked
}

pub fn sorted_export_rows(rules: &RuleTable, entries: &[CompletedRound]) -> Vec<ExportRow> {
    ranked(rules, entries)
        .into_iter()
        .map(|entry| ExportRow {
            handler: entry.participant.handler.clone(),
            dog: entry.participant.dog.clone(),
            values: rules
                .template
                .columns
                .iter()
                .map(|(col, column)| (*col, entry.summary.cell_value(*column)))
                .collect(),
        })
        .collect()
}

/// Fetches template files by path.
pub trait AssetLoader {
    fn load(&self, path: &str) -> Option<Vec<u8>>;
}

impl<F> AssetLoader for F
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    fn load(&self, path: &str) -> Option<Vec<u8>> {
        self(path)
    }
}

/// Loads assets relative to a root directory.
#[derive(Debug, Clone)]
pub struct DirAssetLoader {
    root: PathBuf,
    extension: Option<String>,
}

impl DirAssetLoader {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: None,
        }
    }

    /// Swap the requested file's extension, e.g. to read `Boom.csv` in place
    /// of `Boom.xlsx`.
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = Some(extension.to_string());
        self
    }
}

impl AssetLoader for DirAssetLoader {
    fn load(&self, path: &str) -> Option<Vec<u8>> {
        let mut full = self.root.join(path);
        if let Some(ext) = &self.extension {
            full.set_extension(ext);
        }
        match fs::read(&full) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("Asset {} unavailable: {}", full.display(), e);
                None
            }
        }
    }
}

/// Fills ranked rows into a template at the layout's offsets.
pub trait SpreadsheetWriter {
    fn write_rows(
        &self,
        template: &[u8],
        layout: &TemplateLayout,
        rows: &[ExportRow],
    ) -> Result<Vec<u8>>;
}

/// Writer for templates kept as CSV grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvTemplateWriter;

impl SpreadsheetWriter for CsvTemplateWriter {
    fn write_rows(
        &self,
        template: &[u8],
        layout: &TemplateLayout,
        rows: &[ExportRow],
    ) -> Result<Vec<u8>> {
        let mut grid = csv_rows(&decode_import_bytes(template))?;

        for (i, row) in rows.iter().enumerate() {
            let r = layout.start_row as usize + i;
            if grid.len() <= r {
                grid.resize_with(r + 1, || vec![String::new()]);
            }
            let line = &mut grid[r];
            let cells = [
                (layout.handler_col, row.handler.as_str()),
                (layout.dog_col, row.dog.as_str()),
            ];
            for (col, text) in cells
                .into_iter()
                .chain(row.values.iter().map(|(c, v)| (*c, v.as_str())))
            {
                let c = col as usize;
                if line.len() <= c {
                    line.resize(c + 1, String::new());
                }
                line[c] = text.to_string();
            }
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());
        for line in &grid {
            writer.write_record(line)?;
        }
        writer
            .into_inner()
            .map_err(|e| Error::Spreadsheet(e.to_string()))
    }
}

/// Fill the game's template with ranked rows.
///
/// Returns `Ok(None)` when there is nothing to export or the template
/// cannot be loaded.
pub fn export_spreadsheet<L, W>(
    rules: &RuleTable,
    entries: &[CompletedRound],
    loader: &L,
    writer: &W,
) -> Result<Option<Vec<u8>>>
where
    L: AssetLoader + ?Sized,
    W: SpreadsheetWriter + ?Sized,
{
    if entries.is_empty() {
        debug!("{}: no completed rounds to export", rules.game);
        return Ok(None);
    }
    let Some(template) = loader.load(rules.template.file) else {
        info!("{}: template {} not found", rules.game, rules.template.file);
        return Ok(None);
    };
    let rows = sorted_export_rows(rules, entries);
    writer.write_rows(&template, &rules.template, &rows).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Participant;
    use crate::rules::GameKind;
    use crate::scoring::RoundState;
    use chrono::Utc;

    fn entry(handler: &str, summary: RoundSummary) -> CompletedRound {
        CompletedRound {
            participant: Participant::new(handler, "Dog"),
            round: RoundState::default(),
            summary,
            completed_at: Utc::now(),
        }
    }

    fn handlers(rows: &[ExportRow]) -> Vec<&str> {
        rows.iter().map(|r| r.handler.as_str()).collect()
    }

    #[test]
    fn test_far_out_best_throw_breaks_tie() {
        let entries = [
            entry("A", RoundSummary { total: 100, best_throw: 40, ..Default::default() }),
            entry("B", RoundSummary { total: 100, best_throw: 50, ..Default::default() }),
            entry("C", RoundSummary { total: 120, best_throw: 30, ..Default::default() }),
        ];
        let rows = sorted_export_rows(GameKind::FarOut.rules(), &entries);
        assert_eq!(handlers(&rows), ["C", "B", "A"]);
    }

    #[test]
    fn test_fireball_three_keys() {
        let s = |total, highest_zone, bonus_points| RoundSummary {
            total,
            highest_zone,
            bonus_points,
            ..Default::default()
        };
        let entries = [
            entry("A", s(50, 7, 10)),
            entry("B", s(50, 8, 4)),
            entry("C", s(50, 8, 12)),
        ];
        let rows = sorted_export_rows(GameKind::Fireball.rules(), &entries);
        assert_eq!(handlers(&rows), ["C", "B", "A"]);
    }

    #[test]
    fn test_seven_up_time_breaks_tie() {
        let s = |ms| RoundSummary {
            total: 21,
            time_remaining_ms: Some(ms),
            ..Default::default()
        };
        let entries = [entry("A", s(3_000)), entry("B", s(9_500))];
        let rows = sorted_export_rows(GameKind::SevenUp.rules(), &entries);
        assert_eq!(handlers(&rows), ["B", "A"]);
    }

    #[test]
    fn test_full_tie_keeps_completion_order() {
        let entries = [
            entry("A", RoundSummary::default()),
            entry("B", RoundSummary::default()),
        ];
        let rows = sorted_export_rows(GameKind::Greedy.rules(), &entries);
        assert_eq!(handlers(&rows), ["A", "B"]);
    }

    #[test]
    fn test_missing_template_is_none() {
        let entries = [entry("A", RoundSummary::default())];
        let loader = |_: &str| -> Option<Vec<u8>> { None };
        let out = export_spreadsheet(
            GameKind::Boom.rules(),
            &entries,
            &loader,
            &CsvTemplateWriter,
        )
        .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_empty_list_is_none() {
        let loader = |_: &str| Some(b"x".to_vec());
        let out =
            export_spreadsheet(GameKind::Boom.rules(), &[], &loader, &CsvTemplateWriter).unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn test_dir_loader_extension_swap() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("templates")).unwrap();
        fs::write(temp.path().join("templates/Boom.csv"), "grid").unwrap();

        let plain = DirAssetLoader::new(temp.path());
        assert!(plain.load("templates/Boom.xlsx").is_none());
        let csv = DirAssetLoader::new(temp.path()).with_extension("csv");
        assert_eq!(csv.load("templates/Boom.xlsx"), Some(b"grid".to_vec()));
    }

    #[test]
    fn test_csv_template_offsets() {
        let entries = [
            entry("Low", RoundSummary { total: 5, ..Default::default() }),
            entry("High", RoundSummary { total: 9, ..Default::default() }),
        ];
        let loader = |path: &str| {
            assert_eq!(path, "templates/FunKey.xlsx");
            Some(b"Fun Key Results\nHandler,Dog\n-\n-\n-\n".to_vec())
        };
        let bytes = export_spreadsheet(
            GameKind::FunKey.rules(),
            &entries,
            &loader,
            &CsvTemplateWriter,
        )
        .unwrap()
        .unwrap();
        let grid = csv_rows(&String::from_utf8(bytes).unwrap()).unwrap();
        // start_row 5, handler col 1, dog col 2, score col 3
        assert_eq!(grid.len(), 7);
        assert_eq!(grid[0], ["Fun Key Results"]);
        assert_eq!(grid[5], ["", "High", "Dog", "9"]);
        assert_eq!(grid[6], ["", "Low", "Dog", "5"]);
    }
}
