use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::config::storage;
use crate::error::Result;
use crate::export::JsonExport;
use crate::rules::GameKind;

/// Timestamped export files under `<data_dir>/exports`.
pub struct ExportArchive {
    base_dir: PathBuf,
}

impl ExportArchive {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            base_dir: data_dir.as_ref().join(storage::EXPORT_DIR),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Write one round's JSON export, named after the game and team.
    pub fn write_json(&self, game: GameKind, export: &JsonExport) -> Result<PathBuf> {
        let team = format!(
            "{}_{}",
            export.participant_data.handler, export.participant_data.dog
        );
        let path = self.next_path(game, &team, "json")?;
        fs::write(&path, export.to_json_pretty()?)?;
        info!("Wrote round export {}", path.display());
        Ok(path)
    }

    /// Write a CSV or other text export, e.g. `kind = "results"`.
    pub fn write_text(
        &self,
        game: GameKind,
        kind: &str,
        ext: &str,
        content: &str,
    ) -> Result<PathBuf> {
        self.write_bytes(game, kind, ext, content.as_bytes())
    }

    pub fn write_bytes(
        &self,
        game: GameKind,
        kind: &str,
        ext: &str,
        content: &[u8],
    ) -> Result<PathBuf> {
        let path = self.next_path(game, kind, ext)?;
        fs::write(&path, content)?;
        info!("Wrote {} export {}", kind, path.display());
        Ok(path)
    }

    fn next_path(&self, game: GameKind, label: &str, ext: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.base_dir)?;
        let now: DateTime<Local> = Local::now();
        let stem = format!(
            "{}_{}_{}",
            file_safe(game.display_name()),
            file_safe(label),
            now.format("%Y_%m_%d_%H_%M_%S")
        );

        let mut path = self.base_dir.join(format!("{}.{}", stem, ext));
        let mut n = 2;
        while path.exists() {
            path = self.base_dir.join(format!("{}_{}.{}", stem, n, ext));
            n += 1;
        }
        Ok(path)
    }
}

/// Keep letters, digits, `-` and `_`; drop everything else.
fn file_safe(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{CompletedRound, Participant};
    use crate::scoring::{RoundState, RoundSummary};
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_temp_archive() -> (ExportArchive, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let archive = ExportArchive::new(temp_dir.path());
        (archive, temp_dir)
    }

    #[test]
    fn test_exports_dir_under_data_dir() {
        let (archive, temp) = create_temp_archive();
        assert_eq!(archive.base_dir(), temp.path().join("exports"));
    }

    #[test]
    fn test_write_json() {
        let (archive, _temp) = create_temp_archive();
        let entry = CompletedRound {
            participant: Participant::new("Jo Smith", "Comet/2"),
            round: RoundState::default(),
            summary: RoundSummary::default(),
            completed_at: Utc::now(),
        };
        let export = JsonExport::new(GameKind::FarOut, &entry);
        let path = archive.write_json(GameKind::FarOut, &export).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("FarOut_JoSmith_Comet2_"));
        assert_eq!(path.extension().unwrap(), "json");

        let content = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["gameMode"], "Far Out");
    }

    #[test]
    fn test_same_second_writes_do_not_collide() {
        let (archive, _temp) = create_temp_archive();
        let a = archive.write_text(GameKind::Boom, "results", "csv", "a").unwrap();
        let b = archive.write_text(GameKind::Boom, "results", "csv", "b").unwrap();
        assert_ne!(a, b);
        assert_eq!(fs::read_to_string(a).unwrap(), "a");
        assert_eq!(fs::read_to_string(b).unwrap(), "b");
    }
}
