use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Opaque load/save-by-name text store.
pub trait KeyValueStore {
    fn save(&mut self, key: &str, content: &str) -> Result<()>;

    /// `Ok(None)` when nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Deleting a missing key succeeds.
    fn delete(&mut self, key: &str) -> Result<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key == "." || key == ".." {
            return Err(Error::Storage(format!("invalid key {:?}", key)));
        }
        Ok(self.base_dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn save(&mut self, key: &str, content: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.base_dir)?;
        // Readers never observe a partially written document
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, content: &str) -> Result<()> {
        self.entries.insert(key.to_string(), content.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_temp_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("data"));
        (store, temp_dir)
    }

    #[test]
    fn test_file_store_round_trip() {
        let (mut store, _temp) = create_temp_store();
        store.save("BoomData.json", "{\"a\":1}").unwrap();
        assert_eq!(
            store.load("BoomData.json").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert!(!store.base_dir().join("BoomData.tmp").exists());
    }

    #[test]
    fn test_file_store_missing_key() {
        let (mut store, _temp) = create_temp_store();
        assert!(store.load("FireballData.json").unwrap().is_none());
        assert!(store.delete("FireballData.json").is_ok());
    }

    #[test]
    fn test_file_store_delete() {
        let (mut store, _temp) = create_temp_store();
        store.save("k.json", "x").unwrap();
        store.delete("k.json").unwrap();
        assert!(store.load("k.json").unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_paths() {
        let (mut store, _temp) = create_temp_store();
        assert!(store.save("../escape.json", "x").is_err());
        assert!(store.load("").is_err());
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        store.save("a", "1").unwrap();
        store.save("a", "2").unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("a").unwrap().as_deref(), Some("2"));
        store.delete("a").unwrap();
        assert!(store.is_empty());
    }
}
