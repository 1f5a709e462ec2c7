use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage backend for the serialized task collection
///
/// `load` swallows read errors and reports absence instead; `save` is
/// best-effort and the store only logs its failures.
pub trait Storage {
    fn load(&self) -> Option<String>;
    fn save(&self, blob: &str) -> Result<()>;
}

/// File-backed storage, one JSON document per store
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_file_returns_none() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp.path().join("tasks.json"));
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp.path().join("nested").join("dir").join("tasks.json"));

        storage.save("[]").unwrap();
        assert_eq!(storage.load().as_deref(), Some("[]"));
    }

    #[test]
    fn test_save_overwrites_previous_blob() {
        let temp = TempDir::new().unwrap();
        let storage = JsonFileStorage::new(temp.path().join("tasks.json"));

        storage.save("first").unwrap();
        storage.save("second").unwrap();
        assert_eq!(storage.load().as_deref(), Some("second"));
    }
}
