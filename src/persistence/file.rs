//! File-backed high score store (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreRecord, ScoreStore, StoreError};

/// Stores the high score as a small JSON file
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for FileStore {
    fn get(&self) -> Result<Option<u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(HighScoreRecord::from_json(&json)?.high_score)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, value: u32) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, HighScoreRecord::new(value).to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("best.json"));
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_set_get_clear() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().join("nested").join("best.json"));
        store.set(17).unwrap();
        assert_eq!(store.get().unwrap(), Some(17));
        assert!(!store.tmp_path().exists());

        store.set(23).unwrap();
        assert_eq!(FileStore::new(store.path()).get().unwrap(), Some(23));

        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "{{{{").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.get(), Err(StoreError::Parse(_))));
    }
}
