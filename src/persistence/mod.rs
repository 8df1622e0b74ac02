//! High score persistence
//!
//! The game treats storage as an opaque durable integer:
//! - `MemoryStore` for tests and headless runs
//! - `FileStore` (native) with a versioned JSON envelope
//! - `LocalStorageStore` (wasm32) keyed in the browser's LocalStorage

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Errors a store backend can report
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt high score record: {0}")]
    Parse(String),

    #[error("Unsupported record version {0}")]
    UnsupportedVersion(u32),

    #[error("Storage unavailable")]
    Unavailable,
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Parse(err.to_string())
    }
}

/// Durable storage for the single best-score value
pub trait ScoreStore {
    /// Stored value, `Ok(None)` when nothing has been saved yet
    fn get(&self) -> Result<Option<u32>, StoreError>;
    fn set(&mut self, value: u32) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value) }
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn set(&mut self, value: u32) -> Result<(), StoreError> {
        self.value = Some(value);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.value = None;
        Ok(())
    }
}

/// Record format version written by `FileStore`
pub const RECORD_VERSION: u32 = 1;

/// On-disk envelope for the high score
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HighScoreRecord {
    pub version: u32,
    pub high_score: u32,
}

impl HighScoreRecord {
    pub fn new(high_score: u32) -> Self {
        Self {
            version: RECORD_VERSION,
            high_score,
        }
    }

    /// Parse and validate a serialized record
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let record: HighScoreRecord = serde_json::from_str(json)?;
        if record.version != RECORD_VERSION {
            return Err(StoreError::UnsupportedVersion(record.version));
        }
        Ok(record)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get().unwrap(), None);
        store.set(12).unwrap();
        assert_eq!(store.get().unwrap(), Some(12));
        store.clear().unwrap();
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_record_rejects_garbage() {
        assert!(matches!(
            HighScoreRecord::from_json("not json"),
            Err(StoreError::Parse(_))
        ));
        assert!(matches!(
            HighScoreRecord::from_json(r#"{"version":1,"high_score":-4}"#),
            Err(StoreError::Parse(_))
        ));
    }

    #[test]
    fn test_record_rejects_unknown_version() {
        assert!(matches!(
            HighScoreRecord::from_json(r#"{"version":9,"high_score":4}"#),
            Err(StoreError::UnsupportedVersion(9))
        ));
    }

    #[test]
    fn test_record_reads_current_version() {
        let record = HighScoreRecord::from_json(r#"{"version":1,"high_score":42}"#).unwrap();
        assert_eq!(record, HighScoreRecord::new(42));
    }
}
