//! LocalStorage-backed high score store (wasm32)

use super::{ScoreStore, StoreError};

/// Keeps the high score under a LocalStorage key as a decimal string
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

impl LocalStorageStore {
    pub const DEFAULT_KEY: &'static str = "hue_drop_high_score";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)
    }
}

impl ScoreStore for LocalStorageStore {
    fn get(&self) -> Result<Option<u32>, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(&self.key)
            .map_err(|_| StoreError::Unavailable)?;
        match raw {
            Some(text) => text
                .trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|e| StoreError::Parse(e.to_string())),
            None => Ok(None),
        }
    }

    fn set(&mut self, value: u32) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(&self.key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|_| StoreError::Unavailable)
    }
}
