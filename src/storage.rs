//! Local Key-Value Storage
//!
//! Thin wrapper over `window.localStorage`, behind a trait so bookmark and
//! theme persistence can be tested off the browser.

use crate::error::StorageError;

/// Flat string key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, resolved on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write {
                key: key.to_string(),
                reason: format!("{:?}", e),
            })
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStorage;
