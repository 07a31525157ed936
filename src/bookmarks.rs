//! Bookmark Store
//!
//! User-chosen favorite stores, persisted as a JSON array of ids under
//! `bookmarkedStores`. In-memory state is authoritative between writes.

use log::{error, warn};

use crate::models::{Store, StoreId};
use crate::storage::KeyValueStore;

pub const BOOKMARKS_KEY: &str = "bookmarkedStores";

pub struct BookmarkSet<S: KeyValueStore> {
    /// Insertion order, no duplicates
    ids: Vec<StoreId>,
    storage: S,
}

impl<S: KeyValueStore> BookmarkSet<S> {
    /// Seed from storage. Absent or unreadable data yields an empty set.
    pub fn load(storage: S) -> Self {
        let ids = match storage.get(BOOKMARKS_KEY) {
            None => Vec::new(),
            Some(raw) => decode_ids(&raw).unwrap_or_else(|| {
                warn!("ignoring malformed {} value: {:?}", BOOKMARKS_KEY, raw);
                Vec::new()
            }),
        };
        Self { ids, storage }
    }

    /// Flip membership and persist the whole set. Returns the new membership.
    pub fn toggle(&mut self, id: StoreId) -> bool {
        let bookmarked = match self.ids.iter().position(|&existing| existing == id) {
            Some(index) => {
                self.ids.remove(index);
                false
            }
            None => {
                self.ids.push(id);
                true
            }
        };
        self.persist();
        bookmarked
    }

    pub fn is_bookmarked(&self, id: StoreId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[StoreId] {
        &self.ids
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Keep only bookmarked stores, preserving order
    pub fn retain_bookmarked(&self, stores: Vec<Store>) -> Vec<Store> {
        stores.into_iter().filter(|store| self.is_bookmarked(store.id)).collect()
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.ids) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("failed to encode bookmarks: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set(BOOKMARKS_KEY, &encoded) {
            error!("failed to persist bookmarks: {}", e);
        }
    }
}

/// Decode a persisted id array; numeric strings are accepted.
/// Returns None when the value is not such an array.
fn decode_ids(raw: &str) -> Option<Vec<StoreId>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(raw).ok()?;
    let mut ids: Vec<StoreId> = Vec::with_capacity(values.len());
    for value in values {
        let id = match value {
            serde_json::Value::Number(n) => n.as_u64().and_then(|n| StoreId::try_from(n).ok())?,
            serde_json::Value::String(s) => s.trim().parse().ok()?,
            _ => return None,
        };
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Some(ids)
}
