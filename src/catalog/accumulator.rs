//! Page Accumulator
//!
//! Stores loaded so far for the current filter, plus whether the collaborator
//! is believed to have more.

use crate::models::{Store, StoreId};

#[derive(Debug, Clone, PartialEq)]
pub struct PageAccumulator {
    items: Vec<Store>,
    has_more: bool,
}

impl Default for PageAccumulator {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            has_more: true,
        }
    }
}

impl PageAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list, `has_more` back to true
    pub fn reset(&mut self) {
        self.items.clear();
        self.has_more = true;
    }

    /// Store a fetched page.
    ///
    /// `received` is how many items the collaborator returned, before any
    /// local filtering, and decides `has_more`.
    pub fn apply_page(&mut self, page: u32, items: Vec<Store>, received: usize, page_size: usize) {
        if page <= 1 {
            self.items = items;
        } else {
            self.items.extend(items);
        }
        self.has_more = received == page_size;
    }

    pub fn items(&self) -> &[Store] {
        &self.items
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn last_id(&self) -> Option<StoreId> {
        self.items.last().map(|store| store.id)
    }
}
