//! Catalog View State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The controller is
//! the source of truth; this store mirrors it for rendering.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::catalog::{CatalogController, FilterState};
use crate::models::{self, Category, StoreId};

/// Rendered catalog state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct CatalogState {
    /// Stores loaded so far for the current filter
    pub items: Vec<models::Store>,
    pub has_more: bool,
    /// A page request is outstanding
    pub loading: bool,
    pub filter: FilterState,
    /// Bookmarked store ids, insertion order
    pub bookmarks: Vec<StoreId>,
    /// Full category list for the filter dropdown
    pub categories: Vec<Category>,
    /// Last collaborator failure, cleared on the next successful page
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type CatalogStore = Store<CatalogState>;

// ========================
// Store Helper Functions
// ========================

/// Copy the controller's observable state into the store
pub fn store_sync_controller(store: &CatalogStore, controller: &CatalogController) {
    store.items().set(controller.items().to_vec());
    store.has_more().set(controller.has_more());
    store.loading().set(controller.is_loading());
    store.filter().set(controller.filter().clone());
}

pub fn store_set_bookmarks(store: &CatalogStore, ids: &[StoreId]) {
    store.bookmarks().set(ids.to_vec());
}

pub fn store_is_bookmarked(store: &CatalogStore, id: StoreId) -> bool {
    store.bookmarks().read().contains(&id)
}
