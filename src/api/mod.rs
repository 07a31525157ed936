//! REST API Bindings
//!
//! Client for the json-server style `stores` and `categories` collections.

mod client;

use async_trait::async_trait;

use crate::catalog::ListQuery;
use crate::error::ApiResult;
use crate::models::{Category, Store, StoreId};

pub use client::StoreApi;

/// Read access to the catalog collaborator
#[async_trait(?Send)]
pub trait CatalogSource {
    /// One page of stores matching `query`
    async fn list_stores(&self, query: &ListQuery) -> ApiResult<Vec<Store>>;

    /// A single store, `None` when it does not exist
    async fn get_store(&self, id: StoreId) -> ApiResult<Option<Store>>;

    /// Categories; a page number limits the response to one sidebar page
    async fn list_categories(&self, page: Option<u32>) -> ApiResult<Vec<Category>>;
}
