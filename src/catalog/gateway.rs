//! Fetch Gateway
//!
//! A page request tagged with the filter generation it was issued under, and
//! the async call that runs it against a `CatalogSource`.

use log::error;

use super::query::ListQuery;
use crate::api::CatalogSource;
use crate::error::{ApiError, ApiResult};
use crate::models::Store;

/// One outstanding list request
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Filter generation at issue time
    pub generation: u64,
    pub page: u32,
    pub query: ListQuery,
}

/// What happened to a completed request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied {
        /// Items returned by the collaborator
        received: usize,
        /// Items kept after local filtering
        shown: usize,
    },
    /// Filter changed while the request was outstanding; result dropped
    Stale,
    /// Request failed; accumulator untouched
    Failed(ApiError),
}

impl FetchOutcome {
    #[cfg(test)]
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// Run the request. Errors are logged here and handed back for completion.
pub async fn execute<C>(source: &C, request: &FetchRequest) -> ApiResult<Vec<Store>>
where
    C: CatalogSource + ?Sized,
{
    let result = source.list_stores(&request.query).await;
    if let Err(e) = &result {
        error!("store list request failed (page {}): {}", request.page, e);
    }
    result
}
