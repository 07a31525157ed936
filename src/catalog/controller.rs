//! Catalog Controller
//!
//! Owns the filter state, the page accumulator and the scroll trigger.
//! Every reset bumps `generation`; responses from an older generation are
//! dropped. At most one page request is outstanding at a time, and a failed
//! request is never re-issued without a fresh user action.

use log::{debug, info};

use super::accumulator::PageAccumulator;
use super::filter::{FilterState, FilterUpdate};
use super::gateway::{FetchOutcome, FetchRequest};
use super::query::ListQuery;
use super::scroll::ScrollTrigger;
use crate::bookmarks::BookmarkSet;
use crate::error::{ApiResult, FilterError};
use crate::models::{Store, StoreId};
use crate::storage::KeyValueStore;

#[derive(Debug, Clone)]
pub struct CatalogController {
    filter: FilterState,
    accumulator: PageAccumulator,
    trigger: ScrollTrigger,
    generation: u64,
    /// (generation, page) of the outstanding request
    in_flight: Option<(u64, u32)>,
    /// Last page applied under the current generation, 0 before the first
    loaded_page: u32,
    page_size: usize,
    /// Serialized non-page filter fields, mirrored into the URL
    query_string: String,
}

impl CatalogController {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::default(),
            accumulator: PageAccumulator::new(),
            trigger: ScrollTrigger::new(),
            generation: 0,
            in_flight: None,
            loaded_page: 0,
            page_size,
            query_string: String::new(),
        }
    }

    /// Replace the filter with whatever `qs` describes and restart
    pub fn load_from_query_string(&mut self, qs: &str) -> FetchRequest {
        self.filter = FilterState::from_query_string(qs);
        self.reset()
    }

    /// Change one field and restart at page 1
    pub fn set_filter(&mut self, update: FilterUpdate) -> FetchRequest {
        debug!("filter update: {:?}", update);
        self.filter.apply(update);
        self.reset()
    }

    /// `set_filter` addressed by query string key. State is untouched on error.
    pub fn set_filter_by_name(
        &mut self,
        field: &str,
        value: &str,
    ) -> Result<FetchRequest, FilterError> {
        let update = FilterUpdate::parse(field, value)?;
        Ok(self.set_filter(update))
    }

    /// Every field back to default and restart
    pub fn clear_all(&mut self) -> FetchRequest {
        info!("clearing all filters");
        self.filter = FilterState::default();
        self.reset()
    }

    /// Visibility report from the scroll observer
    pub fn on_last_item_visible(&mut self, item: StoreId) -> Option<FetchRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        if !self.trigger.on_visible(item, self.accumulator.has_more()) {
            return None;
        }
        Some(self.advance())
    }

    /// The watched item left the viewport. Scrolling back to it may fetch
    /// again, including after a failed request.
    pub fn on_last_item_hidden(&mut self, item: StoreId) {
        self.trigger.on_hidden(item);
    }

    /// Explicit "load more": no last item to observe, or a retry after failure
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if self.in_flight.is_some() || !self.accumulator.has_more() {
            return None;
        }
        self.trigger.disarm();
        Some(self.advance())
    }

    /// Apply a finished request.
    ///
    /// Page 1 replaces the list, later pages append. With bookmarked-only on,
    /// stores outside `bookmarks` are dropped; `has_more` still reflects the
    /// unfiltered response size.
    pub fn complete<S: KeyValueStore>(
        &mut self,
        request: &FetchRequest,
        result: ApiResult<Vec<Store>>,
        bookmarks: &BookmarkSet<S>,
    ) -> FetchOutcome {
        let current = Some((request.generation, request.page));
        if request.generation != self.generation || self.in_flight != current {
            debug!(
                "dropping stale response (generation {} page {}, current generation {})",
                request.generation, request.page, self.generation
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(items) => {
                let received = items.len();
                let items = if self.filter.bookmarked_only {
                    bookmarks.retain_bookmarked(items)
                } else {
                    items
                };
                let shown = items.len();
                self.accumulator.apply_page(request.page, items, received, self.page_size);
                self.loaded_page = request.page;
                self.trigger.arm(self.accumulator.last_id());
                FetchOutcome::Applied { received, shown }
            }
            Err(e) => {
                // The trigger stays consumed; a retry needs the user to scroll
                // away and back, or to ask for more explicitly
                self.filter.page = self.loaded_page.max(1);
                FetchOutcome::Failed(e)
            }
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn items(&self) -> &[Store] {
        self.accumulator.items()
    }

    pub fn has_more(&self) -> bool {
        self.accumulator.has_more()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn trigger_state(&self) -> super::scroll::TriggerState {
        self.trigger.state()
    }

    fn reset(&mut self) -> FetchRequest {
        self.filter.page = 1;
        self.accumulator.reset();
        self.trigger.disarm();
        self.generation += 1;
        self.loaded_page = 0;
        self.query_string = self.filter.to_query_string();
        self.issue(1)
    }

    fn advance(&mut self) -> FetchRequest {
        self.filter.page = self.loaded_page + 1;
        self.issue(self.filter.page)
    }

    fn issue(&mut self, page: u32) -> FetchRequest {
        self.in_flight = Some((self.generation, page));
        FetchRequest {
            generation: self.generation,
            page,
            query: ListQuery::build(&self.filter, page, self.page_size),
        }
    }
}
