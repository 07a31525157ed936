//! Catalog Scenario Tests
//!
//! Drives `CatalogController` end to end against a scripted in-memory source.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;

use super::scroll::TriggerState;
use super::*;
use crate::api::CatalogSource;
use crate::bookmarks::{BookmarkSet, BOOKMARKS_KEY};
use crate::error::{ApiError, ApiResult};
use crate::models::{make_store, Category, Store, StoreId, StoreStatus};
use crate::storage::MemoryStorage;

const PAGE: usize = 6;

/// Replays queued list responses and records every query it receives
#[derive(Default)]
struct ScriptedSource {
    responses: RefCell<VecDeque<ApiResult<Vec<Store>>>>,
    queries: RefCell<Vec<ListQuery>>,
}

impl ScriptedSource {
    fn push(&self, response: ApiResult<Vec<Store>>) {
        self.responses.borrow_mut().push_back(response);
    }
}

#[async_trait(?Send)]
impl CatalogSource for ScriptedSource {
    async fn list_stores(&self, query: &ListQuery) -> ApiResult<Vec<Store>> {
        self.queries.borrow_mut().push(query.clone());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn get_store(&self, _id: StoreId) -> ApiResult<Option<Store>> {
        Ok(None)
    }

    async fn list_categories(&self, _page: Option<u32>) -> ApiResult<Vec<Category>> {
        Ok(Vec::new())
    }
}

fn stores(ids: &[StoreId]) -> Vec<Store> {
    ids.iter().map(|&id| make_store(id, &format!("Store {}", id))).collect()
}

fn ids(controller: &CatalogController) -> Vec<StoreId> {
    controller.items().iter().map(|s| s.id).collect()
}

fn no_bookmarks() -> BookmarkSet<MemoryStorage> {
    BookmarkSet::load(MemoryStorage::default())
}

fn transport_error() -> ApiError {
    ApiError::Transport {
        url: "http://api.test/stores".to_string(),
        reason: "offline".to_string(),
    }
}

#[test]
fn test_set_filter_resets_page_and_items() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let first = controller.clear_all();
    controller.complete(&first, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    let next = controller.on_last_item_visible(6).unwrap();
    assert_eq!(next.page, 2);
    assert_eq!(controller.filter().page, 2);

    let request = controller.set_filter(FilterUpdate::PromotedOnly(true));

    assert_eq!(request.page, 1);
    assert_eq!(controller.filter().page, 1);
    assert!(controller.items().is_empty());
    assert!(controller.has_more());
    assert!(controller.is_loading());
    assert_eq!(controller.query_string(), "promoted=1");
    assert_eq!(controller.trigger_state(), TriggerState::Idle);
}

#[test]
fn test_infinite_scroll_until_short_page() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);

    let first = controller.clear_all();
    let outcome = controller.complete(&first, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    assert_eq!(outcome, FetchOutcome::Applied { received: 6, shown: 6 });
    assert!(controller.has_more());
    assert_eq!(controller.trigger_state(), TriggerState::Armed { item: 6, fired: false });

    let second = controller.on_last_item_visible(6).expect("full page should advance");
    assert_eq!(second.page, 2);
    assert!(second.query.has_param("_page", "2"));
    // Same arm event, request outstanding
    assert!(controller.on_last_item_visible(6).is_none());

    controller.complete(&second, Ok(stores(&[7, 8, 9])), &bookmarks);
    assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
    assert!(!controller.has_more());

    // Re-armed on the new last item, but nothing more to load
    assert_eq!(controller.trigger_state(), TriggerState::Armed { item: 9, fired: false });
    assert!(controller.on_last_item_visible(9).is_none());
    assert!(controller.load_more().is_none());
}

#[test]
fn test_stale_page_one_is_dropped() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);

    let old = controller.set_filter(FilterUpdate::Category(Some(1)));
    let new = controller.set_filter(FilterUpdate::Category(Some(2)));
    assert!(new.generation > old.generation);

    let applied = controller.complete(&new, Ok(stores(&[20, 21])), &bookmarks);
    assert!(applied.is_applied());

    let late = controller.complete(&old, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    assert_eq!(late, FetchOutcome::Stale);
    assert_eq!(ids(&controller), vec![20, 21]);
    assert!(!controller.has_more());
}

#[test]
fn test_stale_response_before_newer_one_arrives() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);

    let old = controller.set_filter(FilterUpdate::Search("ama".to_string()));
    let _new = controller.set_filter(FilterUpdate::Search("amaz".to_string()));

    assert_eq!(controller.complete(&old, Ok(stores(&[1])), &bookmarks), FetchOutcome::Stale);
    assert!(controller.items().is_empty());
    assert!(controller.is_loading());
}

#[test]
fn test_duplicate_completion_is_ignored() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let request = controller.clear_all();

    controller.complete(&request, Ok(stores(&[1, 2])), &bookmarks);
    let again = controller.complete(&request, Ok(stores(&[9])), &bookmarks);
    assert_eq!(again, FetchOutcome::Stale);
    assert_eq!(ids(&controller), vec![1, 2]);
}

#[test]
fn test_clear_all_is_idempotent() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let request = controller.load_from_query_string("?sort=popular&alpha=B&bookmarked=1");
    controller.complete(&request, Ok(stores(&[1, 2, 3])), &bookmarks);

    let snapshot = |c: &CatalogController| {
        (
            c.filter().clone(),
            ids(c),
            c.has_more(),
            c.query_string().to_string(),
        )
    };

    controller.clear_all();
    let once = snapshot(&controller);
    controller.clear_all();
    let twice = snapshot(&controller);

    assert_eq!(once, twice);
    assert_eq!(once.0, FilterState::default());
    assert_eq!(once.3, "");
    assert!(once.2);
}

#[test]
fn test_bookmarked_only_filters_locally() {
    let storage = MemoryStorage::with_entry(BOOKMARKS_KEY, "[5, 9]");
    let bookmarks = BookmarkSet::load(storage);
    let mut controller = CatalogController::new(PAGE);

    let request = controller.set_filter(FilterUpdate::BookmarkedOnly(true));
    // Bookmark membership is never sent to the server
    assert!(request.query.filters.is_empty());

    let outcome = controller.complete(&request, Ok(stores(&[5, 6, 9, 10])), &bookmarks);
    assert_eq!(outcome, FetchOutcome::Applied { received: 4, shown: 2 });
    assert_eq!(ids(&controller), vec![5, 9]);
}

#[test]
fn test_bookmark_filter_keeps_paging_on_full_response() {
    let storage = MemoryStorage::with_entry(BOOKMARKS_KEY, "[3]");
    let bookmarks = BookmarkSet::load(storage);
    let mut controller = CatalogController::new(PAGE);

    let request = controller.set_filter(FilterUpdate::BookmarkedOnly(true));
    controller.complete(&request, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    assert_eq!(ids(&controller), vec![3]);
    assert!(controller.has_more());
    assert_eq!(controller.on_last_item_visible(3).map(|r| r.page), Some(2));
}

#[test]
fn test_failure_leaves_items_and_does_not_refire() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let first = controller.clear_all();
    controller.complete(&first, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);

    let second = controller.on_last_item_visible(6).unwrap();
    let outcome = controller.complete(&second, Err(transport_error()), &bookmarks);
    assert!(matches!(outcome, FetchOutcome::Failed(ApiError::Transport { .. })));
    assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(controller.filter().page, 1);
    assert!(!controller.is_loading());
    assert_eq!(controller.trigger_state(), TriggerState::Armed { item: 6, fired: true });

    // Observer re-reports the still-visible card: nothing is issued
    for _ in 0..50 {
        assert!(controller.on_last_item_visible(6).is_none());
    }
    assert!(!controller.is_loading());
}

#[test]
fn test_retry_after_scrolling_away_and_back() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let first = controller.clear_all();
    controller.complete(&first, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    let second = controller.on_last_item_visible(6).unwrap();
    controller.complete(&second, Err(transport_error()), &bookmarks);

    controller.on_last_item_hidden(6);
    let retry = controller.on_last_item_visible(6).expect("new intersection after scrolling");
    assert_eq!(retry.page, 2);

    controller.complete(&retry, Err(transport_error()), &bookmarks);
    assert!(controller.on_last_item_visible(6).is_none());
}

#[test]
fn test_load_more_retries_failed_page() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let first = controller.clear_all();
    controller.complete(&first, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    let second = controller.on_last_item_visible(6).unwrap();
    controller.complete(&second, Err(transport_error()), &bookmarks);

    let retry = controller.load_more().expect("explicit retry");
    assert_eq!(retry.page, 2);
    controller.complete(&retry, Ok(stores(&[7, 8])), &bookmarks);
    assert_eq!(ids(&controller), vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_load_more_after_failed_first_page_asks_for_page_one() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let request = controller.clear_all();
    controller.complete(&request, Err(transport_error()), &bookmarks);

    let retry = controller.load_more().expect("explicit retry");
    assert_eq!(retry.page, 1);
    assert!(retry.query.has_param("_page", "1"));
}

#[test]
fn test_failed_first_page_keeps_empty_list() {
    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);
    let request = controller.set_filter(FilterUpdate::Status(Some(StoreStatus::Draft)));
    controller.complete(&request, Err(transport_error()), &bookmarks);
    assert!(controller.items().is_empty());
    assert_eq!(controller.trigger_state(), TriggerState::Idle);
    assert_eq!(controller.filter().page, 1);
}

#[test]
fn test_set_filter_by_name() {
    let mut controller = CatalogController::new(PAGE);
    controller.clear_all();
    let generation = controller.generation();

    assert!(matches!(
        controller.set_filter_by_name("colour", "red"),
        Err(crate::error::FilterError::UnknownField(_))
    ));
    assert!(controller.set_filter_by_name("sort", "sideways").is_err());
    assert_eq!(controller.generation(), generation);

    let request = controller.set_filter_by_name("sort", "cashback").unwrap();
    assert!(request.query.has_param("cashback_enabled", "1"));
    assert!(request.query.has_param("_sort", "cashback_percent"));
    assert!(request.query.has_param("_order", "desc"));
    assert_eq!(controller.query_string(), "sort=cashback");
}

#[test]
fn test_load_from_query_string() {
    let mut controller = CatalogController::new(PAGE);
    let request = controller.load_from_query_string("alpha=0-9&search=eleven&ref=home");

    assert_eq!(controller.filter().alpha, Some(AlphaFilter::Digits));
    assert_eq!(controller.query_string(), "alpha=0-9&search=eleven");
    assert!(request.query.has_param("name_like", "^[0-9]"));
    assert!(request.query.has_param("name_like", "eleven"));
}

#[test]
fn test_load_more_without_visible_item() {
    let storage = MemoryStorage::with_entry(BOOKMARKS_KEY, "[99]");
    let bookmarks = BookmarkSet::load(storage);
    let mut controller = CatalogController::new(PAGE);

    let request = controller.set_filter(FilterUpdate::BookmarkedOnly(true));
    controller.complete(&request, Ok(stores(&[1, 2, 3, 4, 5, 6])), &bookmarks);
    assert!(controller.items().is_empty());
    assert_eq!(controller.trigger_state(), TriggerState::Idle);

    let next = controller.load_more().expect("server still has pages");
    assert_eq!(next.page, 2);
    assert!(controller.load_more().is_none());
}

#[tokio::test]
async fn test_execute_against_source() {
    let source = ScriptedSource::default();
    source.push(Ok(stores(&[1, 2, 3, 4, 5, 6])));
    source.push(Err(transport_error()));

    let bookmarks = no_bookmarks();
    let mut controller = CatalogController::new(PAGE);

    let request = controller.set_filter(FilterUpdate::Sort(SortOption::NameAsc));
    let result = execute(&source, &request).await;
    assert!(controller.complete(&request, result, &bookmarks).is_applied());

    let next = controller.on_last_item_visible(6).unwrap();
    let result = execute(&source, &next).await;
    assert!(matches!(controller.complete(&next, result, &bookmarks), FetchOutcome::Failed(_)));

    let queries = source.queries.borrow();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[0].to_query_string(), "_page=1&_limit=6&_sort=name&_order=asc");
    assert_eq!(queries[1].page, 2);
    assert_eq!(controller.items().len(), 6);
}
