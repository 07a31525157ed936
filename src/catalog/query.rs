//! List Query Builder
//!
//! Translates a `FilterState` and page number into json-server query
//! parameters for the `stores` collection.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::filter::{FilterState, SortOption};

const PARAM_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
}

/// One request against the list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: usize,
    pub sort: Option<(&'static str, Order)>,
    /// Equality / `_like` constraints in the order they are sent
    pub filters: Vec<(&'static str, String)>,
}

impl ListQuery {
    pub fn build(filter: &FilterState, page: u32, limit: usize) -> Self {
        let sort = match filter.sort {
            SortOption::Default => None,
            SortOption::NameAsc => Some(("name", Order::Asc)),
            SortOption::NameDesc => Some(("name", Order::Desc)),
            SortOption::Popular => Some(("visits", Order::Desc)),
            SortOption::Cashback => Some(("cashback_percent", Order::Desc)),
        };

        let mut filters = Vec::new();
        if let Some(category) = filter.category {
            filters.push(("cats", category.to_string()));
        }
        if let Some(alpha) = filter.alpha {
            filters.push(("name_like", alpha.name_pattern()));
        }
        let term = filter.search.trim();
        if !term.is_empty() {
            filters.push(("name_like", term.to_string()));
        }
        if let Some(status) = filter.status {
            filters.push(("status", status.as_str().to_string()));
        }
        // Cashback sort only makes sense over cashback-enabled stores
        if filter.cashback_only || filter.sort == SortOption::Cashback {
            filters.push(("cashback_enabled", "1".to_string()));
        }
        if filter.promoted_only {
            filters.push(("is_promoted", "1".to_string()));
        }
        if filter.shareable_only {
            filters.push(("is_shareable", "1".to_string()));
        }

        Self {
            page: page.max(1),
            limit,
            sort,
            filters,
        }
    }

    /// All parameters as key/value pairs, pagination first
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("_page", self.page.to_string()), ("_limit", self.limit.to_string())];
        if let Some((field, order)) = self.sort {
            params.push(("_sort", field.to_string()));
            params.push(("_order", order.as_str().to_string()));
        }
        params.extend(self.filters.iter().cloned());
        params
    }

    /// Encoded query string, used for logging and for building the URL
    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, utf8_percent_encode(&value, PARAM_VALUE)))
            .collect::<Vec<_>>()
            .join("&")
    }

    #[cfg(test)]
    pub fn has_param(&self, key: &str, value: &str) -> bool {
        self.params().iter().any(|(k, v)| *k == key && v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::{AlphaFilter, FilterUpdate};
    use crate::models::StoreStatus;

    fn state(updates: Vec<FilterUpdate>) -> FilterState {
        let mut state = FilterState::default();
        for update in updates {
            state.apply(update);
        }
        state
    }

    #[test]
    fn test_default_query_is_pagination_only() {
        let query = ListQuery::build(&FilterState::default(), 1, 6);
        assert_eq!(query.to_query_string(), "_page=1&_limit=6");
    }

    #[test]
    fn test_name_sorts() {
        let asc = ListQuery::build(&state(vec![FilterUpdate::Sort(SortOption::NameAsc)]), 2, 6);
        assert_eq!(asc.to_query_string(), "_page=2&_limit=6&_sort=name&_order=asc");

        let desc = ListQuery::build(&state(vec![FilterUpdate::Sort(SortOption::NameDesc)]), 1, 6);
        assert!(desc.has_param("_order", "desc"));
    }

    #[test]
    fn test_popular_sorts_by_visits_desc() {
        let query = ListQuery::build(&state(vec![FilterUpdate::Sort(SortOption::Popular)]), 1, 6);
        assert_eq!(query.sort, Some(("visits", Order::Desc)));
    }

    #[test]
    fn test_cashback_sort_forces_cashback_filter() {
        for checkbox in [false, true] {
            let filter = state(vec![
                FilterUpdate::Sort(SortOption::Cashback),
                FilterUpdate::CashbackOnly(checkbox),
            ]);
            let query = ListQuery::build(&filter, 1, 6);
            assert!(query.has_param("_sort", "cashback_percent"));
            assert!(query.has_param("_order", "desc"));
            let enabled = query.params().iter().filter(|(k, _)| *k == "cashback_enabled").count();
            assert_eq!(enabled, 1, "cashback filter must be sent exactly once");
        }
    }

    #[test]
    fn test_alpha_and_search_are_independent_constraints() {
        let filter = state(vec![
            FilterUpdate::Alpha(Some(AlphaFilter::Digits)),
            FilterUpdate::Search("eleven".to_string()),
        ]);
        let query = ListQuery::build(&filter, 1, 6);
        let name_likes: Vec<_> = query
            .filters
            .iter()
            .filter(|(k, _)| *k == "name_like")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(name_likes, vec!["^[0-9]", "eleven"]);
        assert!(query.to_query_string().contains("name_like=%5E%5B0-9%5D"));
    }

    #[test]
    fn test_equality_filters_only_when_set() {
        let filter = state(vec![
            FilterUpdate::Category(Some(4)),
            FilterUpdate::Status(Some(StoreStatus::Published)),
            FilterUpdate::PromotedOnly(true),
            FilterUpdate::ShareableOnly(true),
            FilterUpdate::BookmarkedOnly(true),
            FilterUpdate::Search("   ".to_string()),
        ]);
        let query = ListQuery::build(&filter, 1, 6);
        assert_eq!(
            query.filters,
            vec![
                ("cats", "4".to_string()),
                ("status", "publish".to_string()),
                ("is_promoted", "1".to_string()),
                ("is_shareable", "1".to_string()),
            ]
        );
    }
}
