//! Routing
//!
//! Path-based view selection plus helpers for the location's query string.

use wasm_bindgen::JsValue;

use crate::models::StoreId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Catalog,
    /// `/store/<id>`
    StoreDetail(StoreId),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Catalog,
            ["store", id] => id.parse().map(Route::StoreDetail).unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    /// Route for the current window location
    pub fn current() -> Self {
        web_sys::window()
            .and_then(|win| win.location().pathname().ok())
            .map(|path| Self::parse(&path))
            .unwrap_or(Route::Catalog)
    }

    pub fn href(&self) -> String {
        match self {
            Route::Catalog | Route::NotFound => "/".to_string(),
            Route::StoreDetail(id) => format!("/store/{}", id),
        }
    }
}

/// `location.search`, including the leading `?` when present
pub fn current_query_string() -> String {
    web_sys::window()
        .and_then(|win| win.location().search().ok())
        .unwrap_or_default()
}

/// Rewrite the query string in place, without a navigation or history entry
pub fn replace_query_string(qs: &str) {
    let Some(win) = web_sys::window() else { return };
    let location = win.location();
    let current = location.search().unwrap_or_default();
    let target = if qs.is_empty() { String::new() } else { format!("?{}", qs) };
    if current == target {
        return;
    }

    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    if let Ok(history) = win.history() {
        let url = format!("{}{}", path, target);
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("failed to update URL: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Catalog);
        assert_eq!(Route::parse(""), Route::Catalog);
        assert_eq!(Route::parse("/store/42"), Route::StoreDetail(42));
        assert_eq!(Route::parse("/store/42/"), Route::StoreDetail(42));
        assert_eq!(Route::parse("/store/abc"), Route::NotFound);
        assert_eq!(Route::parse("/stores"), Route::NotFound);
        assert_eq!(Route::parse("/store/1/edit"), Route::NotFound);
    }

    #[test]
    fn test_href_round_trip() {
        let route = Route::StoreDetail(7);
        assert_eq!(Route::parse(&route.href()), route);
        assert_eq!(Route::Catalog.href(), "/");
    }
}
