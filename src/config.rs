//! Application Configuration
//!
//! Compile-time defaults (`STOREFRONT_API_URL`, `STOREFRONT_LOG_LEVEL`),
//! overridable at runtime through `<meta>` tags in `index.html`.

use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://localhost:3001";
const API_URL_META: &str = "storefront-api-url";
const LOG_LEVEL_META: &str = "storefront-log-level";

/// Stores per list request
pub const PAGE_SIZE: usize = 6;
/// Categories per sidebar page
pub const CATEGORY_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the REST API, without trailing slash
    pub api_base_url: String,
    pub page_size: usize,
    pub category_page_size: usize,
    /// Quiet period before a search keystroke is applied
    pub search_debounce_ms: u32,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(option_env!("STOREFRONT_API_URL").unwrap_or(DEFAULT_API_URL)),
            page_size: PAGE_SIZE,
            category_page_size: CATEGORY_PAGE_SIZE,
            search_debounce_ms: 300,
            log_level: option_env!("STOREFRONT_LOG_LEVEL")
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }
}

impl AppConfig {
    /// Defaults with overrides read from the document's meta tags
    pub fn from_document() -> Self {
        let mut config = Self::default();
        if let Some(url) = meta_content(API_URL_META) {
            config = config.with_api_base_url(&url);
        }
        if let Some(level) = meta_content(LOG_LEVEL_META).and_then(|l| l.parse().ok()) {
            config.log_level = level;
        }
        config
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        if !url.trim().is_empty() {
            self.api_base_url = normalize_base_url(url);
        }
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??;
    meta.get_attribute("content").filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.page_size, 6);
        assert_eq!(config.category_page_size, 8);
        assert!(!config.api_base_url.ends_with('/'));
    }

    #[test]
    fn test_base_url_override() {
        let config = AppConfig::default().with_api_base_url(" https://api.example.com/ ");
        assert_eq!(config.api_base_url, "https://api.example.com");

        let unchanged = config.clone().with_api_base_url("  ");
        assert_eq!(unchanged, config);
    }
}
