//! HTTP client over reqwest (browser fetch on wasm)

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::CatalogSource;
use crate::catalog::ListQuery;
use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::{Category, Store, StoreId};

#[derive(Debug, Clone)]
pub struct StoreApi {
    client: Client,
    base_url: String,
    category_page_size: usize,
}

impl StoreApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            category_page_size: config.category_page_size,
        }
    }

    pub fn stores_url(&self, query: &ListQuery) -> String {
        format!("{}/stores?{}", self.base_url, query.to_query_string())
    }

    pub fn store_url(&self, id: StoreId) -> String {
        format!("{}/stores/{}", self.base_url, id)
    }

    pub fn categories_url(&self, page: Option<u32>) -> String {
        match page {
            Some(page) => format!(
                "{}/categories?_page={}&_limit={}",
                self.base_url,
                page.max(1),
                self.category_page_size
            ),
            None => format!("{}/categories", self.base_url),
        }
    }

    /// GET and decode; `Ok(None)` on 404
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ApiResult<Option<T>> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        decode_body(url, &body).map(Some)
    }

    /// Like `get_json` but a 404 is an error
    async fn get_required<T: DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        self.get_json(url).await?.ok_or_else(|| ApiError::Status {
            url: url.to_string(),
            status: StatusCode::NOT_FOUND.as_u16(),
        })
    }
}

#[async_trait(?Send)]
impl CatalogSource for StoreApi {
    async fn list_stores(&self, query: &ListQuery) -> ApiResult<Vec<Store>> {
        let url = self.stores_url(query);
        let stores: Vec<Store> = self.get_required(&url).await?;
        debug!("loaded {} stores (page {})", stores.len(), query.page);
        Ok(stores)
    }

    async fn get_store(&self, id: StoreId) -> ApiResult<Option<Store>> {
        self.get_json(&self.store_url(id)).await
    }

    async fn list_categories(&self, page: Option<u32>) -> ApiResult<Vec<Category>> {
        self.get_required(&self.categories_url(page)).await
    }
}

fn decode_body<T: DeserializeOwned>(url: &str, body: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
