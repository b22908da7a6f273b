//! HTTP-backed food repository
//!
//! Orchestrates cache lookups and network fetches for list and detail
//! queries. A live cache entry answers immediately with no network traffic;
//! a miss POSTs to the API, classifies the status code, decodes the body and
//! caches only successful decodes. Failures are never cached, so every
//! subsequent identical query retries against the network.
//!
//! Two concurrent misses on the same key may both fetch and both write, last
//! write wins; in-flight requests are not coalesced. A caller that drops the
//! future mid-flight performs no cache write.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::cache::{self, TtlCache};
use crate::config;
use crate::data::{FoodDetailResponse, FoodListResponse, FoodQuery};

/// Errors that can occur when querying the food API
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The configured endpoint does not form a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized
    #[error("failed to encode request body: {0}")]
    Encoding(serde_json::Error),

    /// The response body did not match the expected shape
    #[error("failed to decode response body: {0}")]
    Decoding(serde_json::Error),

    /// Server rejected the request with HTTP 401
    #[error("unauthorized (HTTP 401)")]
    Unauthorized,

    /// Server rejected the request with HTTP 403
    #[error("forbidden (HTTP 403)")]
    Forbidden,

    /// Server answered with HTTP 404
    #[error("not found (HTTP 404)")]
    NotFound,

    /// Server answered with an unexpected status code
    #[error("server returned status code {0}")]
    Server(u16),

    /// The request produced no HTTP response at all
    #[error("transport failure: {0}")]
    Transport(reqwest::Error),
}

/// Repository serving food list and detail queries through a TTL cache
///
/// The caches are owned by the repository instance and injected at
/// construction time; there is no process-wide state. Cache lookups and key
/// construction are synchronous; the network call is the only suspension
/// point.
#[derive(Debug, Clone)]
pub struct FoodRepository {
    /// HTTP client for making requests
    http: Client,
    /// Base URL for the API (overridable for testing)
    base_url: String,
    /// Cache for list query responses
    list_cache: TtlCache<FoodListResponse>,
    /// Cache for detail query responses
    detail_cache: TtlCache<FoodDetailResponse>,
}

impl FoodRepository {
    /// Creates a repository with the default API endpoint and cache bounds
    pub fn new() -> Self {
        Self::with_base_url(config::BASE_URL)
    }

    /// Creates a repository against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_caches(
            base_url,
            TtlCache::with_capacity(config::CACHE_CAPACITY),
            TtlCache::with_capacity(config::CACHE_CAPACITY),
        )
    }

    /// Creates a repository with externally constructed caches
    ///
    /// Useful when a test wants to pre-populate or inspect the caches.
    pub fn with_caches(
        base_url: impl Into<String>,
        list_cache: TtlCache<FoodListResponse>,
        detail_cache: TtlCache<FoodDetailResponse>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            list_cache,
            detail_cache,
        }
    }

    /// Loads one page of foods matching the query
    ///
    /// The all-categories sentinel (empty `types`) is expanded to the full
    /// enumerated category list before the cache key and request body are
    /// built. A fresh 200 response is cached for five minutes under the
    /// expanded query's key.
    pub async fn list_foods(&self, query: &FoodQuery) -> Result<FoodListResponse, RepositoryError> {
        let query = expand_categories(query);
        let key = cache::list_key(&query);

        if let Some(answer) = self.list_cache.get(&key) {
            debug!(key = %key, "list cache hit");
            return Ok(answer);
        }

        let body = json!({
            "page": query.page,
            "sort": query.sort,
            "sortOrder": query.sort_order.as_str(),
            "types": query.types,
            "search": query.search,
            "nutrients": query.nutrients,
        });
        let answer: FoodListResponse = self.post_json(config::FOOD_LIST_PATH, &body).await?;

        self.list_cache
            .set_with_ttl(&key, answer.clone(), config::CACHE_TTL_SECS);
        Ok(answer)
    }

    /// Loads the full nutrient breakdown for one food
    pub async fn get_food_detail(
        &self,
        fdc_id: i64,
    ) -> Result<FoodDetailResponse, RepositoryError> {
        let key = cache::detail_key(fdc_id);

        if let Some(item) = self.detail_cache.get(&key) {
            debug!(key = %key, "detail cache hit");
            return Ok(item);
        }

        // The API expects the id as a JSON string
        let body = json!({ "id": fdc_id.to_string() });
        let item: FoodDetailResponse = self.post_json(config::FOOD_ITEM_PATH, &body).await?;

        self.detail_cache
            .set_with_ttl(&key, item.clone(), config::CACHE_TTL_SECS);
        Ok(item)
    }

    /// Drops every cached response
    pub fn clear_cache(&self) {
        self.list_cache.clear();
        self.detail_cache.clear();
    }

    /// Issues a POST with a JSON body and classifies the response
    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, RepositoryError> {
        let raw_url = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw_url).map_err(|_| RepositoryError::InvalidUrl(raw_url))?;
        let payload = serde_json::to_vec(body).map_err(RepositoryError::Encoding)?;

        debug!(url = %url, body = %body, "issuing request");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
            .body(payload)
            .send()
            .await
            .map_err(RepositoryError::Transport)?;

        let status = response.status();
        debug!(status = %status, "response received");
        match status {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return Err(RepositoryError::Unauthorized),
            StatusCode::FORBIDDEN => return Err(RepositoryError::Forbidden),
            StatusCode::NOT_FOUND => return Err(RepositoryError::NotFound),
            other => return Err(RepositoryError::Server(other.as_u16())),
        }

        let bytes = response.bytes().await.map_err(RepositoryError::Transport)?;
        serde_json::from_slice(&bytes).map_err(RepositoryError::Decoding)
    }
}

impl Default for FoodRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Expands the all-categories sentinel to the full enumerated category list
///
/// Body and cache key are both built from the expanded query, so the
/// sentinel and the explicit full list share one cache slot while any single
/// category keeps its own.
fn expand_categories(query: &FoodQuery) -> FoodQuery {
    if !query.types.is_empty() {
        return query.clone();
    }
    let mut expanded = query.clone();
    expanded.types = config::ALL_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect();
    expanded
}
