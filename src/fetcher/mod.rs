//! API fetcher module
//!
//! The REST side of the toolkit: single fetches, the paginated
//! accumulation loop, and a bounded-retry wrapper.
//!
//! # Overview
//!
//! `ApiClient` wraps the HTTP client with JSON-oriented conveniences. The
//! central piece is `fetch_paginated`: request a page, hand it to the
//! caller's extraction function, append the extracted items to the
//! accumulator, then ask the pagination strategy whether and how to
//! continue. Pages are fetched strictly one at a time, in order.

mod types;

pub use types::{FetchOptions, Page};

use crate::error::{Error, Result};
use crate::extract::RecordPath;
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::{NextPage, PaginationState, Paginator};
use crate::types::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Generic REST API client
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Create a client from an HTTP client configuration
    pub fn new(config: HttpClientConfig) -> Self {
        Self {
            http: HttpClient::with_config(config),
        }
    }

    /// Create a client for a base URL with default settings
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self::new(HttpClientConfig::builder().base_url(base_url).build())
    }

    /// Create a client over an existing HTTP client
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch an endpoint and parse the JSON response
    pub async fn fetch_json(&self, endpoint: &str) -> Result<Value> {
        self.fetch_json_with(endpoint, Method::Get, RequestConfig::default())
            .await
    }

    /// Fetch an endpoint with an explicit method and request config
    pub async fn fetch_json_with(
        &self,
        endpoint: &str,
        method: Method,
        config: RequestConfig,
    ) -> Result<Value> {
        self.http.request_json(method, endpoint, config).await
    }

    /// Fetch only the response headers (HEAD request)
    pub async fn fetch_headers(&self, endpoint: &str) -> Result<HeaderMap> {
        let response = self
            .http
            .request(Method::Head, endpoint, RequestConfig::default())
            .await?;
        Ok(response.headers().clone())
    }

    /// Fetch an endpoint and return only the status code
    pub async fn fetch_status(&self, endpoint: &str) -> Result<u16> {
        let response = self.http.get(endpoint).await?;
        Ok(response.status().as_u16())
    }

    /// Fetch with a bounded attempt budget.
    ///
    /// Tries the fetch up to `attempts` times and reports the last error
    /// when every attempt fails. `attempts` counts total tries, so
    /// `attempts = 3` means at most three network calls. Nothing else in
    /// the toolkit retries; this wrapper is the only recovery mechanism.
    pub async fn fetch_json_with_retry(
        &self,
        endpoint: &str,
        method: Method,
        config: RequestConfig,
        attempts: u32,
    ) -> Result<Value> {
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self
                .fetch_json_with(endpoint, method, config.clone())
                .await
            {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Attempt {attempt}/{attempts} failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxAttemptsExceeded { attempts }))
    }

    /// Fetch all pages of a paginated source and accumulate extracted items.
    ///
    /// The extraction function decides what counts as an item; the
    /// paginator decides whether another page exists and how to request
    /// it. Items arrive in page order, then item order within each page,
    /// with no deduplication. Any fetch or extraction failure aborts the
    /// whole call and discards the accumulator.
    pub async fn fetch_paginated<T, F>(
        &self,
        endpoint: &str,
        options: FetchOptions,
        paginator: &dyn Paginator,
        mut extract: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&Page) -> Result<Vec<T>>,
    {
        let mut state = PaginationState::new();
        let mut accumulated = Vec::new();
        let mut target = endpoint.to_string();
        let mut page_params: HashMap<String, String> = paginator.initial_params(&state);

        loop {
            let request = options.request.clone().queries(&page_params);
            let response = self.http.request(options.method, &target, request).await?;

            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let text = response.text().await.map_err(Error::Http)?;
            let body: Value = if text.trim().is_empty() {
                Value::Null
            } else {
                serde_json::from_str(&text)?
            };

            let page = Page {
                status,
                headers,
                body,
            };
            let items = extract(&page)?;
            let item_count = items.len();
            accumulated.extend(items);

            state.add_page();
            debug!(
                "Page {}: fetched {item_count} items ({} total)",
                state.pages_fetched,
                accumulated.len()
            );

            if let Some(cap) = options.max_pages {
                if state.pages_fetched >= cap {
                    debug!("Stopping at page cap ({cap})");
                    break;
                }
            }

            match paginator.process_response(&page.body, &page.headers, item_count, &mut state) {
                NextPage::Done => break,
                NextPage::Continue { query_params, url } => {
                    if let Some(next_url) = url {
                        target = next_url;
                    }
                    page_params = query_params;
                }
            }
        }

        Ok(accumulated)
    }

    /// Fetch all pages and extract item records by JSON path
    pub async fn fetch_paginated_records(
        &self,
        endpoint: &str,
        options: FetchOptions,
        paginator: &dyn Paginator,
        record_path: &RecordPath,
    ) -> Result<Vec<Value>> {
        self.fetch_paginated(endpoint, options, paginator, |page| {
            record_path.records(&page.body)
        })
        .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("http", &self.http).finish()
    }
}
