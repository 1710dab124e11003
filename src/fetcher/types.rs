//! Fetcher types

use crate::http::RequestConfig;
use crate::types::Method;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// One fetched page of a paginated source
///
/// The body is the parsed JSON response (`Value::Null` for an empty body).
/// Extraction functions receive the whole page so they can read items from
/// the body and, when needed, look at status or headers.
#[derive(Debug, Clone)]
pub struct Page {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

/// Options for a paginated fetch
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// HTTP method for every page request
    pub method: Method,
    /// Base request configuration, fixed across pages
    pub request: RequestConfig,
    /// Optional safety cap on the number of pages fetched.
    ///
    /// `None` preserves the unbounded loop: the fetch only stops when the
    /// continuation signal does.
    pub max_pages: Option<u32>,
}

impl FetchOptions {
    /// Create default options (GET, no extra request config, no page cap)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set the base request configuration
    #[must_use]
    pub fn request(mut self, request: RequestConfig) -> Self {
        self.request = request;
        self
    }

    /// Cap the number of pages fetched
    #[must_use]
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}
