//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

/// Result of the next page computation
#[derive(Debug, Clone)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace
        query_params: HashMap<String, String>,
        /// Optional new URL (for link-based pagination)
        url: Option<String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
            url: None,
        }
    }

    /// Create a continuation with a new URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue {
            query_params: HashMap::new(),
            url: Some(url.into()),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Current page number (for page-based pagination)
    pub page: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Total items accumulated so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count a fetched page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Get initial query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        body: &Value,
        headers: &HeaderMap,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}
