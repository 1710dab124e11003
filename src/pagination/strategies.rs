//! Pagination strategy implementations
//!
//! Each strategy handles one continuation pattern.

use super::types::{NextPage, PaginationState, Paginator};
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::collections::HashMap;

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 5988)
///
/// Extracts the next page URL from the Link header.
/// Common in GitHub, GitLab APIs.
/// Format: `Link: <https://api.github.com/...?page=2>; rel="next", ...`
///
/// The followed URL replaces the request target; all other request fields
/// stay fixed. No "next" relation terminates the loop.
#[derive(Debug, Clone)]
pub struct LinkPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkPaginator {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl LinkPaginator {
    /// Create a link paginator following the given rel
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

impl Paginator for LinkPaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        headers: &HeaderMap,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(items_count as u64);

        if let Some(link_header) = headers.get("link").and_then(|v| v.to_str().ok()) {
            if let Some(next_url) = parse_link_header(link_header, &self.rel) {
                state.page += 1;
                return NextPage::with_url(next_url);
            }
        }

        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination with a link-based stop condition
///
/// Sets the configured query parameter to an integer counter (starting at a
/// caller-given value, conventionally 1) and increments it after every
/// fetch.
///
/// Termination is deliberately *not* driven by the counter or by an empty
/// page: the loop stops when the response carries no "next" Link relation,
/// even though paging is numeric. This hybrid mirrors the behavior of the
/// system this was ported from; APIs that paginate by number but never emit
/// Link headers will stop after the first page.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for the page number
    pub page_param: String,
    /// First page number (usually 1)
    pub start_page: u32,
    /// Rel value whose absence terminates the loop
    pub rel: String,
}

impl PageNumberPaginator {
    /// Create a page number paginator
    pub fn new(page_param: impl Into<String>, start_page: u32) -> Self {
        Self {
            page_param: page_param.into(),
            start_page,
            rel: "next".to_string(),
        }
    }
}

impl Paginator for PageNumberPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let page = if state.page == 0 {
            self.start_page
        } else {
            state.page
        };
        let mut params = HashMap::new();
        params.insert(self.page_param.clone(), page.to_string());
        params
    }

    fn process_response(
        &self,
        _body: &Value,
        headers: &HeaderMap,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(items_count as u64);

        let has_next = headers
            .get("link")
            .and_then(|v| v.to_str().ok())
            .and_then(|h| parse_link_header(h, &self.rel))
            .is_some();

        if !has_next {
            state.mark_done();
            return NextPage::Done;
        }

        let current = if state.page == 0 {
            self.start_page
        } else {
            state.page
        };
        state.page = current + 1;
        NextPage::with_param(&self.page_param, state.page.to_string())
    }
}

// ============================================================================
// Single Page
// ============================================================================

/// No continuation, one request only
#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePage;

impl Paginator for SinglePage {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        _body: &Value,
        _headers: &HeaderMap,
        items_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.add_fetched(items_count as u64);
        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Link Header Parsing
// ============================================================================

/// Parse a Link header and extract the URL for the given rel.
///
/// Header format: `<url>; rel="next", <url>; rel="prev"`
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                rel = Some(stripped.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}
