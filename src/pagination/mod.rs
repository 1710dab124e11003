//! Pagination module
//!
//! Supports: Link header ("next" relation) and page-number continuation.
//!
//! # Overview
//!
//! A `Paginator` computes the continuation signal for the repeated-fetch
//! loop: given one page's response, it decides whether another page exists
//! and how to ask for it. The loop itself lives in `fetcher::ApiClient`;
//! the DOM-anchor variant for HTML sources lives in `scrape::PageScraper`.
//!
//! `PageNumberPaginator` carries the source semantics it was ported from:
//! the page *parameter* is numeric, but the *stop condition* is still the
//! absence of a "next" Link relation. See the type docs.

mod strategies;
mod types;

pub use strategies::{parse_link_header, LinkPaginator, PageNumberPaginator, SinglePage};
pub use types::{NextPage, PaginationState, Paginator};
