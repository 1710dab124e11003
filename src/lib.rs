// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # scrapekit
//!
//! A minimal, Rust-native toolkit for paginated web scraping and API data
//! collection.
//!
//! ## Features
//!
//! - **Paginated fetching**: one loop, pluggable continuation strategies
//!   (Link header or page number)
//! - **Page scraping**: fetch and parse HTML, extraction helpers for links,
//!   text, tables, metadata, and forms
//! - **Policy enforcement**: robots.txt consulted before every fetch
//! - **Text normalization**: ordered, toggleable cleaning pipeline
//! - **Record tables**: drop/fill missing values, one-hot encoding,
//!   min-max normalization over JSON records
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use scrapekit::fetcher::{ApiClient, FetchOptions};
//! use scrapekit::extract::RecordPath;
//! use scrapekit::pagination::LinkPaginator;
//! use scrapekit::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ApiClient::for_base_url("https://api.example.com");
//!
//!     // Accumulate every page by following the "next" Link relation
//!     let records = client
//!         .fetch_paginated_records(
//!             "/items",
//!             FetchOptions::new(),
//!             &LinkPaginator::default(),
//!             &RecordPath::new("data"),
//!         )
//!         .await?;
//!
//!     println!("{} records", records.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        ApiClient / PageScraper                  │
//! │   fetch_paginated(extract, paginator) → Vec<items>              │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Policy  │   HTTP    │   Paginate    │  Extract  │    Clean    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ robots   │ GET/POST  │ Link header   │ JSON path │ Text        │
//! │ allow/   │ PUT/DELETE│ Page number   │ CSS       │ pipeline    │
//! │ disallow │ HEAD      │ Single page   │ selectors │ Table ops   │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document every public item before publishing to crates.io

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the toolkit
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetch policies (robots.txt)
pub mod policy;

/// HTTP client with policy enforcement
pub mod http;

/// Pagination strategies
pub mod pagination;

/// JSON record extraction
pub mod extract;

/// REST API client and the paginated fetch loop
pub mod fetcher;

/// HTML page scraping
pub mod scrape;

/// Text normalization pipeline
pub mod text;

/// Record table cleaning
pub mod table;

/// Configuration for scraping jobs
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use fetcher::{ApiClient, FetchOptions};
pub use scrape::PageScraper;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
