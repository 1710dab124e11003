//! CLI module
//!
//! Command-line interface for ad-hoc fetching, scraping, and cleaning.
//!
//! # Commands
//!
//! - `get` - Fetch one endpoint and print the JSON response
//! - `paginate` - Fetch all pages of a source and print the records
//! - `scrape` - Fetch a page and extract links, text, metadata, or a table
//! - `clean` - Clean a JSON records file with table operations

mod commands;
mod runner;

pub use commands::{Cli, Commands, Continuation, ScrapeTarget};
pub use runner::Runner;
