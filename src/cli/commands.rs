//! CLI commands and argument parsing

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// scrapekit CLI
#[derive(Parser, Debug)]
#[command(name = "scrapekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client settings file (YAML)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Base URL (overrides the settings file)
    #[arg(short, long, global = true)]
    pub base_url: Option<String>,

    /// Extra header as key=value (repeatable)
    #[arg(short = 'H', long = "header", global = true)]
    pub headers: Vec<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Continuation strategy for paginated fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Continuation {
    /// Follow the "next" Link relation
    #[default]
    Link,
    /// Increment a page-number query parameter
    PageNumber,
    /// Single page, no continuation
    None,
}

/// What to extract from a scraped page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScrapeTarget {
    /// Anchor hrefs
    #[default]
    Links,
    /// Element text
    Text,
    /// Meta tag content
    Metadata,
    /// First matching table as records
    Table,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one endpoint and print the JSON response
    Get {
        /// Endpoint path or absolute URL
        endpoint: String,

        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: String,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Fetch all pages of a source and print the accumulated records
    Paginate {
        /// Endpoint path or absolute URL
        endpoint: String,

        /// Continuation strategy
        #[arg(long, value_enum, default_value = "link")]
        by: Continuation,

        /// Page-number query parameter name
        #[arg(long, default_value = "page")]
        page_param: String,

        /// Starting page number
        #[arg(long, default_value_t = 1)]
        start_page: u32,

        /// JSON path to the record array within each page body
        #[arg(short, long)]
        records: Option<String>,

        /// Safety cap on the number of pages fetched
        #[arg(long)]
        max_pages: Option<u32>,

        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,
    },

    /// Fetch a page and extract structured content
    Scrape {
        /// Page URL (joined against the base URL when relative)
        url: String,

        /// What to extract
        #[arg(long, value_enum, default_value = "links")]
        extract: ScrapeTarget,

        /// CSS selector for the extraction
        #[arg(long)]
        selector: Option<String>,

        /// Skip the robots.txt check
        #[arg(long)]
        no_robots: bool,
    },

    /// Clean a JSON records file with table operations
    Clean {
        /// Input file (JSON array of objects)
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop rows with missing values
        #[arg(long)]
        drop_missing: bool,

        /// Drop duplicate rows
        #[arg(long)]
        drop_duplicates: bool,

        /// Drop a column (repeatable)
        #[arg(long = "drop-column")]
        drop_columns: Vec<String>,

        /// Fill missing values (mean, median, or mode)
        #[arg(long)]
        fill: Option<String>,

        /// One-hot encode string columns
        #[arg(long)]
        one_hot: bool,

        /// Min-max normalize numeric columns
        #[arg(long)]
        normalize: bool,

        /// Normalize the text of a column (repeatable)
        #[arg(long = "clean-column")]
        clean_columns: Vec<String>,
    },
}
