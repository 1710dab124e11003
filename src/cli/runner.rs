//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, Continuation, ScrapeTarget};
use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::extract::RecordPath;
use crate::fetcher::{ApiClient, FetchOptions};
use crate::http::RequestConfig;
use crate::pagination::{LinkPaginator, PageNumberPaginator, Paginator, SinglePage};
use crate::scrape::{self, PageScraper};
use crate::table::Table;
use crate::text::{NormalizeOptions, TextNormalizer};
use crate::types::{FillStrategy, Method, OptionStringExt, StringMap};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Get {
                endpoint,
                method,
                params,
            } => self.get(endpoint, method, params).await,
            Commands::Paginate {
                endpoint,
                by,
                page_param,
                start_page,
                records,
                max_pages,
                params,
            } => {
                self.paginate(
                    endpoint,
                    *by,
                    page_param,
                    *start_page,
                    records.as_deref(),
                    *max_pages,
                    params,
                )
                .await
            }
            Commands::Scrape {
                url,
                extract,
                selector,
                no_robots,
            } => self.scrape(url, *extract, selector.as_deref(), *no_robots).await,
            Commands::Clean {
                input,
                output,
                drop_missing,
                drop_duplicates,
                drop_columns,
                fill,
                one_hot,
                normalize,
                clean_columns,
            } => self.clean(
                input,
                output.as_deref(),
                *drop_missing,
                *drop_duplicates,
                drop_columns,
                fill.as_deref(),
                *one_hot,
                *normalize,
                clean_columns,
            ),
        }
    }

    /// Resolve settings from the settings file and global flags
    fn settings(&self) -> Result<ClientSettings> {
        let mut settings = match &self.cli.settings {
            Some(path) => ClientSettings::from_yaml_file(path)?,
            None => ClientSettings::default(),
        };

        if let Some(ref base_url) = self.cli.base_url {
            settings.base_url = Some(base_url.clone());
        }
        for (key, value) in parse_kv_pairs(&self.cli.headers)? {
            settings.headers.insert(key, value);
        }

        Ok(settings)
    }

    fn api_client(&self) -> Result<ApiClient> {
        Ok(ApiClient::new(self.settings()?.to_http_config()))
    }

    async fn get(&self, endpoint: &str, method: &str, params: &[String]) -> Result<()> {
        let method: Method = method.parse()?;
        let query = parse_kv_map(params)?;
        let client = self.api_client()?;

        // HEAD has no body; print the response headers instead
        if method == Method::Head {
            let headers = client.fetch_headers(endpoint).await?;
            let map: serde_json::Map<String, Value> = headers
                .iter()
                .map(|(name, value)| {
                    let value = value.to_str().unwrap_or_default();
                    (name.as_str().to_string(), Value::String(value.to_string()))
                })
                .collect();
            return print_json(&Value::Object(map));
        }

        let value = client
            .fetch_json_with(endpoint, method, RequestConfig::new().queries(&query))
            .await?;
        print_json(&value)
    }

    #[allow(clippy::too_many_arguments)]
    async fn paginate(
        &self,
        endpoint: &str,
        by: Continuation,
        page_param: &str,
        start_page: u32,
        records: Option<&str>,
        max_pages: Option<u32>,
        params: &[String],
    ) -> Result<()> {
        let paginator: Box<dyn Paginator> = match by {
            Continuation::Link => Box::new(LinkPaginator::default()),
            Continuation::PageNumber => {
                Box::new(PageNumberPaginator::new(page_param, start_page))
            }
            Continuation::None => Box::new(SinglePage),
        };

        let record_path = match records {
            Some(path) => RecordPath::new(path),
            None => RecordPath::root(),
        };

        let query = parse_kv_map(params)?;
        let mut options = FetchOptions::new().request(RequestConfig::new().queries(&query));
        if let Some(cap) = max_pages {
            options = options.max_pages(cap);
        }

        let client = self.api_client()?;
        let records = client
            .fetch_paginated_records(endpoint, options, paginator.as_ref(), &record_path)
            .await?;

        eprintln!("Fetched {} records", records.len());
        print_json(&Value::Array(records))
    }

    async fn scrape(
        &self,
        url: &str,
        target: ScrapeTarget,
        selector: Option<&str>,
        no_robots: bool,
    ) -> Result<()> {
        let settings = self.settings()?;
        let base_url = settings
            .base_url
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| url.to_string());

        let scraper = if settings.respect_robots && !no_robots {
            PageScraper::with_robots(&base_url, settings.to_http_config()).await?
        } else {
            PageScraper::with_config(&base_url, settings.to_http_config())?
        };

        let value = scraper
            .scrape_data(url, None, Method::Get, |doc| match target {
                ScrapeTarget::Links => {
                    Ok(json!(scrape::extract_links(doc, selector.unwrap_or("a"))?))
                }
                ScrapeTarget::Text => {
                    Ok(json!(scrape::extract_text(doc, selector.unwrap_or("p"))?))
                }
                ScrapeTarget::Metadata => Ok(json!(scrape::extract_metadata(doc))),
                ScrapeTarget::Table => Ok(json!(scrape::extract_table(
                    doc,
                    selector.unwrap_or("table")
                )?)),
            })
            .await?;

        print_json(&value)
    }

    #[allow(clippy::too_many_arguments, clippy::fn_params_excessive_bools)]
    fn clean(
        &self,
        input: &PathBuf,
        output: Option<&Path>,
        drop_missing: bool,
        drop_duplicates: bool,
        drop_columns: &[String],
        fill: Option<&str>,
        one_hot: bool,
        normalize: bool,
        clean_columns: &[String],
    ) -> Result<()> {
        let content = fs::read_to_string(input)?;
        let records: Vec<Value> = serde_json::from_str(&content)?;
        let mut table = Table::from_records(records)?;

        if drop_missing {
            table = table.drop_missing();
        }
        if drop_duplicates {
            table = table.drop_duplicates();
        }
        if !drop_columns.is_empty() {
            let names: Vec<&str> = drop_columns.iter().map(String::as_str).collect();
            table = table.drop_columns(&names);
        }
        if let Some(strategy) = fill {
            let strategy: FillStrategy = strategy.parse()?;
            table = table.fill_missing(strategy);
        }
        if !clean_columns.is_empty() {
            let normalizer = TextNormalizer::new();
            let options = NormalizeOptions::default();
            for column in clean_columns {
                table = table.clean_column(column, &normalizer, &options);
            }
        }
        if one_hot {
            table = table.one_hot_encode();
        }
        if normalize {
            table = table.min_max_normalize();
        }

        let result = Value::Array(table.into_records());
        match output {
            Some(path) => {
                fs::write(path, serde_json::to_string_pretty(&result)?)?;
                eprintln!("Wrote {}", path.display());
                Ok(())
            }
            None => print_json(&result),
        }
    }
}

/// Parse repeated key=value arguments
fn parse_kv_pairs(items: &[String]) -> Result<Vec<(String, String)>> {
    items
        .iter()
        .map(|item| {
            item.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| Error::config(format!("Expected key=value, got: {item}")))
        })
        .collect()
}

fn parse_kv_map(items: &[String]) -> Result<StringMap> {
    Ok(parse_kv_pairs(items)?.into_iter().collect())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
