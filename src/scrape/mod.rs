//! Page scraping module
//!
//! The HTML side of the toolkit: fetch a page, parse it, run extraction
//! helpers or a caller-supplied parser over the document, and follow
//! DOM-anchor pagination.
//!
//! # Overview
//!
//! `PageScraper` implements only GET and POST; anything else is rejected
//! with `Error::UnsupportedMethod`. Relative URLs resolve against the
//! scraper's base URL, and the installed fetch policy (robots.txt by
//! default via `with_robots`) is consulted before every request.

mod extract;

pub use extract::{
    extract_forms, extract_headings, extract_images, extract_json_ld, extract_links,
    extract_lists, extract_metadata, extract_paragraphs, extract_table, extract_text, FormInfo,
};

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::policy::{FetchPolicy, RobotsPolicy};
use crate::types::{Method, StringMap};
use scraper::Html;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// HTML page fetcher and parser
pub struct PageScraper {
    http: HttpClient,
    base_url: Url,
}

impl PageScraper {
    /// Create a scraper for a base URL with default settings
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, HttpClientConfig::default())
    }

    /// Create a scraper with custom HTTP settings
    ///
    /// The config's own base URL is ignored; page URLs resolve against
    /// `base_url` with URL-join semantics.
    pub fn with_config(base_url: &str, mut config: HttpClientConfig) -> Result<Self> {
        let base = Url::parse(base_url)?;
        config.base_url = None;
        Ok(Self {
            http: HttpClient::with_config(config),
            base_url: base,
        })
    }

    /// Create a scraper that honors the site's robots.txt.
    ///
    /// Downloads and parses robots.txt from the base URL's origin; a
    /// missing or unreachable file permits everything.
    pub async fn with_robots(base_url: &str, config: HttpClientConfig) -> Result<Self> {
        let mut scraper = Self::with_config(base_url, config)?;
        let robots = RobotsPolicy::fetch(scraper.http.inner(), &scraper.base_url).await;
        scraper.http.set_policy(Arc::new(robots));
        Ok(scraper)
    }

    /// Install a custom fetch policy
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn FetchPolicy>) -> Self {
        self.http.set_policy(policy);
        self
    }

    /// The scraper's base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a page URL against the base URL
    pub fn resolve(&self, url: &str) -> Result<Url> {
        Ok(self.base_url.join(url)?)
    }

    /// Fetch a page and return its body.
    ///
    /// GET sends `params` as query parameters; POST sends them as a form
    /// body. Other verbs are not implemented for page scraping.
    pub async fn fetch_page(
        &self,
        url: &str,
        params: Option<&StringMap>,
        method: Method,
    ) -> Result<String> {
        let full_url = self.resolve(url)?;

        let request = match method {
            Method::Get => {
                let mut request = RequestConfig::new();
                if let Some(params) = params {
                    request = request.queries(params);
                }
                request
            }
            Method::Post => match params {
                Some(params) => RequestConfig::new().form(params.clone()),
                None => RequestConfig::new(),
            },
            other => return Err(Error::unsupported_method(other.as_str())),
        };

        let response = self.http.request(method, full_url.as_str(), request).await?;
        Ok(response.text().await.map_err(Error::Http)?)
    }

    /// Parse an HTML body into a queryable document
    pub fn parse_html(html: &str) -> Html {
        Html::parse_document(html)
    }

    /// Fetch a page, parse it, and run a parser function over the document
    pub async fn scrape_data<T, F>(
        &self,
        url: &str,
        params: Option<&StringMap>,
        method: Method,
        parser: F,
    ) -> Result<T>
    where
        F: FnOnce(&Html) -> Result<T>,
    {
        let html = self.fetch_page(url, params, method).await?;
        let document = Self::parse_html(&html);
        parser(&document)
    }

    /// Follow DOM-anchor pagination and accumulate parsed items.
    ///
    /// Fetches `start_url`, runs the parser, then looks for the next-page
    /// anchor with `next_selector`. A matching anchor with an `href`
    /// continues the loop (href resolved against the base URL); anything
    /// else terminates it. Items accumulate in page order, then item order
    /// within each page.
    pub async fn scrape_paginated<T, F>(
        &self,
        start_url: &str,
        params: Option<&StringMap>,
        next_selector: &str,
        mut parser: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&Html) -> Result<Vec<T>>,
    {
        let selector = scraper::Selector::parse(next_selector)
            .map_err(|e| Error::selector(format!("{next_selector}: {e}")))?;

        let mut accumulated = Vec::new();
        let mut current = self.resolve(start_url)?;
        let mut page_count = 0u32;

        loop {
            let html = self
                .fetch_page(current.as_str(), params, Method::Get)
                .await?;
            let document = Self::parse_html(&html);

            let items = parser(&document)?;
            page_count += 1;
            debug!(
                "Page {page_count}: parsed {} items from {current}",
                items.len()
            );
            accumulated.extend(items);

            let next_href = document
                .select(&selector)
                .next()
                .and_then(|a| a.value().attr("href"))
                .map(str::to_string);

            match next_href {
                Some(href) => current = self.base_url.join(&href)?,
                None => break,
            }
        }

        Ok(accumulated)
    }
}

impl std::fmt::Debug for PageScraper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageScraper")
            .field("base_url", &self.base_url.as_str())
            .field("http", &self.http)
            .finish()
    }
}
