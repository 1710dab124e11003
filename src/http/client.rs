//! HTTP client with policy enforcement
//!
//! Provides the transport wrapper used by both the API fetcher and the page
//! scraper:
//! - Base URL resolution for relative endpoints
//! - Default headers, cookies, and user agent
//! - Fetch-policy consultation before every request
//! - Non-2xx status classification into transport errors

use crate::error::{Error, Result};
use crate::policy::FetchPolicy;
use crate::types::Method;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Cookies sent with every request
    pub cookies: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            cookies: HashMap::new(),
            user_agent: format!("scrapekit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Add a cookie sent with every request
    pub fn cookie(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.cookies.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Request body (form-encoded); takes precedence over `body` for POST
    pub form: Option<HashMap<String, String>>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add multiple query parameters
    #[must_use]
    pub fn queries(mut self, params: &HashMap<String, String>) -> Self {
        for (key, value) in params {
            self.query.insert(key.clone(), value.clone());
        }
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set form-encoded body
    #[must_use]
    pub fn form(mut self, form: HashMap<String, String>) -> Self {
        self.form = Some(form);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP client with fetch-policy enforcement
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    policy: Option<Arc<dyn FetchPolicy>>,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            config,
            policy: None,
        }
    }

    /// Install a fetch policy consulted before every request
    #[must_use]
    pub fn with_policy(mut self, policy: Arc<dyn FetchPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Replace the fetch policy
    pub fn set_policy(&mut self, policy: Arc<dyn FetchPolicy>) {
        self.policy = Some(policy);
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the configured user agent
    pub fn user_agent(&self) -> &str {
        &self.config.user_agent
    }

    /// Check if a fetch policy is installed
    pub fn has_policy(&self) -> bool {
        self.policy.is_some()
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Response> {
        self.request(Method::Get, url, RequestConfig::default())
            .await
    }

    /// Make a GET request with config
    pub async fn get_with_config(&self, url: &str, config: RequestConfig) -> Result<Response> {
        self.request(Method::Get, url, config).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, url: &str, body: Value) -> Result<Response> {
        self.request(Method::Post, url, RequestConfig::default().json(body))
            .await
    }

    /// Make a HEAD request
    pub async fn head(&self, url: &str) -> Result<Response> {
        self.request(Method::Head, url, RequestConfig::default())
            .await
    }

    /// Make a generic request.
    ///
    /// Exactly one network call. The fetch policy is consulted first; a
    /// denial returns `Error::PolicyDenied` without touching the network.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let full_url = self.resolve_url(url)?;

        if let Some(ref policy) = self.policy {
            if !policy.can_fetch(&self.config.user_agent, &full_url).await {
                return Err(Error::policy_denied(full_url));
            }
        }

        let mut req = self
            .client
            .request(method.into(), full_url.clone())
            .timeout(config.timeout.unwrap_or(self.config.timeout));

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !self.config.cookies.is_empty() {
            req = req.header("cookie", self.cookie_header());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref form) = config.form {
            req = req.form(form);
        } else if let Some(ref body) = config.body {
            req = req.json(body);
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Error::Timeout {
                    timeout_ms: config
                        .timeout
                        .unwrap_or(self.config.timeout)
                        .as_millis() as u64,
                });
            }
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Request succeeded: {} {}", method, full_url);
        Ok(response)
    }

    /// Make a request and parse the JSON response
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<T> {
        let response = self.request(method, url, config).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.request_json(Method::Get, url, RequestConfig::default())
            .await
    }

    /// Resolve a path against the base URL into an absolute URL
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Ok(Url::parse(path)?);
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                Ok(Url::parse(&format!("{base}/{path}"))?)
            }
            None => Ok(Url::parse(path)?),
        }
    }

    fn cookie_header(&self) -> String {
        self.config
            .cookies
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_policy", &self.policy.is_some())
            .finish_non_exhaustive()
    }
}
