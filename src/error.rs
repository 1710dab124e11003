//! Error types for scrapekit
//!
//! This module defines the error hierarchy for the entire toolkit.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for scrapekit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Policy Errors
    // ============================================================================
    #[error("Fetching '{url}' is disallowed by site policy")]
    PolicyDenied { url: String },

    // ============================================================================
    // Caller Errors
    // ============================================================================
    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("Unsupported fill strategy: {strategy}")]
    UnsupportedStrategy { strategy: String },

    #[error("Max attempts ({attempts}) exceeded")]
    MaxAttemptsExceeded { attempts: u32 },

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid CSS selector: {message}")]
    Selector { message: String },

    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a policy denial error
    pub fn policy_denied(url: impl Into<String>) -> Self {
        Self::PolicyDenied { url: url.into() }
    }

    /// Create an unsupported method error
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create an unsupported strategy error
    pub fn unsupported_strategy(strategy: impl Into<String>) -> Self {
        Self::UnsupportedStrategy {
            strategy: strategy.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a selector error
    pub fn selector(message: impl Into<String>) -> Self {
        Self::Selector {
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error came from the transport layer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::HttpStatus { .. } | Error::Timeout { .. }
        )
    }
}

/// Result type alias for scrapekit
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
