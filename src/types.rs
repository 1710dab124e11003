//! Common types used throughout scrapekit
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
///
/// A closed enumeration of the verbs the toolkit implements. Anything else
/// is rejected with `Error::UnsupportedMethod` at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl Method {
    /// The canonical uppercase name of the verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            other => Err(Error::unsupported_method(other)),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

// ============================================================================
// Fill Strategy
// ============================================================================

/// Strategy for filling missing values in a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Fill numeric columns with the column mean
    #[default]
    Mean,
    /// Fill numeric columns with the column median
    Median,
    /// Fill any column with its most frequent value
    Mode,
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillStrategy::Mean => f.write_str("mean"),
            FillStrategy::Median => f.write_str("median"),
            FillStrategy::Mode => f.write_str("mode"),
        }
    }
}

impl FromStr for FillStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(FillStrategy::Mean),
            "median" => Ok(FillStrategy::Median),
            "mode" => Ok(FillStrategy::Mode),
            other => Err(Error::unsupported_strategy(other)),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_method_conversion() {
        let get: reqwest::Method = Method::Get.into();
        assert_eq!(reqwest::Method::GET, get);
        let head: reqwest::Method = Method::Head.into();
        assert_eq!(reqwest::Method::HEAD, head);
    }

    #[test]
    fn test_method_default() {
        assert_eq!(Method::default(), Method::Get);
    }

    #[test_case("GET", Method::Get)]
    #[test_case("post", Method::Post)]
    #[test_case("Put", Method::Put)]
    #[test_case("DELETE", Method::Delete)]
    #[test_case("head", Method::Head)]
    fn test_method_from_str(input: &str, expected: Method) {
        assert_eq!(input.parse::<Method>().unwrap(), expected);
    }

    #[test]
    fn test_method_from_str_rejects_unknown() {
        let err = "PATCH".parse::<Method>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedMethod { .. }));
        assert_eq!(err.to_string(), "Unsupported HTTP method: PATCH");
    }

    #[test]
    fn test_method_serde() {
        let method: Method = serde_json::from_str("\"DELETE\"").unwrap();
        assert_eq!(method, Method::Delete);

        let json = serde_json::to_string(&Method::Get).unwrap();
        assert_eq!(json, "\"GET\"");
    }

    #[test_case("mean", FillStrategy::Mean)]
    #[test_case("Median", FillStrategy::Median)]
    #[test_case("MODE", FillStrategy::Mode)]
    fn test_fill_strategy_from_str(input: &str, expected: FillStrategy) {
        assert_eq!(input.parse::<FillStrategy>().unwrap(), expected);
    }

    #[test]
    fn test_fill_strategy_rejects_unknown() {
        let err = "midpoint".parse::<FillStrategy>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedStrategy { .. }));
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("test".to_string()).none_if_empty(),
            Some("test".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!("test".to_string().none_if_empty(), Some("test".to_string()));
        assert_eq!(String::new().none_if_empty(), None);
    }
}
