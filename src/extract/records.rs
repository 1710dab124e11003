//! JSON record extraction

use crate::error::{Error, Result};
use serde_json::Value;

/// Extracts the record array from a JSON body by path
///
/// With no path, an array body is the record list and anything else is a
/// single record. A dot-notation path descends objects and supports array
/// indexing (including negative indices); paths containing wildcards are
/// evaluated as JSONPath.
#[derive(Debug, Clone, Default)]
pub struct RecordPath {
    path: Option<String>,
}

impl RecordPath {
    /// Treat the whole body as the record list
    pub fn root() -> Self {
        Self::default()
    }

    /// Extract records at the given path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Extract records from a parsed JSON body
    pub fn records(&self, body: &Value) -> Result<Vec<Value>> {
        match &self.path {
            Some(path) => {
                // Simple dot-notation handles most paths, including negative
                // indices; JSONPath is only needed for wildcard patterns.
                if path.contains('*') && !path.contains("[-") {
                    extract_with_jsonpath(body, path)
                } else {
                    match extract_simple_path(body, path) {
                        Some(Value::Array(arr)) => Ok(arr),
                        Some(v) => Ok(vec![v]),
                        None => Ok(vec![]),
                    }
                }
            }
            None => match body {
                Value::Array(arr) => Ok(arr.clone()),
                _ => Ok(vec![body.clone()]),
            },
        }
    }

    /// Parse a body string and extract records
    pub fn records_from_str(&self, body: &str) -> Result<Vec<Value>> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;
        self.records(&value)
    }
}

/// Extract a value using simple dot-notation path
fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix("$.").unwrap_or(path);
    let parts: Vec<&str> = path.split('.').collect();

    let mut current = value;
    for part in parts {
        // Handle array indexing like "data[0]" or "items[-1]"
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = &part[bracket_pos + 1..part.len() - 1];

            if !name.is_empty() {
                current = current.get(name)?;
            }

            if index_str == "*" {
                return Some(current.clone());
            } else if let Ok(index) = index_str.parse::<i64>() {
                if let Value::Array(arr) = current {
                    let idx = if index < 0 {
                        (arr.len() as i64 + index) as usize
                    } else {
                        index as usize
                    };
                    current = arr.get(idx)?;
                } else {
                    return None;
                }
            } else {
                return None;
            }
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
