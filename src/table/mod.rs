//! Record table module
//!
//! Column-wise cleaning over ordered JSON records: the rows a paginated
//! fetch accumulates, made ready for analysis.
//!
//! # Overview
//!
//! A `Table` is an ordered list of JSON objects. Operations consume the
//! table and return the cleaned one, so calls chain:
//!
//! ```rust,ignore
//! let cleaned = Table::from_records(records)?
//!     .drop_missing()
//!     .fill_missing(FillStrategy::Mean)
//!     .min_max_normalize();
//! ```
//!
//! Numeric semantics follow the usual dataframe conventions: mean/median
//! fill only numeric columns, mode fills any column, one-hot encoding
//! expands only string columns, min-max normalization touches only numeric
//! columns.

mod ops;

use crate::error::{Error, Result};
use crate::text::{NormalizeOptions, TextNormalizer};
use crate::types::{FillStrategy, JsonObject, JsonValue};
use serde_json::Value;

/// An ordered table of JSON records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<JsonObject>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table from rows
    pub fn from_rows(rows: Vec<JsonObject>) -> Self {
        Self { rows }
    }

    /// Create a table from JSON records; every record must be an object
    pub fn from_records(records: Vec<JsonValue>) -> Result<Self> {
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            match record {
                Value::Object(obj) => rows.push(obj),
                other => {
                    return Err(Error::decode(format!(
                        "Expected an object record, got: {other}"
                    )))
                }
            }
        }
        Ok(Self { rows })
    }

    /// The rows of the table
    pub fn rows(&self) -> &[JsonObject] {
        &self.rows
    }

    /// Consume the table into JSON records
    pub fn into_records(self) -> Vec<JsonValue> {
        self.rows.into_iter().map(Value::Object).collect()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order across all rows
    pub fn columns(&self) -> Vec<String> {
        let mut columns = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }

    // ========================================================================
    // Row Operations
    // ========================================================================

    /// Drop rows with any missing or null cell
    #[must_use]
    pub fn drop_missing(self) -> Self {
        let columns = self.columns();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| {
                columns
                    .iter()
                    .all(|col| row.get(col).is_some_and(|v| !v.is_null()))
            })
            .collect();
        Self { rows }
    }

    /// Drop duplicate rows, keeping the first occurrence
    #[must_use]
    pub fn drop_duplicates(self) -> Self {
        let mut seen: Vec<JsonObject> = Vec::new();
        for row in self.rows {
            if !seen.contains(&row) {
                seen.push(row);
            }
        }
        Self { rows: seen }
    }

    /// Drop the named columns from every row
    #[must_use]
    pub fn drop_columns(mut self, columns: &[&str]) -> Self {
        for row in &mut self.rows {
            for column in columns {
                row.remove(*column);
            }
        }
        self
    }

    // ========================================================================
    // Column Operations
    // ========================================================================

    /// Fill missing and null cells according to the strategy.
    ///
    /// Mean and median fill only numeric columns; mode fills any column
    /// from its most frequent value. Columns with no fill value available
    /// are left as they are.
    #[must_use]
    pub fn fill_missing(mut self, strategy: FillStrategy) -> Self {
        let columns = self.columns();

        for column in &columns {
            let fill = match strategy {
                FillStrategy::Mean => ops::column_mean(&self.rows, column).map(ops::number),
                FillStrategy::Median => ops::column_median(&self.rows, column).map(ops::number),
                FillStrategy::Mode => ops::column_mode(&self.rows, column),
            };

            let Some(fill) = fill else {
                continue;
            };

            for row in &mut self.rows {
                let missing = row.get(column).map_or(true, Value::is_null);
                if missing {
                    row.insert(column.clone(), fill.clone());
                }
            }
        }

        self
    }

    /// Expand string columns into indicator columns.
    ///
    /// Each distinct value of a string column becomes a `column_value`
    /// boolean column; the original column is removed. Non-string columns
    /// pass through unchanged, and rows with a null cell get all-false
    /// indicators.
    #[must_use]
    pub fn one_hot_encode(mut self) -> Self {
        for column in self.columns() {
            if !ops::is_string_column(&self.rows, &column) {
                continue;
            }

            let mut values: Vec<String> = self
                .rows
                .iter()
                .filter_map(|row| row.get(&column))
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            values.sort();
            values.dedup();

            for row in &mut self.rows {
                let cell = row.remove(&column);
                let cell_str = cell.as_ref().and_then(Value::as_str);
                for value in &values {
                    let hit = cell_str == Some(value.as_str());
                    row.insert(format!("{column}_{value}"), Value::Bool(hit));
                }
            }
        }

        self
    }

    /// Min-max normalize numeric columns into [0, 1].
    ///
    /// Null cells stay null. A constant column maps to 0.0 (the 0/0
    /// quotient has no JSON representation).
    #[must_use]
    pub fn min_max_normalize(mut self) -> Self {
        for column in self.columns() {
            let values = ops::numeric_values(&self.rows, &column);
            if values.is_empty() || !ops::is_numeric_column(&self.rows, &column) {
                continue;
            }

            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;

            for row in &mut self.rows {
                let Some(cell) = row.get(&column) else {
                    continue;
                };
                let Some(x) = cell.as_f64() else {
                    continue;
                };
                let scaled = if range == 0.0 { 0.0 } else { (x - min) / range };
                row.insert(column.clone(), ops::number(scaled));
            }
        }

        self
    }

    /// Normalize the text of a string column through the pipeline
    #[must_use]
    pub fn clean_column(
        mut self,
        column: &str,
        normalizer: &TextNormalizer,
        options: &NormalizeOptions,
    ) -> Self {
        for row in &mut self.rows {
            let Some(cell) = row.get(column) else {
                continue;
            };
            if let Some(text) = cell.as_str() {
                let cleaned = normalizer.normalize(text, options);
                row.insert(column.to_string(), Value::String(cleaned));
            }
        }
        self
    }

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Mean of a numeric column
    pub fn mean(&self, column: &str) -> Option<f64> {
        ops::column_mean(&self.rows, column)
    }

    /// Median of a numeric column
    pub fn median(&self, column: &str) -> Option<f64> {
        ops::column_median(&self.rows, column)
    }

    /// Most frequent value of a column
    pub fn mode(&self, column: &str) -> Option<JsonValue> {
        ops::column_mode(&self.rows, column)
    }
}
