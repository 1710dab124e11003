//! Column-wise aggregate helpers

use crate::types::JsonObject;
use serde_json::Value;

/// Collect the numeric values of a column, skipping missing and null cells
pub(crate) fn numeric_values(rows: &[JsonObject], column: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter_map(Value::as_f64)
        .collect()
}

/// Whether every present, non-null cell of the column is numeric
pub(crate) fn is_numeric_column(rows: &[JsonObject], column: &str) -> bool {
    let mut any = false;
    for row in rows {
        match row.get(column) {
            None | Some(Value::Null) => {}
            Some(Value::Number(_)) => any = true,
            Some(_) => return false,
        }
    }
    any
}

/// Whether every present, non-null cell of the column is a string
pub(crate) fn is_string_column(rows: &[JsonObject], column: &str) -> bool {
    let mut any = false;
    for row in rows {
        match row.get(column) {
            None | Some(Value::Null) => {}
            Some(Value::String(_)) => any = true,
            Some(_) => return false,
        }
    }
    any
}

/// Mean of the column's numeric values
pub(crate) fn column_mean(rows: &[JsonObject], column: &str) -> Option<f64> {
    if !is_numeric_column(rows, column) {
        return None;
    }
    let values = numeric_values(rows, column);
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of the column's numeric values (midpoint interpolation)
pub(crate) fn column_median(rows: &[JsonObject], column: &str) -> Option<f64> {
    if !is_numeric_column(rows, column) {
        return None;
    }
    let mut values = numeric_values(rows, column);
    if values.is_empty() {
        return None;
    }
    values.sort_by(|a, b| a.partial_cmp(b).expect("finite values"));

    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Most frequent non-null value of the column; first seen wins ties
pub(crate) fn column_mode(rows: &[JsonObject], column: &str) -> Option<Value> {
    let mut counts: Vec<(&Value, usize)> = Vec::new();

    for row in rows {
        let Some(value) = row.get(column) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(&Value, usize)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.clone())
}

/// A JSON number from a finite float
pub(crate) fn number(x: f64) -> Value {
    serde_json::Number::from_f64(x).map_or(Value::Null, Value::Number)
}
