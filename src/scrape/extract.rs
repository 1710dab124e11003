//! HTML extraction helpers
//!
//! Free functions over a parsed document. Each mirrors a common scraping
//! chore: pull links, visible text, metadata, tables, and structured
//! fragments out of a page.

use crate::error::{Error, Result};
use crate::types::StringMap;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use std::collections::HashMap;

/// A form found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    /// The form's action attribute, if any
    pub action: Option<String>,
    /// Submit method, lowercased ("get" when absent)
    pub method: String,
    /// Named fields and their preset values
    pub fields: StringMap,
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::selector(format!("{selector}: {e}")))
}

/// Text content of an element with fragment-level whitespace stripped
fn element_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect::<String>()
}

/// Extract href values from anchors matching the selector
pub fn extract_links(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    Ok(document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Extract stripped text from all elements matching the selector
pub fn extract_text(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).map(element_text).collect())
}

/// Extract meta tag content keyed by name or property
pub fn extract_metadata(document: &Html) -> StringMap {
    let selector = Selector::parse("meta").expect("static selector");
    let mut metadata = HashMap::new();

    for meta in document.select(&selector) {
        let element = meta.value();
        let key = element.attr("name").or_else(|| element.attr("property"));
        if let Some(key) = key {
            let content = element.attr("content").unwrap_or_default();
            metadata.insert(key.to_string(), content.to_string());
        }
    }

    metadata
}

/// Extract the first matching table as header-keyed records.
///
/// Headers come from the `th` cells; each following row becomes one record.
/// Rows whose cell count does not match the header count are skipped.
pub fn extract_table(document: &Html, selector: &str) -> Result<Vec<StringMap>> {
    let table_selector = parse_selector(selector)?;
    let th = Selector::parse("th").expect("static selector");
    let tr = Selector::parse("tr").expect("static selector");
    let td = Selector::parse("td").expect("static selector");

    let Some(table) = document.select(&table_selector).next() else {
        return Ok(vec![]);
    };

    let headers: Vec<String> = table.select(&th).map(element_text).collect();

    let mut rows = Vec::new();
    for row in table.select(&tr).skip(1) {
        let cells: Vec<String> = row.select(&td).map(element_text).collect();
        if cells.len() == headers.len() {
            rows.push(headers.iter().cloned().zip(cells).collect());
        }
    }

    Ok(rows)
}

/// Extract headings grouped by level ("h1" through "h6")
pub fn extract_headings(document: &Html) -> HashMap<String, Vec<String>> {
    let mut headings = HashMap::new();

    for level in 1..=6 {
        let tag = format!("h{level}");
        let selector = Selector::parse(&tag).expect("static selector");
        let texts: Vec<String> = document.select(&selector).map(element_text).collect();
        headings.insert(tag, texts);
    }

    headings
}

/// Extract stripped text of every paragraph
pub fn extract_paragraphs(document: &Html) -> Vec<String> {
    let selector = Selector::parse("p").expect("static selector");
    document.select(&selector).map(element_text).collect()
}

/// Extract list items grouped per matching list element
pub fn extract_lists(document: &Html, selector: &str) -> Result<Vec<Vec<String>>> {
    let list_selector = parse_selector(selector)?;
    let li = Selector::parse("li").expect("static selector");

    Ok(document
        .select(&list_selector)
        .map(|list| list.select(&li).map(element_text).collect())
        .collect())
}

/// Extract image source URLs matching the selector
pub fn extract_images(document: &Html, selector: &str) -> Result<Vec<String>> {
    let selector = parse_selector(selector)?;
    Ok(document
        .select(&selector)
        .filter_map(|img| img.value().attr("src"))
        .map(str::to_string)
        .collect())
}

/// Extract JSON-LD blocks; malformed blocks are skipped
pub fn extract_json_ld(document: &Html) -> Vec<Value> {
    let selector =
        Selector::parse("script[type=\"application/ld+json\"]").expect("static selector");

    document
        .select(&selector)
        .filter_map(|script| {
            let raw: String = script.text().collect();
            serde_json::from_str(&raw).ok()
        })
        .collect()
}

/// Extract forms with their action, method, and named fields
pub fn extract_forms(document: &Html, selector: &str) -> Result<Vec<FormInfo>> {
    let form_selector = parse_selector(selector)?;
    let field_selector = Selector::parse("input, textarea, select").expect("static selector");

    let mut forms = Vec::new();
    for form in document.select(&form_selector) {
        let element = form.value();
        let mut fields = HashMap::new();

        for field in form.select(&field_selector) {
            if let Some(name) = field.value().attr("name") {
                let value = field.value().attr("value").unwrap_or_default();
                fields.insert(name.to_string(), value.to_string());
            }
        }

        forms.push(FormInfo {
            action: element.attr("action").map(str::to_string),
            method: element
                .attr("method")
                .unwrap_or("get")
                .to_ascii_lowercase(),
            fields,
        });
    }

    Ok(forms)
}
