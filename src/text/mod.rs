//! Text normalization module
//!
//! An ordered, configurable pipeline of text transforms for cleaning
//! scraped content: strip markup tags, strip non-alphabetic characters,
//! lowercase, remove stop-words, stem, lemmatize.
//!
//! Each step is independently toggleable and idempotent on its own output,
//! but the pipeline as a whole is order-sensitive (stemming before
//! stop-word removal yields different results than after). The step order
//! is fixed; options only switch steps on or off.

pub mod stopwords;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("static regex"));
static NON_ALPHA_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("static regex"));
static NON_ALPHA_KEEP_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("static regex"));

/// Which pipeline steps to apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Strip markup tags
    #[serde(default = "default_true")]
    pub strip_tags: bool,
    /// Strip non-alphabetic characters
    #[serde(default = "default_true")]
    pub strip_non_alphabetic: bool,
    /// Keep digits when stripping non-alphabetic characters
    #[serde(default)]
    pub keep_digits: bool,
    /// Lowercase the text
    #[serde(default = "default_true")]
    pub lowercase: bool,
    /// Remove English stop words
    #[serde(default = "default_true")]
    pub remove_stopwords: bool,
    /// Stem tokens
    #[serde(default)]
    pub stem: bool,
    /// Lemmatize tokens
    #[serde(default)]
    pub lemmatize: bool,
}

fn default_true() -> bool {
    true
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strip_tags: true,
            strip_non_alphabetic: true,
            keep_digits: false,
            lowercase: true,
            remove_stopwords: true,
            stem: false,
            lemmatize: false,
        }
    }
}

impl NormalizeOptions {
    /// Options with every step disabled
    pub fn none() -> Self {
        Self {
            strip_tags: false,
            strip_non_alphabetic: false,
            keep_digits: false,
            lowercase: false,
            remove_stopwords: false,
            stem: false,
            lemmatize: false,
        }
    }
}

/// Text normalization pipeline
pub struct TextNormalizer {
    stemmer: Stemmer,
}

impl TextNormalizer {
    /// Create a normalizer for English text
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Remove markup tags
    pub fn strip_tags(&self, text: &str) -> String {
        TAG_RE.replace_all(text, "").into_owned()
    }

    /// Remove characters that are not letters or whitespace
    pub fn strip_non_alphabetic(&self, text: &str, keep_digits: bool) -> String {
        let re = if keep_digits {
            &*NON_ALPHA_KEEP_DIGITS_RE
        } else {
            &*NON_ALPHA_RE
        };
        re.replace_all(text, "").into_owned()
    }

    /// Lowercase the text
    pub fn lowercase(&self, text: &str) -> String {
        text.to_lowercase()
    }

    /// Remove stop words, keeping the original casing of surviving tokens
    pub fn remove_stopwords(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|token| !stopwords::is_stopword(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Stem every token
    pub fn stem(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lemmatize every token (noun lemmatization)
    pub fn lemmatize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(lemmatize_word)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the enabled pipeline steps in their fixed order
    pub fn normalize(&self, text: &str, options: &NormalizeOptions) -> String {
        let mut text = text.to_string();

        if options.strip_tags {
            text = self.strip_tags(&text);
        }
        if options.strip_non_alphabetic {
            text = self.strip_non_alphabetic(&text, options.keep_digits);
        }
        if options.lowercase {
            text = self.lowercase(&text);
        }
        if options.remove_stopwords {
            text = self.remove_stopwords(&text);
        }
        if options.stem {
            text = self.stem(&text);
        }
        if options.lemmatize {
            text = self.lemmatize(&text);
        }

        text
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TextNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextNormalizer").finish_non_exhaustive()
    }
}

/// Irregular noun forms
static IRREGULAR_NOUNS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("children", "child"),
        ("feet", "foot"),
        ("geese", "goose"),
        ("men", "man"),
        ("mice", "mouse"),
        ("people", "person"),
        ("teeth", "tooth"),
        ("women", "woman"),
    ])
});

/// Reduce a plural noun to its singular form.
///
/// Rule-based: irregular forms first, then suffix rules. Tokens that match
/// no rule pass through unchanged, so non-nouns are left alone.
fn lemmatize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if let Some(singular) = IRREGULAR_NOUNS.get(lower.as_str()) {
        return (*singular).to_string();
    }

    if let Some(stem) = lower.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    if lower.ends_with("sses") || lower.ends_with("shes") || lower.ends_with("ches") {
        return lower[..lower.len() - 2].to_string();
    }
    if let Some(stem) = lower.strip_suffix("xes") {
        return format!("{stem}x");
    }
    if let Some(stem) = lower.strip_suffix('s') {
        // Plain plural, but not -ss, -us, -is
        if !stem.ends_with('s') && !stem.ends_with('u') && !stem.ends_with('i') && stem.len() > 1 {
            return stem.to_string();
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests;
