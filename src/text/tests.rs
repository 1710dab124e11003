//! Tests for the text normalization pipeline

use super::*;
use pretty_assertions::assert_eq;
use test_case::test_case;

#[test]
fn test_strip_tags() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.strip_tags("<p>Hello <b>world</b></p>"),
        "Hello world"
    );
    assert_eq!(normalizer.strip_tags("no tags here"), "no tags here");
}

#[test]
fn test_strip_non_alphabetic_removes_digits_by_default() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.strip_non_alphabetic("agent 007, reporting!", false),
        "agent  reporting"
    );
}

#[test]
fn test_strip_non_alphabetic_can_keep_digits() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.strip_non_alphabetic("agent 007, reporting!", true),
        "agent 007 reporting"
    );
}

#[test]
fn test_lowercase() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.lowercase("Hello WORLD"), "hello world");
}

#[test]
fn test_remove_stopwords() {
    let normalizer = TextNormalizer::new();
    assert_eq!(
        normalizer.remove_stopwords("the quick brown fox jumps over the lazy dog"),
        "quick brown fox jumps lazy dog"
    );
}

#[test]
fn test_remove_stopwords_matches_case_insensitively() {
    let normalizer = TextNormalizer::new();
    // "The" matches the stop word; "Fox" survives with its casing
    assert_eq!(normalizer.remove_stopwords("The Fox"), "Fox");
}

#[test]
fn test_stem() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.stem("running cats"), "run cat");
}

#[test_case("cats", "cat")]
#[test_case("cities", "city")]
#[test_case("boxes", "box")]
#[test_case("glasses", "glass")]
#[test_case("children", "child")]
#[test_case("bus", "bus")]
#[test_case("running", "running")]
fn test_lemmatize_word(input: &str, expected: &str) {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.lemmatize(input), expected);
}

#[test]
fn test_normalize_default_pipeline() {
    let normalizer = TextNormalizer::new();
    let result = normalizer.normalize(
        "<p>The Quick Brown Fox, Jumps 42 Times!</p>",
        &NormalizeOptions::default(),
    );
    assert_eq!(result, "quick brown fox jumps times");
}

#[test]
fn test_normalize_no_steps_is_identity() {
    let normalizer = TextNormalizer::new();
    let input = "<p>Left EXACTLY as-is, 42!</p>";
    assert_eq!(
        normalizer.normalize(input, &NormalizeOptions::none()),
        input
    );
}

#[test]
fn test_normalize_idempotent_with_lowercase_and_strip_tags() {
    let normalizer = TextNormalizer::new();
    let options = NormalizeOptions {
        strip_tags: true,
        lowercase: true,
        ..NormalizeOptions::none()
    };

    let input = "<div>Some <em>Mixed</em> CASE text</div>";
    let once = normalizer.normalize(input, &options);
    let twice = normalizer.normalize(&once, &options);
    assert_eq!(once, twice);
}

#[test]
fn test_normalize_order_sensitivity() {
    let normalizer = TextNormalizer::new();

    // With stemming enabled, stop-word removal happens first, so "was"
    // is gone before the stemmer could have touched it
    let options = NormalizeOptions {
        stem: true,
        ..NormalizeOptions::default()
    };
    let result = normalizer.normalize("it was raining heavily", &options);
    assert_eq!(result, "rain heavili");
}

#[test]
fn test_normalize_empty_input() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize("", &NormalizeOptions::default()), "");
}

#[test]
fn test_options_deserialize_with_defaults() {
    let options: NormalizeOptions = serde_yaml::from_str("stem: true").unwrap();
    assert!(options.stem);
    assert!(options.strip_tags);
    assert!(options.lowercase);
    assert!(!options.lemmatize);
}

#[test]
fn test_stopword_set_membership() {
    assert!(stopwords::is_stopword("the"));
    assert!(stopwords::is_stopword("The"));
    assert!(!stopwords::is_stopword("fox"));
}
