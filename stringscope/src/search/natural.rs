use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{StoreError, StoreResult};
use crate::filters::FilterSet;

static LONGER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"longer than ([0-9]+)").expect("valid longer-than pattern"));

static SHORTER_THAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"shorter than ([0-9]+)").expect("valid shorter-than pattern"));

static CONTAINS_LETTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"contain(?:s|ing)? (?:the )?(?:letter|character) ([a-z])")
        .expect("valid contains pattern")
});

/// A natural-language query together with the filters derived from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: FilterSet,
}

/// Translates a free-text query into a [`FilterSet`]
///
/// Recognized phrases (case-insensitive):
/// - "palindrom..." sets `is_palindrome`
/// - "single word" / "two word" set `word_count` (the first wins)
/// - "longer than N" sets `min_length` to N + 1
/// - "shorter than N" sets `max_length` to N - 1
/// - "contains the letter x" sets `contains_character`
/// - "first vowel" sets `contains_character` to "a", replacing the above
///
/// Numbers too large for `i64` saturate. "shorter than 0" yields a
/// `max_length` of -1, which no string satisfies. Fails with `Unparseable`
/// when nothing is recognized.
pub fn translate(query: &str) -> StoreResult<FilterSet> {
    let query = query.to_lowercase();
    let mut filters = FilterSet::default();

    if query.contains("palindrom") {
        filters.is_palindrome = Some(true);
    }

    if query.contains("single word") {
        filters.word_count = Some(1);
    } else if query.contains("two word") {
        filters.word_count = Some(2);
    }

    if let Some(n) = capture_number(&LONGER_THAN, &query) {
        filters.min_length = Some(n.saturating_add(1));
    }

    if let Some(n) = capture_number(&SHORTER_THAN, &query) {
        filters.max_length = Some(n - 1);
    }

    if let Some(caps) = CONTAINS_LETTER.captures(&query) {
        filters.contains_character = Some(caps[1].to_string());
    }

    // Heuristic: "first vowel" always means the letter a
    if query.contains("first vowel") {
        filters.contains_character = Some("a".to_string());
    }

    if filters.is_empty() {
        return Err(StoreError::unparseable(
            "could not parse any filters from query",
        ));
    }

    debug!("Interpreted {:?} as {:?}", query, filters);
    Ok(filters)
}

/// Runs [`translate`] and keeps the original text alongside the result
pub fn interpret(query: &str) -> StoreResult<InterpretedQuery> {
    Ok(InterpretedQuery {
        original: query.to_string(),
        parsed_filters: translate(query)?,
    })
}

/// First captured number, saturating at `i64::MAX`
fn capture_number(pattern: &Regex, query: &str) -> Option<i64> {
    pattern
        .captures(query)
        .map(|caps| caps[1].parse::<i64>().unwrap_or(i64::MAX))
}
