/// Structured record filtering.
///
/// A [`FilterSet`] is a conjunction of optional constraints. Both the typed
/// query parameters and the natural-language translator produce the same
/// type, so there is exactly one matching routine. Absent fields place no
/// constraint on a record, which means the empty set matches everything.
///
/// ```rust,ignore
/// let filters = FilterSet {
///     is_palindrome: Some(true),
///     word_count: Some(1),
///     ..FilterSet::default()
/// };
/// let hits = store.select(|record| matches(record, &filters));
/// ```
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::analyzer::StringRecord;
use crate::errors::{StoreError, StoreResult};

/// Optional constraints applied to stored records
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_palindrome: Option<bool>,
    /// Inclusive lower bound on length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    /// Inclusive upper bound on length; negative bounds match nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<usize>,
    /// A single grapheme that must appear in the value, ignoring case
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains_character: Option<String>,
}

impl FilterSet {
    /// True when no constraint is present
    pub fn is_empty(&self) -> bool {
        self.is_palindrome.is_none()
            && self.min_length.is_none()
            && self.max_length.is_none()
            && self.word_count.is_none()
            && self.contains_character.is_none()
    }
}

/// Raw, still-encoded filter parameters as they arrive in a query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl FilterParams {
    /// Validates and decodes the parameters
    ///
    /// Empty parameters are treated as absent.
    pub fn parse(&self) -> StoreResult<FilterSet> {
        Ok(FilterSet {
            is_palindrome: present(&self.is_palindrome)
                .map(|raw| {
                    parse_bool(raw).ok_or_else(|| {
                        StoreError::invalid_input("Invalid value for is_palindrome")
                    })
                })
                .transpose()?,
            min_length: parse_length(&self.min_length, "min_length")?,
            max_length: parse_length(&self.max_length, "max_length")?,
            word_count: parse_count(&self.word_count, "word_count")?,
            contains_character: present(&self.contains_character)
                .map(|raw| {
                    if raw.graphemes(true).count() == 1 {
                        Ok(raw.to_string())
                    } else {
                        Err(StoreError::invalid_input(
                            "contains_character must be a single character",
                        ))
                    }
                })
                .transpose()?,
        })
    }
}

fn present(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

fn parse_count(raw: &Option<String>, name: &str) -> StoreResult<Option<usize>> {
    present(raw)
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| StoreError::invalid_input(format!("Invalid value for {}", name)))
        })
        .transpose()
}

/// Length bounds share the non-negative rule of counts but are stored signed
fn parse_length(raw: &Option<String>, name: &str) -> StoreResult<Option<i64>> {
    parse_count(raw, name)?
        .map(|n| {
            i64::try_from(n)
                .map_err(|_| StoreError::invalid_input(format!("Invalid value for {}", name)))
        })
        .transpose()
}

/// Accepts the usual spellings of a boolean: 1/0, t/f and true/false in
/// lower, upper or title case
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Checks whether `record` satisfies every constraint present in `filters`
pub fn matches(record: &StringRecord, filters: &FilterSet) -> bool {
    let properties = &record.properties;
    let length = i64::try_from(properties.length).unwrap_or(i64::MAX);

    if let Some(is_palindrome) = filters.is_palindrome {
        if properties.is_palindrome != is_palindrome {
            return false;
        }
    }

    if let Some(min_length) = filters.min_length {
        if length < min_length {
            return false;
        }
    }

    if let Some(max_length) = filters.max_length {
        if length > max_length {
            return false;
        }
    }

    if let Some(word_count) = filters.word_count {
        if properties.word_count != word_count {
            return false;
        }
    }

    if let Some(needle) = &filters.contains_character {
        if !record
            .value
            .to_lowercase()
            .contains(&needle.to_lowercase())
        {
            return false;
        }
    }

    true
}
