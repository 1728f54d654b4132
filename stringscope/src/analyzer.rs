/// Derived properties of a string.
///
/// Every function in this module is total and pure: any `&str`, including the
/// empty string, yields a value, and the same input always yields the same
/// output. Length counts UTF-8 bytes; character statistics count code
/// points. Properties are computed over the raw value except for the
/// palindrome check, which normalizes first (ASCII letters and digits only,
/// lower-cased).
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Analyzed properties of a stored string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringProperties {
    /// Size of the value in UTF-8 bytes
    pub length: usize,
    pub is_palindrome: bool,
    /// Number of distinct characters in the raw value
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    /// Occurrences of each character, keyed by the character itself
    pub character_frequency_map: BTreeMap<String, usize>,
}

/// A stored string together with its derived properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    /// Hex-encoded SHA-256 of `value`
    pub id: String,
    pub value: String,
    pub properties: StringProperties,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    /// Analyzes `value` and stamps the record with the current UTC time
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_timestamp(value, Utc::now())
    }

    /// Analyzes `value` using a caller-supplied creation time
    pub fn with_timestamp(value: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let value = value.into();
        let properties = analyze(&value);
        Self {
            id: properties.sha256_hash.clone(),
            value,
            properties,
            created_at,
        }
    }
}

/// Computes all derived properties of `value`
pub fn analyze(value: &str) -> StringProperties {
    let properties = StringProperties {
        length: value.len(),
        is_palindrome: is_palindrome(value),
        unique_characters: unique_characters(value),
        word_count: word_count(value),
        sha256_hash: sha256_hex(value),
        character_frequency_map: character_frequency(value),
    };
    debug!(
        "Analyzed string of length {} (palindrome: {}, words: {})",
        properties.length, properties.is_palindrome, properties.word_count
    );
    properties
}

/// Lower-case hex SHA-256 digest of the UTF-8 bytes of `value`
pub fn sha256_hex(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hex::encode(hasher.finalize())
}

/// Strips everything but ASCII letters and digits, then lower-cases
fn normalize(value: &str) -> Vec<u8> {
    value
        .bytes()
        .filter(u8::is_ascii_alphanumeric)
        .map(|b| b.to_ascii_lowercase())
        .collect()
}

/// Case- and punctuation-insensitive palindrome check
pub fn is_palindrome(value: &str) -> bool {
    let normalized = normalize(value);
    normalized.iter().eq(normalized.iter().rev())
}

pub fn unique_characters(value: &str) -> usize {
    value.chars().collect::<HashSet<_>>().len()
}

/// Counts runs of non-whitespace characters
pub fn word_count(value: &str) -> usize {
    value.split_whitespace().count()
}

pub fn character_frequency(value: &str) -> BTreeMap<String, usize> {
    let mut frequency = BTreeMap::new();
    for c in value.chars() {
        *frequency.entry(c.to_string()).or_insert(0) += 1;
    }
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_racecar_properties() {
        let properties = analyze("racecar");
        assert_eq!(properties.length, 7);
        assert!(properties.is_palindrome);
        assert_eq!(properties.word_count, 1);
        assert_eq!(properties.unique_characters, 4);
        assert_eq!(properties.character_frequency_map["r"], 2);
        assert_eq!(properties.character_frequency_map["e"], 1);
    }

    #[test]
    fn test_sentence_palindrome() {
        let properties = analyze("A man a plan a canal Panama");
        assert!(properties.is_palindrome);
        assert_eq!(properties.word_count, 6);
    }

    #[test]
    fn test_is_palindrome() {
        assert!(is_palindrome(""));
        assert!(is_palindrome("x"));
        assert!(is_palindrome("No 'x' in Nixon"));
        assert!(is_palindrome("12321"));
        assert!(is_palindrome("!!!"));
        assert!(!is_palindrome("hello"));
        assert!(!is_palindrome("ab"));
    }

    #[test]
    fn test_palindrome_ignores_non_ascii() {
        // Non-ASCII letters are dropped by normalization
        assert!(is_palindrome("aéa"));
        assert!(is_palindrome("ébé"));
    }

    #[test]
    fn test_palindrome_symmetric_under_reversal() {
        for value in ["Was it a car or a cat I saw?", "hello world", "Ab1", "", "Zz"] {
            let reversed: String = value.chars().rev().collect();
            assert_eq!(is_palindrome(value), is_palindrome(&reversed), "{value}");
        }
    }

    #[test]
    fn test_sha256_is_stable() {
        let first = sha256_hex("hello");
        assert_eq!(first, sha256_hex("hello"));
        assert_eq!(
            first,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("  hello   world \n"), 2);
        assert_eq!(word_count("one\ttwo\nthree"), 3);
    }

    #[test]
    fn test_unique_characters_counts_raw_value() {
        assert_eq!(unique_characters(""), 0);
        assert_eq!(unique_characters("aA"), 2);
        assert_eq!(unique_characters("a a"), 2);
        assert_eq!(unique_characters("héllo"), 4);
    }

    #[test]
    fn test_character_frequency() {
        let frequency = character_frequency("hello world");
        assert_eq!(frequency["l"], 3);
        assert_eq!(frequency["o"], 2);
        assert_eq!(frequency[" "], 1);
        assert_eq!(frequency.len(), 8);
        assert!(character_frequency("").is_empty());
    }

    #[test]
    fn test_length_counts_utf8_bytes() {
        let properties = analyze("héllo");
        assert_eq!(properties.length, 6);
        assert_eq!(properties.unique_characters, 4);
        assert_eq!(analyze("racecar").length, 7);
        assert_eq!(analyze("").length, 0);
    }

    #[test]
    fn test_record_id_is_hash_of_value() {
        let record = StringRecord::new("level");
        assert_eq!(record.id, sha256_hex("level"));
        assert_eq!(record.id, record.properties.sha256_hash);
        assert_eq!(record.value, "level");
    }
}
