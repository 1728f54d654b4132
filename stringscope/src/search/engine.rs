use serde::Serialize;
use tracing::{debug, info};

use super::natural::{interpret, InterpretedQuery};
use crate::analyzer::StringRecord;
use crate::errors::StoreResult;
use crate::filters::{matches, FilterSet};
use crate::store::RecordStore;

/// Records matching a structured filter query
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutput {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: FilterSet,
}

/// Records matching a natural-language query
#[derive(Debug, Clone, Serialize)]
pub struct NaturalLanguageOutput {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

/// Scans the store for records matching `filters`
///
/// Results are ordered by creation time, then by value.
pub fn filter_records(store: &RecordStore, filters: FilterSet) -> QueryOutput {
    debug!("Filtering records with {:?}", filters);
    let data = collect_matches(store, &filters);
    info!("Filter query matched {} records", data.len());
    QueryOutput {
        count: data.len(),
        data,
        filters_applied: filters,
    }
}

/// Translates `query` and scans the store with the resulting filters
pub fn filter_by_natural_language(
    store: &RecordStore,
    query: &str,
) -> StoreResult<NaturalLanguageOutput> {
    let interpreted_query = interpret(query)?;
    let data = collect_matches(store, &interpreted_query.parsed_filters);
    info!(
        "Natural-language query {:?} matched {} records",
        query,
        data.len()
    );
    Ok(NaturalLanguageOutput {
        count: data.len(),
        data,
        interpreted_query,
    })
}

fn collect_matches(store: &RecordStore, filters: &FilterSet) -> Vec<StringRecord> {
    let mut data = store.select(|record| matches(record, filters));
    data.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.value.cmp(&b.value))
    });
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::StoreError;

    fn seeded_store() -> RecordStore {
        let store = RecordStore::new();
        for value in ["racecar", "noon", "hello", "hello world", "never odd or even"] {
            store.create(value).unwrap();
        }
        store
    }

    #[test]
    fn test_filter_records_with_empty_filters() {
        let store = seeded_store();
        let output = filter_records(&store, FilterSet::default());
        assert_eq!(output.count, 5);
        assert_eq!(output.data.len(), 5);
        assert!(output.filters_applied.is_empty());
    }

    #[test]
    fn test_filter_records_palindromes() {
        let store = seeded_store();
        let output = filter_records(
            &store,
            FilterSet {
                is_palindrome: Some(true),
                ..FilterSet::default()
            },
        );
        let mut values: Vec<_> = output.data.iter().map(|r| r.value.as_str()).collect();
        values.sort();
        assert_eq!(values, vec!["never odd or even", "noon", "racecar"]);
        assert_eq!(output.count, 3);
    }

    #[test]
    fn test_natural_language_query() {
        let store = seeded_store();
        let output =
            filter_by_natural_language(&store, "all single word palindromic strings").unwrap();
        let mut values: Vec<_> = output.data.iter().map(|r| r.value.as_str()).collect();
        values.sort();
        assert_eq!(values, vec!["noon", "racecar"]);
        assert_eq!(
            output.interpreted_query.original,
            "all single word palindromic strings"
        );
        assert_eq!(output.interpreted_query.parsed_filters.word_count, Some(1));
    }

    #[test]
    fn test_natural_language_query_unparseable() {
        let store = seeded_store();
        assert!(matches!(
            filter_by_natural_language(&store, "banana"),
            Err(StoreError::Unparseable(_))
        ));
    }

    #[test]
    fn test_results_sorted_by_creation() {
        use chrono::{Duration, Utc};

        let store = RecordStore::new();
        let now = Utc::now();
        store
            .insert(StringRecord::with_timestamp("second", now))
            .unwrap();
        store
            .insert(StringRecord::with_timestamp(
                "first",
                now - Duration::seconds(5),
            ))
            .unwrap();

        let output = filter_records(&store, FilterSet::default());
        let values: Vec<_> = output.data.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(values, vec!["first", "second"]);
    }
}
