/// In-memory record store keyed by exact string value.
///
/// A single `RwLock` guards the whole map: lookups, listings and filter scans
/// share the read side, inserts and deletes take the write side. There is no
/// per-key locking. Every write is one map mutation performed while holding
/// the write lock, so a poisoned lock never exposes a half-applied change and
/// is recovered rather than propagated.
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

use crate::analyzer::StringRecord;
use crate::errors::{StoreError, StoreResult};
use crate::metrics::StoreMetrics;

/// Thread-safe mapping from string value to its analyzed record
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<String, StringRecord>>,
    metrics: StoreMetrics,
}

impl RecordStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &StoreMetrics {
        &self.metrics
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, StringRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, StringRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Analyzes `value` and stores the resulting record
    ///
    /// Analysis happens before the write lock is taken.
    pub fn create(&self, value: impl Into<String>) -> StoreResult<StringRecord> {
        let record = StringRecord::new(value);
        self.insert(record.clone())?;
        Ok(record)
    }

    /// Stores `record` under its value, failing if that value is already present
    pub fn insert(&self, record: StringRecord) -> StoreResult<()> {
        let mut records = self.write();
        match records.entry(record.value.clone()) {
            Entry::Occupied(entry) => {
                self.metrics.record_insert(false);
                debug!("Rejected duplicate value with id {}", entry.get().id);
                Err(StoreError::conflict(record.value))
            }
            Entry::Vacant(entry) => {
                info!("Stored string with id {}", record.id);
                entry.insert(record);
                self.metrics.record_insert(true);
                Ok(())
            }
        }
    }

    /// Returns a copy of the record stored for `value`
    pub fn get(&self, value: &str) -> StoreResult<StringRecord> {
        let record = self.read().get(value).cloned();
        self.metrics.record_lookup(record.is_some());
        record.ok_or_else(|| StoreError::not_found(value))
    }

    /// Removes and returns the record stored for `value`
    pub fn delete(&self, value: &str) -> StoreResult<StringRecord> {
        let removed = self.write().remove(value);
        self.metrics.record_lookup(removed.is_some());
        match removed {
            Some(record) => {
                self.metrics.record_delete();
                info!("Deleted string with id {}", record.id);
                Ok(record)
            }
            None => Err(StoreError::not_found(value)),
        }
    }

    /// Snapshot of every stored record, in no particular order
    pub fn list(&self) -> Vec<StringRecord> {
        self.select(|_| true)
    }

    /// Records satisfying `predicate`, evaluated under a single read lock
    pub fn select<F>(&self, predicate: F) -> Vec<StringRecord>
    where
        F: Fn(&StringRecord) -> bool,
    {
        let records = self.read();
        self.metrics.record_scan(records.len() as u64);
        records
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_insert_then_get() {
        let store = RecordStore::new();
        let created = store.create("racecar").unwrap();

        let fetched = store.get("racecar").unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_duplicate_insert_conflicts() {
        let store = RecordStore::new();
        store.create("hello").unwrap();

        let err = store.create("hello").unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref v) if v == "hello"));
        assert_eq!(store.len(), 1);

        let stats = store.metrics().get_stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.conflicts, 1);
    }

    #[test]
    fn test_keys_are_exact_values() {
        let store = RecordStore::new();
        store.create("Hello").unwrap();
        store.create("hello").unwrap();
        store.create("hello ").unwrap();
        assert_eq!(store.len(), 3);
        assert!(store.get("HELLO").is_err());
    }

    #[test]
    fn test_delete_then_get_not_found() {
        let store = RecordStore::new();
        store.create("level").unwrap();

        let removed = store.delete("level").unwrap();
        assert_eq!(removed.value, "level");
        assert!(matches!(store.get("level"), Err(StoreError::NotFound(_))));
        assert!(matches!(store.delete("level"), Err(StoreError::NotFound(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_and_select() {
        let store = RecordStore::new();
        for value in ["noon", "hello", "kayak", "world"] {
            store.create(value).unwrap();
        }

        assert_eq!(store.list().len(), 4);

        let mut palindromes: Vec<String> = store
            .select(|r| r.properties.is_palindrome)
            .into_iter()
            .map(|r| r.value)
            .collect();
        palindromes.sort();
        assert_eq!(palindromes, vec!["kayak", "noon"]);

        assert_eq!(store.metrics().get_stats().scans, 2);
    }

    #[test]
    fn test_concurrent_inserts_of_same_value() {
        let store = Arc::new(RecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.create("contended").is_ok())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_distinct_inserts() {
        let store = Arc::new(RecordStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..25 {
                        store.create(format!("value {i} {j}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 200);
    }
}
