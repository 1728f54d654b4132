use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Tracks store activity
#[derive(Debug, Clone)]
pub struct StoreMetrics {
    // Write metrics
    inserts: Arc<AtomicU64>,
    conflicts: Arc<AtomicU64>,
    deletes: Arc<AtomicU64>,

    // Read metrics
    lookup_hits: Arc<AtomicU64>,
    lookup_misses: Arc<AtomicU64>,
    scans: Arc<AtomicU64>,
    records_scanned: Arc<AtomicU64>,
}

impl StoreMetrics {
    /// Creates a new StoreMetrics instance
    pub fn new() -> Self {
        Self {
            inserts: Arc::new(AtomicU64::new(0)),
            conflicts: Arc::new(AtomicU64::new(0)),
            deletes: Arc::new(AtomicU64::new(0)),
            lookup_hits: Arc::new(AtomicU64::new(0)),
            lookup_misses: Arc::new(AtomicU64::new(0)),
            scans: Arc::new(AtomicU64::new(0)),
            records_scanned: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records an insert attempt
    pub fn record_insert(&self, accepted: bool) {
        if accepted {
            self.inserts.fetch_add(1, Ordering::Relaxed);
        } else {
            self.conflicts.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Records a point lookup or a delete lookup
    pub fn record_lookup(&self, hit: bool) {
        if hit {
            self.lookup_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.lookup_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a full scan over `records` entries
    pub fn record_scan(&self, records: u64) {
        let scans = self.scans.fetch_add(1, Ordering::Relaxed) + 1;
        self.records_scanned.fetch_add(records, Ordering::Relaxed);
        debug!("Scan #{} visited {} records", scans, records);
    }

    /// Gets current statistics
    pub fn get_stats(&self) -> StoreStats {
        StoreStats {
            inserts: self.inserts.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            lookup_hits: self.lookup_hits.load(Ordering::Relaxed),
            lookup_misses: self.lookup_misses.load(Ordering::Relaxed),
            scans: self.scans.load(Ordering::Relaxed),
            records_scanned: self.records_scanned.load(Ordering::Relaxed),
        }
    }

    /// Logs current statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Store stats:\n\
             Inserts/conflicts: {}/{}\n\
             Deletes: {}\n\
             Lookup hits/misses: {}/{}\n\
             Scans: {} ({} records visited)",
            stats.inserts,
            stats.conflicts,
            stats.deletes,
            stats.lookup_hits,
            stats.lookup_misses,
            stats.scans,
            stats.records_scanned
        );
    }
}

impl Default for StoreMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of store activity counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub inserts: u64,
    pub conflicts: u64,
    pub deletes: u64,
    pub lookup_hits: u64,
    pub lookup_misses: u64,
    pub scans: u64,
    pub records_scanned: u64,
}
