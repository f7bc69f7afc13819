//! Aggregated counters produced by one scan of one monitor.

use std::collections::{BTreeMap, BTreeSet};

/// Counters for one scan of one monitor
///
/// Watched extensions are seeded with zero when the result is created, so an
/// extension configured but absent on disk still reports `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub total_file_count: u64,
    pub ext_count: BTreeMap<String, u64>,
    pub ext_disk_space: BTreeMap<String, u64>,
    pub empty_file_count: u64,
    /// Entries skipped because their type or size could not be read
    pub skipped_entries: u64,
}

impl ScanResult {
    /// Create an empty result with every watched extension set to zero
    pub fn seeded(extensions: &BTreeSet<String>) -> Self {
        let zeroed: BTreeMap<String, u64> = extensions.iter().map(|ext| (ext.clone(), 0)).collect();

        Self {
            ext_count: zeroed.clone(),
            ext_disk_space: zeroed,
            ..Default::default()
        }
    }

    /// Account for one regular file.
    ///
    /// `watched_extension` is the file's normalized extension when it belongs
    /// to the monitor's watch set, `None` otherwise.
    pub fn record_file(&mut self, size: u64, watched_extension: Option<&str>) {
        self.total_file_count += 1;
        if size == 0 {
            self.empty_file_count += 1;
        }

        if let Some(ext) = watched_extension {
            *self.ext_count.entry(ext.to_string()).or_insert(0) += 1;
            *self.ext_disk_space.entry(ext.to_string()).or_insert(0) += size;
        }
    }

    pub fn record_skipped(&mut self) {
        self.skipped_entries += 1;
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: &ScanResult) {
        self.total_file_count += other.total_file_count;
        self.empty_file_count += other.empty_file_count;
        self.skipped_entries += other.skipped_entries;

        for (ext, count) in &other.ext_count {
            *self.ext_count.entry(ext.clone()).or_insert(0) += count;
        }
        for (ext, bytes) in &other.ext_disk_space {
            *self.ext_disk_space.entry(ext.clone()).or_insert(0) += bytes;
        }
    }

    /// Total bytes across all watched extensions
    pub fn watched_bytes(&self) -> u64 {
        self.ext_disk_space.values().sum()
    }
}
