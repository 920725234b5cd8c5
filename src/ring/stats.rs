//! Ring Statistics Module
//!
//! Tracks operation counters including insertions, overwrites, and evictions.

use serde::Serialize;

// == Ring Stats ==
/// Tracks ring operation counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RingStats {
    /// Number of entries placed into a fresh slot
    pub insertions: u64,
    /// Number of inserts that replaced an existing key in place
    pub overwrites: u64,
    /// Number of entries evicted (explicitly or silently on overflow)
    pub evictions: u64,
    /// Number of evictions triggered by an elapsed timeout
    pub expirations: u64,
    /// Current number of occupied slots
    pub total_entries: usize,
}

impl RingStats {
    // == Constructor ==
    /// Creates a new RingStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Eviction Rate ==
    /// Calculates the fraction of insertions that forced an eviction.
    ///
    /// Returns evictions / insertions, or 0.0 if nothing has been inserted.
    pub fn eviction_rate(&self) -> f64 {
        if self.insertions == 0 {
            0.0
        } else {
            self.evictions as f64 / self.insertions as f64
        }
    }

    // == Record Insertion ==
    /// Increments the insertion counter.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    // == Record Overwrite ==
    /// Increments the overwrite counter.
    pub fn record_overwrite(&mut self) {
        self.overwrites += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Update Entry Count ==
    /// Updates the occupied slot count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
