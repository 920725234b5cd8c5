//! Ring Entry Module
//!
//! Defines the keyed, timestamp-bearing record stored in the ring.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

// == Ring Entry ==
/// A keyed entry ordered by its absolute expiration timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingEntry {
    /// Unique identifier, used for O(1) retrieval
    pub key: String,
    /// Absolute expiration timestamp, the ordering key
    pub timeout: DateTime<Utc>,
}

impl RingEntry {
    // == Constructor ==
    /// Creates an entry expiring at the given absolute timestamp.
    pub fn new(key: impl Into<String>, timeout: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            timeout,
        }
    }

    // == TTL Constructor ==
    /// Creates an entry expiring `ttl_seconds` from now.
    pub fn with_ttl(key: impl Into<String>, ttl_seconds: i64) -> Self {
        Self::new(key, Utc::now() + Duration::seconds(ttl_seconds))
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is considered expired when the current
    /// time is greater than or equal to its timeout, so an entry whose TTL
    /// has fully elapsed is immediately expired.
    pub fn is_expired(&self) -> bool {
        !is_after(self.timeout, Utc::now())
    }
}

// == Comparator ==
/// Returns true when `a` chronologically follows `b`.
///
/// Strictly after: equal timestamps compare false. This is the only
/// comparison the ring uses to decide placement direction on insert.
pub fn is_after(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a > b
}
