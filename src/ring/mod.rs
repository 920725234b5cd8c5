//! Ring Module
//!
//! Provides a fixed-capacity, time-ordered eviction ring with O(1) key lookup.

mod cursor;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use cursor::{step, Direction};
pub use entry::{is_after, RingEntry};
pub use stats::RingStats;
pub use store::TimeoutRing;
