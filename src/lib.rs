//! Timeout Ring - a concurrent fixed-capacity eviction ring
//!
//! Provides a keyed, time-ordered circular buffer with O(1) lookup and
//! capacity-triggered eviction of the oldest entry.

pub mod config;
pub mod error;
pub mod ring;
pub mod tasks;

pub use config::RingConfig;
pub use error::{Result, RingError};
pub use ring::{RingEntry, RingStats, TimeoutRing};
pub use tasks::spawn_sweep_task;
