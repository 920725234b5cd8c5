//! Configuration Module
//!
//! Handles loading ring configuration from environment variables.

use std::env;

/// Ring configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct RingConfig {
    /// Number of slots in the ring
    pub capacity: usize,
    /// Background expiry sweep interval in seconds
    pub sweep_interval: u64,
}

impl RingConfig {
    /// Creates a new RingConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `RING_CAPACITY` - Number of slots (default: 1024)
    /// - `RING_SWEEP_INTERVAL` - Sweep frequency in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            capacity: env::var("RING_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1024),
            sweep_interval: env::var("RING_SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            sweep_interval: 1,
        }
    }
}
