//! Error types for the timeout ring
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Ring Error Enum ==
/// Unified error type for ring operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Peek offset beyond the occupied window
    #[error("offset {index} out of range for ring of size {size}")]
    OutOfRange { index: usize, size: usize },

    /// Capacity can only grow; shrinking would truncate live entries
    #[error("cannot shrink ring capacity from {current} to {requested}")]
    ShrinkUnsupported { current: usize, requested: usize },
}

// == Result Type Alias ==
/// Convenience Result type for ring operations.
pub type Result<T> = std::result::Result<T, RingError>;
