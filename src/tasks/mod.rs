//! Background Tasks Module
//!
//! Provides the periodic expiry sweep task.

mod sweep;

pub use sweep::spawn_sweep_task;
