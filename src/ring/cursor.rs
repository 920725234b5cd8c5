//! Cursor Module
//!
//! Wrap-aware index arithmetic for the circular slot array.

// == Direction ==
/// Direction of cursor movement around the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher indices, wrapping past the end back to 0
    Forward,
    /// Toward lower indices, wrapping past 0 back to the end
    Backward,
}

// == Step ==
/// Advances `index` one slot in `direction`, wrapping modulo `capacity`.
///
/// Holds at both physical boundaries: `step(c, c - 1, Forward) == 0` and
/// `step(c, 0, Backward) == c - 1`.
pub fn step(capacity: usize, index: usize, direction: Direction) -> usize {
    debug_assert!(capacity > 0, "step on zero-capacity ring");
    debug_assert!(index < capacity, "cursor outside ring bounds");

    match direction {
        Direction::Forward => (index + 1) % capacity,
        Direction::Backward => (index + capacity - 1) % capacity,
    }
}
