//! Ring Store Module
//!
//! Core container combining the circular slot array, the oldest/newest
//! cursors, the key index, and the lock discipline guarding them.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use crate::config::RingConfig;
use crate::error::{Result, RingError};
use crate::ring::cursor::{step, Direction};
use crate::ring::entry::{is_after, RingEntry};
use crate::ring::stats::RingStats;

// == Ring State ==
/// Mutable state guarded by the ring's lock.
#[derive(Debug)]
struct RingState {
    /// Fixed-capacity circular slot array
    slots: Vec<Option<Arc<RingEntry>>>,
    /// Cursor of the slot evicted on overflow
    oldest: usize,
    /// Cursor of the slot holding the most recent extreme
    newest: usize,
    /// Key to physical slot index, for O(1) retrieval
    key_index: HashMap<String, usize>,
    /// Operation counters
    stats: RingStats,
}

impl RingState {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empty iff both cursors coincide on an unoccupied slot.
    fn is_empty(&self) -> bool {
        self.oldest == self.newest && self.slots[self.newest].is_none()
    }

    /// Occupied slot count of the circular window `[oldest, newest]`.
    fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.newest + self.capacity() - self.oldest) % self.capacity() + 1
        }
    }

    fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Places the first entry of an empty ring at slot 0.
    fn place_first(&mut self, entry: Arc<RingEntry>) {
        self.oldest = 0;
        self.newest = 0;
        self.key_index.insert(entry.key.clone(), 0);
        self.slots[0] = Some(entry);
    }

    /// Places an entry relative to the newest slot.
    ///
    /// An entry older than the newest slot extends the window backward from
    /// the oldest cursor; everything else extends it forward. This single
    /// comparison is the whole ordering policy: the window is ordered only
    /// approximately.
    fn place(&mut self, entry: Arc<RingEntry>) {
        let capacity = self.capacity();
        let newest_is_after = self.slots[self.newest]
            .as_ref()
            .is_some_and(|current| is_after(current.timeout, entry.timeout));

        let slot = if newest_is_after {
            self.oldest = step(capacity, self.oldest, Direction::Backward);
            self.oldest
        } else {
            self.newest = step(capacity, self.newest, Direction::Forward);
            self.newest
        };

        self.key_index.insert(entry.key.clone(), slot);
        self.slots[slot] = Some(entry);
    }

    /// Clears the oldest slot, unmaps its key, and advances the cursor.
    ///
    /// Evicting the last entry resets both cursors to 0 so the
    /// empty/non-empty predicates stay well-defined.
    fn evict_oldest(&mut self) -> Option<Arc<RingEntry>> {
        let evicted = self.slots[self.oldest].take()?;
        self.key_index.remove(evicted.key.as_str());

        if self.is_empty() {
            self.oldest = 0;
            self.newest = 0;
        } else {
            self.oldest = step(self.capacity(), self.oldest, Direction::Forward);
        }

        self.stats.record_eviction();
        Some(evicted)
    }
}

// == Timeout Ring ==
/// Fixed-capacity, time-ordered eviction ring with O(1) key lookup.
///
/// Entries carry an absolute expiration timestamp. Insertion compares the
/// incoming timeout against the newest slot to pick a placement direction;
/// once the ring is full, inserting **silently evicts** the entry at the
/// oldest cursor to make room. Callers expecting pure append semantics must
/// account for that lossy side effect.
///
/// Every operation, reads included, goes through the internal lock, so a
/// `TimeoutRing` can be shared across threads behind an [`Arc`]. Locks are
/// never held across a call boundary.
///
/// Ordering is approximate: placement only ever compares against the newest
/// slot, so interleaved timestamps or timeout updates can leave the window
/// out of strict chronological order. The oldest cursor remains the eviction
/// victim regardless.
///
/// # Example
///
/// ```
/// use timeout_ring::{RingEntry, TimeoutRing};
///
/// let ring = TimeoutRing::new(2);
/// ring.insert(RingEntry::with_ttl("a", 30));
/// ring.insert(RingEntry::with_ttl("b", 60));
///
/// // Full: the next insert evicts "a", the oldest entry.
/// ring.insert(RingEntry::with_ttl("c", 90));
///
/// assert_eq!(ring.len(), 2);
/// assert!(ring.get("a").is_none());
/// assert!(ring.get("c").is_some());
/// ```
#[derive(Debug)]
pub struct TimeoutRing {
    inner: RwLock<RingState>,
}

impl TimeoutRing {
    // == Constructor ==
    /// Creates a ring with `capacity` slots.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be at least 1");

        Self {
            inner: RwLock::new(RingState {
                slots: vec![None; capacity],
                oldest: 0,
                newest: 0,
                key_index: HashMap::new(),
                stats: RingStats::new(),
            }),
        }
    }

    /// Creates a ring sized from configuration.
    pub fn from_config(config: &RingConfig) -> Self {
        Self::new(config.capacity)
    }

    // == Insert ==
    /// Inserts an entry, silently evicting the oldest entry when full.
    ///
    /// Re-inserting an existing key overwrites that key's slot in place
    /// without moving either cursor. Insertion itself never fails; the
    /// eviction side effect is the price of the fixed capacity.
    pub fn insert(&self, entry: RingEntry) -> Arc<RingEntry> {
        let mut state = self.inner.write();
        let entry = Arc::new(entry);

        // Overwrite case: the key already occupies a slot
        let existing = state.key_index.get(entry.key.as_str()).copied();
        if let Some(index) = existing {
            state.slots[index] = Some(Arc::clone(&entry));
            state.stats.record_overwrite();
            return entry;
        }

        if state.is_full() {
            if let Some(evicted) = state.evict_oldest() {
                debug!(key = %evicted.key, "ring full, evicted oldest entry");
            }
        }

        if state.is_empty() {
            state.place_first(Arc::clone(&entry));
        } else {
            state.place(Arc::clone(&entry));
        }

        state.stats.record_insertion();
        let occupied = state.len();
        state.stats.set_total_entries(occupied);

        entry
    }

    // == Evict Oldest ==
    /// Removes and returns the entry at the oldest cursor.
    ///
    /// Returns `None` on an empty ring, leaving state untouched.
    pub fn evict_oldest(&self) -> Option<Arc<RingEntry>> {
        let mut state = self.inner.write();

        let evicted = state.evict_oldest();
        if evicted.is_some() {
            let occupied = state.len();
            state.stats.set_total_entries(occupied);
        }
        evicted
    }

    // == Evict Expired ==
    /// Evicts entries whose timeout has elapsed, starting at the oldest
    /// cursor and stopping at the first live entry.
    ///
    /// Because the window is only approximately ordered, expired entries
    /// sitting behind a live one are left for a later sweep.
    ///
    /// Returns the number of entries removed.
    pub fn evict_expired(&self) -> usize {
        let mut state = self.inner.write();
        let mut removed = 0;

        while state.slots[state.oldest]
            .as_ref()
            .is_some_and(|entry| entry.is_expired())
        {
            match state.evict_oldest() {
                Some(_) => {
                    state.stats.record_expiration();
                    removed += 1;
                }
                None => break,
            }
        }

        if removed > 0 {
            let occupied = state.len();
            state.stats.set_total_entries(occupied);
        }
        removed
    }

    // == Peek ==
    /// Returns the entry at `offset` slots past the oldest cursor.
    ///
    /// Offset 0 is the oldest entry, `len() - 1` the newest extreme. Any
    /// offset at or beyond `len()` is rejected with
    /// [`RingError::OutOfRange`]; no state is touched.
    pub fn peek(&self, offset: usize) -> Result<Arc<RingEntry>> {
        let state = self.inner.read();

        let size = state.len();
        if offset >= size {
            return Err(RingError::OutOfRange {
                index: offset,
                size,
            });
        }

        let slot = (state.oldest + offset) % state.capacity();
        state.slots[slot].clone().ok_or(RingError::OutOfRange {
            index: offset,
            size,
        })
    }

    // == Peek Oldest ==
    /// Returns the entry at the oldest cursor without removing it.
    pub fn peek_oldest(&self) -> Option<Arc<RingEntry>> {
        let state = self.inner.read();
        state.slots[state.oldest].clone()
    }

    // == Peek Newest ==
    /// Returns the entry at the newest cursor, the most recent extreme of
    /// the placement policy, or `None` if the ring is empty.
    pub fn peek_newest(&self) -> Option<Arc<RingEntry>> {
        let state = self.inner.read();
        state.slots[state.newest].clone()
    }

    // == Get ==
    /// Retrieves an entry by key in O(1) via the key index.
    pub fn get(&self, key: &str) -> Option<Arc<RingEntry>> {
        let state = self.inner.read();
        let index = state.key_index.get(key).copied()?;
        state.slots[index].clone()
    }

    /// Checks whether a key currently occupies a slot.
    pub fn contains(&self, key: &str) -> bool {
        let state = self.inner.read();
        state.key_index.contains_key(key)
    }

    // == Update Timeout ==
    /// Replaces the timeout of the entry stored under `key`, returning the
    /// updated entry, or `None` if the key is absent.
    ///
    /// The entry keeps its slot: ordering is NOT restored, so timeout
    /// updates may leave the window chronologically stale. Callers renewing
    /// a lease pass `Utc::now() + ttl`.
    pub fn update_timeout(&self, key: &str, timeout: DateTime<Utc>) -> Option<Arc<RingEntry>> {
        let mut state = self.inner.write();

        let index = state.key_index.get(key).copied()?;
        let updated = state.slots[index]
            .as_ref()
            .map(|current| Arc::new(RingEntry::new(current.key.clone(), timeout)))?;
        state.slots[index] = Some(Arc::clone(&updated));
        Some(updated)
    }

    // == Grow ==
    /// Appends empty slots until the ring holds `new_capacity` slots.
    ///
    /// Shrinking is unsupported and rejected with
    /// [`RingError::ShrinkUnsupported`]. Growth never relocates existing
    /// entries: if the occupied window currently wraps the physical end,
    /// the appended slots split the window and corrupt its accounting, so
    /// grow before the ring wraps.
    pub fn grow(&self, new_capacity: usize) -> Result<()> {
        let mut state = self.inner.write();

        let current = state.capacity();
        if new_capacity < current {
            return Err(RingError::ShrinkUnsupported {
                current,
                requested: new_capacity,
            });
        }

        state.slots.resize(new_capacity, None);
        Ok(())
    }

    // == Predicates ==
    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.inner.read().is_full()
    }

    // == Length ==
    /// Returns the current number of occupied slots.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns the physical slot count.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    // == Stats ==
    /// Returns a snapshot of the operation counters.
    pub fn stats(&self) -> RingStats {
        let state = self.inner.read();
        let mut stats = state.stats.clone();
        stats.set_total_entries(state.len());
        stats
    }
}

// == Copy ==
impl Clone for TimeoutRing {
    /// Copies the slot array, key index, and both cursors into an
    /// independently allocated ring. Entry payloads stay shared; index and
    /// key-map state of the two rings diverge freely afterward.
    fn clone(&self) -> Self {
        let state = self.inner.read();

        Self {
            inner: RwLock::new(RingState {
                slots: state.slots.clone(),
                oldest: state.oldest,
                newest: state.newest,
                key_index: state.key_index.clone(),
                stats: state.stats.clone(),
            }),
        }
    }
}
