//! Property-Based Tests for the Ring Module
//!
//! Uses proptest to verify the structural invariants over arbitrary
//! operation sequences.

use proptest::prelude::*;
use std::collections::HashSet;

use chrono::{Duration, Utc};

use crate::error::RingError;
use crate::ring::{RingEntry, TimeoutRing};

// == Test Configuration ==
const TEST_CAPACITY: usize = 8;

// == Strategies ==
/// Generates keys from a small alphabet so overwrites actually occur
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}".prop_map(|s| s)
}

/// Generates timeout offsets around "now", in seconds
fn offset_strategy() -> impl Strategy<Value = i64> {
    -100i64..100
}

/// Generates a sequence of ring operations for testing
#[derive(Debug, Clone)]
enum RingOp {
    Insert { key: String, offset: i64 },
    EvictOldest,
    UpdateTimeout { key: String, offset: i64 },
}

fn ring_op_strategy() -> impl Strategy<Value = RingOp> {
    prop_oneof![
        (key_strategy(), offset_strategy())
            .prop_map(|(key, offset)| RingOp::Insert { key, offset }),
        Just(RingOp::EvictOldest),
        (key_strategy(), offset_strategy())
            .prop_map(|(key, offset)| RingOp::UpdateTimeout { key, offset }),
    ]
}

fn apply(ring: &TimeoutRing, op: RingOp) {
    match op {
        RingOp::Insert { key, offset } => {
            ring.insert(RingEntry::new(key, Utc::now() + Duration::seconds(offset)));
        }
        RingOp::EvictOldest => {
            let _ = ring.evict_oldest();
        }
        RingOp::UpdateTimeout { key, offset } => {
            let _ = ring.update_timeout(&key, Utc::now() + Duration::seconds(offset));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Capacity bound: no operation sequence can push the occupied count
    // past the slot count, and the size stays wrap-consistent.
    #[test]
    fn prop_capacity_never_exceeded(ops in prop::collection::vec(ring_op_strategy(), 1..60)) {
        let ring = TimeoutRing::new(TEST_CAPACITY);

        for op in ops {
            apply(&ring, op);
            prop_assert!(ring.len() <= TEST_CAPACITY,
                "size {} exceeds capacity {}", ring.len(), TEST_CAPACITY);
            prop_assert_eq!(ring.is_empty(), ring.len() == 0);
            prop_assert_eq!(ring.is_full(), ring.len() == TEST_CAPACITY);
        }
    }

    // Key/slot bijection: after any operation sequence, every occupied
    // logical offset maps to a key, every such key maps back to the same
    // entry, and no two offsets share a key.
    #[test]
    fn prop_key_slot_bijection(ops in prop::collection::vec(ring_op_strategy(), 1..60)) {
        let ring = TimeoutRing::new(TEST_CAPACITY);

        for op in ops {
            apply(&ring, op);
        }

        let mut seen = HashSet::new();
        for offset in 0..ring.len() {
            let entry = ring.peek(offset);
            prop_assert!(entry.is_ok(), "occupied offset {} not peekable", offset);
            let entry = entry.unwrap();

            let looked_up = ring.get(&entry.key);
            prop_assert!(looked_up.is_some(), "key {} not in key index", entry.key);
            prop_assert!(
                std::sync::Arc::ptr_eq(&entry, &looked_up.unwrap()),
                "key index points at a different entry for {}", entry.key
            );
            seen.insert(entry.key.clone());
        }

        prop_assert_eq!(seen.len(), ring.len(), "duplicate keys across occupied slots");
    }

    // Distinct-key fills below capacity never evict; every entry is
    // retrievable with the timeout it was stored with.
    #[test]
    fn prop_partial_fill_retains_all_entries(
        entries in prop::collection::hash_map(key_strategy(), offset_strategy(), 1..TEST_CAPACITY)
    ) {
        let ring = TimeoutRing::new(TEST_CAPACITY);

        let mut expected = Vec::new();
        for (key, offset) in entries {
            let timeout = Utc::now() + Duration::seconds(offset);
            ring.insert(RingEntry::new(key.clone(), timeout));
            expected.push((key, timeout));
        }

        prop_assert_eq!(ring.len(), expected.len());
        prop_assert_eq!(ring.stats().evictions, 0);
        for (key, timeout) in expected {
            let entry = ring.get(&key);
            prop_assert!(entry.is_some(), "key {} missing", key);
            prop_assert_eq!(entry.unwrap().timeout, timeout);
        }
    }

    // Overflow evicts exactly the entry at the oldest cursor.
    #[test]
    fn prop_overflow_evicts_current_oldest(
        keys in prop::collection::hash_set(key_strategy(), 2..TEST_CAPACITY),
        offsets in prop::collection::vec(offset_strategy(), TEST_CAPACITY),
        new_key in key_strategy(),
        new_offset in offset_strategy()
    ) {
        prop_assume!(!keys.contains(&new_key));

        let capacity = keys.len();
        let ring = TimeoutRing::new(capacity);
        for (key, offset) in keys.iter().zip(offsets.iter()) {
            ring.insert(RingEntry::new(key.clone(), Utc::now() + Duration::seconds(*offset)));
        }
        prop_assert!(ring.is_full());

        let victim = ring.peek_oldest().map(|entry| entry.key.clone());
        prop_assert!(victim.is_some());
        let victim = victim.unwrap();

        ring.insert(RingEntry::new(new_key.clone(), Utc::now() + Duration::seconds(new_offset)));

        prop_assert_eq!(ring.len(), capacity, "size changed across overflow insert");
        prop_assert!(ring.get(&victim).is_none(), "oldest entry {} survived overflow", victim);
        prop_assert!(ring.get(&new_key).is_some(), "new entry missing after overflow");
    }

    // Peek past the occupied window always errors and never mutates.
    #[test]
    fn prop_peek_beyond_size_errors(
        ops in prop::collection::vec(ring_op_strategy(), 0..40),
        extra in 0usize..16
    ) {
        let ring = TimeoutRing::new(TEST_CAPACITY);
        for op in ops {
            apply(&ring, op);
        }

        let size = ring.len();
        let result = ring.peek(size + extra);
        prop_assert_eq!(result, Err(RingError::OutOfRange { index: size + extra, size }));
        prop_assert_eq!(ring.len(), size);
    }

    // A clone observes the source at copy time and detaches from it.
    #[test]
    fn prop_clone_is_detached(
        before in prop::collection::vec(ring_op_strategy(), 1..30),
        after in prop::collection::vec(ring_op_strategy(), 1..30)
    ) {
        let ring = TimeoutRing::new(TEST_CAPACITY);
        for op in before {
            apply(&ring, op);
        }

        let copy = ring.clone();
        let copied_keys: Vec<String> = (0..copy.len())
            .filter_map(|offset| copy.peek(offset).ok())
            .map(|entry| entry.key.clone())
            .collect();

        for op in after {
            apply(&ring, op);
        }

        // The copy's window is untouched by the source's later mutations.
        prop_assert_eq!(copy.len(), copied_keys.len());
        for (offset, key) in copied_keys.iter().enumerate() {
            let entry = copy.peek(offset);
            prop_assert!(entry.is_ok());
            prop_assert_eq!(&entry.unwrap().key, key);
        }
    }
}
