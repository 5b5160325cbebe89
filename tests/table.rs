// Table integration test suite.
//
// Each test documents what behavior is being verified and which
// invariants are assumed or asserted. The core invariants exercised:
// - Upsert: lookup returns the most recently inserted value for a key.
// - Removal: a removed key is absent until reinserted; removing an
//   absent key reports false and leaves len unchanged.
// - Growth: reaching load 0.7 doubles capacity and keeps every live entry.
// - Collisions: keys sharing a start slot are all retrievable.
use probe_table::{BuildPolynomialHasher, Table, TableError, LOAD_FACTOR_THRESHOLD};
use std::error::Error;
use std::hash::{BuildHasher, Hasher};

// Test: the reference walkthrough from creation through one growth.
// Assumes: single-character keys, initial capacity 10.
// Verifies: counts and capacity after each step; removed key stays absent.
#[test]
fn walkthrough_remove_twice_then_grow() {
    let mut t = Table::with_capacity(10).unwrap();
    for k in ["T", "V", "I", "G", "A", "B"] {
        t.insert(k, k).unwrap();
    }
    assert_eq!(t.len(), 6);
    assert_eq!(t.capacity(), 10);

    assert!(t.remove("A"));
    assert!(!t.remove("A"), "second remove must report absence");
    assert_eq!(t.len(), 5);

    t.insert("C", "C").unwrap();
    assert_eq!((t.len(), t.capacity()), (6, 10));

    t.insert("D", "D").unwrap();
    assert_eq!((t.len(), t.capacity()), (7, 20));
    assert_eq!(t.tombstones(), 0);

    assert_eq!(t.lookup("A"), None);
    for k in ["T", "V", "I", "G", "B", "C", "D"] {
        assert_eq!(t.lookup(k), Some(k));
    }
    t.destroy();
}

// Test: upsert semantics.
// Assumes: insert returns the displaced value.
// Verifies: the latest value wins; len counts keys, not writes.
#[test]
fn latest_insert_wins() {
    let mut t = Table::with_capacity(4).unwrap();
    assert_eq!(t.insert("k", "1").unwrap(), None);
    assert_eq!(t.insert("k", "2").unwrap().as_deref(), Some("1"));
    assert_eq!(t.insert("k", "3").unwrap().as_deref(), Some("2"));
    assert_eq!(t.lookup("k"), Some("3"));
    assert_eq!(t.len(), 1);
}

// Test: remove then reinsert.
// Assumes: removal leaves a tombstone behind.
// Verifies: key is absent after removal and present with the new value after reinsert.
#[test]
fn remove_then_reinsert_yields_new_value() {
    let mut t = Table::with_capacity(8).unwrap();
    t.insert("k", "old").unwrap();
    assert!(t.remove("k"));
    assert_eq!(t.lookup("k"), None);
    assert!(!t.contains_key("k"));

    t.insert("k", "new").unwrap();
    assert_eq!(t.lookup("k"), Some("new"));
    assert_eq!(t.len(), 1);
}

// Test: removing absent keys.
// Assumes: nothing.
// Verifies: false result and unchanged len, on empty and populated tables.
#[test]
fn remove_absent_key_is_noop() {
    let mut t = Table::with_capacity(8).unwrap();
    assert!(!t.remove("nope"));
    t.insert("a", "1").unwrap();
    assert!(!t.remove("nope"));
    assert_eq!(t.len(), 1);
    assert_eq!(t.tombstones(), 0);
}

// Test: collisions under the default hasher.
// Assumes: single-byte keys digest to their byte value.
// Verifies: 'A' (65) and 'K' (75) both start at slot 5 of 10 yet both resolve.
#[test]
fn colliding_keys_both_retrievable() {
    let s = BuildPolynomialHasher;
    let digest = |k: &str| {
        let mut h = s.build_hasher();
        h.write(k.as_bytes());
        h.finish()
    };
    assert_eq!(digest("A") % 10, digest("K") % 10);

    let mut t = Table::with_capacity(10).unwrap();
    t.insert("A", "first").unwrap();
    t.insert("K", "second").unwrap();
    assert_eq!(t.lookup("A"), Some("first"));
    assert_eq!(t.lookup("K"), Some("second"));
}

// Test: growth from many inserts.
// Assumes: capacity doubles whenever a new key would reach load 0.7.
// Verifies: capacity is a power-of-two multiple of the start; every entry survives.
#[test]
fn many_inserts_survive_repeated_growth() {
    let mut t = Table::with_capacity(3).unwrap();
    for i in 0..2_000 {
        t.insert(format!("key-{i}"), i.to_string()).unwrap();
        assert!(t.load_factor() < LOAD_FACTOR_THRESHOLD);
    }
    assert_eq!(t.len(), 2_000);
    let ratio = t.capacity() / 3;
    assert_eq!(t.capacity() % 3, 0);
    assert!(ratio.is_power_of_two());
    for i in 0..2_000 {
        assert_eq!(t.lookup(&format!("key-{i}")), Some(i.to_string().as_str()));
    }
}

// Test: churn without growth.
// Assumes: tombstones are reused by later inserts.
// Verifies: repeated insert/remove cycles of fresh keys neither grow the table nor hang.
#[test]
fn churn_keeps_capacity_and_terminates() {
    let mut t = Table::with_capacity(8).unwrap();
    t.insert("anchor", "a").unwrap();
    for i in 0..500 {
        let k = format!("tmp{i}");
        t.insert(k.as_str(), "x").unwrap();
        assert!(t.remove(&k));
        assert_eq!(t.lookup(&k), None);
    }
    assert_eq!(t.capacity(), 8);
    assert_eq!(t.len(), 1);
    assert_eq!(t.lookup("anchor"), Some("a"));
    assert!(t.tombstones() < t.capacity());
}

// Test: error reporting.
// Assumes: TableError implements std::error::Error via thiserror.
// Verifies: zero capacity is rejected with a readable message and no source.
#[test]
fn zero_capacity_error_is_descriptive() {
    let err = Table::with_capacity(0).unwrap_err();
    assert!(matches!(err, TableError::ZeroCapacity));
    assert_eq!(err.to_string(), "table capacity must be at least 1");
    assert!(err.source().is_none());
}

// Test: allocation failure at creation.
// Assumes: the slot array is reserved fallibly.
// Verifies: an impossible capacity yields AllocationFailed instead of aborting.
#[test]
fn impossible_capacity_reports_allocation_failure() {
    match Table::with_capacity(usize::MAX) {
        Err(TableError::AllocationFailed { capacity, .. }) => assert_eq!(capacity, usize::MAX),
        other => panic!("unexpected result: {:?}", other.map(|t| t.capacity())),
    }
}

// Test: hasher injection.
// Assumes: with_capacity_and_hasher accepts any BuildHasher.
// Verifies: std's RandomState works as a drop-in start-index source.
#[test]
fn std_random_state_hasher() {
    let mut t =
        Table::with_capacity_and_hasher(4, std::collections::hash_map::RandomState::new()).unwrap();
    for i in 0..50 {
        t.insert(i.to_string(), (i * 2).to_string()).unwrap();
    }
    for i in 0..50 {
        assert_eq!(t.lookup(&i.to_string()), Some((i * 2).to_string().as_str()));
    }
}
