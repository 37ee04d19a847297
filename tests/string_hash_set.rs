// StringHashSet integration suite.
//
// Each test documents what behavior is being verified. The core invariants
// exercised:
// - Membership: len equals the number of distinct keys added; every added
//   key is found; duplicates report "not modified".
// - Removal: a successful remove makes the key absent and decrements len
//   by exactly one.
// - Growth: capacity doubles before an insert would push the load factor
//   above 2, across many resize boundaries, without losing keys.
// - Clear: resets to the default capacity and behaves like a fresh table.
// - Hashing: the exposed string hash follows `h = 31 * h + c`.
mod common;

use common::init_logger;
use string_hashset::{
    string_hash, CapacityError, Chain, ChainError, KeyHasher, StringHashSet, DEFAULT_CAPACITY,
};

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("word-{i:05}")).collect()
}

// Test: distinct adds.
// Verifies: len tracks distinct keys, contains is true for each.
#[test]
fn distinct_adds_are_all_members() {
    init_logger();
    let mut s = StringHashSet::new();
    let keys = words(64);
    for (i, k) in keys.iter().enumerate() {
        assert!(s.add(k.as_str()), "first add of {k} must modify");
        assert_eq!(s.len(), i + 1);
    }
    for k in &keys {
        assert!(s.contains(k));
    }
    assert!(!s.contains("word-99999"));
    assert!(!s.is_empty());
}

// Test: duplicate adds.
// Verifies: re-adding never changes len and returns false.
#[test]
fn duplicates_do_not_change_size() {
    let mut s = StringHashSet::new();
    s.add_all(["hello", "hola", "bonjour"]);
    for k in ["hello", "hola", "bonjour"] {
        assert!(!s.add(k));
    }
    assert_eq!(s.len(), 3);
}

// Test: removal.
// Verifies: contains flips to false and len drops by exactly one; removing an
// absent key is a no-op returning false.
#[test]
fn remove_then_absent() {
    let mut s = StringHashSet::new();
    s.add_all(words(30));
    let k = "word-00017";
    let before = s.len();
    assert!(s.remove(k));
    assert!(!s.contains(k));
    assert_eq!(s.len(), before - 1);
    assert!(!s.remove(k));
    assert_eq!(s.len(), before - 1);
    assert!(s.add(k), "removed key can be added again");
}

// Test: growth across several resize boundaries.
// Verifies: capacity only doubles, stays within the load bound, and every key
// added so far remains retrievable after each resize.
#[test]
fn growth_preserves_membership() {
    init_logger();
    let mut s = StringHashSet::new();
    let keys = words(1_000);
    let mut capacity = s.capacity();
    let mut resizes = 0;
    for (i, k) in keys.iter().enumerate() {
        s.add(k.as_str());
        if s.capacity() != capacity {
            assert_eq!(s.capacity(), capacity * 2, "capacity must double");
            capacity = s.capacity();
            resizes += 1;
            for earlier in &keys[..=i] {
                assert!(s.contains(earlier), "{earlier} lost after resize");
            }
        }
        assert!(s.len() <= 2 * s.capacity());
    }
    // 5 -> 10 -> 20 -> 40 -> 80 -> 160 -> 320 -> 640.
    assert_eq!(resizes, 7);
    assert_eq!(s.capacity(), 640);
    assert_eq!(s.iter().count(), 1_000);
}

// Test: resize timing.
// Verifies: the table grows on the insert that would exceed 2 * capacity, not before.
#[test]
fn resize_happens_exactly_past_the_threshold() {
    let mut s = StringHashSet::with_capacity(3).unwrap();
    s.add_all(words(6));
    assert_eq!(s.capacity(), 3);
    s.add("one more");
    assert_eq!(s.capacity(), 6);
    // Duplicate adds never trigger growth.
    let mut full = StringHashSet::with_capacity(1).unwrap();
    full.add_all(["a", "b"]);
    assert!(!full.add("a"));
    assert_eq!(full.capacity(), 1);
}

// Test: clear.
// Verifies: len 0, default capacity, and subsequent adds behave as on a fresh table.
#[test]
fn clear_behaves_like_fresh() {
    let mut s = StringHashSet::new();
    s.add_all(words(200));
    assert!(s.capacity() > DEFAULT_CAPACITY);
    s.clear();
    assert_eq!(s.len(), 0);
    assert!(s.is_empty());
    assert_eq!(s.capacity(), DEFAULT_CAPACITY);

    let mut fresh = StringHashSet::new();
    for k in words(12) {
        assert_eq!(s.add(k.as_str()), fresh.add(k.as_str()));
    }
    assert_eq!(s.capacity(), fresh.capacity());
    assert_eq!(s.debug_dump(), fresh.debug_dump());
}

// Test: capacity validation.
#[test]
fn zero_capacity_is_an_error() {
    match StringHashSet::with_capacity(0) {
        Err(CapacityError::Zero) => {}
        Ok(_) => panic!("expected zero capacity to be rejected"),
    }
}

// Test: the exposed hash.
// Verifies: single characters hash to their code, the recurrence folds by 31,
// and the set's bucket index uses the normalized hash.
#[test]
fn static_hash_values() {
    assert_eq!(string_hash("a"), 97);
    assert_eq!(string_hash("ab"), 97 * 31 + 98);
    let s = StringHashSet::with_capacity(7).unwrap();
    let h = string_hash("polygenelubricants");
    assert!(h < 0);
    assert_eq!(s.index_of("polygenelubricants"), ((h as i64 + (1 << 31)) % 7) as usize);
}

// Test: diagnostic dump.
// Verifies: one line per bucket, keys most-recent first, each line ending in null.
#[test]
fn debug_dump_layout() {
    let mut s = StringHashSet::with_capacity(4).unwrap();
    // "a" = 97 -> 1, "e" = 101 -> 1, "c" = 99 -> 3.
    s.add_all(["a", "e", "c"]);
    assert_eq!(s.debug_dump(), "0: null\n1: e a null\n2: null\n3: c null\n");
}

// Test: user-supplied hashing.
// Verifies: a custom hasher decides placement; negative hashes are normalized.
#[test]
fn custom_hasher_controls_placement() {
    struct LengthHasher;
    impl KeyHasher for LengthHasher {
        fn hash_key(&self, key: &str) -> i32 {
            -(key.len() as i32)
        }
    }
    let mut s = StringHashSet::with_capacity_and_hasher(5, LengthHasher).unwrap();
    s.add_all(["ab", "cd", "xyz"]);
    assert_eq!(s.index_of("ab"), s.index_of("cd"));
    assert_ne!(s.index_of("ab"), s.index_of("xyz"));
    assert!(s.contains("cd"));
    assert!(s.index_of("ab") < s.capacity());
}

// Test: the bucket chain on its own.
// Verifies: the sequential-prepend, remove and move-to-front scenarios.
#[test]
fn chain_scenarios() {
    let mut c = Chain::new();
    for k in ["five", "four", "three", "two", "one"] {
        c.add(k.to_string());
    }
    assert_eq!(c.iter().collect::<Vec<_>>(), ["one", "two", "three", "four", "five"]);

    let mut removed = c.clone();
    assert!(removed.remove("three"));
    assert_eq!(removed.iter().collect::<Vec<_>>(), ["one", "two", "four", "five"]);

    assert!(c.move_to_front("three"));
    assert_eq!(c.iter().collect::<Vec<_>>(), ["three", "one", "two", "four", "five"]);

    let mut empty = Chain::new();
    assert_eq!(empty.pop(), Err(ChainError::Empty));
    assert_eq!(empty.to_string(), "null");
}
