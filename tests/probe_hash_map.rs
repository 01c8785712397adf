// ProbeHashMap integration test suite.
//
// Each test documents what behavior is being verified and which invariants
// are assumed or asserted. The core invariants exercised:
// - Lookup: get(k) returns the most recently inserted value for k.
// - Size: len() counts keys whose last successful operation was an insert.
// - Deletion: remove leaves a tombstone; probe chains through the removed
//   slot keep resolving, and the key itself reads as absent.
// - Growth: capacity strictly increases, every live mapping survives a
//   rehash, and len is unaffected by it.
use probe_hashmap::ProbeHashMap;
use std::hash::{BuildHasher, Hasher};

// Hasher that sends every key to slot 0, so all keys share one probe chain
// and every insert collides.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Test: the documented end-to-end scenario.
// Assumes: capacity 4, load factor 0.5 (threshold 2); the constant hasher
// makes keys 1 and 5 collide.
// Verifies: growth to capacity 8 on the second insert, both keys
// retrievable afterward, removal leaves the collided key reachable.
#[test]
fn scenario_grow_at_half_load_with_colliding_keys() {
    let mut m: ProbeHashMap<u64, &str, ConstBuildHasher> =
        ProbeHashMap::with_capacity_and_load_factor_and_hasher(4, 0.5, ConstBuildHasher);

    assert_eq!(m.insert(1, "a"), None);
    assert_eq!(m.len(), 1);

    assert_eq!(m.insert(5, "b"), None);
    assert_eq!(m.len(), 2);
    assert_eq!(m.capacity(), 8, "threshold 2 must trigger doubling");

    assert_eq!(m.get(&1), Some(&"a"));
    assert_eq!(m.get(&5), Some(&"b"));

    assert_eq!(m.remove(&1), Some("a"));
    assert_eq!(m.len(), 1);
    assert_eq!(m.get(&1), None);
    assert_eq!(m.get(&5), Some(&"b"));
}

// Test: last-write-wins across interleaved inserts.
// Verifies: get always reflects the most recent insert for each key.
#[test]
fn get_reflects_latest_insert() {
    let mut m: ProbeHashMap<String, u32> = ProbeHashMap::new();
    for round in 0..3u32 {
        for i in 0..50u32 {
            m.insert(format!("key-{i}"), round * 100 + i);
        }
    }
    assert_eq!(m.len(), 50);
    for i in 0..50u32 {
        assert_eq!(m.get(format!("key-{i}").as_str()), Some(&(200 + i)));
    }
}

// Test: capacity monotonicity across many growth steps.
// Assumes: growth doubles capacity and nothing ever shrinks it.
// Verifies: capacity is non-decreasing after every operation, including
// heavy removal.
#[test]
fn capacity_never_shrinks() {
    let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::with_capacity(2);
    let mut max_cap = m.capacity();
    for i in 0..500 {
        m.insert(i, i);
        assert!(m.capacity() >= max_cap, "capacity shrank during growth");
        max_cap = m.capacity();
    }
    let grown = m.capacity();
    for i in 0..500 {
        m.remove(&i);
        assert_eq!(m.capacity(), grown, "removal must not resize");
    }
    assert_eq!(m.len(), 0);
}

// Test: insert/remove churn over a small key universe.
// Assumes: tombstones accumulate between growths and are reclaimed by
// reinsertion or rehash.
// Verifies: the map stays consistent with a direct model of the surviving
// keys, and len tracks it exactly.
#[test]
fn churn_keeps_table_consistent() {
    let mut m: ProbeHashMap<u32, u32> = ProbeHashMap::with_capacity(8);
    // Deterministic pseudo-random walk over keys 0..32.
    let mut state = 0x2545f491u32;
    let mut model = std::collections::HashMap::new();
    for step in 0..10_000u32 {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let k = state % 32;
        if state & 1 == 0 {
            assert_eq!(m.insert(k, step), model.insert(k, step));
        } else {
            assert_eq!(m.remove(&k), model.remove(&k));
        }
        assert_eq!(m.len(), model.len());
    }
    for k in 0..32 {
        assert_eq!(m.get(&k), model.get(&k));
    }
}

// Test: removing every key leaves a table of tombstones that still serves
// lookups and accepts reinsertion without growing.
#[test]
fn empty_after_removing_all_keys() {
    let mut m: ProbeHashMap<u64, u64, ConstBuildHasher> =
        ProbeHashMap::with_capacity_and_load_factor_and_hasher(16, 0.9, ConstBuildHasher);
    for k in 0..8u64 {
        m.insert(k, k + 100);
    }
    for k in 0..8u64 {
        assert_eq!(m.remove(&k), Some(k + 100));
    }
    assert!(m.is_empty());
    let cap = m.capacity();

    for k in 0..8u64 {
        assert_eq!(m.get(&k), None);
    }

    // Reinsertion reclaims tombstones; no growth below the threshold.
    for k in 0..8u64 {
        assert_eq!(m.insert(k, k), None);
    }
    assert_eq!(m.len(), 8);
    assert_eq!(m.capacity(), cap);
}

// Test: default constructor parameters.
// Verifies: new() starts at capacity 16, load factor 0.5, empty.
#[test]
fn default_construction() {
    let m: ProbeHashMap<String, i32> = ProbeHashMap::new();
    assert_eq!(m.capacity(), probe_hashmap::DEFAULT_CAPACITY);
    assert_eq!(m.load_factor(), probe_hashmap::DEFAULT_LOAD_FACTOR);
    assert!(m.is_empty());

    let m2: ProbeHashMap<String, i32> = ProbeHashMap::default();
    assert_eq!(m2.capacity(), m.capacity());
    assert_eq!(m2.load_factor(), m.load_factor());
}
