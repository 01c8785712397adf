//! ProbeHashMap: open-addressed storage with linear probing and tombstone deletion.

use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;
use std::collections::hash_map::RandomState;

/// Capacity used when the requested one is zero or would overflow on doubling.
pub const DEFAULT_CAPACITY: usize = 16;
/// Load factor used when the requested one falls outside `(0, 1]`.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

// Doubling past this would overflow `usize`.
const MAX_CAPACITY: usize = usize::MAX / 2;

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
    hash: u64,
}

/// One physical slot of the table. `Tombstone` marks a removed entry whose
/// position must keep forwarding probes, so it is distinct from `Empty`.
#[derive(Debug)]
enum Slot<K, V> {
    Empty,
    Occupied(Entry<K, V>),
    Tombstone,
}

/// Outcome of scanning a probe chain for an insertion.
enum InsertSite {
    /// Index of an occupied slot holding an equal key.
    Matched(usize),
    /// Index of the slot a new entry should occupy: the first tombstone on
    /// the chain if one was passed, otherwise the empty slot ending it.
    Free(usize),
}

/// A hash map backed by a single contiguous slot array. Collisions resolve by
/// probing forward one slot at a time with wrap-around; removal leaves a
/// tombstone in place so probe chains running through the removed slot stay
/// intact. Tombstones are reclaimed wholesale when the table grows.
///
/// The table grows (doubling capacity, rehashing every live entry, dropping
/// tombstones) as soon as `load_factor * capacity <= len` after an insertion
/// of a new key. It never shrinks.
///
/// Construction parameters are normalized, not validated: a zero or
/// overflow-prone capacity falls back to [`DEFAULT_CAPACITY`], a load factor
/// outside `(0, 1]` (including NaN) falls back to [`DEFAULT_LOAD_FACTOR`].
/// No constructor returns an error.
///
/// Single-threaded by design: the map is `!Send + !Sync`. In debug builds,
/// reentering the map from user `Hash`/`Eq` code during a probe panics.
pub struct ProbeHashMap<K, V, S = RandomState> {
    hasher: S,
    slots: Vec<Slot<K, V>>, // length is the current capacity
    len: usize,
    load_factor: f64,
    reentrancy: DebugReentrancy,
}

impl<K, V> ProbeHashMap<K, V>
where
    K: Eq + Hash,
{
    /// Map with default capacity (16) and load factor (0.5).
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// Map with the given capacity and the default load factor.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Map with the given capacity and load factor. Out-of-range arguments
    /// are silently replaced by the defaults.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Self {
        Self::with_capacity_and_load_factor_and_hasher(capacity, load_factor, Default::default())
    }
}

impl<K, V> Default for ProbeHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ProbeHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Map with default capacity and load factor, hashing with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_load_factor_and_hasher(
            DEFAULT_CAPACITY,
            DEFAULT_LOAD_FACTOR,
            hasher,
        )
    }

    /// Fully parametrized constructor. Arguments are normalized like
    /// [`with_capacity_and_load_factor`](ProbeHashMap::with_capacity_and_load_factor).
    pub fn with_capacity_and_load_factor_and_hasher(
        capacity: usize,
        load_factor: f64,
        hasher: S,
    ) -> Self {
        let capacity = if capacity == 0 || capacity > MAX_CAPACITY {
            DEFAULT_CAPACITY
        } else {
            capacity
        };
        // The negated comparison also sends NaN to the default.
        let load_factor = if !(load_factor > 0.0 && load_factor <= 1.0) {
            DEFAULT_LOAD_FACTOR
        } else {
            load_factor
        };
        Self {
            hasher,
            slots: empty_slots(capacity),
            len: 0,
            load_factor,
            reentrancy: DebugReentrancy::new(),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of slots. Strictly increases across resizes.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Load factor fixed at construction.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Inserts `key -> value`, returning the previous value if `key` was
    /// already present. Overwriting never changes `len` and never triggers
    /// growth; inserting a new key increments `len` and grows the table when
    /// `load_factor * capacity <= len`.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(&key);
        match self.probe_insert(hash, &key) {
            InsertSite::Matched(i) => match &mut self.slots[i] {
                Slot::Occupied(e) => Some(mem::replace(&mut e.value, value)),
                _ => unreachable!("matched slot is occupied"),
            },
            InsertSite::Free(i) => {
                self.slots[i] = Slot::Occupied(Entry { key, value, hash });
                self.len += 1;
                if self.load_factor * self.capacity() as f64 <= self.len as f64 {
                    // grow re-borrows self mutably and runs no key code;
                    // release the guard first.
                    drop(_g);
                    self.grow();
                }
                None
            }
        }
    }

    /// Returns a reference to the value mapped to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let i = self.probe_find(self.make_hash(key), key)?;
        match &self.slots[i] {
            Slot::Occupied(e) => Some(&e.value),
            _ => unreachable!("found slot is occupied"),
        }
    }

    /// Returns a mutable reference to the value mapped to `key`, if any.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let i = self.probe_find(self.make_hash(key), key)?;
        match &mut self.slots[i] {
            Slot::Occupied(e) => Some(&mut e.value),
            _ => unreachable!("found slot is occupied"),
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        self.probe_find(self.make_hash(key), key).is_some()
    }

    /// Removes `key`, returning its value if it was present. The slot becomes
    /// a tombstone rather than empty, so probe chains passing through it keep
    /// working. Removal never shrinks or compacts the table.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let i = self.probe_find(self.make_hash(key), key)?;
        self.len -= 1;
        match mem::replace(&mut self.slots[i], Slot::Tombstone) {
            Slot::Occupied(e) => Some(e.value),
            _ => unreachable!("found slot is occupied"),
        }
    }

    /// Scans the probe chain of `key` for a lookup. Returns the index of the
    /// occupied slot holding an equal key, or `None` once the chain ends at
    /// an empty slot. Tombstones are skipped. The scan is bounded by
    /// `capacity` probes so a table with no empty slot still terminates.
    fn probe_find<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let cap = self.slots.len();
        let mut i = (hash % cap as u64) as usize;
        for _ in 0..cap {
            match &self.slots[i] {
                Slot::Occupied(e) if e.key.borrow() == key => return Some(i),
                Slot::Occupied(_) | Slot::Tombstone => {}
                Slot::Empty => return None,
            }
            i = (i + 1) % cap;
        }
        None
    }

    /// Scans the probe chain of `key` for an insertion, remembering the first
    /// tombstone passed. A matching occupied slot wins outright; otherwise
    /// the insertion site is that tombstone if one exists, else the empty
    /// slot ending the chain. `len < capacity` guarantees the chain ends at
    /// a non-occupied slot within `capacity` probes.
    fn probe_insert(&self, hash: u64, key: &K) -> InsertSite {
        let cap = self.slots.len();
        let mut i = (hash % cap as u64) as usize;
        let mut tombstone = None;
        for _ in 0..cap {
            match &self.slots[i] {
                Slot::Occupied(e) if e.key == *key => return InsertSite::Matched(i),
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    if tombstone.is_none() {
                        tombstone = Some(i);
                    }
                }
                Slot::Empty => return InsertSite::Free(tombstone.unwrap_or(i)),
            }
            i = (i + 1) % cap;
        }
        match tombstone {
            Some(i) => InsertSite::Free(i),
            None => unreachable!("probe chain has no free slot"),
        }
    }

    /// Doubles capacity and rehashes every live entry into the new slot
    /// array, probing from `stored_hash % new_capacity` to the first empty
    /// slot. Tombstones are dropped here and nowhere else. Uses the hash
    /// stored at insertion, so `K: Hash` is never re-invoked.
    fn grow(&mut self) {
        let new_cap = self.slots.len() * 2;
        let old = mem::replace(&mut self.slots, empty_slots(new_cap));
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                let mut i = (entry.hash % new_cap as u64) as usize;
                while let Slot::Occupied(_) = self.slots[i] {
                    i = (i + 1) % new_cap;
                }
                self.slots[i] = Slot::Occupied(entry);
            }
        }
    }
}

fn empty_slots<K, V>(capacity: usize) -> Vec<Slot<K, V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}
