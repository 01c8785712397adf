//! probe-hashmap: an open-addressed hash map with linear probing and
//! tombstone-based lazy deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, fully specified mapping whose collision resolution,
//!   deletion, and growth behavior can be reasoned about slot by slot.
//! - Storage is a single contiguous `Vec<Slot<K, V>>`; the map is the sole
//!   owner of every entry, and "references" into the table are plain
//!   integer indices recomputed per probe.
//! - Each slot is one of three states, modeled as a sum type so every probe
//!   site handles all of them exhaustively:
//!   - `Empty`: never held an entry since the last rehash; terminates every
//!     probe chain that reaches it.
//!   - `Occupied`: holds a key, its value, and the key's precomputed hash.
//!   - `Tombstone`: held an entry that was removed. Probes pass through it,
//!     so chains built before the removal stay intact; insertions of new
//!     keys reclaim the first tombstone on their chain.
//!
//! Probing and growth
//! - Start index is `hash % capacity`; collisions probe forward one slot at
//!   a time with wrap-around.
//! - `size < capacity` holds between operations: once an insertion brings
//!   the live count to `load_factor * capacity`, the table doubles and every
//!   live entry is rehashed into the new array. Tombstones are dropped only
//!   there; removal alone never compacts or shrinks.
//! - Every scan is additionally bounded by `capacity` probes, so lookups on
//!   a table whose free slots are all tombstones still terminate.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics).
//! - Construction never fails: out-of-range capacity or load factor
//!   arguments are normalized to the defaults (16 and 0.5), not rejected.
//! - No operation returns an error; presence is expressed with `Option`.
//!
//! Reentrancy policy
//! - The map only invokes user code via `K: Eq`/`K: Hash` during probing,
//!   while its own state is consistent but mid-operation. A debug-only guard
//!   at each public entry point panics on nested entry from that user code;
//!   release builds compile the guard to a no-op.
//!
//! Hasher and rehashing invariants
//! - Hashing is pluggable via `S: BuildHasher` (default `RandomState`).
//!   Each entry stores its `u64` hash at insertion and growth indexes with
//!   the stored hash, so `K: Hash` is never re-invoked during a rehash.
//!
//! Notes and non-goals
//! - No iteration or ordering guarantees; the slot order is an
//!   implementation detail that changes wholesale on growth.
//! - No shrinking on deletion, no persistence, no concurrent variant.

mod probe_hash_map;
mod reentrancy;

// Public surface
pub use probe_hash_map::{ProbeHashMap, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
