//! string-hashset: a separately chained hash set of string keys with
//! fail-fast cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, self-contained hash set whose every piece (hashing,
//!   chaining, growth, iteration) is visible and testable on its own.
//! - Layers:
//!   - `hash`: the `h = 31 * h + c` string hash and the mapping from a
//!     signed 32-bit hash onto a bucket index.
//!   - `Chain`: a singly linked list of owned nodes, one per bucket. New
//!     keys go to the front.
//!   - `StringHashSet<H>`: an array of chains indexed by
//!     `hash(key) mod capacity`, with a per-set `Generation` counter.
//!   - `Cursor`: a detached iterator that re-validates the set's identity
//!     and generation on every step.
//!
//! Constraints
//! - Single-threaded. The set does no locking; callers serialize access.
//! - Load factor bound: an insert that would make `len > 2 * capacity`
//!   first doubles the bucket array and rehashes every key.
//! - Capacity only grows, except `clear`, which resets to
//!   `DEFAULT_CAPACITY`.
//! - Keys are unique. Adding a present key reports "not modified".
//!
//! Iteration
//! - `iter()` borrows the set; the borrow checker rules out mutation while
//!   it lives.
//! - `cursor()` does not borrow. Any add, remove, promote, resize or clear
//!   bumps the generation, and the next step of an older cursor fails with
//!   `IterError::ConcurrentModification`.
//! - Order is bucket index, then most-recently-inserted first within a
//!   bucket. It is deterministic for a fixed table state but not otherwise
//!   meaningful.
//!
//! Notes and non-goals
//! - No shrinking on remove, no persistence, no generic key types.
//! - `debug_dump` and the `Display` impls are diagnostics, not a stable
//!   format.

pub mod chain;
mod cursor;
mod generation;
pub mod hash;
mod string_hash_set;
mod string_hash_set_proptest;

// Public surface
pub use chain::{Chain, ChainError};
pub use cursor::{Cursor, CursorState, IterError};
pub use hash::{string_hash, KeyHasher, Polynomial31};
pub use string_hash_set::{CapacityError, Iter, StringHashSet, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
