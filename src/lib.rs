//! probe-table: a single-threaded hash table from `String` keys to
//! `String` values, built on linear probing over a flat slot array.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, self-contained open-addressing table whose every
//!   probe loop is bounded and whose growth never exposes partial state.
//! - Pieces:
//!   - `hash`: rolling polynomial digest (`state * 149 + byte`) that only
//!     picks the first slot to probe. Swappable through `BuildHasher`.
//!   - `slot`: three-state slot tag (`Empty`, `Occupied`, `Tombstone`).
//!   - `table`: `Table<S>`, which owns the slot array, the live-entry count
//!     and the tombstone count.
//!
//! Constraints
//! - Single-threaded: every mutation takes `&mut self`; callers wanting
//!   shared access wrap the table in their own lock.
//! - Strings only. Keys and values are owned by the slot that holds them.
//! - No iteration API and no shrinking.
//!
//! Probing
//! - Insert, lookup and remove start at `hash(key) % capacity` and walk
//!   forward, wrapping to slot 0.
//! - An `Empty` slot ends the walk; a `Tombstone` never does, so entries
//!   placed past a removed one stay reachable.
//! - Every walk is capped at `capacity` steps. Tombstones can consume all
//!   empty slots between growths, and the cap keeps lookups finite then.
//! - A new key lands in the first tombstone seen on its path, or at the
//!   terminating `Empty` slot when there was none.
//!
//! Growth
//! - When adding a new key would make `len / capacity >= 0.7`, the table
//!   allocates `capacity * 2` fresh slots, moves every live entry over
//!   (tombstones are dropped) and swaps the arrays. The allocation happens
//!   before anything moves, so a failed allocation leaves the table intact
//!   and the insert reports `TableError::AllocationFailed`.
//! - Overwriting an existing key never grows the table.
//!
//! Errors
//! - A missing key is reported as `None`/`false`, never as an error.
//! - `TableError` covers zero capacity at creation, capacity overflow, and
//!   allocation failure.

mod error;
mod hash;
mod slot;
pub mod table;
mod table_proptest;

// Public surface
pub use error::TableError;
pub use hash::{BuildPolynomialHasher, PolynomialHasher, HASH_MULTIPLIER};
pub use table::{Table, LOAD_FACTOR_THRESHOLD};
