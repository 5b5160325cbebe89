//! Rolling polynomial digest used to pick the first probe slot.
//!
//! The digest is an internal detail: nothing outside the table depends on
//! its exact values, and correctness never relies on its distribution.

use core::hash::{BuildHasher, Hasher};

/// Multiplier applied to the running state before each byte is added.
pub const HASH_MULTIPLIER: u64 = 149;

/// `state = state * 149 + byte`, wrapping, over every byte written.
#[derive(Copy, Clone, Debug, Default)]
pub struct PolynomialHasher {
    state: u64,
}

impl PolynomialHasher {
    pub const fn new() -> Self {
        Self { state: 0 }
    }
}

impl Hasher for PolynomialHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self
                .state
                .wrapping_mul(HASH_MULTIPLIER)
                .wrapping_add(u64::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// Default `BuildHasher` for [`Table`](crate::Table).
#[derive(Copy, Clone, Debug, Default)]
pub struct BuildPolynomialHasher;

impl BuildHasher for BuildPolynomialHasher {
    type Hasher = PolynomialHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PolynomialHasher::new()
    }
}

/// Starting probe index of `key` in a table of `capacity` slots.
///
/// Only the raw key bytes are fed to the hasher (no `Hash` length suffix),
/// so the default hasher yields exactly the polynomial digest above.
#[inline]
pub(crate) fn start_index<S: BuildHasher>(hasher: &S, key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    let mut h = hasher.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % capacity as u64) as usize
}
