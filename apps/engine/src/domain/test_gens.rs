//! Proptest generators for domain types.

use proptest::prelude::*;

/// A walk length that fits the small test grids.
pub fn small_len() -> impl Strategy<Value = u8> {
    1u8..=5
}

/// An arbitrary game seed.
pub fn seed() -> impl Strategy<Value = u64> {
    any::<u64>()
}
