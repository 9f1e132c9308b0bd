//! Packing a stream of 64-bit words into an integer of arbitrary width
//!
//! An `n`-bit value is assembled most-significant chunk first. Every chunk
//! but the last is a whole word; the last one carries the remaining
//! `n % 64` bits. Where those bits come from inside the word depends on the
//! generator:
//!
//! - ISAAC64 takes the *high* bits of the word ([`BitOrder::HighFirst`])
//! - xorshift128+ takes the *low* bits ([`BitOrder::LowFirst`])
//!
//! The two generators disagree here. Both behaviours are kept so that
//! existing output streams stay reproducible; do not unify them without
//! bumping every recorded test vector.

use num_bigint::BigUint;

/// Which end of a word a partial chunk is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitOrder {
    /// Partial chunks use the most significant bits of the word.
    HighFirst,
    /// Partial chunks use the least significant bits of the word.
    LowFirst,
}

impl BitOrder {
    /// Extracts `take` bits (1..=64) from `word`.
    #[inline]
    pub fn chunk(self, word: u64, take: u32) -> u64 {
        debug_assert!((1..=64).contains(&take));
        if take == 64 {
            return word;
        }
        match self {
            BitOrder::HighFirst => word >> (64 - take),
            BitOrder::LowFirst => word & ((1u64 << take) - 1),
        }
    }
}

/// Draws words from `next` until `n` bits are collected and returns them as
/// an integer in `[0, 2^n)`.
///
/// Consumes exactly `ceil(n / 64)` words. `n == 0` yields zero without
/// drawing.
pub fn pack_words(n: u64, order: BitOrder, mut next: impl FnMut() -> u64) -> BigUint {
    let full = n / 64;
    let rem = (n % 64) as u32;

    let mut bytes = Vec::with_capacity(full as usize * 8);
    for _ in 0..full {
        bytes.extend_from_slice(&next().to_be_bytes());
    }
    let mut value = BigUint::from_bytes_be(&bytes);

    if rem > 0 {
        let chunk = order.chunk(next(), rem);
        value <<= rem as usize;
        value |= BigUint::from(chunk);
    }
    value
}
