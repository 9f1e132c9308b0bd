//! xorshift128+ generator
//!
//! Two words of state. Each step shifts the first word through
//! `<< 23` / `>> 17`, folds in the second word, and rotates the pair:
//!
//! ```text
//! s0' = t ^ (t >> 17) ^ s1    where t = s0 ^ (s0 << 23)
//! state <- (s1, s0' + s1)
//! output  s0'
//! ```
//!
//! The output is the mixed word itself rather than the sum, and the second
//! shift uses the running `s0`. Both details are load-bearing for existing
//! output streams.
//!
//! The all-zero state maps to itself, so a `(0, 0)` seed is refused. Any
//! other seed never reaches it. `s0` -> `t ^ (t >> 17)` is a bijection, so
//! the next state `(s1, s0' + s1)` is all-zero only when `s1 == 0` and
//! `s0' == 0`, which forces `s0 == 0` as well.

use num_bigint::BigUint;
use rand::RngCore;
use rand::rngs::OsRng;

use crate::bits::BitOrder;
use crate::entropy::EntropySource;
use crate::error::RngError;
use crate::{WordGenerator, fill_bytes_from_words};

/// xorshift128+ generator state
///
/// # Example
/// ```
/// use pg_rng::Xorshift128Plus;
///
/// let mut rng = Xorshift128Plus::new(1, 2).unwrap();
/// assert_eq!(rng.next_u64(), 8388675);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift128Plus {
    s0: u64,
    s1: u64,
}

impl Xorshift128Plus {
    /// Create a generator from two seed words.
    ///
    /// Fails with [`RngError::DegenerateSeed`] when both are zero.
    pub fn new(seed: u64, seed2: u64) -> Result<Self, RngError> {
        if seed == 0 && seed2 == 0 {
            return Err(RngError::DegenerateSeed);
        }
        Ok(Self { s0: seed, s1: seed2 })
    }

    /// Create a generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::from_entropy_source(&mut OsRng)
    }

    /// Create a generator from words pulled from `source`, drawing again if
    /// the source hands out an all-zero pair.
    pub fn from_entropy_source<E: EntropySource + ?Sized>(source: &mut E) -> Self {
        loop {
            let words = source.words(2);
            if let [s0, s1] = words[..] {
                if let Ok(rng) = Self::new(s0, s1) {
                    return rng;
                }
            }
        }
    }

    /// Advance the state and return the next word.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let s1 = self.s1;
        let mut s0 = self.s0;
        s0 ^= s0 << 23;
        s0 ^= s0 >> 17;
        s0 ^= s1;
        self.s0 = s1;
        self.s1 = s0.wrapping_add(s1);
        s0
    }

    /// Returns a value in `[0, 2^bits)`, low bits of each word first.
    pub fn randbits(&mut self, bits: u64) -> BigUint {
        WordGenerator::randbits(self, bits)
    }

    /// Current `(s0, s1)` pair.
    pub fn state(&self) -> (u64, u64) {
        (self.s0, self.s1)
    }
}

impl WordGenerator for Xorshift128Plus {
    fn next_word(&mut self) -> u64 {
        self.next_u64()
    }

    fn bit_order(&self) -> BitOrder {
        BitOrder::LowFirst
    }
}

impl RngCore for Xorshift128Plus {
    fn next_u32(&mut self) -> u32 {
        (Xorshift128Plus::next_u64(self) >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        Xorshift128Plus::next_u64(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        fill_bytes_from_words(dest, || Xorshift128Plus::next_u64(self));
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
