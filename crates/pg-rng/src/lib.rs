//! pg-rng: 64-bit word generators for prime generation
//!
//! Two generators are provided, ISAAC64 and xorshift128+. Both produce raw
//! 64-bit words and can turn a stream of words into an integer of any bit
//! width through [`WordGenerator::randbits`].
//!
//! Neither generator is a CSPRNG. They are fine for simulation and for
//! picking prime candidates in tests, not for key material.
//!
//! Generators are plain mutable state machines: every draw takes `&mut self`
//! and nothing is synchronized internally.

pub mod bits;
pub mod entropy;
mod error;
pub mod isaac64;
pub mod xorshift;

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub use bits::BitOrder;
pub use entropy::EntropySource;
pub use error::RngError;
pub use isaac64::Isaac64;
pub use xorshift::Xorshift128Plus;

/// A source of 64-bit pseudorandom words.
pub trait WordGenerator {
    /// Next raw 64-bit word.
    fn next_word(&mut self) -> u64;

    /// Which end of each word `randbits` takes a partial chunk from.
    fn bit_order(&self) -> BitOrder;

    /// Returns an integer in `[0, 2^n)` built from as many words as needed.
    fn randbits(&mut self, n: u64) -> BigUint {
        let order = self.bit_order();
        bits::pack_words(n, order, || self.next_word())
    }
}

impl<G: WordGenerator + ?Sized> WordGenerator for &mut G {
    fn next_word(&mut self) -> u64 {
        (**self).next_word()
    }

    fn bit_order(&self) -> BitOrder {
        (**self).bit_order()
    }
}

/// Identifies a generator variant, e.g. in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorKind {
    Isaac64,
    Xorshift128Plus,
}

impl GeneratorKind {
    pub fn name(self) -> &'static str {
        match self {
            GeneratorKind::Isaac64 => "isaac64",
            GeneratorKind::Xorshift128Plus => "xorshift128plus",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = RngError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "isaac64" | "isaac" => Ok(GeneratorKind::Isaac64),
            "xorshift128plus" | "xorshift128+" | "xorshift" => Ok(GeneratorKind::Xorshift128Plus),
            _ => Err(RngError::UnknownGenerator(s.to_string())),
        }
    }
}

/// Closed set of generators, so callers can pick one at runtime without
/// trait objects.
#[derive(Debug, Clone)]
pub enum Generator {
    Isaac64(Isaac64),
    Xorshift128Plus(Xorshift128Plus),
}

impl Generator {
    /// Builds a generator of the given kind seeded from the OS.
    pub fn from_entropy(kind: GeneratorKind) -> Self {
        match kind {
            GeneratorKind::Isaac64 => Generator::Isaac64(Isaac64::from_entropy()),
            GeneratorKind::Xorshift128Plus => {
                Generator::Xorshift128Plus(Xorshift128Plus::from_entropy())
            }
        }
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Generator::Isaac64(_) => GeneratorKind::Isaac64,
            Generator::Xorshift128Plus(_) => GeneratorKind::Xorshift128Plus,
        }
    }
}

impl WordGenerator for Generator {
    fn next_word(&mut self) -> u64 {
        match self {
            Generator::Isaac64(g) => g.next_u64(),
            Generator::Xorshift128Plus(g) => g.next_u64(),
        }
    }

    fn bit_order(&self) -> BitOrder {
        match self {
            Generator::Isaac64(g) => g.bit_order(),
            Generator::Xorshift128Plus(g) => g.bit_order(),
        }
    }
}

impl From<Isaac64> for Generator {
    fn from(g: Isaac64) -> Self {
        Generator::Isaac64(g)
    }
}

impl From<Xorshift128Plus> for Generator {
    fn from(g: Xorshift128Plus) -> Self {
        Generator::Xorshift128Plus(g)
    }
}

/// Fills `dest` with little-endian bytes taken from successive words.
pub(crate) fn fill_bytes_from_words(dest: &mut [u8], mut next: impl FnMut() -> u64) {
    for chunk in dest.chunks_mut(8) {
        let bytes = next().to_le_bytes();
        chunk.copy_from_slice(&bytes[..chunk.len()]);
    }
}
