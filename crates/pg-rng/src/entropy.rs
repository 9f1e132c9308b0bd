//! Seed material for generators constructed without a caller-supplied seed
//!
//! Generators never reach for process-wide randomness on their own. The
//! `from_entropy` constructors use [`rand::rngs::OsRng`], and the
//! `from_entropy_source` constructors accept anything implementing
//! [`EntropySource`], which keeps construction deterministic in tests.

use rand::RngCore;

/// Something that can hand out fresh 64-bit words.
pub trait EntropySource {
    /// Returns `n` words.
    fn words(&mut self, n: usize) -> Vec<u64>;
}

impl<R: RngCore + ?Sized> EntropySource for R {
    fn words(&mut self, n: usize) -> Vec<u64> {
        (0..n).map(|_| self.next_u64()).collect()
    }
}
