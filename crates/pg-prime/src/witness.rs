//! Base selection for the probabilistic primality tests
//!
//! Each round of Fermat or Miller-Rabin needs a base `a` in `[2, n - 2]`.
//! The oracles ask a [`WitnessSource`] for it, so tests can pin the bases
//! while normal use draws them at random.

use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::RngCore;

/// Supplies candidate witnesses for odd `n >= 5`.
pub trait WitnessSource {
    /// A base for testing `n`. Random sources stay within `[2, n - 2]`.
    fn witness(&mut self, n: &BigUint) -> BigUint;
}

impl<W: WitnessSource + ?Sized> WitnessSource for &mut W {
    fn witness(&mut self, n: &BigUint) -> BigUint {
        (**self).witness(n)
    }
}

/// Uniform bases drawn from any `rand` generator, including the ones in
/// `pg-rng`.
#[derive(Debug, Clone)]
pub struct RandomWitnesses<R> {
    rng: R,
}

impl<R: RngCore> RandomWitnesses<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> WitnessSource for RandomWitnesses<R> {
    /// # Panics
    /// Panics if `n < 4`, where `[2, n - 2]` is empty. The oracles settle
    /// those values without asking for a base.
    fn witness(&mut self, n: &BigUint) -> BigUint {
        let low = BigUint::from(2u32);
        // gen_biguint_range excludes the upper bound, so n - 1 yields at most n - 2
        let high = n - BigUint::one();
        assert!(low < high, "witness range empty for n = {}", n);
        self.rng.gen_biguint_range(&low, &high)
    }
}

/// A fixed list of bases, reused cyclically.
///
/// Bases are used as given, so the caller is responsible for keeping them
/// below `n`.
#[derive(Debug, Clone)]
pub struct FixedWitnesses {
    bases: Vec<BigUint>,
    next: usize,
}

impl FixedWitnesses {
    /// # Panics
    /// Panics if `bases` is empty.
    pub fn new<I, T>(bases: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BigUint>,
    {
        let bases: Vec<BigUint> = bases.into_iter().map(Into::into).collect();
        assert!(!bases.is_empty(), "FixedWitnesses needs at least one base");
        Self { bases, next: 0 }
    }
}

impl WitnessSource for FixedWitnesses {
    fn witness(&mut self, _n: &BigUint) -> BigUint {
        let base = self.bases[self.next].clone();
        self.next = (self.next + 1) % self.bases.len();
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_witness_range() {
        let mut source = RandomWitnesses::new(ChaCha8Rng::seed_from_u64(1));
        let n = BigUint::from(5u32);
        let mut seen = [false; 5];
        for _ in 0..200 {
            let a = source.witness(&n);
            assert!(a >= BigUint::from(2u32) && a <= BigUint::from(3u32), "base {} out of range", a);
            seen[a.to_usize().unwrap()] = true;
        }
        assert!(seen[2] && seen[3]);
    }

    #[test]
    #[should_panic(expected = "witness range empty")]
    fn test_random_witness_small_n() {
        let mut source = RandomWitnesses::new(ChaCha8Rng::seed_from_u64(1));
        source.witness(&BigUint::from(3u32));
    }

    #[test]
    fn test_fixed_witnesses_cycle() {
        let mut source = FixedWitnesses::new([2u32, 3, 5]);
        let n = BigUint::from(101u32);
        let drawn: Vec<BigUint> = (0..5).map(|_| source.witness(&n)).collect();
        let expected: Vec<BigUint> = [2u32, 3, 5, 2, 3].into_iter().map(BigUint::from).collect();
        assert_eq!(drawn, expected);
    }

    #[test]
    #[should_panic(expected = "at least one base")]
    fn test_fixed_witnesses_empty() {
        FixedWitnesses::new(Vec::<u32>::new());
    }

    #[test]
    fn test_pg_rng_generator_as_witness_source() {
        let rng = pg_rng::Xorshift128Plus::new(12345, 67890).unwrap();
        let mut source = RandomWitnesses::new(rng);
        let n = BigUint::from(1_000_003u32);
        for _ in 0..100 {
            let a = source.witness(&n);
            assert!(a >= BigUint::from(2u32) && a < &n - 1u32);
        }
    }
}
