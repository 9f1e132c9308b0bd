//! Random prime search
//!
//! A candidate of the requested width is drawn from a word generator, forced
//! odd, and then walked upwards in steps of two until the oracle accepts it.
//! The walk has no upper bound; it relies on primes being dense enough near
//! the start point. Near `2^bits` the walk may step past the requested width,
//! and that prime is returned as-is.

use num_bigint::BigUint;
use pg_rng::WordGenerator;
use tracing::{debug, trace};

use crate::error::PrimeError;
use crate::oracle::PrimalityTest;
use crate::witness::{RandomWitnesses, WitnessSource};

/// A prime found by the search and the number of candidates it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPrime {
    pub prime: BigUint,
    /// Candidates tested, including the accepted one.
    pub trials: u64,
}

/// Finds a probable prime of (about) `bits` bits.
///
/// Oracle bases come from the thread-local generator; use
/// [`generate_with`] to control them.
pub fn generate<G, O>(bits: u64, generator: &mut G, oracle: &O) -> Result<FoundPrime, PrimeError>
where
    G: WordGenerator + ?Sized,
    O: PrimalityTest + ?Sized,
{
    let mut witnesses = RandomWitnesses::new(rand::thread_rng());
    generate_with(bits, generator, oracle, &mut witnesses)
}

/// Like [`generate`], drawing oracle bases from `witnesses`.
pub fn generate_with<G, O, W>(
    bits: u64,
    generator: &mut G,
    oracle: &O,
    witnesses: &mut W,
) -> Result<FoundPrime, PrimeError>
where
    G: WordGenerator + ?Sized,
    O: PrimalityTest + ?Sized,
    W: WitnessSource + ?Sized,
{
    if bits == 0 {
        return Err(PrimeError::ZeroBits);
    }

    let mut candidate = generator.randbits(bits);
    candidate.set_bit(0, true);
    debug!(bits, rounds = oracle.rounds(), "starting prime search");

    let mut trials = 1u64;
    loop {
        if oracle.is_prime_with(&candidate, witnesses) {
            debug!(bits, trials, "prime found");
            return Ok(FoundPrime {
                prime: candidate,
                trials,
            });
        }
        trace!(%candidate, "candidate rejected");
        candidate += 2u32;
        trials += 1;
    }
}

/// Owns a generator and an oracle for repeated searches.
#[derive(Debug, Clone)]
pub struct PrimeFinder<G, O> {
    generator: G,
    oracle: O,
}

impl<G: WordGenerator, O: PrimalityTest> PrimeFinder<G, O> {
    pub fn new(generator: G, oracle: O) -> Self {
        Self { generator, oracle }
    }

    /// Next prime of `bits` bits from the owned generator.
    pub fn find(&mut self, bits: u64) -> Result<FoundPrime, PrimeError> {
        generate(bits, &mut self.generator, &self.oracle)
    }

    /// Like [`PrimeFinder::find`] with caller-controlled oracle bases.
    pub fn find_with<W: WitnessSource + ?Sized>(
        &mut self,
        bits: u64,
        witnesses: &mut W,
    ) -> Result<FoundPrime, PrimeError> {
        generate_with(bits, &mut self.generator, &self.oracle, witnesses)
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn into_parts(self) -> (G, O) {
        (self.generator, self.oracle)
    }
}
