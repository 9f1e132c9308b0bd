//! Fermat primality test
//!
//! `n` is declared composite as soon as some base `a` gives
//! `a^(n-1) mod n != 1`. Composites for which a base still yields 1 are
//! Fermat pseudoprimes to that base (341 and 2047 to base 2, Carmichael
//! numbers such as 561 to every coprime base), and the test will report
//! them as prime when it only draws such bases.

use num_bigint::BigUint;
use num_traits::One;
use tracing::trace;

use crate::error::PrimeError;
use crate::oracle::{DEFAULT_ROUNDS, PrimalityTest, check_rounds, trivial_verdict};
use crate::witness::WitnessSource;

/// Fermat test with a fixed number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fermat {
    rounds: u32,
}

impl Fermat {
    /// Fails with [`PrimeError::ZeroRounds`] when `rounds` is zero.
    pub fn new(rounds: u32) -> Result<Self, PrimeError> {
        Ok(Self {
            rounds: check_rounds(rounds)?,
        })
    }
}

impl Default for Fermat {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

impl PrimalityTest for Fermat {
    fn rounds(&self) -> u32 {
        self.rounds
    }

    fn is_prime_with<W: WitnessSource + ?Sized>(&self, n: &BigUint, witnesses: &mut W) -> bool {
        if let Some(verdict) = trivial_verdict(n) {
            return verdict;
        }

        let one = BigUint::one();
        let exponent = n - &one;
        for round in 0..self.rounds {
            let a = witnesses.witness(n);
            if a.modpow(&exponent, n) != one {
                trace!(%n, %a, round, "fermat witness found");
                return false;
            }
        }
        true
    }
}
