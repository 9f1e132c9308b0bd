//! Miller-Rabin primality test
//!
//! Writes `n - 1 = 2^r * s` with `s` odd. A base `a` passes when
//! `a^s = 1` or `a^(2^j * s) = n - 1` for some `j < r`; otherwise it is a
//! witness and `n` is composite. At most a quarter of the bases in
//! `[2, n - 2]` are liars for any odd composite.

use num_bigint::BigUint;
use num_traits::One;
use tracing::trace;

use crate::error::PrimeError;
use crate::oracle::{DEFAULT_ROUNDS, PrimalityTest, check_rounds, trivial_verdict};
use crate::witness::WitnessSource;

/// Miller-Rabin test with a fixed number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MillerRabin {
    rounds: u32,
}

impl MillerRabin {
    /// Fails with [`PrimeError::ZeroRounds`] when `rounds` is zero.
    pub fn new(rounds: u32) -> Result<Self, PrimeError> {
        Ok(Self {
            rounds: check_rounds(rounds)?,
        })
    }
}

impl Default for MillerRabin {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_ROUNDS,
        }
    }
}

/// Splits `m` into `(r, s)` with `m = 2^r * s` and `s` odd. `m` must be non-zero.
fn split_twos(m: &BigUint) -> (u64, BigUint) {
    let r = m.trailing_zeros().unwrap_or(0);
    (r, m >> r)
}

impl PrimalityTest for MillerRabin {
    fn rounds(&self) -> u32 {
        self.rounds
    }

    fn is_prime_with<W: WitnessSource + ?Sized>(&self, n: &BigUint, witnesses: &mut W) -> bool {
        if let Some(verdict) = trivial_verdict(n) {
            return verdict;
        }

        let one = BigUint::one();
        let two = BigUint::from(2u32);
        let n_minus_one = n - &one;
        let (r, s) = split_twos(&n_minus_one);

        'rounds: for round in 0..self.rounds {
            let a = witnesses.witness(n);
            let mut x = a.modpow(&s, n);
            if x == one || x == n_minus_one {
                continue;
            }
            for _ in 1..r {
                x = x.modpow(&two, n);
                if x == n_minus_one {
                    continue 'rounds;
                }
            }
            trace!(%n, %a, round, "miller-rabin witness found");
            return false;
        }
        true
    }
}
