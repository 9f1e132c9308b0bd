//! The primality oracle interface and its closed set of implementations

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_integer::Integer;
use serde::{Deserialize, Serialize};

use crate::error::PrimeError;
use crate::fermat::Fermat;
use crate::miller_rabin::MillerRabin;
use crate::witness::{RandomWitnesses, WitnessSource};

/// Rounds used when none are configured.
pub const DEFAULT_ROUNDS: u32 = 5;

/// A probabilistic primality test parameterized by its round count.
///
/// Implementations hold no mutable state, so one instance can be shared
/// between threads.
pub trait PrimalityTest {
    /// Number of independent bases tried per call.
    fn rounds(&self) -> u32;

    /// Tests `n`, asking `witnesses` for one base per round.
    fn is_prime_with<W: WitnessSource + ?Sized>(&self, n: &BigUint, witnesses: &mut W) -> bool;

    /// Tests `n` with bases from the thread-local generator.
    fn is_prime(&self, n: &BigUint) -> bool {
        self.is_prime_with(n, &mut RandomWitnesses::new(rand::thread_rng()))
    }
}

impl<T: PrimalityTest + ?Sized> PrimalityTest for &T {
    fn rounds(&self) -> u32 {
        (**self).rounds()
    }

    fn is_prime_with<W: WitnessSource + ?Sized>(&self, n: &BigUint, witnesses: &mut W) -> bool {
        (**self).is_prime_with(n, witnesses)
    }
}

/// Answers the cases both tests settle without drawing a base.
///
/// Returns `None` only for odd `n >= 5`, where `[2, n - 2]` is non-empty.
pub(crate) fn trivial_verdict(n: &BigUint) -> Option<bool> {
    if *n <= BigUint::from(1u32) {
        return Some(false);
    }
    if *n <= BigUint::from(3u32) {
        return Some(true);
    }
    if n.is_even() {
        return Some(false);
    }
    None
}

pub(crate) fn check_rounds(rounds: u32) -> Result<u32, PrimeError> {
    if rounds == 0 {
        Err(PrimeError::ZeroRounds)
    } else {
        Ok(rounds)
    }
}

/// Identifies an oracle variant, e.g. in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OracleKind {
    Fermat,
    MillerRabin,
}

impl OracleKind {
    pub fn name(self) -> &'static str {
        match self {
            OracleKind::Fermat => "fermat",
            OracleKind::MillerRabin => "miller-rabin",
        }
    }

    pub fn build(self, rounds: u32) -> Result<Oracle, PrimeError> {
        Ok(match self {
            OracleKind::Fermat => Oracle::Fermat(Fermat::new(rounds)?),
            OracleKind::MillerRabin => Oracle::MillerRabin(MillerRabin::new(rounds)?),
        })
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OracleKind {
    type Err = PrimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "fermat" => Ok(OracleKind::Fermat),
            "miller-rabin" | "millerrabin" | "mr" => Ok(OracleKind::MillerRabin),
            _ => Err(PrimeError::UnknownOracle(s.to_string())),
        }
    }
}

/// Either oracle, chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oracle {
    Fermat(Fermat),
    MillerRabin(MillerRabin),
}

impl Oracle {
    pub fn kind(&self) -> OracleKind {
        match self {
            Oracle::Fermat(_) => OracleKind::Fermat,
            Oracle::MillerRabin(_) => OracleKind::MillerRabin,
        }
    }
}

impl Default for Oracle {
    fn default() -> Self {
        Oracle::MillerRabin(MillerRabin::default())
    }
}

impl PrimalityTest for Oracle {
    fn rounds(&self) -> u32 {
        match self {
            Oracle::Fermat(o) => o.rounds(),
            Oracle::MillerRabin(o) => o.rounds(),
        }
    }

    fn is_prime_with<W: WitnessSource + ?Sized>(&self, n: &BigUint, witnesses: &mut W) -> bool {
        match self {
            Oracle::Fermat(o) => o.is_prime_with(n, witnesses),
            Oracle::MillerRabin(o) => o.is_prime_with(n, witnesses),
        }
    }
}

impl From<Fermat> for Oracle {
    fn from(o: Fermat) -> Self {
        Oracle::Fermat(o)
    }
}

impl From<MillerRabin> for Oracle {
    fn from(o: MillerRabin) -> Self {
        Oracle::MillerRabin(o)
    }
}
