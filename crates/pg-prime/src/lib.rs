//! pg-prime: probabilistic primality testing and random prime search
//!
//! Two oracles are provided, [`Fermat`] and [`MillerRabin`], both driven by
//! a round count `k`. [`generate`] combines an oracle with a
//! [`pg_rng::WordGenerator`] to find a prime of a requested bit width.
//!
//! ```
//! use num_bigint::BigUint;
//! use pg_prime::{MillerRabin, PrimalityTest, generate};
//! use pg_rng::Xorshift128Plus;
//!
//! let mut rng = Xorshift128Plus::new(12345, 67890).unwrap();
//! let oracle = MillerRabin::default();
//! let found = generate(32, &mut rng, &oracle).unwrap();
//! assert!(oracle.is_prime(&found.prime));
//! assert!(found.prime < BigUint::from(1u64 << 33));
//! ```

pub mod config;
mod error;
pub mod fermat;
pub mod finder;
pub mod miller_rabin;
pub mod oracle;
pub mod witness;

pub use config::SearchConfig;
pub use error::PrimeError;
pub use fermat::Fermat;
pub use finder::{FoundPrime, PrimeFinder, generate, generate_with};
pub use miller_rabin::MillerRabin;
pub use oracle::{DEFAULT_ROUNDS, Oracle, OracleKind, PrimalityTest};
pub use witness::{FixedWitnesses, RandomWitnesses, WitnessSource};

/// Composites that pass Miller-Rabin for base 2 (and therefore Fermat for
/// base 2 as well). 3215031751 also passes bases 3, 5 and 7.
pub const BASE2_STRONG_PSEUDOPRIMES: [u64; 10] = [
    2047, 3277, 4033, 4681, 8321, 15841, 29341, 42799, 49141, 3215031751,
];
