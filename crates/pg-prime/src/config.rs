//! Prime search configuration
//!
//! A [`SearchConfig`] names the generator, the oracle and the bit width.
//! It can be loaded from JSON; every field except `bits` has a default.
//!
//! ```json
//! { "bits": 512, "generator": "isaac64", "oracle": "miller-rabin", "rounds": 8 }
//! ```

use std::path::Path;

use pg_rng::{Generator, GeneratorKind, Xorshift128Plus};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PrimeError;
use crate::finder::{FoundPrime, generate};
use crate::oracle::{DEFAULT_ROUNDS, Oracle, OracleKind};

fn default_generator() -> GeneratorKind {
    GeneratorKind::Isaac64
}

fn default_oracle() -> OracleKind {
    OracleKind::MillerRabin
}

fn default_rounds() -> u32 {
    DEFAULT_ROUNDS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Requested prime width in bits.
    pub bits: u64,
    #[serde(default = "default_generator")]
    pub generator: GeneratorKind,
    #[serde(default = "default_oracle")]
    pub oracle: OracleKind,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    /// Fixed xorshift128+ seed; ignored for ISAAC64, which is seeded from
    /// the OS when built from a config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xorshift_seed: Option<[u64; 2]>,
}

impl SearchConfig {
    pub fn new(bits: u64) -> Self {
        Self {
            bits,
            generator: default_generator(),
            oracle: default_oracle(),
            rounds: default_rounds(),
            xorshift_seed: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, PrimeError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrimeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn build_generator(&self) -> Result<Generator, PrimeError> {
        match (self.generator, self.xorshift_seed) {
            (GeneratorKind::Xorshift128Plus, Some([s0, s1])) => {
                Ok(Generator::from(Xorshift128Plus::new(s0, s1)?))
            }
            (kind, _) => Ok(Generator::from_entropy(kind)),
        }
    }

    pub fn build_oracle(&self) -> Result<Oracle, PrimeError> {
        self.oracle.build(self.rounds)
    }

    /// Builds both components and runs one search.
    pub fn run(&self) -> Result<FoundPrime, PrimeError> {
        let oracle = self.build_oracle()?;
        let mut generator = self.build_generator()?;
        info!(
            bits = self.bits,
            generator = %self.generator,
            oracle = %self.oracle,
            rounds = self.rounds,
            "searching for prime"
        );
        generate(self.bits, &mut generator, &oracle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::PrimalityTest;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config = SearchConfig::from_json_str(r#"{ "bits": 128 }"#).unwrap();
        assert_eq!(config, SearchConfig::new(128));
        assert_eq!(config.generator, GeneratorKind::Isaac64);
        assert_eq!(config.oracle, OracleKind::MillerRabin);
        assert_eq!(config.rounds, 5);
    }

    #[test]
    fn test_full_json() {
        let config = SearchConfig::from_json_str(
            r#"{
                "bits": 64,
                "generator": "xorshift128plus",
                "oracle": "fermat",
                "rounds": 3,
                "xorshift_seed": [12345, 67890]
            }"#,
        )
        .unwrap();
        assert_eq!(config.generator, GeneratorKind::Xorshift128Plus);
        assert_eq!(config.oracle, OracleKind::Fermat);
        assert_eq!(config.xorshift_seed, Some([12345, 67890]));

        let oracle = config.build_oracle().unwrap();
        assert_eq!(oracle.rounds(), 3);
        assert_eq!(config.build_generator().unwrap().kind(), GeneratorKind::Xorshift128Plus);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            SearchConfig::from_json_str(r#"{ "generator": "isaac64" }"#),
            Err(PrimeError::Config(_))
        ));
        assert!(matches!(
            SearchConfig::from_json_str(r#"{ "bits": 8, "oracle": "aks" }"#),
            Err(PrimeError::Config(_))
        ));
    }

    #[test]
    fn test_degenerate_seed_surfaces() {
        let mut config = SearchConfig::new(32);
        config.generator = GeneratorKind::Xorshift128Plus;
        config.xorshift_seed = Some([0, 0]);
        assert!(matches!(
            config.build_generator(),
            Err(PrimeError::Rng(pg_rng::RngError::DegenerateSeed))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            SearchConfig::load("/nonexistent/primegen.json"),
            Err(PrimeError::Io(_))
        ));
    }

    #[test]
    fn test_serialize_roundtrip_names() {
        let json = serde_json::to_string(&SearchConfig::new(16)).unwrap();
        assert!(json.contains(r#""generator":"isaac64""#));
        assert!(json.contains(r#""oracle":"miller-rabin""#));
        assert!(!json.contains("xorshift_seed"));
    }

    #[test]
    fn test_run_small_search() {
        let mut config = SearchConfig::new(24);
        config.generator = GeneratorKind::Xorshift128Plus;
        config.xorshift_seed = Some([1, 2]);
        let found = config.run().unwrap();
        assert!(found.prime.bit(0));
        assert!(found.trials >= 1);
    }
}
