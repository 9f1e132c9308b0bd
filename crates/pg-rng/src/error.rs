//! Error types for generator construction

use thiserror::Error;

/// Errors raised while constructing a generator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RngError {
    #[error("ISAAC64 seed must contain exactly {expected} words, got {found}")]
    SeedLength { expected: usize, found: usize },

    #[error("xorshift128+ seed words cannot both be zero")]
    DegenerateSeed,

    #[error("unknown generator '{0}'")]
    UnknownGenerator(String),
}
