//! Error types for primality testing and prime search

use pg_rng::RngError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrimeError {
    #[error("primality oracle needs at least one round")]
    ZeroRounds,

    #[error("cannot search for a prime of zero bits")]
    ZeroBits,

    #[error("unknown primality oracle '{0}'")]
    UnknownOracle(String),

    #[error("generator error: {0}")]
    Rng(#[from] RngError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
