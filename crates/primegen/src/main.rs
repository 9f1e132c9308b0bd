//! primegen: command-line front end for random prime generation
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`
//! (e.g. `RUST_LOG=pg_prime=debug`).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use num_bigint::BigUint;
use tracing_subscriber::EnvFilter;

use pg_prime::{
    BASE2_STRONG_PSEUDOPRIMES, DEFAULT_ROUNDS, OracleKind, PrimalityTest, SearchConfig,
};
use pg_rng::{Generator, GeneratorKind, WordGenerator, Xorshift128Plus};

#[derive(Parser, Debug)]
#[command(name = "primegen", version, about = "Generate random probable primes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a prime of the given bit width
    Generate {
        /// Bit width of the starting candidate
        #[arg(short, long)]
        bits: Option<u64>,

        /// isaac64 or xorshift128plus
        #[arg(short, long)]
        generator: Option<GeneratorKind>,

        /// fermat or miller-rabin
        #[arg(short, long)]
        oracle: Option<OracleKind>,

        /// Oracle rounds per candidate
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Two xorshift128+ seed words; implies xorshift128plus
        #[arg(long, num_args = 2, value_names = ["S0", "S1"], conflicts_with = "generator")]
        seed: Option<Vec<u64>>,

        /// JSON search configuration; flags override its fields
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Run both oracles on a number
    Check {
        /// Decimal integer to test
        number: BigUint,

        #[arg(short, long, default_value_t = DEFAULT_ROUNDS)]
        rounds: u32,
    },

    /// Run both oracles on the known base-2 strong pseudoprimes
    Pseudoprimes {
        #[arg(short, long, default_value_t = 1)]
        rounds: u32,
    },

    /// Print raw 64-bit words
    Words {
        #[arg(short, long, default_value = "isaac64")]
        generator: GeneratorKind,

        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,

        /// Two xorshift128+ seed words; implies xorshift128plus
        #[arg(long, num_args = 2, value_names = ["S0", "S1"], conflicts_with = "generator")]
        seed: Option<Vec<u64>>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Generate {
            bits,
            generator,
            oracle,
            rounds,
            seed,
            config,
        } => {
            let mut search = match config {
                Some(path) => SearchConfig::load(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => {
                    let Some(bits) = bits else {
                        bail!("--bits is required without --config");
                    };
                    SearchConfig::new(bits)
                }
            };
            if let Some(bits) = bits {
                search.bits = bits;
            }
            if let Some(kind) = generator {
                search.generator = kind;
            }
            if let Some(kind) = oracle {
                search.oracle = kind;
            }
            if let Some(rounds) = rounds {
                search.rounds = rounds;
            }
            if let Some(pair) = seed_pair(seed.as_deref()) {
                search.generator = GeneratorKind::Xorshift128Plus;
                search.xorshift_seed = Some(pair);
            }

            let found = search.run()?;
            println!("prime_bits={}", found.prime.bits());
            println!("trials={}", found.trials);
            println!("{}", found.prime);
        }
        Command::Check { number, rounds } => {
            for kind in [OracleKind::Fermat, OracleKind::MillerRabin] {
                let oracle = kind.build(rounds)?;
                println!("{}: {}", kind, verdict(oracle.is_prime(&number)));
            }
        }
        Command::Pseudoprimes { rounds } => {
            let fermat = OracleKind::Fermat.build(rounds)?;
            let miller_rabin = OracleKind::MillerRabin.build(rounds)?;
            for n in BASE2_STRONG_PSEUDOPRIMES {
                let n = BigUint::from(n);
                println!(
                    "{} -> fermat: {}, miller-rabin: {}",
                    n,
                    verdict(fermat.is_prime(&n)),
                    verdict(miller_rabin.is_prime(&n))
                );
            }
        }
        Command::Words {
            generator,
            count,
            seed,
        } => {
            let mut rng = match seed_pair(seed.as_deref()) {
                Some([s0, s1]) => Generator::from(Xorshift128Plus::new(s0, s1)?),
                None => Generator::from_entropy(generator),
            };
            for _ in 0..count {
                println!("{:#018x}", rng.next_word());
            }
        }
    }

    Ok(())
}

fn seed_pair(seed: Option<&[u64]>) -> Option<[u64; 2]> {
    match seed {
        Some(&[s0, s1]) => Some([s0, s1]),
        _ => None,
    }
}

fn verdict(prime: bool) -> &'static str {
    if prime { "probably prime" } else { "composite" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "primegen", "generate", "--bits", "64", "--oracle", "fermat", "--seed", "1", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Generate {
                bits, oracle, seed, ..
            } => {
                assert_eq!(bits, Some(64));
                assert_eq!(oracle, Some(OracleKind::Fermat));
                assert_eq!(seed_pair(seed.as_deref()), Some([1, 2]));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_big_number() {
        let cli = Cli::try_parse_from(["primegen", "check", "170141183460469231731687303715884105727"])
            .unwrap();
        match cli.command {
            Command::Check { number, rounds } => {
                assert_eq!(number, (BigUint::from(1u32) << 127usize) - 1u32);
                assert_eq!(rounds, DEFAULT_ROUNDS);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_seed_conflicts_with_generator() {
        let generate = [
            "primegen", "generate", "--bits", "64", "--generator", "isaac64", "--seed", "1", "2",
        ];
        let words = ["primegen", "words", "--generator", "isaac64", "--seed", "1", "2"];
        let err = Cli::try_parse_from(generate).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        let err = Cli::try_parse_from(words).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        // The default generator on `words` does not count as a conflict.
        let cli = Cli::try_parse_from(["primegen", "words", "--seed", "1", "2"]).unwrap();
        assert!(matches!(cli.command, Command::Words { seed: Some(_), .. }));
    }

    #[test]
    fn test_unknown_generator_rejected() {
        assert!(Cli::try_parse_from(["primegen", "words", "--generator", "mt19937"]).is_err());
    }
}
