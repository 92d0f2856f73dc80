//! rands - Command Line Front End for Multi-Stream Random Numbers
//!
//! # Commands
//!
//! - `rands fill` - Fill one vector per stream in parallel and time it
//! - `rands sample` - Print raw, bounded and double draws from one stream
//! - `rands check` - Show the resolved configuration and hardware threads
//!
//! # Configuration
//!
//! Settings are read from an optional TOML file, then `RANDS_*`
//! environment variables, then command line flags, later sources taking
//! precedence.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, RandsConfig};

/// Multi-stream random number generator CLI
#[derive(Parser)]
#[command(name = "rands")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Generator algorithm (xoroshiro128+, pcg, jsf, lehmer64, splitmix64)
    #[arg(short, long, global = true)]
    algorithm: Option<String>,

    /// Number of streams (0 = all hardware threads)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    /// Result width in bits (32 or 64)
    #[arg(long, global = true)]
    result_bits: Option<u32>,

    /// State width in bits (32 or 64)
    #[arg(long, global = true)]
    state_bits: Option<u32>,

    /// Fixed seed for reproducible streams
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            algorithm: self.algorithm.clone(),
            threads: self.threads,
            result_bits: self.result_bits,
            state_bits: self.state_bits,
            seed: self.seed,
            log_level: self.log_level.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fill one vector per stream in parallel
    Fill {
        /// Values per stream (overrides the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Print draws from a single stream
    Sample {
        /// Stream index
        #[arg(long, default_value = "0")]
        stream: usize,

        /// Number of draws
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Inclusive lower bound for bounded draws
        #[arg(long, default_value = "0")]
        lower: u64,

        /// Exclusive upper bound for bounded draws
        #[arg(long, default_value = "100")]
        upper: u64,
    },

    /// Check configuration and hardware threads
    Check,
}

fn init_tracing(config: &RandsConfig, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli.config_args())?;
    init_tracing(&config, cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Fill { count } => commands::fill::run(&config, count),
        Commands::Sample {
            stream,
            count,
            lower,
            upper,
        } => commands::sample::run(&config, stream, count, lower, upper),
        Commands::Check => commands::check::run(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fill_with_overrides() {
        let cli = Cli::parse_from(["rands", "-a", "pcg", "-t", "4", "fill", "-n", "1000"]);
        let args = cli.config_args();
        assert_eq!(args.algorithm.as_deref(), Some("pcg"));
        assert_eq!(args.threads, Some(4));
        assert!(matches!(cli.command, Commands::Fill { count: Some(1000) }));
    }

    #[test]
    fn test_parse_sample_defaults() {
        let cli = Cli::parse_from(["rands", "sample", "--seed", "9"]);
        assert_eq!(cli.seed, Some(9));
        match cli.command {
            Commands::Sample {
                stream,
                count,
                lower,
                upper,
            } => {
                assert_eq!((stream, count, lower, upper), (0, 10, 0, 100));
            }
            _ => panic!("expected sample"),
        }
    }
}
