//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, `RANDS_*` environment
//! variables and command line flags.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use rands_core::{resolve_thread_count, Algorithm, SeedSource, StreamConfig};

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unrecognised log level name.
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable could not be parsed.
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Stream configuration rejected by rands_core.
    #[error(transparent)]
    Stream(#[from] rands_core::ConfigError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Every stream construction and draw batch.
    Trace,
    /// Per-stream construction details.
    Debug,
    /// Registry lifecycle and timings.
    #[default]
    Info,
    /// Thread clamping and recoverable problems.
    Warn,
    /// Failures only.
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// `rands` configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RandsConfig {
    /// Generator algorithm
    pub algorithm: Algorithm,
    /// Number of streams; 0 selects every hardware thread
    pub threads: usize,
    /// Width of returned values in bits
    pub result_bits: u32,
    /// Width of the generator state in bits
    pub state_bits: u32,
    /// Fixed seed; OS entropy when absent
    pub seed: Option<u64>,
    /// Log level
    pub log_level: LogLevel,
    /// Values per stream for `fill`
    pub count: usize,
}

impl Default for RandsConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Xoroshiro128Plus,
            threads: 2,
            result_bits: 64,
            state_bits: 64,
            seed: None,
            log_level: LogLevel::Info,
            count: 1_000_000,
        }
    }
}

/// Environment variables read by [`RandsConfig::apply_env`].
pub const ENV_VARS: [&str; 7] = [
    "RANDS_ALGORITHM",
    "RANDS_THREADS",
    "RANDS_RESULT_BITS",
    "RANDS_STATE_BITS",
    "RANDS_SEED",
    "RANDS_LOG_LEVEL",
    "RANDS_COUNT",
];

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} is not valid", name, value)))
}

impl RandsConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overrides fields from `RANDS_*` variables found by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(algorithm) = lookup("RANDS_ALGORITHM") {
            self.algorithm = Algorithm::from_str(&algorithm)?;
        }
        if let Some(threads) = lookup("RANDS_THREADS") {
            self.threads = parse_env("RANDS_THREADS", &threads)?;
        }
        if let Some(bits) = lookup("RANDS_RESULT_BITS") {
            self.result_bits = parse_env("RANDS_RESULT_BITS", &bits)?;
        }
        if let Some(bits) = lookup("RANDS_STATE_BITS") {
            self.state_bits = parse_env("RANDS_STATE_BITS", &bits)?;
        }
        if let Some(seed) = lookup("RANDS_SEED") {
            self.seed = Some(parse_env("RANDS_SEED", &seed)?);
        }
        if let Some(level) = lookup("RANDS_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(count) = lookup("RANDS_COUNT") {
            self.count = parse_env("RANDS_COUNT", &count)?;
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(algorithm) = &cli.algorithm {
            self.algorithm = Algorithm::from_str(algorithm)?;
        }
        if let Some(threads) = cli.threads {
            self.threads = threads;
        }
        if let Some(bits) = cli.result_bits {
            self.result_bits = bits;
        }
        if let Some(bits) = cli.state_bits {
            self.state_bits = bits;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        Ok(())
    }

    /// Builds the registry configuration, resolving a thread count of 0
    /// or one above the hardware count.
    pub fn to_stream_config(&self) -> StreamConfig {
        let seed_source = match self.seed {
            Some(seed) => SeedSource::Fixed(seed),
            None => SeedSource::Os,
        };
        StreamConfig::new(self.algorithm)
            .with_threads(resolve_thread_count(self.threads))
            .with_result_bits(self.result_bits)
            .with_state_bits(self.state_bits)
            .with_seed_source(seed_source)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_stream_config().validate()?;
        Ok(())
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Algorithm override
    pub algorithm: Option<String>,
    /// Thread count override
    pub threads: Option<usize>,
    /// Result width override
    pub result_bits: Option<u32>,
    /// State width override
    pub state_bits: Option<u32>,
    /// Seed override
    pub seed: Option<u64>,
    /// Log level override
    pub log_level: Option<String>,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<RandsConfig, ConfigError> {
    build_config_with_env(cli, |name| std::env::var(name).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<RandsConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => RandsConfig::from_file(path)?,
        None => RandsConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}
