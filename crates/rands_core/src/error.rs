//! Error types for stream construction and per-call failures.
//!
//! This module provides:
//! - `EntropyError`: the entropy source could not supply seed material
//! - `ConfigError`: invalid algorithm, width or thread-count configuration
//! - `StreamError`: the error returned by every registry operation
//!
//! Construction-time errors abort registry creation entirely. Per-call
//! errors (`IndexError`, `InvalidRange`) leave every stream untouched.

use thiserror::Error;

/// Failure to obtain raw seed material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
    /// The source could not supply the requested words.
    #[error("Entropy unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors detected before any generator is built.
///
/// # Examples
/// ```
/// use rands_core::ConfigError;
///
/// let err = ConfigError::UnsupportedWidth(16);
/// assert_eq!(
///     format!("{}", err),
///     "Unsupported bit width: 16. Must be one of: 32, 64"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Requested output is wider than the generator's internal state.
    #[error("Result width {result_bits} exceeds state width {state_bits}")]
    ResultWiderThanState {
        /// Requested result width in bits.
        result_bits: u32,
        /// Configured state width in bits.
        state_bits: u32,
    },

    /// Width other than 32 or 64 bits.
    #[error("Unsupported bit width: {0}. Must be one of: 32, 64")]
    UnsupportedWidth(u32),

    /// Zero streams requested.
    #[error("Thread count must be at least 1")]
    NoStreams,

    /// Algorithm has no variant at the requested state width.
    #[error("Algorithm {algorithm} has no {state_bits}-bit state variant")]
    UnsupportedCombination {
        /// Algorithm name.
        algorithm: String,
        /// Requested state width in bits.
        state_bits: u32,
    },

    /// Unrecognised algorithm name.
    #[error("Unknown algorithm: {0}. Expected xoroshiro128+, pcg, jsf, lehmer64 or splitmix64")]
    UnknownAlgorithm(String),
}

/// Errors returned by [`StreamRegistry`](crate::StreamRegistry) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Seeding failed; no registry was created.
    #[error("{0}")]
    EntropyUnavailable(#[from] EntropyError),

    /// Stream index outside `[0, n_streams)`.
    #[error("Stream index {index} out of range for {n_streams} streams")]
    IndexError {
        /// Requested stream index.
        index: usize,
        /// Number of streams in the registry.
        n_streams: usize,
    },

    /// Empty or unrepresentable bounded range.
    #[error("Invalid range: [{lower}, {upper})")]
    InvalidRange {
        /// Inclusive lower bound.
        lower: u64,
        /// Exclusive upper bound.
        upper: u64,
    },

    /// Configuration rejected at construction.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias for registry operations.
pub type Result<T> = std::result::Result<T, StreamError>;
