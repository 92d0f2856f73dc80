//! CLI error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `rands` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Registry construction or a draw failed.
    #[error("Stream error: {0}")]
    Stream(#[from] rands_core::StreamError),

    /// Invalid command line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
