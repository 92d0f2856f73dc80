//! Fill command implementation
//!
//! Fills one row per stream in parallel, reports the elapsed time and
//! prints a sample of integers and doubles.

use std::time::Instant;

use rands_core::StreamRegistry;
use tracing::info;

use crate::config::RandsConfig;
use crate::{CliError, Result};

/// Integer/double pairs printed after the fill.
const SAMPLE_LINES: usize = 8;

/// Run the fill command
pub fn run(config: &RandsConfig, count: Option<usize>) -> Result<()> {
    let count = count.unwrap_or(config.count);
    if count == 0 {
        return Err(CliError::InvalidArgument("count must be at least 1".to_string()));
    }

    let stream_config = config.to_stream_config();
    let threads = stream_config.threads;
    let mut registry = StreamRegistry::new(stream_config)?;

    info!("Filling {} rows of {} values...", threads, count);
    let mut rows = vec![vec![0u64; count]; threads];

    let start = Instant::now();
    registry.fill_parallel(&mut rows)?;
    let millis = start.elapsed().as_millis();

    info!(elapsed_ms = millis as u64, "Parallel fill complete");
    println!("\nIt took {millis} ms to fill {threads} vectors of {count} rands.");

    println!("\nA sample of random numbers:\n");
    for _ in 0..SAMPLE_LINES {
        let integer = registry.raw(0)?;
        let double = registry.uniform_double(0)?;
        println!("An integer: {} and a double: {}", integer, double);
    }

    Ok(())
}
