//! Sample command implementation
//!
//! Prints raw, bounded and double draws from a single stream.

use rands_core::StreamRegistry;
use tracing::info;

use crate::config::RandsConfig;
use crate::{CliError, Result};

/// Run the sample command
pub fn run(config: &RandsConfig, stream: usize, n: usize, lower: u64, upper: u64) -> Result<()> {
    if upper <= lower {
        return Err(CliError::InvalidArgument(format!(
            "upper ({upper}) must be greater than lower ({lower})"
        )));
    }

    let mut registry = StreamRegistry::new(config.to_stream_config())?;
    let streams = registry.n_streams();
    info!("Sampling {n} values from stream {stream} of {streams}");

    let mut handle = registry.stream(stream)?;
    let range = format!("[{}, {})", lower, upper);
    println!("{:>22}  {:>22}  {:>20}", "raw", range, "double");
    for _ in 0..n {
        let raw = handle.raw();
        let bounded = handle.bounded_range(lower, upper)?;
        let double = handle.uniform_double();
        println!("{:>22}  {:>22}  {:>20.17}", raw, bounded, double);
    }

    Ok(())
}
