//! Check command implementation
//!
//! Prints the resolved configuration and verifies that a registry can be
//! built from it.

use rands_core::{hardware_threads, EngineKind, StreamRegistry};
use tracing::info;

use crate::config::{RandsConfig, ENV_VARS};
use crate::Result;

/// Run the check command
pub fn run(config: &RandsConfig) -> Result<()> {
    info!("Checking configuration...");

    let stream_config = config.to_stream_config();
    println!("{:<19}{}", "Algorithm:", config.algorithm);
    println!("{:<19}{}", "Requested threads:", config.threads);
    println!("{:<19}{}", "Resolved streams:", stream_config.threads);
    println!("{:<19}{}", "Hardware threads:", hardware_threads());
    println!("{:<19}{}", "Result bits:", config.result_bits);
    println!("{:<19}{}", "State bits:", config.state_bits);
    match config.seed {
        Some(seed) => println!("{:<19}{}", "Seed:", seed),
        None => println!("{:<19}OS entropy", "Seed:"),
    }
    println!("{:<19}{}", "Log level:", config.log_level);

    for name in ENV_VARS {
        if let Ok(value) = std::env::var(name) {
            println!("  {}={}", name, value);
        }
    }

    let registry = StreamRegistry::new(stream_config)?;
    let streams = registry.n_streams();
    let EngineKind { algorithm, state } = registry.kind();
    info!("Registry OK: {streams} streams of {algorithm} ({state}-bit state)");

    Ok(())
}
