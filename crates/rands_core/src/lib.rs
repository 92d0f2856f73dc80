//! # rands_core: Independent Multi-Stream Random Number Generation
//!
//! rands_core keeps one pseudo-random generator per logical thread and
//! exposes every draw through a single registry keyed by stream index:
//! - Seed expansion and entropy sources (`seed`)
//! - Generator engines: xoroshiro128+, PCG, JSF, Lehmer64, SplitMix64 (`engines`)
//! - Algorithm and width configuration (`config`)
//! - Stream registry with bounded draws, doubles and fills (`registry`)
//! - Rayon-backed parallel fills, one row per stream (`registry::parallel`)
//! - Error types: `EntropyError`, `ConfigError`, `StreamError` (`error`)
//!
//! ## Stream Independence
//!
//! Each stream is owned by exactly one slot of the registry and is never
//! shared. Streams of the same registry are decorrelated per algorithm:
//! xoroshiro streams are non-overlapping jumps of one base state, PCG
//! streams use distinct increments, and 32-bit JSF streams use distinct
//! rotation triples.
//!
//! ## Usage Examples
//!
//! ```rust
//! use rands_core::{Algorithm, StreamConfig, StreamRegistry};
//!
//! // Four xoroshiro128+ streams from a reproducible seed
//! let config = StreamConfig::new(Algorithm::Xoroshiro128Plus)
//!     .with_threads(4)
//!     .with_seed(7);
//! let mut registry = StreamRegistry::new(config).unwrap();
//!
//! // Bias-free bounded draw from stream 2
//! let v = registry.bounded_range(2, 10, 20).unwrap();
//! assert!((10..20).contains(&v));
//!
//! // Out-of-range stream index is an error, not a panic
//! assert!(registry.raw(4).is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable deserialisation for `Algorithm` and `SeedSource`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engines;
pub mod error;
pub mod registry;
pub mod seed;

pub use config::{
    hardware_threads, resolve_thread_count, Algorithm, BitWidth, StreamConfig, WidthPair,
};
pub use engines::{Engine, EngineKind};
pub use error::{ConfigError, EntropyError, Result, StreamError};
pub use registry::{StreamHandle, StreamRegistry};
pub use seed::{EntropySource, FixedEntropy, OsEntropy, SeedSource, SplitMix64};
