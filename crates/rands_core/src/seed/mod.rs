//! Seed material: raw entropy and the SplitMix64 seed expander.
//!
//! Every generator draws its initial state from here during registry
//! construction. Nothing in this module is touched after construction.
//!
//! - [`entropy`]: the [`EntropySource`] contract plus OS and fixed sources
//! - [`expander`]: [`SplitMix64`], which turns one raw word into as many
//!   well-mixed seed words as a generator's state requires

pub mod entropy;
pub mod expander;

pub use entropy::{EntropySource, FixedEntropy, OsEntropy, SeedSource};
pub use expander::SplitMix64;
