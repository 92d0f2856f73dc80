//! # Generator Engines
//!
//! Pure state-transition algorithms, each owned by exactly one stream.
//!
//! ## Design
//!
//! - **Closed set**: [`Engine`] is a sum type over every supported
//!   algorithm and state width; `advance` dispatches by `match`, with no
//!   trait objects on the per-draw path
//! - **No copies**: engines do not implement `Clone`. Duplicating a live
//!   engine would duplicate its stream
//! - **Decorrelation**: xoroshiro streams are jumps of one base state; PCG
//!   streams differ by random increment; 32-bit JSF streams differ by
//!   rotation triple; the rest rely on independent seeds
//!
//! ## Module Structure
//!
//! - [`xoroshiro`]: xoroshiro128+ / xoshiro128+ with jump polynomials
//! - [`pcg`]: PCG 64/32 and 128/64 with per-instance increments
//! - [`jsf`]: Small Fast generator with the 32-bit triple table
//! - [`lehmer`]: the Lehmer64 generator

pub mod jsf;
pub mod lehmer;
pub mod pcg;
pub mod xoroshiro;

pub use jsf::{Jsf32, Jsf64};
pub use lehmer::Lehmer64;
pub use pcg::{Pcg32, Pcg64};
pub use xoroshiro::{Xoroshiro128Plus, Xoshiro128Plus};

use tracing::debug;

use crate::config::{Algorithm, BitWidth};
use crate::error::EntropyError;
use crate::seed::{EntropySource, SplitMix64};

/// Jumps applied between consecutive xoroshiro streams.
pub const JUMPS_PER_STREAM: usize = 2;

/// `{algorithm, state width}` tag of an engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineKind {
    /// Algorithm family.
    pub algorithm: Algorithm,
    /// Width of the engine's output word.
    pub state: BitWidth,
}

/// One generator instance of any supported kind.
#[derive(Debug)]
pub enum Engine {
    /// xoroshiro128+ with 64-bit words.
    Xoroshiro64(Xoroshiro128Plus),
    /// xoshiro128+ with 32-bit words.
    Xoroshiro32(Xoshiro128Plus),
    /// PCG XSL-RR 128/64.
    Pcg64(Pcg64),
    /// PCG XSH-RR 64/32.
    Pcg32(Pcg32),
    /// 64-bit JSF.
    Jsf64(Jsf64),
    /// 32-bit JSF.
    Jsf32(Jsf32),
    /// Lehmer64.
    Lehmer64(Lehmer64),
    /// SplitMix64 as an end-user generator.
    SplitMix64(SplitMix64),
}

impl Engine {
    /// Advances the engine and returns its output word, zero-extended to
    /// `u64` for 32-bit engines.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        match self {
            Engine::Xoroshiro64(g) => g.advance(),
            Engine::Xoroshiro32(g) => u64::from(g.advance()),
            Engine::Pcg64(g) => g.advance(),
            Engine::Pcg32(g) => u64::from(g.advance()),
            Engine::Jsf64(g) => g.advance(),
            Engine::Jsf32(g) => u64::from(g.advance()),
            Engine::Lehmer64(g) => g.advance(),
            Engine::SplitMix64(g) => g.next_word(),
        }
    }

    /// Returns the `{algorithm, state width}` tag.
    pub fn kind(&self) -> EngineKind {
        let (algorithm, state) = match self {
            Engine::Xoroshiro64(_) => (Algorithm::Xoroshiro128Plus, BitWidth::W64),
            Engine::Xoroshiro32(_) => (Algorithm::Xoroshiro128Plus, BitWidth::W32),
            Engine::Pcg64(_) => (Algorithm::Pcg, BitWidth::W64),
            Engine::Pcg32(_) => (Algorithm::Pcg, BitWidth::W32),
            Engine::Jsf64(_) => (Algorithm::Jsf, BitWidth::W64),
            Engine::Jsf32(_) => (Algorithm::Jsf, BitWidth::W32),
            Engine::Lehmer64(_) => (Algorithm::Lehmer64, BitWidth::W64),
            Engine::SplitMix64(_) => (Algorithm::SplitMix64, BitWidth::W64),
        };
        EngineKind { algorithm, state }
    }
}

/// Builds `n_streams` engines of one kind, stream `i` at index `i`.
///
/// The caller has already checked that `algorithm` supports `state`. Any
/// entropy failure aborts the whole build.
pub(crate) fn build_streams<E: EntropySource + ?Sized>(
    algorithm: Algorithm,
    state: BitWidth,
    n_streams: usize,
    source: &mut E,
) -> Result<Vec<Engine>, EntropyError> {
    let mut engines = Vec::with_capacity(n_streams);

    match (algorithm, state) {
        (Algorithm::Xoroshiro128Plus, BitWidth::W64) => {
            let mut expander = SplitMix64::from_entropy(source)?;
            let mut cursor = Xoroshiro128Plus::from_expander(&mut expander);
            for index in 0..n_streams {
                debug!(%algorithm, index, jumps = index * JUMPS_PER_STREAM, "Creating stream");
                engines.push(Engine::Xoroshiro64(cursor.fork()));
                for _ in 0..JUMPS_PER_STREAM {
                    cursor.jump();
                }
            }
        }
        (Algorithm::Xoroshiro128Plus, BitWidth::W32) => {
            let mut expander = SplitMix64::from_entropy(source)?;
            let mut cursor = Xoshiro128Plus::from_expander(&mut expander);
            for index in 0..n_streams {
                debug!(%algorithm, index, jumps = index * JUMPS_PER_STREAM, "Creating stream");
                engines.push(Engine::Xoroshiro32(cursor.fork()));
                for _ in 0..JUMPS_PER_STREAM {
                    cursor.jump();
                }
            }
        }
        (Algorithm::Pcg, BitWidth::W64) => {
            for index in 0..n_streams {
                let pcg = Pcg64::from_entropy(source)?;
                debug!(%algorithm, index, "Creating stream");
                engines.push(Engine::Pcg64(pcg));
            }
        }
        (Algorithm::Pcg, BitWidth::W32) => {
            for index in 0..n_streams {
                let pcg = Pcg32::from_entropy(source)?;
                debug!(%algorithm, index, "Creating stream");
                engines.push(Engine::Pcg32(pcg));
            }
        }
        (Algorithm::Jsf, BitWidth::W64) => {
            for index in 0..n_streams {
                let mut expander = SplitMix64::from_entropy(source)?;
                debug!(%algorithm, index, "Creating stream");
                engines.push(Engine::Jsf64(Jsf64::from_expander(&mut expander)));
            }
        }
        (Algorithm::Jsf, BitWidth::W32) => {
            for index in 0..n_streams {
                let mut expander = SplitMix64::from_entropy(source)?;
                let jsf = Jsf32::from_expander(&mut expander, index);
                debug!(%algorithm, index, params = ?jsf.params(), "Creating stream");
                engines.push(Engine::Jsf32(jsf));
            }
        }
        (Algorithm::Lehmer64, _) => {
            for index in 0..n_streams {
                let lehmer = Lehmer64::from_entropy(source)?;
                debug!(%algorithm, index, "Creating stream");
                engines.push(Engine::Lehmer64(lehmer));
            }
        }
        (Algorithm::SplitMix64, _) => {
            for index in 0..n_streams {
                let splitmix = SplitMix64::from_entropy(source)?;
                debug!(%algorithm, index, "Creating stream");
                engines.push(Engine::SplitMix64(splitmix));
            }
        }
    }

    Ok(engines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::FixedEntropy;

    struct DryEntropy;

    impl EntropySource for DryEntropy {
        fn fetch(&mut self, _words: &mut [u64]) -> Result<(), EntropyError> {
            Err(EntropyError::Unavailable("dry".to_string()))
        }
    }

    fn all_kinds() -> Vec<(Algorithm, BitWidth)> {
        let mut kinds = Vec::new();
        for algorithm in Algorithm::ALL {
            for state in [BitWidth::W32, BitWidth::W64] {
                if algorithm.supports_state(state) {
                    kinds.push((algorithm, state));
                }
            }
        }
        kinds
    }

    #[test]
    fn test_build_streams_tags_every_engine() {
        for (algorithm, state) in all_kinds() {
            let engines = build_streams(algorithm, state, 3, &mut FixedEntropy::new(1)).unwrap();
            assert_eq!(engines.len(), 3);
            for engine in &engines {
                assert_eq!(engine.kind(), EngineKind { algorithm, state });
            }
        }
    }

    #[test]
    fn test_32_bit_engines_stay_in_range() {
        for (algorithm, state) in all_kinds() {
            if state != BitWidth::W32 {
                continue;
            }
            let mut source = FixedEntropy::new(2);
            let mut engines = build_streams(algorithm, state, 1, &mut source).unwrap();
            for _ in 0..1000 {
                assert!(engines[0].advance() <= u64::from(u32::MAX));
            }
        }
    }

    #[test]
    fn test_build_streams_propagates_entropy_failure() {
        for (algorithm, state) in all_kinds() {
            let result = build_streams(algorithm, state, 2, &mut DryEntropy);
            assert!(matches!(result, Err(EntropyError::Unavailable(_))));
        }
    }

    #[test]
    fn test_xoroshiro_streams_are_jumped_base() {
        let mut source = FixedEntropy::new(4);
        let mut engines =
            build_streams(Algorithm::Xoroshiro128Plus, BitWidth::W64, 3, &mut source).unwrap();

        let mut source = FixedEntropy::new(4);
        let mut expander = SplitMix64::from_entropy(&mut source).unwrap();
        let mut expected = Xoroshiro128Plus::from_expander(&mut expander);
        for _ in 0..(2 * JUMPS_PER_STREAM) {
            expected.jump();
        }

        for _ in 0..100 {
            assert_eq!(engines[2].advance(), expected.advance());
        }
    }

    #[test]
    fn test_jsf32_streams_use_indexed_triples() {
        let mut source = FixedEntropy::new(5);
        let engines = build_streams(Algorithm::Jsf, BitWidth::W32, 25, &mut source).unwrap();
        for (index, engine) in engines.iter().enumerate() {
            match engine {
                Engine::Jsf32(jsf) => assert_eq!(jsf.params(), jsf::jsf32_params_for(index)),
                other => panic!("unexpected engine {:?}", other.kind()),
            }
        }
    }
}
