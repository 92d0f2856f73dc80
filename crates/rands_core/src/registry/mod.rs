//! # Stream Registry
//!
//! [`StreamRegistry`] owns one engine per stream index and is the single
//! entry point for draws. Every operation names the stream it draws from;
//! an index outside `[0, n_streams)` is an error, never a panic.
//!
//! ## Ownership
//!
//! Engines live in a `Vec` indexed by stream id for the registry's whole
//! lifetime. A [`StreamHandle`] is a mutable borrow of exactly one slot, so
//! two handles can never alias the same stream, and the parallel fills in
//! [`parallel`] hand each worker a disjoint slot.
//!
//! ## Width Adaptation
//!
//! Raw engine words are narrowed by [`WidthPair::adapt`] before anything
//! else sees them. Bounded draws and doubles are computed at the result
//! width.
//!
//! ## Usage Example
//!
//! ```rust
//! use rands_core::{Algorithm, StreamConfig, StreamRegistry};
//!
//! let config = StreamConfig::new(Algorithm::Xoroshiro128Plus)
//!     .with_threads(4)
//!     .with_seed(2024);
//! let mut registry = StreamRegistry::new(config).unwrap();
//!
//! let die = registry.bounded_range(0, 1, 7).unwrap();
//! assert!((1..7).contains(&die));
//!
//! let u = registry.uniform_double(3).unwrap();
//! assert!((0.0..1.0).contains(&u));
//!
//! let mut rows = vec![vec![0u64; 256]; 4];
//! registry.fill_parallel(&mut rows).unwrap();
//! ```

pub mod parallel;
pub mod sampling;

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use tracing::info;

use crate::config::{StreamConfig, WidthPair};
use crate::engines::{build_streams, Engine, EngineKind};
use crate::error::{Result, StreamError};
use crate::seed::EntropySource;

use sampling::{lemire_bounded, to_unit_double};

/// Owner of one generator instance per stream index.
#[derive(Debug)]
pub struct StreamRegistry {
    engines: Vec<Engine>,
    widths: WidthPair,
    config: StreamConfig,
}

impl StreamRegistry {
    /// Builds a registry seeded from `config.seed_source`.
    ///
    /// # Errors
    ///
    /// - [`StreamError::Config`] if the configuration is invalid
    /// - [`StreamError::EntropyUnavailable`] if seeding any stream fails;
    ///   no partially seeded registry is returned
    pub fn new(config: StreamConfig) -> Result<Self> {
        let mut source = config.seed_source.into_source();
        Self::with_entropy(config, &mut *source)
    }

    /// Builds a registry seeded from an explicit entropy source.
    pub fn with_entropy<E: EntropySource + ?Sized>(
        config: StreamConfig,
        source: &mut E,
    ) -> Result<Self> {
        let widths = config.widths()?;
        let engines = build_streams(config.algorithm, widths.state(), config.threads, source)?;

        info!(
            algorithm = %config.algorithm,
            streams = engines.len(),
            result_bits = widths.result().bits(),
            state_bits = widths.state().bits(),
            "Stream registry initialised"
        );

        Ok(Self {
            engines,
            widths,
            config,
        })
    }

    /// Number of streams.
    #[inline]
    pub fn n_streams(&self) -> usize {
        self.engines.len()
    }

    /// Configuration the registry was built from.
    #[inline]
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Result/state width pairing.
    #[inline]
    pub fn widths(&self) -> WidthPair {
        self.widths
    }

    /// `{algorithm, state width}` tag shared by every stream.
    pub fn kind(&self) -> EngineKind {
        // The registry always holds at least one stream.
        self.engines[0].kind()
    }

    /// Borrows the stream at `index` exclusively.
    pub fn stream(&mut self, index: usize) -> Result<StreamHandle<'_>> {
        let n_streams = self.engines.len();
        let widths = self.widths;
        self.engines
            .get_mut(index)
            .map(|engine| StreamHandle::new(engine, widths, index))
            .ok_or(StreamError::IndexError { index, n_streams })
    }

    /// Next result-width word from stream `index`.
    pub fn raw(&mut self, index: usize) -> Result<u64> {
        Ok(self.stream(index)?.raw())
    }

    /// Uniform draw over `[0, upper)`.
    pub fn bounded(&mut self, index: usize, upper: u64) -> Result<u64> {
        self.stream(index)?.bounded(upper)
    }

    /// Uniform draw over `[lower, upper)`.
    pub fn bounded_range(&mut self, index: usize, lower: u64, upper: u64) -> Result<u64> {
        self.stream(index)?.bounded_range(lower, upper)
    }

    /// Uniform double in `[0, 1)`.
    pub fn uniform_double(&mut self, index: usize) -> Result<f64> {
        Ok(self.stream(index)?.uniform_double())
    }

    /// Standard normal variate drawn from stream `index`.
    pub fn normal(&mut self, index: usize) -> Result<f64> {
        Ok(self.stream(index)?.normal())
    }

    /// Fills `dest` with raw draws from stream `index`.
    pub fn fill(&mut self, dest: &mut [u64], index: usize) -> Result<()> {
        self.stream(index)?.fill(dest);
        Ok(())
    }

    /// Fills `dest` with draws over `[lower, upper)` from stream `index`.
    pub fn fill_bounded(
        &mut self,
        dest: &mut [u64],
        index: usize,
        lower: u64,
        upper: u64,
    ) -> Result<()> {
        self.stream(index)?.fill_bounded(dest, lower, upper)
    }

    /// Fills `dest` with `[0, 1)` doubles from stream `index`.
    pub fn fill_doubles(&mut self, dest: &mut [f64], index: usize) -> Result<()> {
        self.stream(index)?.fill_doubles(dest);
        Ok(())
    }
}

/// Checks `[lower, upper)` against the result width and returns its length.
pub(crate) fn check_range(widths: WidthPair, lower: u64, upper: u64) -> Result<u64> {
    if upper <= lower || upper > widths.result().max_value() {
        return Err(StreamError::InvalidRange { lower, upper });
    }
    Ok(upper - lower)
}

/// Exclusive borrow of one stream.
///
/// Implements [`RngCore`], so any `rand` distribution can sample from it.
/// With 32-bit results `next_u64` joins two consecutive draws.
#[derive(Debug)]
pub struct StreamHandle<'a> {
    engine: &'a mut Engine,
    widths: WidthPair,
    index: usize,
}

impl<'a> StreamHandle<'a> {
    pub(crate) fn new(engine: &'a mut Engine, widths: WidthPair, index: usize) -> Self {
        Self {
            engine,
            widths,
            index,
        }
    }

    /// Stream index this handle borrows.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Next result-width word.
    #[inline]
    pub fn raw(&mut self) -> u64 {
        self.widths.adapt(self.engine.advance())
    }

    /// Uniform draw over `[0, upper)`.
    pub fn bounded(&mut self, upper: u64) -> Result<u64> {
        self.bounded_range(0, upper)
    }

    /// Uniform draw over `[lower, upper)`.
    ///
    /// # Errors
    ///
    /// [`StreamError::InvalidRange`] if `upper <= lower` or `upper` exceeds
    /// the result width. The stream is not advanced in that case.
    pub fn bounded_range(&mut self, lower: u64, upper: u64) -> Result<u64> {
        let range = check_range(self.widths, lower, upper)?;
        Ok(self.offset_bounded(lower, range))
    }

    #[inline]
    fn offset_bounded(&mut self, lower: u64, range: u64) -> u64 {
        let width = self.widths.result();
        lower + lemire_bounded(range, width, || self.raw())
    }

    /// Uniform double in `[0, 1)`.
    #[inline]
    pub fn uniform_double(&mut self) -> f64 {
        to_unit_double(self.raw(), self.widths)
    }

    /// Standard normal variate (Ziggurat, via `rand_distr`).
    pub fn normal(&mut self) -> f64 {
        StandardNormal.sample(self)
    }

    /// Fills `dest` with raw draws.
    pub fn fill(&mut self, dest: &mut [u64]) {
        for value in dest.iter_mut() {
            *value = self.raw();
        }
    }

    /// Fills `dest` with draws over `[lower, upper)`.
    ///
    /// The range is checked once, before the first draw.
    pub fn fill_bounded(&mut self, dest: &mut [u64], lower: u64, upper: u64) -> Result<()> {
        let range = check_range(self.widths, lower, upper)?;
        self.fill_bounded_unchecked(dest, lower, range);
        Ok(())
    }

    pub(crate) fn fill_bounded_unchecked(&mut self, dest: &mut [u64], lower: u64, range: u64) {
        for value in dest.iter_mut() {
            *value = self.offset_bounded(lower, range);
        }
    }

    /// Fills `dest` with `[0, 1)` doubles.
    pub fn fill_doubles(&mut self, dest: &mut [f64]) {
        for value in dest.iter_mut() {
            *value = self.uniform_double();
        }
    }
}

impl RngCore for StreamHandle<'_> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let bits = self.widths.result().bits();
        (self.raw() >> (bits - 32)) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        if self.widths.result().bits() == 64 {
            self.raw()
        } else {
            let high = self.raw();
            let low = self.raw();
            (high << 32) | low
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
