//! Registry configuration: algorithm, stream count and bit widths.
//!
//! The only supported width conversion is narrowing: a result may be as
//! wide as the generator state or narrower, never wider. Widths below 32
//! bits are rejected.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::ConfigError;
use crate::seed::SeedSource;

/// Generator algorithm selected for every stream of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// xoroshiro128+ (xoshiro128+ at 32-bit state), jump-decorrelated.
    #[default]
    Xoroshiro128Plus,
    /// PCG with a random stream selector per instance.
    Pcg,
    /// Bob Jenkins' Small Fast generator.
    Jsf,
    /// 128-bit multiplicative Lehmer generator (64-bit state width only).
    Lehmer64,
    /// SplitMix64 used directly as a generator (64-bit state width only).
    SplitMix64,
}

impl Algorithm {
    /// All algorithms, in declaration order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Xoroshiro128Plus,
        Algorithm::Pcg,
        Algorithm::Jsf,
        Algorithm::Lehmer64,
        Algorithm::SplitMix64,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Xoroshiro128Plus => "xoroshiro128+",
            Algorithm::Pcg => "pcg",
            Algorithm::Jsf => "jsf",
            Algorithm::Lehmer64 => "lehmer64",
            Algorithm::SplitMix64 => "splitmix64",
        }
    }

    /// Whether the algorithm has a variant with the given state width.
    pub fn supports_state(&self, state: BitWidth) -> bool {
        match self {
            Algorithm::Xoroshiro128Plus | Algorithm::Pcg | Algorithm::Jsf => true,
            Algorithm::Lehmer64 | Algorithm::SplitMix64 => state == BitWidth::W64,
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xoroshiro128+" | "xoroshiro128plus" | "xoroshiro" | "xoro128" => {
                Ok(Algorithm::Xoroshiro128Plus)
            }
            "pcg" => Ok(Algorithm::Pcg),
            "jsf" => Ok(Algorithm::Jsf),
            "lehmer64" | "lehmer" => Ok(Algorithm::Lehmer64),
            "splitmix64" | "splitmix" => Ok(Algorithm::SplitMix64),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Algorithm::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// A supported word width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BitWidth {
    /// 32 bits.
    W32,
    /// 64 bits.
    W64,
}

impl BitWidth {
    /// Width in bits.
    #[inline]
    pub fn bits(&self) -> u32 {
        match self {
            BitWidth::W32 => 32,
            BitWidth::W64 => 64,
        }
    }

    /// Largest value representable at this width.
    #[inline]
    pub fn max_value(&self) -> u64 {
        match self {
            BitWidth::W32 => u64::from(u32::MAX),
            BitWidth::W64 => u64::MAX,
        }
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = ConfigError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(BitWidth::W32),
            64 => Ok(BitWidth::W64),
            other => Err(ConfigError::UnsupportedWidth(other)),
        }
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// A validated pairing of result width and state width.
///
/// Every conversion from a raw engine word to a result goes through
/// [`adapt`](Self::adapt), which keeps the high-order bits.
///
/// # Examples
///
/// ```
/// use rands_core::{BitWidth, WidthPair};
///
/// let pair = WidthPair::new(BitWidth::W32, BitWidth::W64).unwrap();
/// assert_eq!(pair.shift(), 32);
/// assert_eq!(pair.adapt(0xAAAA_BBBB_CCCC_DDDD), 0xAAAA_BBBB);
///
/// assert!(WidthPair::new(BitWidth::W64, BitWidth::W32).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthPair {
    result: BitWidth,
    state: BitWidth,
}

impl WidthPair {
    /// Pairs two widths, rejecting a result wider than the state.
    pub fn new(result: BitWidth, state: BitWidth) -> Result<Self, ConfigError> {
        if result > state {
            return Err(ConfigError::ResultWiderThanState {
                result_bits: result.bits(),
                state_bits: state.bits(),
            });
        }
        Ok(Self { result, state })
    }

    /// Parses and pairs raw bit counts.
    pub fn from_bits(result_bits: u32, state_bits: u32) -> Result<Self, ConfigError> {
        Self::new(
            BitWidth::try_from(result_bits)?,
            BitWidth::try_from(state_bits)?,
        )
    }

    /// Result width.
    #[inline]
    pub fn result(&self) -> BitWidth {
        self.result
    }

    /// State width.
    #[inline]
    pub fn state(&self) -> BitWidth {
        self.state
    }

    /// Right shift applied to a raw word: `state_bits - result_bits`.
    #[inline]
    pub fn shift(&self) -> u32 {
        self.state.bits() - self.result.bits()
    }

    /// Narrows a state-width word to the result width, keeping its high bits.
    #[inline]
    pub fn adapt(&self, word: u64) -> u64 {
        word >> self.shift()
    }

    /// Bits of a result used to build a `[0, 1)` double.
    #[inline]
    pub fn mantissa_bits(&self) -> u32 {
        match self.result {
            BitWidth::W64 => 53,
            BitWidth::W32 => 23,
        }
    }
}

/// Configuration for a [`StreamRegistry`](crate::StreamRegistry).
///
/// # Examples
///
/// ```
/// use rands_core::{Algorithm, StreamConfig};
///
/// let config = StreamConfig::new(Algorithm::Pcg)
///     .with_threads(4)
///     .with_result_bits(32);
/// assert!(config.validate().is_ok());
///
/// let bad = StreamConfig::new(Algorithm::Lehmer64).with_state_bits(32).with_result_bits(32);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamConfig {
    /// Generator algorithm for every stream.
    pub algorithm: Algorithm,
    /// Number of streams (one per logical thread).
    pub threads: usize,
    /// Width of values returned by the dispatcher.
    pub result_bits: u32,
    /// Width of the generator's output word.
    pub state_bits: u32,
    /// Seed material used by [`StreamRegistry::new`](crate::StreamRegistry::new).
    pub seed_source: SeedSource,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            threads: 1,
            result_bits: 64,
            state_bits: 64,
            seed_source: SeedSource::Os,
        }
    }
}

impl StreamConfig {
    /// Creates a single-stream 64/64 configuration for `algorithm`.
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Sets the number of streams.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the result width in bits.
    pub fn with_result_bits(mut self, bits: u32) -> Self {
        self.result_bits = bits;
        self
    }

    /// Sets the state width in bits.
    pub fn with_state_bits(mut self, bits: u32) -> Self {
        self.state_bits = bits;
        self
    }

    /// Seeds from a fixed value instead of OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_source = SeedSource::Fixed(seed);
        self
    }

    /// Sets the seed source.
    pub fn with_seed_source(mut self, source: SeedSource) -> Self {
        self.seed_source = source;
        self
    }

    /// Validates the configuration and returns its width pairing.
    pub fn widths(&self) -> Result<WidthPair, ConfigError> {
        let widths = WidthPair::from_bits(self.result_bits, self.state_bits)?;
        if self.threads == 0 {
            return Err(ConfigError::NoStreams);
        }
        if !self.algorithm.supports_state(widths.state()) {
            return Err(ConfigError::UnsupportedCombination {
                algorithm: self.algorithm.name().to_string(),
                state_bits: widths.state().bits(),
            });
        }
        Ok(widths)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.widths().map(|_| ())
    }
}

/// Number of hardware threads, never less than one.
pub fn hardware_threads() -> usize {
    num_cpus::get().max(1)
}

/// Clamps a requested thread count into `[1, hardware_threads()]`.
///
/// A request of zero, or one above the hardware count, is replaced by the
/// hardware count with a warning.
pub fn resolve_thread_count(requested: usize) -> usize {
    let available = hardware_threads();
    if requested == 0 {
        warn!(
            available,
            "Requested thread count is zero; using all hardware threads"
        );
        available
    } else if requested > available {
        warn!(requested, available, "Clamping thread count to hardware");
        available
    } else {
        requested
    }
}
