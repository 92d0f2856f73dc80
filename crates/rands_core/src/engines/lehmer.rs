//! Lehmer64: a 128-bit multiplicative congruential generator.

use crate::error::EntropyError;
use crate::seed::EntropySource;

/// Multiplier applied to the 128-bit state.
pub const LEHMER_MULTIPLIER: u64 = 0xda94_2042_e4dd_58b5;

/// Lehmer64 generator returning the high 64 bits of its state.
#[derive(Debug)]
pub struct Lehmer64 {
    state: u128,
}

impl Lehmer64 {
    /// Builds from two seed words, `(high << 64) | low`, forced odd.
    pub fn new(high: u64, low: u64) -> Self {
        Self {
            state: ((u128::from(high) << 64) | u128::from(low)) | 1,
        }
    }

    /// Draws both seed words from `source`.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        let mut words = [0u64; 2];
        source.fetch(&mut words)?;
        Ok(Self::new(words[0], words[1]))
    }

    /// Multiplies the state and returns its high half.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(u128::from(LEHMER_MULTIPLIER));
        (self.state >> 64) as u64
    }
}
