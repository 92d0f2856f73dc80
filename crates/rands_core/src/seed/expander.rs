//! SplitMix64 seed expander.
//!
//! A fixed-increment counter passed through a two-round xorshift-multiply
//! finaliser. Consecutive outputs are distinct because the finaliser is a
//! bijection on `u64`, so two adjacent outputs are never both zero.

use rand::RngCore;

use super::entropy::EntropySource;
use crate::error::EntropyError;

/// Golden-ratio increment added to the counter on every step.
pub const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

const MIX_MULT_1: u64 = 0xBF58_476D_1CE4_E5B9;
const MIX_MULT_2: u64 = 0x94D0_49BB_1331_11EB;

/// SplitMix64 generator, used both to expand seeds and as an end-user
/// engine when a single low-footprint stream is enough.
///
/// # Examples
///
/// ```rust
/// use rands_core::seed::SplitMix64;
///
/// let mut a = SplitMix64::new(7);
/// let mut b = SplitMix64::new(7);
/// assert_eq!(a.next_word(), b.next_word());
/// ```
#[derive(Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates an expander starting from `seed`.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Creates an expander seeded with one word drawn from `source`.
    pub fn from_entropy<E: EntropySource + ?Sized>(source: &mut E) -> Result<Self, EntropyError> {
        Ok(Self::new(source.fetch_word()?))
    }

    /// Advances the counter and returns the next mixed word.
    #[inline]
    pub fn next_word(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_GAMMA);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(MIX_MULT_1);
        z = (z ^ (z >> 27)).wrapping_mul(MIX_MULT_2);
        z ^ (z >> 31)
    }

    /// Fills `words` with consecutive outputs.
    #[inline]
    pub fn fill_words(&mut self, words: &mut [u64]) {
        for word in words.iter_mut() {
            *word = self.next_word();
        }
    }
}

impl RngCore for SplitMix64 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        (self.next_word() >> 32) as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        self.next_word()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_word().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
