//! Derived draws: bias-free bounded integers and `[0, 1)` doubles.
//!
//! Both functions take words that are already narrowed to the result
//! width, so they are independent of the engine that produced them.

use crate::config::{BitWidth, WidthPair};

/// Lemire's multiply-and-reject draw over `[0, range)`.
///
/// `draw` must return uniform words of `width` bits and `range` must be in
/// `1..=width.max_value()`. The high half of `x * range` is the result; the
/// low half is rejected while it falls below `2^W mod range`. The
/// threshold is only computed when the low half is below `range`, which
/// keeps the division off the common path.
///
/// # Examples
///
/// ```
/// use rands_core::registry::sampling::lemire_bounded;
/// use rands_core::BitWidth;
///
/// // Just above 2^63 maps to the midpoint of [0, 10).
/// let v = lemire_bounded(10, BitWidth::W64, || (1u64 << 63) + 1);
/// assert_eq!(v, 5);
/// ```
pub fn lemire_bounded<F>(range: u64, width: BitWidth, mut draw: F) -> u64
where
    F: FnMut() -> u64,
{
    debug_assert!((1..=width.max_value()).contains(&range));

    let bits = width.bits();
    let mask = u128::from(width.max_value());
    let range_wide = u128::from(range);

    let mut m = u128::from(draw()) * range_wide;
    let mut low = m & mask;

    if low < range_wide {
        // (2^W - range) mod 2^W, then reduced mod range.
        let mut threshold = range.wrapping_neg() & width.max_value();
        if threshold >= range {
            threshold -= range;
            if threshold >= range {
                threshold %= range;
            }
        }
        let threshold = u128::from(threshold);

        while low < threshold {
            m = u128::from(draw()) * range_wide;
            low = m & mask;
        }
    }

    (m >> bits) as u64
}

/// Maps a result-width word to `[0, 1)` using its top mantissa bits.
///
/// The largest output is `1 - 2^-mantissa_bits`, so `1.0` is unreachable
/// even for an all-ones word.
#[inline]
pub fn to_unit_double(word: u64, widths: WidthPair) -> f64 {
    let mantissa = widths.mantissa_bits();
    let top = word >> (widths.result().bits() - mantissa);
    top as f64 / (1u64 << mantissa) as f64
}
