//! Bob Jenkins' Small Fast generator (JSF), 32- and 64-bit.
//!
//! JSF has no jump function. The 64-bit variant has a single validated
//! rotation triple; the 32-bit variant has 23, and a stream's triple is
//! picked from its index so distinct streams run distinct recurrences.

use crate::seed::SplitMix64;

/// Initial value of the `a` word.
pub const JSF_SEED_A: u32 = 0xf1ea_5eed;

/// Outputs discarded after seeding.
pub const WARM_UP_ROUNDS: usize = 20;

/// Rotation triple for the 64-bit variant.
pub const JSF64_PARAMS: (u32, u32, u32) = (7, 13, 37);

/// Vetted `(p, q, r)` rotation triples for the 32-bit variant.
pub const JSF32_PARAMS: [(u32, u32, u32); 23] = [
    (3, 14, 24),
    (3, 25, 15),
    (4, 15, 24),
    (6, 16, 28),
    (7, 16, 27),
    (8, 14, 3),
    (11, 16, 23),
    (12, 16, 22),
    (12, 17, 23),
    (13, 16, 22),
    (15, 25, 3),
    (16, 9, 3),
    (17, 9, 3),
    (17, 27, 7),
    (19, 7, 3),
    (23, 15, 11),
    (23, 16, 11),
    (23, 17, 11),
    (24, 3, 16),
    (24, 4, 16),
    (25, 14, 3),
    (27, 16, 6),
    (27, 16, 7),
];

/// Returns the 32-bit triple assigned to `stream_index`.
#[inline]
pub fn jsf32_params_for(stream_index: usize) -> (u32, u32, u32) {
    JSF32_PARAMS[stream_index % JSF32_PARAMS.len()]
}

/// 64-bit JSF.
#[derive(Debug)]
pub struct Jsf64 {
    a: u64,
    b: u64,
    c: u64,
    d: u64,
}

impl Jsf64 {
    /// Seeds `b = c = d = seed` and runs the warm-up discard.
    pub fn new(seed: u64) -> Self {
        let mut jsf = Self {
            a: u64::from(JSF_SEED_A),
            b: seed,
            c: seed,
            d: seed,
        };
        for _ in 0..WARM_UP_ROUNDS {
            jsf.advance();
        }
        jsf
    }

    /// Seeds from one expander word.
    pub fn from_expander(expander: &mut SplitMix64) -> Self {
        Self::new(expander.next_word())
    }

    /// Advances the state and returns the new `d`.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        let (p, q, r) = JSF64_PARAMS;
        let e = self.a.wrapping_sub(self.b.rotate_left(p));
        self.a = self.b ^ self.c.rotate_left(q);
        self.b = self.c.wrapping_add(self.d.rotate_left(r));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

/// 32-bit JSF with a per-instance rotation triple.
#[derive(Debug)]
pub struct Jsf32 {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
    params: (u32, u32, u32),
}

impl Jsf32 {
    /// Seeds with an explicit triple and runs the warm-up discard.
    pub fn new(seed: u32, params: (u32, u32, u32)) -> Self {
        let mut jsf = Self {
            a: JSF_SEED_A,
            b: seed,
            c: seed,
            d: seed,
            params,
        };
        for _ in 0..WARM_UP_ROUNDS {
            jsf.advance();
        }
        jsf
    }

    /// Seeds from the high half of one expander word, using the triple
    /// assigned to `stream_index`.
    pub fn from_expander(expander: &mut SplitMix64, stream_index: usize) -> Self {
        let seed = (expander.next_word() >> 32) as u32;
        Self::new(seed, jsf32_params_for(stream_index))
    }

    /// Returns this instance's `(p, q, r)` triple.
    #[inline]
    pub fn params(&self) -> (u32, u32, u32) {
        self.params
    }

    /// Advances the state and returns the new `d`.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        let (p, q, r) = self.params;
        let e = self.a.wrapping_sub(self.b.rotate_left(p));
        self.a = self.b ^ self.c.rotate_left(q);
        self.b = self.c.wrapping_add(self.d.rotate_left(r));
        self.c = self.d.wrapping_add(e);
        self.d = e.wrapping_add(self.a);
        self.d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warm_up_is_discarded() {
        let mut cold = Jsf64 {
            a: u64::from(JSF_SEED_A),
            b: 9,
            c: 9,
            d: 9,
        };
        for _ in 0..WARM_UP_ROUNDS {
            cold.advance();
        }
        let mut warm = Jsf64::new(9);
        for _ in 0..16 {
            assert_eq!(cold.advance(), warm.advance());
        }
    }

    #[test]
    fn test_params_round_robin() {
        assert_eq!(jsf32_params_for(0), (3, 14, 24));
        assert_eq!(jsf32_params_for(22), (27, 16, 7));
        assert_eq!(jsf32_params_for(23), jsf32_params_for(0));
        assert_eq!(jsf32_params_for(47), jsf32_params_for(1));
    }

    #[test]
    fn test_triples_are_distinct() {
        for (i, a) in JSF32_PARAMS.iter().enumerate() {
            for b in &JSF32_PARAMS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_same_seed_different_triple_diverges() {
        let mut a = Jsf32::new(12345, jsf32_params_for(0));
        let mut b = Jsf32::new(12345, jsf32_params_for(1));
        let same = (0..1000).filter(|_| a.advance() == b.advance()).count();
        assert!(same < 5);
    }

    #[test]
    fn test_from_expander_assigns_stream_triple() {
        let mut expander = SplitMix64::new(1);
        let jsf = Jsf32::from_expander(&mut expander, 5);
        assert_eq!(jsf.params(), JSF32_PARAMS[5]);
    }
}
