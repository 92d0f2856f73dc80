//! xoroshiro128+ (64-bit words) and xoshiro128+ (32-bit words).
//!
//! Both are seeded from the SplitMix64 expander and decorrelated across
//! streams with a jump polynomial rather than independent seeds. The
//! registry derives stream `t` by jumping one shared base state `2·t` times.
//!
//! The algorithms follow the reference sources by David Blackman and
//! Sebastiano Vigna (<http://xoshiro.di.unimi.it/>).

use crate::seed::SplitMix64;

/// Jump polynomial for [`Xoroshiro128Plus`], equivalent to 2^64 advances.
pub const JUMP_64: [u64; 2] = [0xdf90_0294_d8f5_54a5, 0x1708_65df_4b32_01fc];

/// Jump polynomial for [`Xoshiro128Plus`], equivalent to 2^64 advances.
pub const JUMP_32: [u32; 4] = [0x8764_000b, 0xf542_d2d3, 0x6fa0_35c3, 0x77f2_db5b];

/// xoroshiro128+ with the (24, 16, 37) constants.
///
/// The lowest bits of the additive output are weaker than the rest; the
/// dispatcher keeps high-order bits whenever it narrows a word.
#[derive(Debug)]
pub struct Xoroshiro128Plus {
    s0: u64,
    s1: u64,
}

impl Xoroshiro128Plus {
    /// Seeds both state words from the expander.
    ///
    /// Adjacent SplitMix64 outputs are never both zero, so the forbidden
    /// all-zero state cannot occur.
    pub fn from_expander(expander: &mut SplitMix64) -> Self {
        Self {
            s0: expander.next_word(),
            s1: expander.next_word(),
        }
    }

    /// Advances the state and returns the next output.
    #[inline]
    pub fn advance(&mut self) -> u64 {
        let s0 = self.s0;
        let mut s1 = self.s1;
        let result = s0.wrapping_add(s1);

        s1 ^= s0;
        self.s0 = s0.rotate_left(24) ^ s1 ^ (s1 << 16);
        self.s1 = s1.rotate_left(37);

        result
    }

    /// Jumps ahead by 2^64 advances.
    pub fn jump(&mut self) {
        self.apply_jump_polynomial(&JUMP_64);
    }

    /// Replaces the state with `p(T)·s`, where `T` is the state transition
    /// and bit `b` of `poly` (little-endian across words) is the coefficient
    /// of `T^b`.
    ///
    /// A polynomial with only bit `m` set is therefore equivalent to `m`
    /// calls to [`advance`](Self::advance).
    pub fn apply_jump_polynomial(&mut self, poly: &[u64]) {
        let mut s0 = 0;
        let mut s1 = 0;
        for &word in poly {
            for b in 0..64 {
                if word & (1u64 << b) != 0 {
                    s0 ^= self.s0;
                    s1 ^= self.s1;
                }
                self.advance();
            }
        }
        self.s0 = s0;
        self.s1 = s1;
    }

    /// Copies the current position into a new, independent instance.
    ///
    /// Only used while building streams, before either copy is handed out.
    pub(crate) fn fork(&self) -> Self {
        Self {
            s0: self.s0,
            s1: self.s1,
        }
    }
}

/// xoshiro128+, the 32-bit member of the family (four 32-bit words).
#[derive(Debug)]
pub struct Xoshiro128Plus {
    s: [u32; 4],
}

impl Xoshiro128Plus {
    /// Seeds each state word from its own expander output, keeping the
    /// high 32 bits.
    ///
    /// An all-zero state is rejected and the words are drawn again.
    pub fn from_expander(expander: &mut SplitMix64) -> Self {
        let mut s = [0u32; 4];
        while s == [0; 4] {
            for word in s.iter_mut() {
                *word = (expander.next_word() >> 32) as u32;
            }
        }
        Self { s }
    }

    /// Advances the state and returns the next output.
    #[inline]
    pub fn advance(&mut self) -> u32 {
        let result = self.s[0].wrapping_add(self.s[3]);
        let t = self.s[1] << 9;

        self.s[2] ^= self.s[0];
        self.s[3] ^= self.s[1];
        self.s[1] ^= self.s[2];
        self.s[0] ^= self.s[3];

        self.s[2] ^= t;
        self.s[3] = self.s[3].rotate_left(11);

        result
    }

    /// Jumps ahead by 2^64 advances.
    pub fn jump(&mut self) {
        self.apply_jump_polynomial(&JUMP_32);
    }

    /// 32-bit counterpart of [`Xoroshiro128Plus::apply_jump_polynomial`].
    pub fn apply_jump_polynomial(&mut self, poly: &[u32]) {
        let mut acc = [0u32; 4];
        for &word in poly {
            for b in 0..32 {
                if word & (1u32 << b) != 0 {
                    for (a, s) in acc.iter_mut().zip(self.s.iter()) {
                        *a ^= *s;
                    }
                }
                self.advance();
            }
        }
        self.s = acc;
    }

    pub(crate) fn fork(&self) -> Self {
        Self { s: self.s }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly_64(m: usize) -> [u64; 2] {
        let mut poly = [0u64; 2];
        poly[m / 64] |= 1u64 << (m % 64);
        poly
    }

    fn poly_32(m: usize) -> [u32; 4] {
        let mut poly = [0u32; 4];
        poly[m / 32] |= 1u32 << (m % 32);
        poly
    }

    #[test]
    fn test_reference_sequence_64() {
        // Reference xoroshiro128plus.c output for state (1, 2).
        let mut rng = Xoroshiro128Plus { s0: 1, s1: 2 };
        let expected = [
            3,
            412333834243,
            2360170716294286339,
            9295852285959843169,
            2797080929874688578,
            6019711933173041966,
            3076529664176959358,
            3521761819100106140,
            7493067640054542992,
            920801338098114767,
        ];
        for &e in &expected {
            assert_eq!(rng.advance(), e);
        }
    }

    #[test]
    fn test_monomial_jump_equals_repeated_advance_64() {
        for m in [0usize, 1, 2, 7, 63, 64, 65, 100, 127] {
            let mut jumped = Xoroshiro128Plus {
                s0: 0x1234,
                s1: 0xdead_beef,
            };
            let mut stepped = jumped.fork();

            jumped.apply_jump_polynomial(&poly_64(m));
            for _ in 0..m {
                stepped.advance();
            }

            for _ in 0..32 {
                assert_eq!(jumped.advance(), stepped.advance(), "m = {}", m);
            }
        }
    }

    #[test]
    fn test_monomial_jump_equals_repeated_advance_32() {
        for m in [0usize, 1, 31, 32, 33, 64, 100, 127] {
            let mut jumped = Xoshiro128Plus { s: [1, 2, 3, 4] };
            let mut stepped = jumped.fork();

            jumped.apply_jump_polynomial(&poly_32(m));
            for _ in 0..m {
                stepped.advance();
            }

            for _ in 0..32 {
                assert_eq!(jumped.advance(), stepped.advance(), "m = {}", m);
            }
        }
    }

    #[test]
    fn test_jump_commutes_with_advance_64() {
        let mut expander = SplitMix64::new(11);
        let base = Xoroshiro128Plus::from_expander(&mut expander);

        let mut jump_then_step = base.fork();
        jump_then_step.jump();
        jump_then_step.advance();

        let mut step_then_jump = base.fork();
        step_then_jump.advance();
        step_then_jump.jump();

        for _ in 0..64 {
            assert_eq!(jump_then_step.advance(), step_then_jump.advance());
        }
    }

    #[test]
    fn test_jump_is_linear_64() {
        let a = Xoroshiro128Plus {
            s0: 0x0123_4567_89ab_cdef,
            s1: 0x1111,
        };
        let b = Xoroshiro128Plus {
            s0: 0xffff_0000,
            s1: 0x8000_0000_0000_0001,
        };
        let mut sum = Xoroshiro128Plus {
            s0: a.s0 ^ b.s0,
            s1: a.s1 ^ b.s1,
        };
        let (mut a, mut b) = (a, b);
        a.jump();
        b.jump();
        sum.jump();
        assert_eq!(sum.s0, a.s0 ^ b.s0);
        assert_eq!(sum.s1, a.s1 ^ b.s1);
    }

    #[test]
    fn test_jump_commutes_with_advance_32() {
        let mut expander = SplitMix64::new(12);
        let base = Xoshiro128Plus::from_expander(&mut expander);

        let mut jump_then_step = base.fork();
        jump_then_step.jump();
        jump_then_step.advance();

        let mut step_then_jump = base.fork();
        step_then_jump.advance();
        step_then_jump.jump();

        assert_eq!(jump_then_step.s, step_then_jump.s);
    }

    #[test]
    fn test_jumped_stream_differs_from_base() {
        let mut expander = SplitMix64::new(13);
        let mut base = Xoroshiro128Plus::from_expander(&mut expander);
        let mut jumped = base.fork();
        jumped.jump();

        let same = (0..1000)
            .filter(|_| base.advance() == jumped.advance())
            .count();
        assert!(same < 2);
    }

    #[test]
    fn test_seeding_uses_one_expander_word_per_state_word_32() {
        let mut expander = SplitMix64::new(2024);
        let rng = Xoshiro128Plus::from_expander(&mut expander);

        let mut reference = SplitMix64::new(2024);
        for &word in &rng.s {
            assert_eq!(word, (reference.next_word() >> 32) as u32);
        }
        // Exactly four words were consumed.
        assert_eq!(expander.next_word(), reference.next_word());
    }

    #[test]
    fn test_seeded_state_nonzero_32() {
        let mut expander = SplitMix64::new(0);
        let rng = Xoshiro128Plus::from_expander(&mut expander);
        assert_ne!(rng.s, [0; 4]);
    }
}
