//! Field arithmetic modulo p = 2^224 - 2^96 + 1.
//!
//! This module implements `GFp224`, the base field of the NIST P-224
//! curve. Elements are held in a redundant radix-28 representation:
//! eight 32-bit limbs, in low-to-high order, the represented value being
//! the sum of limb[i]*2^(28*i). Nominally each limb holds 28 bits, but
//! intermediate results are allowed to grow a few bits beyond that so
//! that sequences of operations do not each need a normalization step.
//! Two normalization levels are used:
//!
//!  - "reduced": every limb is lower than 2^29; this is the invariant
//!    maintained by all public operations for their output.
//!
//!  - "contracted": every limb is lower than 2^28 and the represented
//!    integer is the unique representative in the 0..p-1 range; this is
//!    established before encoding and comparisons.
//!
//! Modular reduction leverages the shape of the prime, through the
//! identity 2^224 = 2^96 - 1 mod p. All functions are constant-time;
//! choices are made with XOR masking, never with data-dependent
//! branches.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// An element of GF(2^224 - 2^96 + 1).
#[derive(Clone, Copy, Debug)]
pub struct GFp224([u32; 8]);

impl GFp224 {

    // Mask for the low 28 bits of a limb.
    const M28: u32 = 0x0FFFFFFF;

    /// Modulus p in radix-28 limbs (low-to-high order).
    pub const MODULUS: [u32; 8] = [
        0x0000001, 0x0000000, 0x0000000, 0xFFFF000,
        0xFFFFFFF, 0xFFFFFFF, 0xFFFFFFF, 0xFFFFFFF,
    ];

    // A multiple of p whose limbs all have bit 31 set; adding it to a
    // limb-wise subtraction keeps every limb nonnegative without a
    // carry chain, as long as both operands have limbs lower than 2^30.
    const ZERO31: [u32; 8] = [
        (1 << 31) + (1 << 3),
        (1 << 31) - (1 << 3),
        (1 << 31) - (1 << 3),
        (1 << 31) - (1 << 15) - (1 << 3),
        (1 << 31) - (1 << 3),
        (1 << 31) - (1 << 3),
        (1 << 31) - (1 << 3),
        (1 << 31) - (1 << 3),
    ];

    // A multiple of p whose limbs all have bit 63 set, for the same
    // purpose inside the wide reduction (64-bit limbs).
    const ZERO63: [u64; 8] = [
        (1 << 63) + (1 << 35),
        (1 << 63) - (1 << 35),
        (1 << 63) - (1 << 35),
        (1 << 63) - (1 << 35),
        (1 << 63) - (1 << 35) - (1 << 19),
        (1 << 63) - (1 << 35),
        (1 << 63) - (1 << 35),
        (1 << 63) - (1 << 35),
    ];

    pub const ZERO: GFp224 = GFp224([0, 0, 0, 0, 0, 0, 0, 0]);
    pub const ONE: GFp224 = GFp224([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Creates an element from its eight 28-bit limbs, provided in
    /// high-to-low order. Each limb value MUST be lower than 2^28, and
    /// the represented integer MUST be lower than p.
    pub const fn w28be(x7: u32, x6: u32, x5: u32, x4: u32,
                       x3: u32, x2: u32, x1: u32, x0: u32) -> Self
    {
        Self([x0, x1, x2, x3, x4, x5, x6, x7])
    }

    /// Decodes a 28-byte buffer (unsigned big-endian) into an element.
    /// The value is implicitly reduced modulo p; this never fails.
    pub fn decode28(buf: &[u8; 28]) -> Self {
        // Seven big-endian 32-bit words, most significant first.
        let mut w = [0u32; 7];
        for i in 0..7 {
            let mut x = 0u32;
            for j in 0..4 {
                x = (x << 8) | (buf[4 * i + j] as u32);
            }
            w[i] = x;
        }

        // Scatter into radix-28 limbs; the word/limb boundary drifts by
        // four bits per limb.
        Self([
            w[6] & Self::M28,
            ((w[6] >> 28) | (w[5] << 4)) & Self::M28,
            ((w[5] >> 24) | (w[4] << 8)) & Self::M28,
            ((w[4] >> 20) | (w[3] << 12)) & Self::M28,
            ((w[3] >> 16) | (w[2] << 16)) & Self::M28,
            ((w[2] >> 12) | (w[1] << 20)) & Self::M28,
            ((w[1] >> 8) | (w[0] << 24)) & Self::M28,
            w[0] >> 4,
        ])
    }

    /// Encodes this element over exactly 28 bytes (unsigned big-endian).
    /// Encoding is always canonical (the unique representative in the
    /// 0..p-1 range).
    pub fn encode(self) -> [u8; 28] {
        let mut r = self;
        r.set_contract();
        let a = &r.0;

        // Inverse of the scatter in decode28().
        let w = [
            (a[6] >> 24) | (a[7] << 4),
            (a[5] >> 20) | (a[6] << 8),
            (a[4] >> 16) | (a[5] << 12),
            (a[3] >> 12) | (a[4] << 16),
            (a[2] >> 8) | (a[3] << 20),
            (a[1] >> 4) | (a[2] << 24),
            a[0] | (a[1] << 28),
        ];
        let mut d = [0u8; 28];
        for i in 0..7 {
            d[(4 * i)..(4 * i + 4)].copy_from_slice(&w[i].to_be_bytes());
        }
        d
    }

    // Normalizes the limbs down to the "reduced" invariant (lower than
    // 2^29). Input limbs may range up to 2^31 + 2^30.
    fn set_reduce(&mut self) {
        let a = &mut self.0;

        for i in 0..7 {
            a[i + 1] = a[i + 1].wrapping_add(a[i] >> 28);
            a[i] &= Self::M28;
        }
        let top = a[7] >> 28;
        a[7] &= Self::M28;

        // Fold the overflow back: 2^224 = 2^96 - 1 mod p.
        a[0] = a[0].wrapping_sub(top);
        a[3] = a[3].wrapping_add(top << 12);

        // a[0] may have gone negative; in that case top was non-zero,
        // so a[3] holds at least 2^12 and one unit of 2^84 can be moved
        // down the chain. The fixup uses a mask derived from the sign
        // bit, not a branch.
        let m = ((a[0] as i32) >> 31) as u32;
        a[3] = a[3].wrapping_sub(m & 1);
        a[2] = a[2].wrapping_add(m & Self::M28);
        a[1] = a[1].wrapping_add(m & Self::M28);
        a[0] = a[0].wrapping_add(m & (1 << 28));
    }

    // Contracts this element to its canonical representation: every
    // limb lower than 2^28, represented integer in the 0..p-1 range.
    // Input must be reduced (limbs lower than 2^29).
    fn set_contract(&mut self) {
        let a = &mut self.0;

        // Two carry/fold passes are needed: the correction added to
        // limb 3 by the first pass can itself overflow 28 bits.
        for _ in 0..2 {
            for i in 0..7 {
                a[i + 1] = a[i + 1].wrapping_add(a[i] >> 28);
                a[i] &= Self::M28;
            }
            let top = a[7] >> 28;
            a[7] &= Self::M28;
            a[0] = a[0].wrapping_sub(top);
            a[3] = a[3].wrapping_add(top << 12);

            // Signed carries for the low limbs: if a limb went
            // negative, borrow one unit from the next limb up.
            for i in 0..3 {
                let m = ((a[i] as i32) >> 31) as u32;
                a[i] = a[i].wrapping_add(m & (1 << 28));
                a[i + 1] = a[i + 1].wrapping_sub(m & 1);
            }
        }

        // The value is now lower than 2^224 with 28-bit limbs; subtract
        // p if it is not lower than p, using only masks. The value is
        // at least p if and only if limbs 4 to 7 are all ones, and
        // limb 3 is either greater than the corresponding limb of p, or
        // equal to it with a non-zero low part (p has 1 there).

        // t4 is all ones if limbs 4 to 7 are all equal to 0xFFFFFFF.
        let mut t4 = 0xFFFFFFFFu32;
        for i in 4..8 {
            t4 &= a[i];
        }
        t4 |= 0xF0000000;
        t4 &= t4 >> 16;
        t4 &= t4 >> 8;
        t4 &= t4 >> 4;
        t4 &= t4 >> 2;
        t4 &= t4 >> 1;
        let t4 = (((t4 << 31) as i32) >> 31) as u32;

        // b3 is all ones if any of limbs 0 to 2 is non-zero.
        let mut b3 = a[0] | a[1] | a[2];
        b3 |= b3 >> 16;
        b3 |= b3 >> 8;
        b3 |= b3 >> 4;
        b3 |= b3 >> 2;
        b3 |= b3 >> 1;
        let b3 = (((b3 << 31) as i32) >> 31) as u32;

        // eq: limb 3 is equal to 0xFFFF000; gt: limb 3 is greater.
        let n = a[3].wrapping_sub(0xFFFF000);
        let mut eq = n;
        eq |= eq >> 16;
        eq |= eq >> 8;
        eq |= eq >> 4;
        eq |= eq >> 2;
        eq |= eq >> 1;
        let eq = !((((eq << 31) as i32) >> 31) as u32);
        let gt = !(((n as i32) >> 31) as u32) & !eq;

        let m = t4 & (gt | (eq & b3));
        a[0] = a[0].wrapping_sub(m & 1);
        a[3] = a[3].wrapping_sub(m & 0xFFFF000);
        a[4] = a[4].wrapping_sub(m & Self::M28);
        a[5] = a[5].wrapping_sub(m & Self::M28);
        a[6] = a[6].wrapping_sub(m & Self::M28);
        a[7] = a[7].wrapping_sub(m & Self::M28);

        // The limb-wise subtraction of p can leave negative low limbs
        // (e.g. limb 0 when it held 0 and the value was above p thanks
        // to limb 1); propagate the borrows with the same signed-carry
        // masks as above. Since the value was at least p, the chain
        // cannot borrow out of limb 7.
        for i in 0..7 {
            let w = ((a[i] as i32) >> 31) as u32;
            a[i] = a[i].wrapping_add(w & (1 << 28));
            a[i + 1] = a[i + 1].wrapping_sub(w & 1);
        }
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        // Reduced inputs have limbs lower than 2^29, so the limb-wise
        // sums cannot overflow.
        for i in 0..8 {
            self.0[i] = self.0[i].wrapping_add(rhs.0[i]);
        }
        self.set_reduce();
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        // Add a multiple of p with the top bit set in every limb; this
        // keeps the limb-wise differences nonnegative without a carry
        // chain (inputs have limbs lower than 2^30).
        for i in 0..8 {
            self.0[i] = self.0[i]
                .wrapping_add(Self::ZERO31[i])
                .wrapping_sub(rhs.0[i]);
        }
        self.set_reduce();
    }

    /// Negates this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        for i in 0..8 {
            self.0[i] = Self::ZERO31[i].wrapping_sub(self.0[i]);
        }
        self.set_reduce();
    }

    // Folds a 15-limb product (64-bit limbs, same radix-28 positional
    // spacing) back into eight 32-bit limbs. Output is reduced.
    fn reduce_large(t: &mut [u64; 15]) -> [u32; 8] {
        // Bias the low limbs by a multiple of p so that the
        // eliminations below cannot underflow.
        for i in 0..8 {
            t[i] = t[i].wrapping_add(Self::ZERO63[i]);
        }

        // Eliminate the limbs at 2^224 and above, from the most
        // significant down: t[i]*2^(28*i) = t[i]*(2^96 - 1)*2^(28*(i-8))
        // mod p, and the 2^96 part splits as a 12-bit shift into limb
        // i-5 plus the remaining bits into limb i-4.
        for i in (8..15).rev() {
            t[i - 8] = t[i - 8].wrapping_sub(t[i]);
            t[i - 5] += (t[i] & 0xFFFF) << 12;
            t[i - 4] += t[i] >> 16;
        }
        t[8] = 0;

        // Carry-propagate limbs 1 to 7 into the 32-bit output; the
        // carry out of limb 7 lands in t[8].
        let mut d = [0u32; 8];
        for i in 1..8 {
            t[i + 1] += t[i] >> 28;
            d[i] = (t[i] as u32) & Self::M28;
        }

        // Fold t[8] (lower than 2^36) like any other high limb, then
        // spread the still-wide limb 0 over the three low outputs.
        t[0] = t[0].wrapping_sub(t[8]);
        d[3] += ((t[8] & 0xFFFF) << 12) as u32;
        d[4] += (t[8] >> 16) as u32;
        d[0] = (t[0] as u32) & Self::M28;
        d[1] += ((t[0] >> 28) as u32) & Self::M28;
        d[2] += (t[0] >> 56) as u32;
        d
    }

    fn set_mul(&mut self, rhs: &Self) {
        let a = &self.0;
        let b = &rhs.0;
        let mut t = [0u64; 15];
        for i in 0..8 {
            for j in 0..8 {
                t[i + j] += (a[i] as u64) * (b[j] as u64);
            }
        }
        self.0 = Self::reduce_large(&mut t);
    }

    /// Squares this value (in place).
    pub fn set_square(&mut self) {
        let a = &self.0;
        let mut t = [0u64; 15];
        for i in 0..8 {
            // Off-diagonal products are counted twice.
            for j in 0..i {
                t[i + j] += ((a[i] as u64) * (a[j] as u64)) << 1;
            }
            t[2 * i] += (a[i] as u64) * (a[i] as u64);
        }
        self.0 = Self::reduce_large(&mut t);
    }

    /// Squares this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this value n times (in place).
    #[inline(always)]
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    /// Squares this value n times.
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Multiplies this value by 2 (in place).
    #[inline]
    pub fn set_mul2(&mut self) {
        for i in 0..8 {
            self.0[i] <<= 1;
        }
        self.set_reduce();
    }

    /// Multiplies this value by 2.
    #[inline(always)]
    pub fn mul2(self) -> Self {
        let mut r = self;
        r.set_mul2();
        r
    }

    /// Multiplies this value by 3 (in place).
    #[inline]
    pub fn set_mul3(&mut self) {
        for i in 0..8 {
            self.0[i] *= 3;
        }
        self.set_reduce();
    }

    /// Multiplies this value by 3.
    #[inline(always)]
    pub fn mul3(self) -> Self {
        let mut r = self;
        r.set_mul3();
        r
    }

    /// Multiplies this value by 4 (in place).
    #[inline]
    pub fn set_mul4(&mut self) {
        self.set_mul2();
        self.set_mul2();
    }

    /// Multiplies this value by 4.
    #[inline(always)]
    pub fn mul4(self) -> Self {
        let mut r = self;
        r.set_mul4();
        r
    }

    /// Multiplies this value by 8 (in place).
    #[inline]
    pub fn set_mul8(&mut self) {
        self.set_mul2();
        self.set_mul2();
        self.set_mul2();
    }

    /// Multiplies this value by 8.
    #[inline(always)]
    pub fn mul8(self) -> Self {
        let mut r = self;
        r.set_mul8();
        r
    }

    /// Conditionally copies the provided value (`a`) into self:
    ///
    ///  - If `ctl` is 0xFFFFFFFF, then the value of `a` is copied.
    ///
    ///  - If `ctl` is 0x00000000, then the value of self is unchanged.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        for i in 0..8 {
            self.0[i] ^= ctl & (self.0[i] ^ a.0[i]);
        }
    }

    /// Returns a value equal to either `a0` (if `ctl` is 0x00000000) or
    /// `a1` (if `ctl` is 0xFFFFFFFF). `ctl` MUST be either 0x00000000
    /// or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Conditionally swaps two elements: values `a` and `b` are
    /// exchanged if `ctl` is 0xFFFFFFFF, or are left unchanged if `ctl`
    /// is 0x00000000. `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        for i in 0..8 {
            let t = ctl & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    /// Compares this value with zero (constant-time); returned value is
    /// 0xFFFFFFFF if this element is zero, 0x00000000 otherwise.
    pub fn iszero(self) -> u32 {
        let mut r = self;
        r.set_contract();

        // After contraction, zero is represented either as all-zero
        // limbs or as the limbs of p itself.
        let mut t0 = 0u32;
        let mut t1 = 0u32;
        for i in 0..8 {
            t0 |= r.0[i];
            t1 |= r.0[i] ^ Self::MODULUS[i];
        }

        // Top bit of w is 0 if and only if t0 or t1 is zero.
        let w = (t0 | t0.wrapping_neg()) & (t1 | t1.wrapping_neg());
        (w >> 31).wrapping_sub(1)
    }

    /// Compares two values for equality (constant-time); returned value
    /// is 0xFFFFFFFF on equality, 0x00000000 otherwise.
    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }

    /// Inverts this value (in place); if this value is zero, then zero
    /// is obtained.
    ///
    /// Inversion raises to the power p - 2 through a fixed chain of
    /// squarings and multiplications, so that the executed instruction
    /// sequence does not depend on the operand.
    pub fn set_invert(&mut self) {
        // p - 2 = 2^224 - 2^96 - 1; in binary, 127 ones, one zero, then
        // 96 ones. We build x^(2^k - 1) for increasing k, retaining the
        // values needed further down the chain.
        let x = *self;

        let mut t = x.square() * x;            // x^(2^2 - 1)
        t.set_square();
        t *= x;                                // x^(2^3 - 1)
        let t3 = t;
        t.set_xsquare(3);
        t *= t3;                               // x^(2^6 - 1)
        let t6 = t;
        t.set_xsquare(6);
        t *= t6;                               // x^(2^12 - 1)
        let t12 = t;
        t.set_xsquare(12);
        t *= t12;                              // x^(2^24 - 1)
        let t24 = t;
        t.set_xsquare(24);
        t *= t24;                              // x^(2^48 - 1)
        let t48 = t;
        t.set_xsquare(48);
        t *= t48;                              // x^(2^96 - 1)
        let t96 = t;
        t.set_xsquare(24);
        t *= t24;                              // x^(2^120 - 1)
        t.set_xsquare(6);
        t *= t6;                               // x^(2^126 - 1)
        t.set_square();
        t *= x;                                // x^(2^127 - 1)
        t.set_xsquare(97);
        t *= t96;                              // x^(2^224 - 2^96 - 1)

        *self = t;
    }

    /// Inverts this value; if this value is zero, then zero is returned.
    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }
}

// ========================================================================
// Implementations of all the traits needed to use the simple operators
// (+, -, *) on field element instances, with or without references.

impl Add<GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn add(self, other: GFp224) -> GFp224 {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn add(self, other: &GFp224) -> GFp224 {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn add(self, other: GFp224) -> GFp224 {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn add(self, other: &GFp224) -> GFp224 {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<GFp224> for GFp224 {
    #[inline(always)]
    fn add_assign(&mut self, other: GFp224) {
        self.set_add(&other);
    }
}

impl AddAssign<&GFp224> for GFp224 {
    #[inline(always)]
    fn add_assign(&mut self, other: &GFp224) {
        self.set_add(other);
    }
}

impl Mul<GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn mul(self, other: GFp224) -> GFp224 {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn mul(self, other: &GFp224) -> GFp224 {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn mul(self, other: GFp224) -> GFp224 {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn mul(self, other: &GFp224) -> GFp224 {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<GFp224> for GFp224 {
    #[inline(always)]
    fn mul_assign(&mut self, other: GFp224) {
        self.set_mul(&other);
    }
}

impl MulAssign<&GFp224> for GFp224 {
    #[inline(always)]
    fn mul_assign(&mut self, other: &GFp224) {
        self.set_mul(other);
    }
}

impl Neg for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn neg(self) -> GFp224 {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn neg(self) -> GFp224 {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn sub(self, other: GFp224) -> GFp224 {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GFp224> for GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn sub(self, other: &GFp224) -> GFp224 {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn sub(self, other: GFp224) -> GFp224 {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GFp224> for &GFp224 {
    type Output = GFp224;

    #[inline(always)]
    fn sub(self, other: &GFp224) -> GFp224 {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<GFp224> for GFp224 {
    #[inline(always)]
    fn sub_assign(&mut self, other: GFp224) {
        self.set_sub(&other);
    }
}

impl SubAssign<&GFp224> for GFp224 {
    #[inline(always)]
    fn sub_assign(&mut self, other: &GFp224) {
        self.set_sub(other);
    }
}

// ========================================================================
