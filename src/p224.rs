//! NIST P-224 curve implementation.
//!
//! The curve is the short Weierstraß curve y^2 = x^3 - 3*x + b over
//! GF(2^224 - 2^96 + 1), with b =
//! 0xB4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4.
//!
//! Points are held in Jacobian coordinates (X:Y:Z), with x = X/Z^2 and
//! y = Y/Z^3; any triple with Z = 0 represents the point-at-infinity
//! (the group neutral). Points encode over 56 bytes, as the big-endian
//! affine x coordinate followed by the big-endian affine y coordinate;
//! the point-at-infinity encodes as 56 bytes of value 0x00 (which is
//! not itself a valid encoding, since (0, 0) is not on the curve).
//!
//! Scalars are plain 28-byte big-endian integers; they are used as-is,
//! without reduction modulo the curve order.

#![allow(non_snake_case)]

use super::field::GFp224;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A point on the NIST P-224 curve, in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    X: GFp224,
    Y: GFp224,
    Z: GFp224,
}

impl Point {

    /// The neutral element (point-at-infinity).
    pub const NEUTRAL: Point = Point {
        X: GFp224::ZERO,
        Y: GFp224::ZERO,
        Z: GFp224::ZERO,
    };

    /// The conventional generator of the curve.
    pub const BASE: Point = Point {
        X: GFp224::w28be(
            0xB70E0CB, 0xD6BB4BF, 0x7F32139, 0x0B94A03,
            0xC1D356C, 0x2112234, 0x3280D61, 0x15C1D21),
        Y: GFp224::w28be(
            0xBD37638, 0x8B5F723, 0xFB4C22D, 0xFE6CD43,
            0x75A05A0, 0x7476444, 0xD581998, 0x5007E34),
        Z: GFp224::ONE,
    };

    // Curve equation constant b.
    const B: GFp224 = GFp224::w28be(
        0xB4050A8, 0x50C04B3, 0xABF5413, 0x2565044,
        0xB0B7D7B, 0xFD8BA27, 0x0B39432, 0x355FFB4);

    const THREE: GFp224 = GFp224::w28be(0, 0, 0, 0, 0, 0, 0, 3);

    /// Tests whether this point is the neutral (point-at-infinity).
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000
    /// otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        self.Z.iszero()
    }

    /// Conditionally copies the provided point (`P`) into self:
    ///
    ///  - If `ctl` is 0xFFFFFFFF, then the value of `P` is copied.
    ///
    ///  - If `ctl` is 0x00000000, then the value of self is unchanged.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` is 0x00000000) or `P1`
    /// (if `ctl` is 0xFFFFFFFF). `ctl` MUST be either 0x00000000 or
    /// 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut r = *P0;
        r.set_cond(P1, ctl);
        r
    }

    /// Doubles this point (in place).
    ///
    /// Formulas are the Jacobian "dbl-2001-b" sequence, which is valid
    /// for all inputs, including the neutral (whose coordinates simply
    /// propagate as zero).
    pub fn set_double(&mut self) {
        // delta = Z^2
        // gamma = Y^2
        // beta = X*gamma
        // alpha = 3*(X - delta)*(X + delta)
        let delta = self.Z.square();
        let gamma = self.Y.square();
        let beta = self.X * gamma;
        let alpha = ((self.X + delta) * (self.X - delta)).mul3();

        // Z' = (Y + Z)^2 - gamma - delta
        // X' = alpha^2 - 8*beta
        // Y' = alpha*(4*beta - X') - 8*gamma^2
        self.Z = (self.Y + self.Z).square() - gamma - delta;
        let x3 = alpha.square() - beta.mul8();
        self.Y = alpha * (beta.mul4() - x3) - gamma.square().mul8();
        self.X = x3;
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Adds point `rhs` to `self`.
    ///
    /// Formulas are the Jacobian "add-2007-bl" sequence, which assumes
    /// distinct, non-neutral operands; the two exceptional situations
    /// are handled around it. A neutral operand is fixed up afterwards
    /// with constant-time conditional copies. Adding a point to itself
    /// is detected through the equality of the recovered affine
    /// coordinates and routed to the doubling formulas; that detection
    /// uses a branch, so whether an addition was in fact a doubling may
    /// leak through timing.
    pub fn set_add(&mut self, rhs: &Self) {
        let z1_zero = self.Z.iszero();
        let z2_zero = rhs.Z.iszero();

        // u1 = X1*Z2^2, u2 = X2*Z1^2   (shared x scale)
        // s1 = Y1*Z2^3, s2 = Y2*Z1^3   (shared y scale)
        let z1z1 = self.Z.square();
        let z2z2 = rhs.Z.square();
        let u1 = self.X * z2z2;
        let u2 = rhs.X * z1z1;
        let s1 = self.Y * rhs.Z * z2z2;
        let s2 = rhs.Y * self.Z * z1z1;

        // h = u2 - u1, r = s2 - s1
        let h = u2 - u1;
        let x_equal = h.iszero();
        let r = s2 - s1;
        let y_equal = r.iszero();

        if (x_equal & y_equal & !z1_zero & !z2_zero) == 0xFFFFFFFF {
            self.set_double();
            return;
        }

        // i = (2*h)^2
        // j = h*i
        // r = 2*(s2 - s1)
        // v = u1*i
        let i = h.mul2().square();
        let j = h * i;
        let r = r.mul2();
        let v = u1 * i;

        // Z3 = ((Z1 + Z2)^2 - Z1^2 - Z2^2)*h
        // X3 = r^2 - j - 2*v
        // Y3 = r*(v - X3) - 2*s1*j
        let z3 = ((self.Z + rhs.Z).square() - z1z1 - z2z2) * h;
        let x3 = r.square() - (v.mul2() + j);
        let y3 = r * (v - x3) - s1.mul2() * j;

        let mut P = Point { X: x3, Y: y3, Z: z3 };
        P.set_cond(rhs, z1_zero);
        P.set_cond(self, z2_zero);
        *self = P;
    }

    /// Negates this point (in place).
    ///
    /// The point is brought back to affine coordinates and the y
    /// coordinate is negated.
    pub fn set_neg(&mut self) {
        let nz = self.Z.iszero();
        let zi = self.Z.invert();
        let zi2 = zi.square();
        self.X *= zi2;
        self.Y = -(self.Y * zi2 * zi);
        // 1/Z maps the neutral's Z = 0 to 0, so its X and Y collapse
        // to zero above; Z must stay 0 as well so that the result is
        // still the neutral (Z = 1 would make it the invalid finite
        // point (0, 0)).
        self.Z = GFp224::select(&GFp224::ONE, &GFp224::ZERO, nz);
    }

    /// Subtracts point `rhs` from `self`.
    #[inline(always)]
    pub fn set_sub(&mut self, rhs: &Self) {
        let mut nr = *rhs;
        nr.set_neg();
        self.set_add(&nr);
    }

    /// Compares two points for equality as group elements, regardless
    /// of their Jacobian representations (constant-time). Returned
    /// value is 0xFFFFFFFF on equality, 0x00000000 otherwise.
    pub fn equals(self, rhs: Self) -> u32 {
        // X1/Z1^2 == X2/Z2^2 and Y1/Z1^3 == Y2/Z2^3, cross-multiplied
        // to avoid inversions. The cross-products all cancel to zero
        // when either point is the neutral, so the neutral cases are
        // resolved separately.
        let z1z1 = self.Z.square();
        let z2z2 = rhs.Z.square();
        let ex = (self.X * z2z2).equals(rhs.X * z1z1);
        let ey = (self.Y * rhs.Z * z2z2).equals(rhs.Y * self.Z * z1z1);
        let n1 = self.isneutral();
        let n2 = rhs.isneutral();
        (n1 & n2) | (!n1 & !n2 & ex & ey)
    }

    /// Multiplies this point by the provided scalar (in place). The
    /// scalar is an unsigned 28-byte big-endian integer; it is not
    /// reduced modulo the curve order. An all-zero scalar yields the
    /// neutral.
    ///
    /// The scalar bits are processed from the most significant one
    /// downward with a double-and-add-always structure: every bit
    /// triggers the same doubling, addition, and masked copy, so the
    /// operation sequence does not depend on the scalar value.
    pub fn set_mul(&mut self, sb: &[u8; 28]) {
        let P = *self;
        let mut Q = Self::NEUTRAL;
        for i in 0..28 {
            let bb = sb[i];
            for j in (0..8).rev() {
                Q.set_double();
                let R = P + Q;
                let m = (((bb >> j) & 1) as u32).wrapping_neg();
                Q.set_cond(&R, m);
            }
        }
        *self = Q;
    }

    /// Multiplies the conventional generator by the provided scalar
    /// (28-byte big-endian integer).
    #[inline(always)]
    pub fn mulgen(sb: &[u8; 28]) -> Self {
        let mut P = Self::BASE;
        P.set_mul(sb);
        P
    }

    /// Decodes a point from bytes (in place).
    ///
    /// A valid encoding is exactly 56 bytes: the affine x coordinate
    /// (28 bytes, big-endian) followed by the affine y coordinate
    /// (28 bytes, big-endian). Coordinate values are accepted even if
    /// not in the canonical 0..p-1 range (they are implicitly reduced
    /// modulo p); the point must satisfy the curve equation. The
    /// all-zero string is rejected, since (0, 0) is not on the curve.
    ///
    /// Returned value is 0xFFFFFFFF on success, 0x00000000 otherwise.
    /// On failure, this point is set to the neutral. Whether decoding
    /// succeeded may leak through timing; the decoded coordinates do
    /// not.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        *self = Self::NEUTRAL;
        if buf.len() != 56 {
            return 0;
        }
        let mut bx = [0u8; 28];
        let mut by = [0u8; 28];
        bx.copy_from_slice(&buf[0..28]);
        by.copy_from_slice(&buf[28..56]);
        let x = GFp224::decode28(&bx);
        let y = GFp224::decode28(&by);

        // y^2 == (x^2 - 3)*x + b
        let r = y.square().equals((x.square() - Self::THREE) * x + Self::B);
        self.X.set_cond(&x, r);
        self.Y.set_cond(&y, r);
        self.Z.set_cond(&GFp224::ONE, r);
        r
    }

    /// Decodes a point from bytes. On success, the decoded point is
    /// returned; on failure (invalid length, or the coordinates do not
    /// match the curve equation), `None` is returned.
    pub fn decode(buf: &[u8]) -> Option<Point> {
        let mut P = Point::NEUTRAL;
        if P.set_decode(buf) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Encodes this point over exactly 56 bytes: affine x then affine
    /// y, both big-endian and canonical. The neutral encodes as 56
    /// bytes of value 0x00.
    pub fn encode(self) -> [u8; 56] {
        // 1/Z yields zero for the neutral, so both affine coordinates
        // collapse to zero without a special case.
        let zi = self.Z.invert();
        let zi2 = zi.square();
        let x = self.X * zi2;
        let y = self.Y * zi2 * zi;
        let mut d = [0u8; 56];
        d[0..28].copy_from_slice(&x.encode());
        d[28..56].copy_from_slice(&y.encode());
        d
    }
}

// ========================================================================
// Implementations of all the traits needed to use the simple operators
// (+, -) on point instances, with or without references.

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_sub(other);
    }
}

// ========================================================================
