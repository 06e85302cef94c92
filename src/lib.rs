//! Constant-time implementation of the NIST P-224 elliptic curve.
//!
//! This library implements arithmetic in the finite field
//! GF(2^224 - 2^96 + 1) and the group law, scalar multiplication, and
//! point encoding/decoding for the NIST P-224 curve (a short Weierstraß
//! curve with equation `y^2 = x^3 - 3*x + b`). It does not wrap any
//! external cryptographic library; the whole computation is performed
//! on fixed-size stack values, with no dynamic memory allocation.
//!
//! Field elements use a redundant radix-28 representation (eight 32-bit
//! limbs, nominally 28 bits each), with a modular reduction specialized
//! for the shape of the field prime; see the `field` module. Curve
//! points use Jacobian coordinates (X:Y:Z) with x = X/Z^2 and
//! y = Y/Z^3; see the `p224` module.
//!
//! # Conventions
//!
//! All implemented functions are strictly constant-time: the sequence of
//! executed instructions and accessed memory addresses does not depend
//! on the values of field elements, curve points or scalars. There are
//! two exceptions: point decoding, where the success or failure of the
//! operation (but not the decoded value) may leak; and point addition,
//! where the branch to the doubling formulas (taken when both operands
//! are the same non-neutral point) may leak.
//!
//! In order to avoid unwanted side-channel leaks, Booleans are avoided
//! (compilers tend to "optimize" things a bit too eagerly when handling
//! `bool` values). All functions that return or use a potentially secret
//! Boolean value use the `u32` type; the convention is that 0xFFFFFFFF
//! means "true", and 0x00000000 means "false". No other value shall be
//! used, for they would lead to unpredictable results. Similarly, the
//! `Eq` or `PartialEq` traits are not implemented.
//!
//! Functions that modify the object on which they are called have a name
//! in `set_*()` (e.g. for a curve point `P`, `P.set_double()` doubles
//! the point in place, while `P.double()` leaves `P` unmodified and
//! returns the double as a new instance).
//!
//! Scalars are plain 28-byte big-endian integers. This layer enforces no
//! range invariant on them; reducing scalars modulo the curve order is
//! the caller's responsibility.

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub mod field;
pub mod p224;
