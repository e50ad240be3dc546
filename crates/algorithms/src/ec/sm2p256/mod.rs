//! sm2p256v1 elliptic curve primitives (GB/T 32918.5)
//!
//! Curve equation: y² = x³ + ax + b over 𝔽ₚ, with
//! - p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1,
//! - a = p − 3,
//! - n = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123,
//! - cofactor h = 1.
//!
//! Implements:
//! - Montgomery multiplication over eight 32-bit limbs for 𝔽ₚ and mod n,
//! - Jacobian projective coordinates with the a = −3 doubling formula,
//! - MSB-first double-and-add scalar multiplication,
//! - pluggable ephemeral-scalar sources ([`NonceSource`]).

mod arith;
mod constants;
mod field;
pub mod nonce;
mod point;
mod scalar;

pub use constants::{
    SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
    SM2_SCALAR_SIZE,
};
pub use field::FieldElement;
pub use nonce::{DeterministicNonce, NonceRequest, NonceSource, OsNonce, RngNonce};
pub use point::{Point, PointFormat};
pub use scalar::Scalar;

use crate::error::{validate, Result};
use rand::{CryptoRng, RngCore};
use subtle::Choice;

/// The standard base point G
pub fn base_point_g() -> Point {
    Point {
        is_identity: Choice::from(0),
        x: FieldElement([
            0x334C74C7, 0x715A4589, 0xF2660BE1, 0x8FE30BBF, 0x6A39C994, 0x5F990446, 0x1F198119,
            0x32C4AE2C,
        ]),
        y: FieldElement([
            0x2139F0A0, 0x02DF32E5, 0xC62A4740, 0xD0A9877C, 0x6B692153, 0x59BDCEE3, 0xF4F6779C,
            0xBC3736A2,
        ]),
    }
}

/// scalar · G
pub fn scalar_mult_base_g(scalar: &Scalar) -> Point {
    base_point_g().mul(scalar)
}

/// scalar · point
pub fn scalar_mult(scalar: &Scalar, point: &Point) -> Point {
    point.mul(scalar)
}

/// Public point Q = d·G for a private scalar in [1, n−2]
pub fn public_key(private: &Scalar) -> Result<Point> {
    validate::parameter(
        private.is_valid_private_key(),
        "sm2p256 private key",
        "must lie in [1, n-2]",
    )?;
    Ok(scalar_mult_base_g(private))
}

/// Generate a key pair with d uniform in [1, n−2]
pub fn generate_keypair<R: CryptoRng + RngCore>(rng: &mut R) -> Result<(Scalar, Point)> {
    loop {
        let d = nonce::random_scalar(rng, "generate_keypair")?;
        if d.is_valid_private_key() {
            let q = scalar_mult_base_g(&d);
            return Ok((d, q));
        }
    }
}
