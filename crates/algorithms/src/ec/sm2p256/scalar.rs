//! sm2p256v1 scalar arithmetic (integers mod n)

use super::arith::{self, Limbs};
use super::constants::{bytes_to_limbs_le, limbs_to_bytes_be, N_MINUS_2, SM2_SCALAR_SIZE};
use crate::error::{validate, Error, Result};
use smcrypt_common::security::SecretBuffer;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Scalar mod n, where
/// n = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF 7203DF6B 21C6052B 53BBF409 39D54123.
///
/// Stored big-endian in a zeroizing buffer; private keys and ephemeral
/// nonces are both scalars.
#[derive(Clone, Zeroize, ZeroizeOnDrop, Debug)]
pub struct Scalar(SecretBuffer<SM2_SCALAR_SIZE>);

impl Scalar {
    pub(crate) const N_LIMBS: Limbs = [
        0x39D54123, 0x53BBF409, 0x21C6052B, 0x7203DF6B, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFE,
    ];

    /// R² mod n with R = 2²⁵⁶
    const R2: Limbs = [
        0x7C114F20, 0x901192AF, 0xDE6FA2FA, 0x3464504A, 0x3AFFE0D4, 0x620FC84C, 0xA22B3D3B,
        0x1EB5E412,
    ];

    /// −n⁻¹ mod 2³²
    const N0: u32 = 0x72350975;

    /// Create a scalar from raw bytes, reducing mod n.
    /// Errors if the result is zero.
    pub fn new(data: [u8; SM2_SCALAR_SIZE]) -> Result<Self> {
        let s = Self::from_bytes_reduced(&data);
        if s.is_zero() {
            return Err(Error::param("sm2p256 Scalar", "scalar is zero"));
        }
        Ok(s)
    }

    /// Reduce any 256-bit big-endian value mod n; zero is allowed
    ///
    /// Used for message digests and x-coordinates. Since n > 2²⁵⁵ one
    /// conditional subtraction suffices.
    pub fn from_bytes_reduced(bytes: &[u8; SM2_SCALAR_SIZE]) -> Self {
        let limbs = bytes_to_limbs_le(bytes);
        let (sub, borrow) = arith::sbb8(&limbs, &Self::N_LIMBS);
        let reduced = arith::select8(&limbs, &sub, Choice::from((borrow ^ 1) as u8));
        Self::from_limbs(&reduced)
    }

    /// Parse exactly 32 big-endian bytes holding a value in [0, n−1]
    ///
    /// Values ≥ n are rejected rather than reduced.
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("sm2p256 Scalar", bytes.len(), SM2_SCALAR_SIZE)?;
        let mut tmp = [0u8; SM2_SCALAR_SIZE];
        tmp.copy_from_slice(bytes);
        let limbs = bytes_to_limbs_le(&tmp);
        tmp.zeroize();
        validate::parameter(
            !arith::geq(&limbs, &Self::N_LIMBS),
            "sm2p256 Scalar",
            "value ≥ curve order",
        )?;
        Ok(Self::from_limbs(&limbs))
    }

    /// Deserialize a nonzero canonical scalar in [1, n−1]
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let s = Self::from_canonical_bytes(bytes)?;
        validate::parameter(!s.is_zero(), "sm2p256 Scalar", "scalar is zero")?;
        Ok(s)
    }

    /// The zero scalar
    pub fn zero() -> Self {
        Scalar(SecretBuffer::zeroed())
    }

    /// The scalar 1
    pub fn one() -> Self {
        let mut bytes = [0u8; SM2_SCALAR_SIZE];
        bytes[SM2_SCALAR_SIZE - 1] = 1;
        Scalar(SecretBuffer::new(bytes))
    }

    fn from_limbs(limbs: &Limbs) -> Self {
        Scalar(SecretBuffer::new(limbs_to_bytes_be(limbs)))
    }

    fn to_limbs(&self) -> Limbs {
        let mut tmp = self.serialize();
        let limbs = bytes_to_limbs_le(&tmp);
        tmp.zeroize();
        limbs
    }

    /// Access the underlying SecretBuffer
    pub fn as_secret_buffer(&self) -> &SecretBuffer<SM2_SCALAR_SIZE> {
        &self.0
    }

    /// Serialize to big-endian bytes
    pub fn serialize(&self) -> [u8; SM2_SCALAR_SIZE] {
        let mut out = [0u8; SM2_SCALAR_SIZE];
        out.copy_from_slice(self.0.as_ref());
        out
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0.as_ref().iter().fold(0u8, |acc, &b| acc | b) == 0
    }

    /// Private keys must lie in [1, n−2] so that 1 + d stays invertible
    pub fn is_valid_private_key(&self) -> bool {
        let limbs = self.to_limbs();
        let mut n_minus_1 = Self::N_LIMBS;
        n_minus_1[0] -= 1;
        !self.is_zero() && !arith::geq(&limbs, &n_minus_1)
    }

    /// (self + other) mod n
    pub fn add_mod_n(&self, other: &Self) -> Self {
        let mut a = self.to_limbs();
        let mut b = other.to_limbs();
        let r = arith::add_mod(&a, &b, &Self::N_LIMBS);
        a.zeroize();
        b.zeroize();
        Self::from_limbs(&r)
    }

    /// (self − other) mod n
    pub fn sub_mod_n(&self, other: &Self) -> Self {
        let mut a = self.to_limbs();
        let mut b = other.to_limbs();
        let r = arith::sub_mod(&a, &b, &Self::N_LIMBS);
        a.zeroize();
        b.zeroize();
        Self::from_limbs(&r)
    }

    /// (self · other) mod n, Montgomery reduction with R = 2²⁵⁶
    pub fn mul_mod_n(&self, other: &Self) -> Self {
        let mut a = self.to_limbs();
        let mut b = other.to_limbs();
        let r = arith::mul_mod(&a, &b, &Self::N_LIMBS, Self::N0, &Self::R2);
        a.zeroize();
        b.zeroize();
        Self::from_limbs(&r)
    }

    /// (n − self) mod n
    pub fn negate(&self) -> Self {
        Self::zero().sub_mod_n(self)
    }

    /// Inverse mod n via Fermat (n − 2)
    pub fn inv_mod_n(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("sm2p256 Scalar", "inverse of zero"));
        }
        let mut acc = Self::one();
        for &byte in N_MINUS_2.iter() {
            for bit in (0..8).rev() {
                acc = acc.mul_mod_n(&acc);
                if (byte >> bit) & 1 == 1 {
                    acc = acc.mul_mod_n(self);
                }
            }
        }
        Ok(acc)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.as_ref().ct_eq(other.0.as_ref())
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}
