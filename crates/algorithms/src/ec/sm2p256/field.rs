//! sm2p256v1 base-field arithmetic
//!
//! Elements of 𝔽ₚ with p = 2²⁵⁶ − 2²²⁴ − 2⁹⁶ + 2⁶⁴ − 1, held in canonical
//! form (< p) as eight little-endian 32-bit limbs. Multiplication goes
//! through Montgomery reduction and converts straight back, so every value
//! outside this module is a plain residue.

use super::arith::{self, Limbs};
use super::constants::{
    bytes_to_limbs_le, limbs_to_bytes_be, NLIMBS, P_MINUS_2, P_PLUS_1_DIV_4,
    SM2_FIELD_ELEMENT_SIZE,
};
use crate::error::{Error, Result};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Element of the sm2p256v1 base field
#[derive(Clone, Debug, PartialEq, Eq, Zeroize)]
pub struct FieldElement(pub(crate) Limbs);

impl FieldElement {
    /// p = FFFFFFFE FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFF 00000000 FFFFFFFF FFFFFFFF
    pub(crate) const MOD_LIMBS: Limbs = [
        0xFFFFFFFF, 0xFFFFFFFF, 0x00000000, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFE,
    ];

    /// a = p − 3
    pub(crate) const A_M3: Limbs = [
        0xFFFFFFFC, 0xFFFFFFFF, 0x00000000, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF, 0xFFFFFFFF,
        0xFFFFFFFE,
    ];

    /// b = 28E9FA9E 9D9F5E34 4D5A9E4B CF6509A7 F39789F5 15AB8F92 DDBCBD41 4D940E93
    pub(crate) const B: Limbs = [
        0x4D940E93, 0xDDBCBD41, 0x15AB8F92, 0xF39789F5, 0xCF6509A7, 0x4D5A9E4B, 0x9D9F5E34,
        0x28E9FA9E,
    ];

    /// R² mod p with R = 2²⁵⁶
    const R2: Limbs = [
        0x00000003, 0x00000002, 0xFFFFFFFF, 0x00000002, 0x00000001, 0x00000001, 0x00000002,
        0x00000004,
    ];

    /// −p⁻¹ mod 2³²
    const N0: u32 = 0x00000001;

    /// Build a field element from a small literal
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        let mut limbs = [0u32; NLIMBS];
        limbs[0] = n;
        FieldElement(limbs)
    }

    /// The additive identity
    #[inline]
    pub fn zero() -> Self {
        FieldElement([0u32; NLIMBS])
    }

    /// The multiplicative identity
    #[inline]
    pub fn one() -> Self {
        Self::from_u32(1)
    }

    /// Curve coefficient a
    #[inline]
    pub fn a() -> Self {
        FieldElement(Self::A_M3)
    }

    /// Curve coefficient b
    #[inline]
    pub fn b() -> Self {
        FieldElement(Self::B)
    }

    /// Parse big-endian bytes, rejecting any value ≥ p
    pub fn from_bytes(bytes: &[u8; SM2_FIELD_ELEMENT_SIZE]) -> Result<Self> {
        let limbs = bytes_to_limbs_le(bytes);
        if arith::geq(&limbs, &Self::MOD_LIMBS) {
            return Err(Error::param("sm2p256 FieldElement", "value ≥ modulus"));
        }
        Ok(FieldElement(limbs))
    }

    /// Big-endian encoding, always 32 bytes
    pub fn to_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        limbs_to_bytes_be(&self.0)
    }

    /// Is self < p?
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        !arith::geq(&self.0, &Self::MOD_LIMBS)
    }

    /// Check if element is zero
    pub fn is_zero(&self) -> bool {
        self.ct_eq(&Self::zero()).into()
    }

    /// Least-significant bit, used as the compressed-point parity
    pub fn is_odd(&self) -> bool {
        (self.0[0] & 1) == 1
    }

    /// (self + other) mod p
    pub fn add(&self, other: &Self) -> Self {
        FieldElement(arith::add_mod(&self.0, &other.0, &Self::MOD_LIMBS))
    }

    /// (self − other) mod p
    pub fn sub(&self, other: &Self) -> Self {
        FieldElement(arith::sub_mod(&self.0, &other.0, &Self::MOD_LIMBS))
    }

    /// (self · other) mod p
    pub fn mul(&self, other: &Self) -> Self {
        FieldElement(arith::mul_mod(
            &self.0,
            &other.0,
            &Self::MOD_LIMBS,
            Self::N0,
            &Self::R2,
        ))
    }

    /// self² mod p
    #[inline(always)]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// 2 · self mod p
    #[inline(always)]
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// p − self, or zero for zero
    pub fn negate(&self) -> Self {
        Self::zero().sub(self)
    }

    /// Multiplicative inverse via Fermat: a^(p−2)
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::param("sm2p256 FieldElement", "inverse of zero"));
        }
        Ok(self.pow(&P_MINUS_2))
    }

    /// Square root, if one exists: a^((p+1)/4) since p ≡ 3 (mod 4)
    pub fn sqrt(&self) -> Option<Self> {
        let root = self.pow(&P_PLUS_1_DIV_4);
        if root.square() == *self {
            Some(root)
        } else {
            None
        }
    }

    /// Left-to-right square-and-multiply over a big-endian exponent
    fn pow(&self, exp_be: &[u8; 32]) -> Self {
        let mut acc = Self::one();
        for &byte in exp_be.iter() {
            for bit in (0..8).rev() {
                acc = acc.square();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.mul(self);
                }
            }
        }
        acc
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut acc = Choice::from(1u8);
        for i in 0..NLIMBS {
            acc &= self.0[i].ct_eq(&other.0[i]);
        }
        acc
    }
}
