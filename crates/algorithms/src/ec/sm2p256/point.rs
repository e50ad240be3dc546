//! sm2p256v1 point operations
//!
//! Affine points for storage and encoding, Jacobian points for arithmetic.
//! Every constructor that takes bytes checks the curve equation
//! y² = x³ + ax + b with a = −3.

use super::constants::{
    SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
};
use super::field::FieldElement;
use super::scalar::Scalar;
use crate::error::{validate, Error, Result};
use subtle::Choice;

/// Format of a serialized point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointFormat {
    /// Identity point (all zeros)
    Identity,
    /// Uncompressed: 0x04 ∥ x ∥ y
    Uncompressed,
    /// Compressed: 0x02/0x03 ∥ x
    Compressed,
}

/// Affine point (x, y) or the point at infinity
#[derive(Clone, Debug)]
pub struct Point {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

/// Jacobian coordinates (X:Y:Z), x = X/Z², y = Y/Z³
#[derive(Clone, Debug)]
pub(crate) struct ProjectivePoint {
    pub(crate) is_identity: Choice,
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        let a_id: bool = self.is_identity.into();
        let b_id: bool = other.is_identity.into();
        if a_id || b_id {
            return a_id == b_id;
        }
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Point {
    /// Build an affine point from big-endian coordinates
    ///
    /// Fails with `InvalidPoint` if either coordinate is ≥ p or the pair is
    /// not on the curve.
    pub fn new_uncompressed(
        x_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
        y_bytes: &[u8; SM2_FIELD_ELEMENT_SIZE],
    ) -> Result<Self> {
        let x = FieldElement::from_bytes(x_bytes).map_err(|_| Error::InvalidPoint {
            reason: "x coordinate not in field",
        })?;
        let y = FieldElement::from_bytes(y_bytes).map_err(|_| Error::InvalidPoint {
            reason: "y coordinate not in field",
        })?;
        validate::point(Self::satisfies_curve(&x, &y), "point not on curve")?;
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// The point at infinity
    pub fn identity() -> Self {
        Point {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::zero(),
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.is_identity.into()
    }

    /// x-coordinate as big-endian bytes
    pub fn x_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.x.to_bytes()
    }

    /// y-coordinate as big-endian bytes
    pub fn y_coordinate_bytes(&self) -> [u8; SM2_FIELD_ELEMENT_SIZE] {
        self.y.to_bytes()
    }

    /// Detect serialized point format
    pub fn detect_format(bytes: &[u8]) -> Result<PointFormat> {
        if bytes.is_empty() {
            return Err(Error::InvalidPoint {
                reason: "empty encoding",
            });
        }
        match (bytes[0], bytes.len()) {
            (0x00, SM2_POINT_UNCOMPRESSED_SIZE) if bytes.iter().all(|&b| b == 0) => {
                Ok(PointFormat::Identity)
            }
            (0x04, SM2_POINT_UNCOMPRESSED_SIZE) => Ok(PointFormat::Uncompressed),
            (0x02 | 0x03, SM2_POINT_COMPRESSED_SIZE) => Ok(PointFormat::Compressed),
            _ => Err(Error::InvalidPoint {
                reason: "unknown or malformed format",
            }),
        }
    }

    /// Decode any supported encoding; the all-zero encoding yields the identity
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        match Self::detect_format(bytes)? {
            PointFormat::Identity => Ok(Self::identity()),
            PointFormat::Uncompressed => Self::deserialize_uncompressed(bytes),
            PointFormat::Compressed => Self::deserialize_compressed(bytes),
        }
    }

    /// 0x04 ∥ x ∥ y, or 65 zero bytes for the identity
    pub fn serialize_uncompressed(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_UNCOMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = 0x04;
        out[1..1 + SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&self.x.to_bytes());
        out[1 + SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&self.y.to_bytes());
        out
    }

    /// Decode 0x04 ∥ x ∥ y. The identity has no valid encoding here.
    pub fn deserialize_uncompressed(bytes: &[u8]) -> Result<Self> {
        validate::length("sm2p256 Point", bytes.len(), SM2_POINT_UNCOMPRESSED_SIZE)?;
        validate::point(bytes[0] == 0x04, "invalid prefix for uncompressed point")?;
        Self::from_xy_bytes(&bytes[1..])
    }

    /// Decode the prefix-less x ∥ y form (64 bytes)
    pub fn from_xy_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("sm2p256 Point", bytes.len(), 2 * SM2_FIELD_ELEMENT_SIZE)?;
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        let mut yb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[..SM2_FIELD_ELEMENT_SIZE]);
        yb.copy_from_slice(&bytes[SM2_FIELD_ELEMENT_SIZE..]);
        Self::new_uncompressed(&xb, &yb)
    }

    /// 0x02/0x03 ∥ x, or 33 zero bytes for the identity
    pub fn serialize_compressed(&self) -> [u8; SM2_POINT_COMPRESSED_SIZE] {
        let mut out = [0u8; SM2_POINT_COMPRESSED_SIZE];
        if self.is_identity() {
            return out;
        }
        out[0] = if self.y.is_odd() { 0x03 } else { 0x02 };
        out[1..].copy_from_slice(&self.x.to_bytes());
        out
    }

    /// Decode 0x02/0x03 ∥ x, recovering y from the curve equation
    pub fn deserialize_compressed(bytes: &[u8]) -> Result<Self> {
        validate::length(
            "sm2p256 Compressed Point",
            bytes.len(),
            SM2_POINT_COMPRESSED_SIZE,
        )?;
        let tag = bytes[0];
        validate::point(tag == 0x02 || tag == 0x03, "invalid compressed prefix")?;
        let mut xb = [0u8; SM2_FIELD_ELEMENT_SIZE];
        xb.copy_from_slice(&bytes[1..]);
        let x = FieldElement::from_bytes(&xb).map_err(|_| Error::InvalidPoint {
            reason: "x coordinate not in field",
        })?;
        let y = Self::curve_rhs(&x).sqrt().ok_or(Error::InvalidPoint {
            reason: "x is not on the curve",
        })?;
        let y = if y.is_odd() == (tag == 0x03) {
            y
        } else {
            y.negate()
        };
        Ok(Point {
            is_identity: Choice::from(0),
            x,
            y,
        })
    }

    /// P + Q
    pub fn add(&self, other: &Self) -> Self {
        self.to_projective().add(&other.to_projective()).to_affine()
    }

    /// 2P
    pub fn double(&self) -> Self {
        self.to_projective().double().to_affine()
    }

    /// −P
    pub fn negate(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        Point {
            is_identity: Choice::from(0),
            x: self.x.clone(),
            y: self.y.negate(),
        }
    }

    /// k·P by MSB-first double-and-add; 0·P is the identity
    pub fn mul(&self, scalar: &Scalar) -> Self {
        if scalar.is_zero() || self.is_identity() {
            return Self::identity();
        }
        let base = self.to_projective();
        let mut acc = ProjectivePoint::identity();
        for &byte in scalar.as_secret_buffer().as_ref().iter() {
            for i in (0..8).rev() {
                acc = acc.double();
                if ((byte >> i) & 1) == 1 {
                    acc = acc.add(&base);
                }
            }
        }
        acc.to_affine()
    }

    /// Re-check the curve equation for this point
    pub fn is_on_curve(&self) -> bool {
        self.is_identity() || Self::satisfies_curve(&self.x, &self.y)
    }

    /// x³ + ax + b
    fn curve_rhs(x: &FieldElement) -> FieldElement {
        let x3 = x.square().mul(x);
        x3.add(&FieldElement::a().mul(x)).add(&FieldElement::b())
    }

    fn satisfies_curve(x: &FieldElement, y: &FieldElement) -> bool {
        y.square() == Self::curve_rhs(x)
    }

    fn to_projective(&self) -> ProjectivePoint {
        if self.is_identity() {
            ProjectivePoint::identity()
        } else {
            ProjectivePoint {
                is_identity: Choice::from(0),
                x: self.x.clone(),
                y: self.y.clone(),
                z: FieldElement::one(),
            }
        }
    }
}

impl ProjectivePoint {
    /// Identity in Jacobian form: (0 : 1 : 0)
    pub fn identity() -> Self {
        ProjectivePoint {
            is_identity: Choice::from(1),
            x: FieldElement::zero(),
            y: FieldElement::one(),
            z: FieldElement::zero(),
        }
    }

    /// Jacobian addition (add-1998-cmo-2)
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity.into() {
            return other.clone();
        }
        if other.is_identity.into() {
            return self.clone();
        }

        let z1_sq = self.z.square();
        let z2_sq = other.z.square();
        let z1_cu = z1_sq.mul(&self.z);
        let z2_cu = z2_sq.mul(&other.z);

        let u1 = self.x.mul(&z2_sq);
        let u2 = other.x.mul(&z1_sq);
        let s1 = self.y.mul(&z2_cu);
        let s2 = other.y.mul(&z1_cu);

        let h = u2.sub(&u1);
        let r = s2.sub(&s1);

        if h.is_zero() {
            // same x: either P + P or P + (−P)
            return if r.is_zero() {
                self.double()
            } else {
                ProjectivePoint::identity()
            };
        }

        let h2 = h.square();
        let h3 = h2.mul(&h);
        let v = u1.mul(&h2);

        // X₃ = r² − h³ − 2v
        let x3 = r.square().sub(&h3).sub(&v.double());
        // Y₃ = r·(v − X₃) − s1·h³
        let y3 = r.mul(&v.sub(&x3)).sub(&s1.mul(&h3));
        // Z₃ = Z₁·Z₂·h
        let z3 = self.z.mul(&other.z).mul(&h);

        ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Jacobian doubling for a = −3 (dbl-2001-b)
    pub fn double(&self) -> Self {
        if self.is_identity.into() {
            return self.clone();
        }
        if self.y.is_zero() {
            return ProjectivePoint::identity();
        }

        //   δ = Z², γ = Y², β = X·γ, α = 3·(X − δ)·(X + δ)
        let delta = self.z.square();
        let gamma = self.y.square();
        let beta = self.x.mul(&gamma);
        let alpha = self
            .x
            .sub(&delta)
            .mul(&self.x.add(&delta))
            .mul(&FieldElement::from_u32(3));

        let four_beta = beta.double().double();

        // X₃ = α² − 8β
        let x3 = alpha.square().sub(&four_beta.double());
        // Z₃ = (Y + Z)² − γ − δ
        let z3 = self.y.add(&self.z).square().sub(&gamma).sub(&delta);
        // Y₃ = α·(4β − X₃) − 8γ²
        let eight_gamma_sq = gamma.square().double().double().double();
        let y3 = alpha.mul(&four_beta.sub(&x3)).sub(&eight_gamma_sq);

        ProjectivePoint {
            is_identity: Choice::from(0),
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Back to affine; a zero Z maps to the identity
    pub fn to_affine(&self) -> Point {
        if self.is_identity.into() {
            return Point::identity();
        }
        let z_inv = match self.z.invert() {
            Ok(inv) => inv,
            Err(_) => return Point::identity(),
        };
        let z_inv_sq = z_inv.square();
        let z_inv_cu = z_inv_sq.mul(&z_inv);
        Point {
            is_identity: Choice::from(0),
            x: self.x.mul(&z_inv_sq),
            y: self.y.mul(&z_inv_cu),
        }
    }
}
