//! Elliptic curve primitives
//!
//! Arithmetic for the SM2 recommended curve sm2p256v1. Field and scalar
//! values use fixed-size limb arithmetic; points are stored affine and
//! computed in Jacobian coordinates.

pub mod sm2p256;

pub use sm2p256::{Point as Sm2Point, Scalar as Sm2Scalar};

/// Common trait for coordinate systems used in elliptic curve operations
pub trait CoordinateSystem {}

/// Affine coordinates (x,y)
pub struct Affine;
impl CoordinateSystem for Affine {}

/// Jacobian projective coordinates (X:Y:Z) where x = X/Z² and y = Y/Z³
pub struct Jacobian;
impl CoordinateSystem for Jacobian {}
