//! SM2 / SM3 cryptographic primitives
//!
//! This crate holds the building blocks the signature and encryption crates
//! are assembled from: the SM3 hash, HMAC-SM3, the SM3 key-derivation
//! function and arithmetic on the sm2p256v1 curve.
//!
//! # Security Features
//!
//! - Secret scalars, hash state and keystream bytes are zeroized on drop
//! - Tag and digest comparisons are constant-time
//! - Points loaded from bytes are always checked against the curve equation
//!
//! # Diagnostics
//!
//! With the `trace` feature the crate emits `log` records. Key material,
//! nonces and plaintext never appear in them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Hash function implementations
pub mod hash;
pub use hash::{HashAlgorithm, HashFunction, Sm3};

// MAC implementations
pub mod mac;
pub use mac::{Hmac, HmacSm3};

// KDF implementations
pub mod kdf;
pub use kdf::{KeyDerivationFunction, Sm3Kdf};

// Elliptic curve primitives
pub mod ec;
pub use ec::{sm2p256, Sm2Point, Sm2Scalar};

// Re-export security types
pub use smcrypt_common::security::{EphemeralSecret, SecretBuffer, SecretVec, SecureZeroingType};
