//! Public API traits and types for the smcrypt library
//!
//! This crate provides the public API surface shared by every smcrypt crate:
//! the error type returned across crate boundaries and the traits implemented
//! by the SM2 signature and encryption schemes.

pub mod error;
pub mod traits;

pub use error::{Error, Result};

pub use traits::{Pke, Serialize, SerializeSecret, Signature, SignatureDerive};

pub use traits::{pke, serialize, signature};
