//! Hash function traits and the SM3 implementation
//!
//! [`HashAlgorithm`] carries compile-time constants for a hash; the
//! streaming [`HashFunction`] trait is what the MAC, KDF and SM2 layers
//! are generic over.

use crate::error::Result;

pub mod sm3;

pub use sm3::{BlankInput, Sm3, Sm3Algorithm};

/// Compile-time description of a hash algorithm
pub trait HashAlgorithm {
    /// Digest length in bytes
    const OUTPUT_SIZE: usize;
    /// Internal block length in bytes
    const BLOCK_SIZE: usize;
    /// Human-readable identifier
    const ALGORITHM_ID: &'static str;
}

/// Streaming hash function
///
/// `finalize` returns the digest and resets the state, so one instance can
/// hash several messages in sequence.
pub trait HashFunction: Sized + Clone {
    /// Marker type with the algorithm constants
    type Algorithm: HashAlgorithm;
    /// Digest type
    type Output: AsRef<[u8]> + Clone;

    /// Fresh state
    fn new() -> Self;

    /// Absorb more input
    fn update(&mut self, data: &[u8]) -> Result<&mut Self>;

    /// Produce the digest and reset the state
    fn finalize(&mut self) -> Result<Self::Output>;

    /// Digest length in bytes
    fn output_size() -> usize {
        Self::Algorithm::OUTPUT_SIZE
    }

    /// Internal block length in bytes
    fn block_size() -> usize {
        Self::Algorithm::BLOCK_SIZE
    }

    /// Algorithm name
    fn name() -> String {
        Self::Algorithm::ALGORITHM_ID.to_string()
    }

    /// One-shot digest of `data`
    fn digest(data: &[u8]) -> Result<Self::Output> {
        let mut h = Self::new();
        h.update(data)?;
        h.finalize()
    }
}
