//! Key derivation functions
//!
//! The only KDF here is the SM3 counter-mode construction used by SM2
//! encryption. It follows the operation pattern used elsewhere in the
//! workspace:
//!
//! ```
//! use smcrypt_algorithms::kdf::{KdfOperation, KeyDerivationFunction, Sm3Kdf};
//!
//! let kdf = Sm3Kdf::new();
//! let direct = kdf.derive_key(b"shared secret", None, 48).unwrap();
//! let built = kdf
//!     .builder()
//!     .with_ikm(b"shared secret")
//!     .with_output_length(48)
//!     .derive()
//!     .unwrap();
//! assert_eq!(direct, built);
//! ```

use crate::error::Result;

pub mod sm3kdf;

pub use sm3kdf::{kdf, Sm3Kdf, Sm3KdfAlgorithm};

/// Marker trait for KDF algorithms
pub trait KdfAlgorithm {
    /// Default output size in bytes
    const DEFAULT_OUTPUT_SIZE: usize;

    /// Static algorithm identifier
    const ALGORITHM_ID: &'static str;

    /// Returns the KDF algorithm name
    fn name() -> String {
        Self::ALGORITHM_ID.to_string()
    }
}

/// Builder-style KDF invocation
pub trait KdfOperation<'a, A: KdfAlgorithm, T = Vec<u8>>: Sized {
    /// Set the input keying material
    fn with_ikm(self, ikm: &'a [u8]) -> Self;

    /// Set the shared info appended to every block input
    fn with_info(self, info: &'a [u8]) -> Self;

    /// Set the desired output length
    fn with_output_length(self, length: usize) -> Self;

    /// Execute the key derivation
    fn derive(self) -> Result<T>;

    /// Execute the key derivation into a fixed-size array
    fn derive_array<const N: usize>(self) -> Result<[u8; N]>;
}

/// Common trait for key derivation functions
pub trait KeyDerivationFunction {
    /// The algorithm this KDF implements
    type Algorithm: KdfAlgorithm;

    /// Creates a new instance
    fn new() -> Self;

    /// Derives `length` bytes from `input`
    ///
    /// # Arguments
    /// * `input` - Input keying material
    /// * `info` - Optional shared info
    /// * `length` - Length of the output in bytes
    fn derive_key(&self, input: &[u8], info: Option<&[u8]>, length: usize) -> Result<Vec<u8>>;

    /// Creates a builder for fluent API usage
    fn builder(&self) -> impl KdfOperation<'_, Self::Algorithm>
    where
        Self: Sized;
}
