//! SM3 key derivation function (GB/T 32918.4 section 5.4.3)
//!
//! `K = SM3(Z ‖ ct₁) ‖ SM3(Z ‖ ct₂) ‖ …` truncated to the requested length,
//! where `ctᵢ` is a 32-bit big-endian counter starting at 1. When shared
//! info is supplied it follows the counter, as in ANSI X9.63. SM2
//! encryption uses it with no info as an XOR keystream.

use zeroize::Zeroizing;

use super::{KdfAlgorithm, KdfOperation, KeyDerivationFunction};
use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sm3};
use smcrypt_common::security::SecretVec;
use smcrypt_params::utils::hash::SM3_OUTPUT_SIZE;

/// Marker type for the SM3 KDF
pub enum Sm3KdfAlgorithm {}

impl KdfAlgorithm for Sm3KdfAlgorithm {
    const DEFAULT_OUTPUT_SIZE: usize = 32;
    const ALGORITHM_ID: &'static str = "SM3-KDF";
}

/// SM3 counter-mode KDF
#[derive(Clone, Copy, Debug, Default)]
pub struct Sm3Kdf;

/// Derive `klen` bytes from `z`
///
/// `klen == 0` yields an empty buffer. Fails when `klen` would need more
/// than 2³²−1 counter blocks.
pub fn kdf(z: &[u8], klen: usize) -> Result<SecretVec> {
    derive(z, &[], klen)
}

fn derive(z: &[u8], info: &[u8], klen: usize) -> Result<SecretVec> {
    let blocks = klen.div_ceil(SM3_OUTPUT_SIZE);
    if blocks as u64 > u32::MAX as u64 {
        return Err(Error::param("klen", "output needs more than 2^32-1 blocks"));
    }

    let mut out = SecretVec::with_capacity(blocks * SM3_OUTPUT_SIZE);
    let mut hasher = Sm3::new();
    for ct in 1..=blocks as u32 {
        hasher.update(z)?;
        hasher.update(&ct.to_be_bytes())?;
        hasher.update(info)?;
        let block = Zeroizing::new(hasher.finalize()?);
        out.extend_from_slice(block.as_ref());
    }
    out.truncate(klen);
    Ok(out)
}

impl KeyDerivationFunction for Sm3Kdf {
    type Algorithm = Sm3KdfAlgorithm;

    fn new() -> Self {
        Sm3Kdf
    }

    fn derive_key(&self, input: &[u8], info: Option<&[u8]>, length: usize) -> Result<Vec<u8>> {
        derive(input, info.unwrap_or(&[]), length).map(SecretVec::into_unprotected)
    }

    fn builder(&self) -> impl KdfOperation<'_, Self::Algorithm> {
        Sm3KdfOperation {
            ikm: &[],
            info: &[],
            length: Sm3KdfAlgorithm::DEFAULT_OUTPUT_SIZE,
        }
    }
}

/// Builder returned by [`Sm3Kdf::builder`](KeyDerivationFunction::builder)
pub struct Sm3KdfOperation<'a> {
    ikm: &'a [u8],
    info: &'a [u8],
    length: usize,
}

impl<'a> KdfOperation<'a, Sm3KdfAlgorithm> for Sm3KdfOperation<'a> {
    fn with_ikm(mut self, ikm: &'a [u8]) -> Self {
        self.ikm = ikm;
        self
    }

    fn with_info(mut self, info: &'a [u8]) -> Self {
        self.info = info;
        self
    }

    fn with_output_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    fn derive(self) -> Result<Vec<u8>> {
        derive(self.ikm, self.info, self.length).map(SecretVec::into_unprotected)
    }

    fn derive_array<const N: usize>(self) -> Result<[u8; N]> {
        let out = derive(self.ikm, self.info, N)?;
        let mut arr = [0u8; N];
        arr.copy_from_slice(out.as_slice());
        Ok(arr)
    }
}

#[cfg(test)]
mod tests;
