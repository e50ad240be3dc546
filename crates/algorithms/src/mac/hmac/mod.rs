//! HMAC (RFC 2104) over the workspace hash functions
//!
//! Instantiated as [`HmacSm3`] for HMAC-SM3. The padded key blocks live in
//! zeroizing buffers and the tag comparison is constant-time.

use crate::error::{Error, Result};
use crate::hash::{HashFunction, Sm3};
use smcrypt_common::security::SecretBuffer;
use smcrypt_internal::constant_time::ct_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Largest supported block size (SM3 uses 64 bytes)
const MAX_BLOCK: usize = 64;

/// HMAC-SM3
pub type HmacSm3 = Hmac<Sm3>;

/// Keyed HMAC state
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Hmac<H: HashFunction> {
    // zeroized by its own Drop
    #[zeroize(skip)]
    hash: H,
    opad: SecretBuffer<MAX_BLOCK>,
    block_size: usize,
    is_finalized: bool,
}

impl<H: HashFunction> Hmac<H> {
    const IPAD_BYTE: u8 = 0x36;
    const OPAD_BYTE: u8 = 0x5c;

    /// Create a new HMAC instance keyed with `key`
    ///
    /// Keys longer than the block size are hashed first, as RFC 2104 requires.
    pub fn new(key: &[u8]) -> Result<Self> {
        let bs = H::block_size();
        if bs > MAX_BLOCK {
            return Err(Error::param("hmac_block_size", "hash block size not supported"));
        }

        let mut k_prime = SecretBuffer::<MAX_BLOCK>::zeroed();
        if key.len() > bs {
            let hashed = H::digest(key)?;
            let hashed = hashed.as_ref();
            k_prime.as_mut_slice()[..hashed.len()].copy_from_slice(hashed);
        } else {
            k_prime.as_mut_slice()[..key.len()].copy_from_slice(key);
        }

        let mut ipad = SecretBuffer::<MAX_BLOCK>::zeroed();
        let mut opad = SecretBuffer::<MAX_BLOCK>::zeroed();
        for ((i, o), k) in ipad
            .as_mut_slice()
            .iter_mut()
            .zip(opad.as_mut_slice().iter_mut())
            .zip(k_prime.as_slice().iter())
            .take(bs)
        {
            *i = k ^ Self::IPAD_BYTE;
            *o = k ^ Self::OPAD_BYTE;
        }

        let mut hash = H::new();
        hash.update(&ipad.as_slice()[..bs])?;

        Ok(Self {
            hash,
            opad,
            block_size: bs,
            is_finalized: false,
        })
    }

    /// Feed additional `data` into the MAC
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if self.is_finalized {
            return Err(Error::param("hmac_state", "Cannot update after finalization"));
        }
        self.hash.update(data).map(|_| ())
    }

    /// Finalise and return the tag
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        if self.is_finalized {
            return Err(Error::param("hmac_state", "HMAC already finalized"));
        }
        self.is_finalized = true;

        let inner = self.hash.finalize()?;

        let mut outer = H::new();
        outer.update(&self.opad.as_slice()[..self.block_size])?;
        outer.update(inner.as_ref())?;
        outer.finalize().map(|out| out.as_ref().to_vec())
    }

    /// One-shot MAC helper
    pub fn mac(key: &[u8], data: &[u8]) -> Result<Vec<u8>> {
        let mut h = Self::new(key)?;
        h.update(data)?;
        h.finalize()
    }

    /// Constant-time verification of `tag` against `key` / `data`
    ///
    /// A tag of the wrong length is rejected.
    pub fn verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<bool> {
        let expected = Self::mac(key, data)?;
        Ok(ct_eq(&expected, tag))
    }
}

#[cfg(test)]
mod tests;
