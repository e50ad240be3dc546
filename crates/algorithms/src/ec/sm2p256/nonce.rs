//! Ephemeral scalar sources for signing and encryption
//!
//! Every sign or encrypt attempt draws a fresh `k` in [1, n−1] through a
//! [`NonceSource`]. [`OsNonce`] is the default. [`RngNonce`] adapts any
//! caller-supplied CSPRNG. [`DeterministicNonce`] exists for reproducible
//! test vectors and must not be used to protect real data.

use std::sync::Mutex;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::constants::SM2_SCALAR_SIZE;
use super::scalar::Scalar;
use crate::error::{Error, Result};
use crate::mac::HmacSm3;
use smcrypt_common::security::EphemeralSecret;

/// Inputs available to a nonce source for one attempt
#[derive(Clone, Copy, Debug)]
pub struct NonceRequest<'a> {
    /// The signer's private scalar; `None` for encryption
    pub secret: Option<&'a Scalar>,
    /// Message-dependent bytes: the digest e when signing, the recipient
    /// key and plaintext length when encrypting
    pub context: &'a [u8],
    /// 1-based attempt number within the retry loop
    pub attempt: u32,
}

impl<'a> NonceRequest<'a> {
    /// Request without a secret scalar
    pub fn new(context: &'a [u8], attempt: u32) -> Self {
        Self {
            secret: None,
            context,
            attempt,
        }
    }

    /// Attach the signer's private scalar
    pub fn with_secret(mut self, secret: &'a Scalar) -> Self {
        self.secret = Some(secret);
        self
    }
}

/// Produces ephemeral scalars uniformly distributed in [1, n−1]
pub trait NonceSource {
    /// Draw the nonce for one attempt
    fn nonce(&self, request: &NonceRequest<'_>) -> Result<Scalar>;
}

impl<T: NonceSource + ?Sized> NonceSource for &T {
    fn nonce(&self, request: &NonceRequest<'_>) -> Result<Scalar> {
        (**self).nonce(request)
    }
}

impl<T: NonceSource + ?Sized> NonceSource for Box<T> {
    fn nonce(&self, request: &NonceRequest<'_>) -> Result<Scalar> {
        (**self).nonce(request)
    }
}

impl<T: NonceSource + ?Sized> NonceSource for std::sync::Arc<T> {
    fn nonce(&self, request: &NonceRequest<'_>) -> Result<Scalar> {
        (**self).nonce(request)
    }
}

/// Rejection-sample a scalar in [1, n−1] from `rng`
pub fn random_scalar<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    context: &'static str,
) -> Result<Scalar> {
    let mut bytes = [0u8; SM2_SCALAR_SIZE];
    loop {
        if let Err(e) = rng.try_fill_bytes(&mut bytes) {
            bytes.zeroize();
            return Err(Error::Rng {
                context,
                details: e.to_string(),
            });
        }
        let candidate = Scalar::deserialize(&bytes);
        bytes.zeroize();
        if let Ok(k) = candidate {
            return Ok(k);
        }
        #[cfg(feature = "trace")]
        log::trace!("{}: sample outside [1, n-1], redrawing", context);
    }
}

/// Nonces from the operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsNonce;

impl NonceSource for OsNonce {
    fn nonce(&self, _request: &NonceRequest<'_>) -> Result<Scalar> {
        random_scalar(&mut OsRng, "OsRng")
    }
}

/// Nonces from a caller-supplied CSPRNG, serialized through a mutex
pub struct RngNonce<R> {
    rng: Mutex<R>,
}

impl<R: RngCore + CryptoRng> RngNonce<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Recover the wrapped generator
    pub fn into_inner(self) -> R {
        match self.rng.into_inner() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<R: RngCore + CryptoRng> NonceSource for RngNonce<R> {
    fn nonce(&self, _request: &NonceRequest<'_>) -> Result<Scalar> {
        let mut rng = self.rng.lock().map_err(|_| Error::Rng {
            context: "RngNonce",
            details: "generator mutex poisoned".into(),
        })?;
        random_scalar(&mut *rng, "RngNonce")
    }
}

impl<R> core::fmt::Debug for RngNonce<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("RngNonce")
    }
}

/// NOT FOR PRODUCTION. Derives k from a fixed seed so that signatures and
/// ciphertexts are reproducible.
///
/// k = HMAC-SM3(seed, d ∥ context ∥ be32(attempt) ∥ be32(counter)), with the
/// counter bumped until the output lands in [1, n−1]. Anyone holding the
/// seed can recompute every nonce, and for encryption the same seed with the
/// same recipient and length repeats k.
#[derive(Clone)]
pub struct DeterministicNonce {
    seed: Vec<u8>,
}

impl DeterministicNonce {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: seed.to_vec(),
        }
    }
}

impl Drop for DeterministicNonce {
    fn drop(&mut self) {
        self.seed.zeroize();
    }
}

impl core::fmt::Debug for DeterministicNonce {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DeterministicNonce([REDACTED])")
    }
}

impl NonceSource for DeterministicNonce {
    fn nonce(&self, request: &NonceRequest<'_>) -> Result<Scalar> {
        let secret = request.secret.map(|d| EphemeralSecret::new(d.serialize()));
        for counter in 0..=u32::MAX {
            let mut mac = HmacSm3::new(&self.seed)?;
            if let Some(d) = secret.as_ref() {
                mac.update(&d[..])?;
            }
            mac.update(request.context)?;
            mac.update(&request.attempt.to_be_bytes())?;
            mac.update(&counter.to_be_bytes())?;
            let mut out = mac.finalize()?;
            let candidate = Scalar::deserialize(&out);
            out.zeroize();
            if let Ok(k) = candidate {
                return Ok(k);
            }
        }
        Err(Error::Processing {
            operation: "DeterministicNonce",
            details: "counter exhausted",
        })
    }
}
