//! SM2 public-key encryption (GB/T 32918.4)
//!
//! Encryption of M under Q:
//! 1. draw k ∈ [1, n−1]; C1 = k·G
//! 2. (x₂, y₂) = k·Q; t = KDF(x₂ ∥ y₂, |M|), retry if t is all zero
//! 3. C2 = M ⊕ t; C3 = SM3(x₂ ∥ M ∥ y₂)
//!
//! Decryption recovers (x₂, y₂) = d·C1 and checks C3 before releasing any
//! plaintext. The three parts are laid out per [`CiphertextLayout`].

use smcrypt_algorithms::ec::sm2p256::{self as ec, NonceRequest, NonceSource, OsNonce};
use smcrypt_algorithms::hash::sm3;
use smcrypt_algorithms::kdf::sm3kdf;
use smcrypt_api::{error::Error as ApiError, Pke, Result as ApiResult, Serialize};
use smcrypt_internal::constant_time::{ct_eq, ct_is_zero, xor_in_place};
use smcrypt_params::traditional::sm2::{
    SM2_C3_SIZE, SM2_DEFAULT_MAX_ATTEMPTS, SM2_FIELD_ELEMENT_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
    SM2_SCALAR_SIZE,
};
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Length of C1 when the `0x04` marker is omitted
const C1_XY_SIZE: usize = 2 * SM2_FIELD_ELEMENT_SIZE;

/// Order of the C2 and C3 parts after C1
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CipherMode {
    /// `C1 ∥ C3 ∥ C2`, the order of the current standard
    #[default]
    C1C3C2,
    /// `C1 ∥ C2 ∥ C3`, the order of the 2010 draft and older tooling
    C1C2C3,
}

/// Byte layout of an SM2 ciphertext
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CiphertextLayout {
    pub mode: CipherMode,
    /// Whether C1 carries the leading `0x04` (65 bytes) or not (64 bytes)
    pub c1_prefix: bool,
}

impl Default for CiphertextLayout {
    fn default() -> Self {
        Self {
            mode: CipherMode::default(),
            c1_prefix: true,
        }
    }
}

impl CiphertextLayout {
    pub fn new(mode: CipherMode, c1_prefix: bool) -> Self {
        Self { mode, c1_prefix }
    }

    /// Size of the encoded C1
    pub fn c1_len(&self) -> usize {
        if self.c1_prefix {
            SM2_POINT_UNCOMPRESSED_SIZE
        } else {
            C1_XY_SIZE
        }
    }

    /// Smallest non-empty ciphertext: C1 ∥ C3
    pub fn min_len(&self) -> usize {
        self.c1_len() + SM2_C3_SIZE
    }

    fn encode_c1(&self, c1: &ec::Point) -> Vec<u8> {
        let full = c1.serialize_uncompressed();
        if self.c1_prefix {
            full.to_vec()
        } else {
            full[1..].to_vec()
        }
    }

    fn decode_c1(&self, bytes: &[u8]) -> Result<ec::Point> {
        let point = if self.c1_prefix {
            ec::Point::deserialize_uncompressed(bytes)?
        } else {
            ec::Point::from_xy_bytes(bytes)?
        };
        Ok(point)
    }
}

/// SM2 encryption over sm2p256v1 with SM3
pub struct Sm2Pke;

/// Recipient public key, kept both as a point and as `04 ∥ X ∥ Y`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2EncPublicKey {
    point: ec::Point,
    encoded: [u8; SM2_POINT_UNCOMPRESSED_SIZE],
}

/// Recipient private scalar d ∈ [1, n−2]
#[derive(Clone)]
pub struct Sm2EncSecretKey {
    raw: ec::Scalar,
}

/// Encoded ciphertext in the default layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2Ciphertext(pub Vec<u8>);

impl Sm2EncPublicKey {
    /// Wrap a point; the identity and off-curve points are rejected
    pub fn from_point(point: ec::Point) -> ApiResult<Self> {
        if point.is_identity() || !point.is_on_curve() {
            return Err(ApiError::invalid_point(
                "SM2 encryption key",
                "point at infinity or off the curve",
            ));
        }
        let encoded = point.serialize_uncompressed();
        Ok(Self { point, encoded })
    }

    pub fn point(&self) -> &ec::Point {
        &self.point
    }
}

impl AsRef<[u8]> for Sm2EncPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.encoded
    }
}

impl Serialize for Sm2EncPublicKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        let point = match bytes.len() {
            SM2_POINT_UNCOMPRESSED_SIZE => ec::Point::deserialize_uncompressed(bytes),
            C1_XY_SIZE => ec::Point::from_xy_bytes(bytes),
            other => {
                return Err(ApiError::InvalidLength {
                    context: "SM2 encryption key",
                    expected: SM2_POINT_UNCOMPRESSED_SIZE,
                    actual: other,
                })
            }
        };
        Self::from_point(point.map_err(|e| ApiError::from(e).with_context("SM2 encryption key"))?)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.encoded.to_vec()
    }
}

impl Sm2EncSecretKey {
    /// Accepts d ∈ [1, n−2] only
    pub fn from_scalar(raw: ec::Scalar) -> ApiResult<Self> {
        if !raw.is_valid_private_key() {
            return Err(ApiError::validation(
                "SM2 decryption key",
                "must lie in [1, n-2]",
            ));
        }
        Ok(Self { raw })
    }

    /// Parse exactly 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if bytes.len() != SM2_SCALAR_SIZE {
            return Err(ApiError::InvalidLength {
                context: "SM2 decryption key",
                expected: SM2_SCALAR_SIZE,
                actual: bytes.len(),
            });
        }
        let raw = ec::Scalar::from_canonical_bytes(bytes)
            .map_err(|_| ApiError::validation("SM2 decryption key", "must lie in [1, n-2]"))?;
        Self::from_scalar(raw)
    }

    pub fn scalar(&self) -> &ec::Scalar {
        &self.raw
    }

    /// Q = d·G
    pub fn public_key(&self) -> Sm2EncPublicKey {
        let point = ec::scalar_mult_base_g(&self.raw);
        let encoded = point.serialize_uncompressed();
        Sm2EncPublicKey { point, encoded }
    }
}

impl Zeroize for Sm2EncSecretKey {
    fn zeroize(&mut self) {
        self.raw.zeroize();
    }
}

impl Drop for Sm2EncSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for Sm2EncSecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sm2EncSecretKey([REDACTED])")
    }
}

impl AsRef<[u8]> for Sm2Ciphertext {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// x₂ ∥ y₂ of a shared point
fn shared_bytes(shared: &ec::Point) -> Zeroizing<[u8; C1_XY_SIZE]> {
    let mut out = Zeroizing::new([0u8; C1_XY_SIZE]);
    out[..SM2_FIELD_ELEMENT_SIZE].copy_from_slice(&shared.x_coordinate_bytes());
    out[SM2_FIELD_ELEMENT_SIZE..].copy_from_slice(&shared.y_coordinate_bytes());
    out
}

/// C3 = SM3(x₂ ∥ M ∥ y₂)
fn integrity_tag(xy: &[u8; C1_XY_SIZE], message: &[u8]) -> Result<[u8; SM2_C3_SIZE]> {
    let (x2, y2) = xy.split_at(SM2_FIELD_ELEMENT_SIZE);
    Ok(sm3::hash_parts(&[x2, message, y2])?)
}

/// Encrypt `plaintext` to `public`
///
/// An empty plaintext yields an empty ciphertext without drawing a nonce.
/// A nonce whose keystream is all zero is discarded; after `max_attempts`
/// such nonces the call fails with [`Error::EncryptionExhausted`].
pub fn encrypt_with<N: NonceSource + ?Sized>(
    public: &ec::Point,
    plaintext: &[u8],
    nonce: &N,
    max_attempts: u32,
    layout: CiphertextLayout,
) -> Result<Vec<u8>> {
    if max_attempts == 0 {
        return Err(Error::Api(ApiError::validation(
            "SM2 encrypt",
            "max_attempts must be at least 1",
        )));
    }
    if public.is_identity() || !public.is_on_curve() {
        return Err(Error::Api(ApiError::invalid_point(
            "SM2 encrypt",
            "public key is the point at infinity or off the curve",
        )));
    }
    if plaintext.is_empty() {
        return Ok(Vec::new());
    }

    // Deterministic sources key off the recipient and the message
    let context = sm3::hash_parts(&[&public.serialize_uncompressed(), plaintext])?;

    for attempt in 1..=max_attempts {
        let request = NonceRequest::new(&context, attempt);
        let k = nonce.nonce(&request)?;

        let c1 = ec::scalar_mult_base_g(&k);
        let xy = shared_bytes(&ec::scalar_mult(&k, public));
        let mut t = sm3kdf::kdf(xy.as_ref(), plaintext.len())?;
        if ct_is_zero(t.as_slice()) {
            #[cfg(feature = "trace")]
            log::debug!("SM2 encrypt: zero keystream on attempt {}, retrying", attempt);
            continue;
        }

        let c3 = integrity_tag(&xy, plaintext)?;
        xor_in_place(t.as_mut_slice(), plaintext);
        let c2 = t.as_slice();

        let mut out = layout.encode_c1(&c1);
        out.reserve(SM2_C3_SIZE + c2.len());
        match layout.mode {
            CipherMode::C1C3C2 => {
                out.extend_from_slice(&c3);
                out.extend_from_slice(c2);
            }
            CipherMode::C1C2C3 => {
                out.extend_from_slice(c2);
                out.extend_from_slice(&c3);
            }
        }
        return Ok(out);
    }

    #[cfg(feature = "trace")]
    log::warn!("SM2 encrypt: gave up after {} attempts", max_attempts);
    Err(Error::EncryptionExhausted {
        attempts: max_attempts,
    })
}

/// Decrypt `ciphertext` with private scalar `d`
///
/// An empty ciphertext decrypts to an empty plaintext. No plaintext is
/// returned unless C3 matches.
pub fn decrypt_with(
    d: &ec::Scalar,
    ciphertext: &[u8],
    layout: CiphertextLayout,
) -> Result<Vec<u8>> {
    if ciphertext.is_empty() {
        return Ok(Vec::new());
    }
    if ciphertext.len() < layout.min_len() {
        return Err(Error::InvalidCiphertextFormat(
            "ciphertext shorter than C1 and C3",
        ));
    }
    if d.is_zero() {
        return Err(Error::Api(ApiError::validation(
            "SM2 decryption key",
            "must lie in [1, n-2]",
        )));
    }

    let (c1_bytes, rest) = ciphertext.split_at(layout.c1_len());
    let (c3, c2) = match layout.mode {
        CipherMode::C1C3C2 => {
            let (c3, c2) = rest.split_at(SM2_C3_SIZE);
            (c3, c2)
        }
        CipherMode::C1C2C3 => {
            let (c2, c3) = rest.split_at(rest.len() - SM2_C3_SIZE);
            (c3, c2)
        }
    };

    let c1 = layout.decode_c1(c1_bytes)?;
    let shared = ec::scalar_mult(d, &c1);
    if shared.is_identity() {
        return Err(Error::Api(ApiError::invalid_point(
            "SM2 decrypt",
            "shared point at infinity",
        )));
    }
    let xy = shared_bytes(&shared);

    let mut plaintext = sm3kdf::kdf(xy.as_ref(), c2.len())?;
    if !c2.is_empty() && ct_is_zero(plaintext.as_slice()) {
        #[cfg(feature = "trace")]
        log::warn!("SM2 decrypt: zero keystream");
        return Err(Error::ZeroKeystream);
    }
    xor_in_place(plaintext.as_mut_slice(), c2);

    let u = integrity_tag(&xy, plaintext.as_slice())?;
    if !ct_eq(u, c3) {
        #[cfg(feature = "trace")]
        log::warn!("SM2 decrypt: C3 mismatch");
        // `plaintext` is a SecretVec and is wiped as it drops
        return Err(Error::IntegrityCheckFailed);
    }
    Ok(plaintext.into_unprotected())
}

impl Pke for Sm2Pke {
    type PublicKey = Sm2EncPublicKey;
    type SecretKey = Sm2EncSecretKey;
    type Ciphertext = Sm2Ciphertext;

    fn name() -> &'static str {
        "SM2-Encrypt"
    }

    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<(Self::PublicKey, Self::SecretKey)> {
        let (d, q) = ec::generate_keypair(rng)?;
        let public = Sm2EncPublicKey::from_point(q)?;
        Ok((public, Sm2EncSecretKey { raw: d }))
    }

    /// Encrypts in the default `C1 ∥ C3 ∥ C2` layout with nonces drawn from `rng`
    fn encrypt<R: RngCore + CryptoRng>(
        pk_recipient: &Self::PublicKey,
        plaintext: &[u8],
        rng: &mut R,
    ) -> ApiResult<Self::Ciphertext> {
        let nonce = ec::RngNonce::new(rng);
        let ct = encrypt_with(
            &pk_recipient.point,
            plaintext,
            &nonce,
            SM2_DEFAULT_MAX_ATTEMPTS,
            CiphertextLayout::default(),
        )?;
        Ok(Sm2Ciphertext(ct))
    }

    fn decrypt(sk_recipient: &Self::SecretKey, ciphertext: &Self::Ciphertext) -> ApiResult<Vec<u8>> {
        Ok(decrypt_with(
            &sk_recipient.raw,
            &ciphertext.0,
            CiphertextLayout::default(),
        )?)
    }
}

/// Encrypt with OS randomness, the default retry cap and default layout
pub fn encrypt(public: &Sm2EncPublicKey, plaintext: &[u8]) -> ApiResult<Vec<u8>> {
    Ok(encrypt_with(
        &public.point,
        plaintext,
        &OsNonce,
        SM2_DEFAULT_MAX_ATTEMPTS,
        CiphertextLayout::default(),
    )?)
}
