//! SM2 digital signature algorithm (GB/T 32918.2)
//!
//! Signing:
//! 1. Z = SM3(ENTL ∥ ID ∥ a ∥ b ∥ Gx ∥ Gy ∥ Qx ∥ Qy)
//! 2. e = SM3(Z ∥ M) mod n
//! 3. draw k ∈ [1, n−1]; (x₁, y₁) = k·G
//! 4. r = (e + x₁) mod n; retry if r = 0 or r + k = n
//! 5. s = (1 + d)⁻¹·(k − r·d) mod n; retry if s = 0
//!
//! Verification recomputes e, forms t = (r + s) mod n and accepts iff
//! (e + x₁) mod n = r for (x₁, y₁) = s·G + t·Q.
//!
//! The retry loop is bounded. Running out of attempts is
//! [`Error::SignatureGeneration`](smcrypt_api::Error::SignatureGeneration).

mod der;

pub use der::SignatureComponents;

use smcrypt_algorithms::ec::sm2p256::{self as ec, NonceRequest, NonceSource, OsNonce};
use smcrypt_algorithms::error::to_core_result;
use smcrypt_algorithms::hash::sm3;
use smcrypt_api::{
    error::Error as ApiError, Result as ApiResult, Serialize, SerializeSecret,
    Signature as SignatureTrait, SignatureDerive,
};
use smcrypt_internal::constant_time::ct_eq;
use smcrypt_params::traditional::sm2::{
    SM2P256V1, SM2_DEFAULT_MAX_ATTEMPTS, SM2_DEFAULT_USER_ID, SM2_MAX_USER_ID_LEN,
    SM2_POINT_UNCOMPRESSED_SIZE, SM2_SCALAR_SIZE,
};
use smcrypt_params::utils::hash::SM3_OUTPUT_SIZE;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, Zeroizing};

/// SM2 signature scheme over sm2p256v1 with SM3
pub struct Sm2Dsa;

/// SM2 public key in uncompressed format (0x04 ∥ X ∥ Y)
///
/// Always holds a point that passed the on-curve check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2PublicKey {
    point: ec::Point,
}

/// SM2 private key d ∈ [1, n−2], stored with its public point so the
/// Z-value can be formed without another scalar multiplication
#[derive(Clone)]
pub struct Sm2SecretKey {
    raw: ec::Scalar,
    public: ec::Point,
}

/// DER-encoded SM2 signature
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sm2Signature(pub Vec<u8>);

impl Sm2PublicKey {
    /// Wrap a validated point; the identity is rejected
    pub fn from_point(point: ec::Point) -> ApiResult<Self> {
        if point.is_identity() || !point.is_on_curve() {
            return Err(ApiError::invalid_point(
                "SM2 public key",
                "point at infinity or off the curve",
            ));
        }
        Ok(Self { point })
    }

    /// Parse `04 ∥ X ∥ Y` (65 bytes) or the prefix-less `X ∥ Y` (64 bytes)
    pub fn from_sec1_bytes(bytes: &[u8]) -> ApiResult<Self> {
        let point = match bytes.len() {
            SM2_POINT_UNCOMPRESSED_SIZE => ec::Point::deserialize_uncompressed(bytes),
            64 => ec::Point::from_xy_bytes(bytes),
            other => {
                return Err(ApiError::InvalidLength {
                    context: "SM2 public key",
                    expected: SM2_POINT_UNCOMPRESSED_SIZE,
                    actual: other,
                })
            }
        };
        Self::from_point(to_core_result(point, "SM2 public key")?)
    }

    /// The underlying curve point
    pub fn point(&self) -> &ec::Point {
        &self.point
    }

    /// `04 ∥ X ∥ Y`
    pub fn to_uncompressed(&self) -> [u8; SM2_POINT_UNCOMPRESSED_SIZE] {
        self.point.serialize_uncompressed()
    }
}

impl Serialize for Sm2PublicKey {
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        Self::from_sec1_bytes(bytes)
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_uncompressed().to_vec()
    }
}

impl Sm2SecretKey {
    /// Build a secret key from a scalar, checking 1 ≤ d ≤ n−2
    pub fn from_scalar(raw: ec::Scalar) -> ApiResult<Self> {
        let public = to_core_result(ec::public_key(&raw), "SM2 private key")?;
        Ok(Self { raw, public })
    }

    /// The private scalar d
    pub fn scalar(&self) -> &ec::Scalar {
        &self.raw
    }

    /// Q = d·G
    pub fn public_key(&self) -> Sm2PublicKey {
        Sm2PublicKey {
            point: self.public.clone(),
        }
    }
}

impl SerializeSecret for Sm2SecretKey {
    /// Exactly 32 big-endian bytes; values outside [1, n−2] are rejected
    fn from_bytes(bytes: &[u8]) -> ApiResult<Self> {
        if bytes.len() != SM2_SCALAR_SIZE {
            return Err(ApiError::InvalidLength {
                context: "SM2 private key",
                expected: SM2_SCALAR_SIZE,
                actual: bytes.len(),
            });
        }
        let raw = ec::Scalar::from_canonical_bytes(bytes)
            .map_err(|_| ApiError::validation("SM2 private key", "must lie in [1, n-2]"))?;
        Self::from_scalar(raw)
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.raw.serialize().to_vec())
    }
}

impl Zeroize for Sm2SecretKey {
    fn zeroize(&mut self) {
        self.raw.zeroize();
    }
}

impl Drop for Sm2SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl core::fmt::Debug for Sm2SecretKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Sm2SecretKey([REDACTED])")
    }
}

impl AsRef<[u8]> for Sm2Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Z = SM3(ENTL ∥ ID ∥ a ∥ b ∥ Gx ∥ Gy ∥ Qx ∥ Qy)
///
/// ENTL is the bit length of `user_id` as a 16-bit big-endian integer, so
/// identities longer than 8191 bytes are rejected.
pub fn compute_z(user_id: &[u8], public: &ec::Point) -> ApiResult<[u8; SM3_OUTPUT_SIZE]> {
    if user_id.len() > SM2_MAX_USER_ID_LEN {
        return Err(ApiError::validation(
            "SM2 user id",
            format!(
                "identity is {} bytes, at most {} allowed",
                user_id.len(),
                SM2_MAX_USER_ID_LEN
            ),
        ));
    }
    let entl = ((user_id.len() * 8) as u16).to_be_bytes();
    let qx = public.x_coordinate_bytes();
    let qy = public.y_coordinate_bytes();
    to_core_result(
        sm3::hash_parts(&[
            &entl,
            user_id,
            &SM2P256V1.a,
            &SM2P256V1.b,
            &SM2P256V1.g_x,
            &SM2P256V1.g_y,
            &qx,
            &qy,
        ]),
        "SM2 Z-value",
    )
}

/// e = SM3(Z ∥ M) mod n
pub fn message_digest(
    message: &[u8],
    user_id: &[u8],
    public: &ec::Point,
) -> ApiResult<ec::Scalar> {
    let z = compute_z(user_id, public)?;
    let e = to_core_result(sm3::hash_parts(&[&z, message]), "SM2 message digest")?;
    Ok(ec::Scalar::from_bytes_reduced(&e))
}

/// Sign a precomputed digest e with private scalar d
///
/// Draws up to `max_attempts` nonces from `nonce`; a nonce that yields
/// r = 0, r + k = n or s = 0 is discarded and the next attempt begins.
pub fn sign_prehashed<N: NonceSource + ?Sized>(
    e: &ec::Scalar,
    d: &ec::Scalar,
    nonce: &N,
    max_attempts: u32,
) -> ApiResult<SignatureComponents> {
    if max_attempts == 0 {
        return Err(ApiError::validation(
            "SM2 sign",
            "max_attempts must be at least 1",
        ));
    }
    if !d.is_valid_private_key() {
        return Err(ApiError::validation("SM2 private key", "must lie in [1, n-2]"));
    }

    let e_bytes = e.serialize();
    // (1 + d)⁻¹ is fixed across attempts
    let inv_one_plus_d = to_core_result(
        ec::Scalar::one().add_mod_n(d).inv_mod_n(),
        "SM2 sign",
    )?;

    for attempt in 1..=max_attempts {
        let request = NonceRequest::new(&e_bytes, attempt).with_secret(d);
        let k = to_core_result(nonce.nonce(&request), "SM2 nonce")?;

        let x1 = ec::scalar_mult_base_g(&k).x_coordinate_bytes();
        let r = e.add_mod_n(&ec::Scalar::from_bytes_reduced(&x1));
        if r.is_zero() || r.add_mod_n(&k).is_zero() {
            #[cfg(feature = "trace")]
            log::debug!("SM2 sign: degenerate r on attempt {}, retrying", attempt);
            continue;
        }

        let s = inv_one_plus_d.mul_mod_n(&k.sub_mod_n(&r.mul_mod_n(d)));
        if s.is_zero() {
            #[cfg(feature = "trace")]
            log::debug!("SM2 sign: degenerate s on attempt {}, retrying", attempt);
            continue;
        }

        return Ok(SignatureComponents {
            r: r.serialize(),
            s: s.serialize(),
        });
    }

    #[cfg(feature = "trace")]
    log::warn!("SM2 sign: gave up after {} attempts", max_attempts);
    Err(ApiError::SignatureGeneration {
        attempts: max_attempts,
    })
}

/// Sign `message` under `user_id`
pub fn sign_message<N: NonceSource + ?Sized>(
    message: &[u8],
    user_id: &[u8],
    secret_key: &Sm2SecretKey,
    nonce: &N,
    max_attempts: u32,
) -> ApiResult<SignatureComponents> {
    let e = message_digest(message, user_id, &secret_key.public)?;
    sign_prehashed(&e, &secret_key.raw, nonce, max_attempts)
}

/// Check (r, s) against a precomputed digest
///
/// Returns false for any r or s outside [1, n−1], for t = 0 and for a
/// verification point at infinity.
pub fn verify_prehashed(e: &ec::Scalar, sig: &SignatureComponents, public: &ec::Point) -> bool {
    let (r, s) = match (
        ec::Scalar::deserialize(&sig.r),
        ec::Scalar::deserialize(&sig.s),
    ) {
        (Ok(r), Ok(s)) => (r, s),
        _ => return false,
    };
    if public.is_identity() {
        return false;
    }

    let t = r.add_mod_n(&s);
    if t.is_zero() {
        return false;
    }

    let point = ec::scalar_mult_base_g(&s).add(&ec::scalar_mult(&t, public));
    if point.is_identity() {
        return false;
    }

    let x1 = ec::Scalar::from_bytes_reduced(&point.x_coordinate_bytes());
    let expected = e.add_mod_n(&x1);
    ct_eq(expected.serialize(), r.serialize())
}

/// Verify `sig` over `message` under `user_id`; never errors
pub fn verify_message(
    message: &[u8],
    user_id: &[u8],
    sig: &SignatureComponents,
    public_key: &Sm2PublicKey,
) -> bool {
    match message_digest(message, user_id, &public_key.point) {
        Ok(e) => verify_prehashed(&e, sig, &public_key.point),
        Err(_) => false,
    }
}

impl SignatureTrait for Sm2Dsa {
    type PublicKey = Sm2PublicKey;
    type SecretKey = Sm2SecretKey;
    type SignatureData = Sm2Signature;
    type KeyPair = (Self::PublicKey, Self::SecretKey);

    fn name() -> &'static str {
        "SM2"
    }

    /// Generate d uniformly in [1, n−2] and Q = d·G
    fn keypair<R: CryptoRng + RngCore>(rng: &mut R) -> ApiResult<Self::KeyPair> {
        let (d, q) = to_core_result(ec::generate_keypair(rng), "SM2 keypair")?;
        let public = Sm2PublicKey { point: q.clone() };
        Ok((public, Sm2SecretKey { raw: d, public: q }))
    }

    fn public_key(keypair: &Self::KeyPair) -> Self::PublicKey {
        keypair.0.clone()
    }

    fn secret_key(keypair: &Self::KeyPair) -> Self::SecretKey {
        keypair.1.clone()
    }

    /// Sign with the default identity, OS randomness and the default retry cap
    fn sign(message: &[u8], secret_key: &Self::SecretKey) -> ApiResult<Self::SignatureData> {
        let sig = sign_message(
            message,
            SM2_DEFAULT_USER_ID,
            secret_key,
            &OsNonce,
            SM2_DEFAULT_MAX_ATTEMPTS,
        )?;
        Ok(Sm2Signature(sig.to_der()))
    }

    fn verify(
        message: &[u8],
        signature: &Self::SignatureData,
        public_key: &Self::PublicKey,
    ) -> ApiResult<()> {
        let sig = SignatureComponents::from_der(&signature.0)?;
        if verify_message(message, SM2_DEFAULT_USER_ID, &sig, public_key) {
            Ok(())
        } else {
            Err(ApiError::VerificationFailed)
        }
    }
}

impl SignatureDerive for Sm2Dsa {
    fn derive_public_key(secret_key: &Self::SecretKey) -> ApiResult<Self::PublicKey> {
        Ok(secret_key.public_key())
    }
}
