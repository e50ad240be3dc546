//! Hex key material
//!
//! Public keys are 130 hex characters starting with `04`, or the 128-character
//! `X ∥ Y` form. Private keys are 64 hex characters, or 66 with a leading
//! `00` as produced by tools that print the scalar as a signed integer. Hex
//! is accepted in either case and is never trimmed.

use smcrypt_api::{Error, Result, Serialize, SerializeSecret};
use smcrypt_sign::{Sm2PublicKey, Sm2SecretKey};
use zeroize::Zeroizing;

use super::encoding::decode_hex;

const PUBLIC_HEX_LEN: usize = 130;
const PUBLIC_XY_HEX_LEN: usize = 128;
const PRIVATE_HEX_LEN: usize = 64;
const PRIVATE_PADDED_HEX_LEN: usize = 66;

/// Parse and validate a public key; off-curve points are `InvalidPoint`
pub fn parse_public_key(text: &str) -> Result<Sm2PublicKey> {
    let digits = match text.len() {
        PUBLIC_HEX_LEN if text.starts_with("04") => text,
        PUBLIC_HEX_LEN => {
            return Err(Error::validation(
                "SM2 public key",
                "130-character key must start with 04",
            ))
        }
        PUBLIC_XY_HEX_LEN => text,
        other => {
            return Err(Error::validation(
                "SM2 public key",
                format!("expected 128 or 130 hex characters, got {}", other),
            ))
        }
    };
    let bytes = decode_hex("SM2 public key", digits.as_bytes())?;
    Sm2PublicKey::from_bytes(&bytes)
}

/// Parse a private key and check it lies in [1, n−2]
pub fn parse_private_key(text: &str) -> Result<Sm2SecretKey> {
    let digits = match text.len() {
        PRIVATE_HEX_LEN => text,
        PRIVATE_PADDED_HEX_LEN if text.starts_with("00") => &text[2..],
        PRIVATE_PADDED_HEX_LEN => {
            return Err(Error::validation(
                "SM2 private key",
                "66-character key must start with 00",
            ))
        }
        other => {
            return Err(Error::validation(
                "SM2 private key",
                format!("expected 64 hex characters, got {}", other),
            ))
        }
    };
    let bytes = Zeroizing::new(decode_hex("SM2 private key", digits.as_bytes())?);
    Sm2SecretKey::from_bytes(&bytes)
}

/// `04 ∥ X ∥ Y` as 130 lowercase hex characters
pub fn public_key_hex(key: &Sm2PublicKey) -> String {
    hex::encode(key.to_uncompressed())
}

/// d as 64 lowercase hex characters
pub fn private_key_hex(key: &Sm2SecretKey) -> Zeroizing<String> {
    let bytes = key.to_bytes_zeroizing();
    Zeroizing::new(hex::encode(bytes.as_slice()))
}
