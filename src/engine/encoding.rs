//! Transport encodings for signatures and ciphertexts

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use smcrypt_api::{Error, Result};

/// Text or binary form of a ciphertext
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Lowercase hex on output; either case accepted on input
    #[default]
    Hex,
    /// Standard alphabet with padding
    Base64,
    /// Bytes as they are
    Raw,
}

impl Encoding {
    /// Encode `bytes`; the text forms come back as their ASCII bytes
    pub fn encode(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Encoding::Hex => hex::encode(bytes).into_bytes(),
            Encoding::Base64 => STANDARD.encode(bytes).into_bytes(),
            Encoding::Raw => bytes.to_vec(),
        }
    }

    pub fn decode(self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Encoding::Hex => decode_hex("ciphertext", input),
            Encoding::Base64 => decode_base64("ciphertext", input),
            Encoding::Raw => Ok(input.to_vec()),
        }
    }
}

/// Text form of a signature
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignatureEncoding {
    #[default]
    Hex,
    Base64,
}

impl SignatureEncoding {
    pub fn encode(self, bytes: &[u8]) -> String {
        match self {
            SignatureEncoding::Hex => hex::encode(bytes),
            SignatureEncoding::Base64 => STANDARD.encode(bytes),
        }
    }

    pub fn decode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            SignatureEncoding::Hex => decode_hex("signature", text.as_bytes()),
            SignatureEncoding::Base64 => decode_base64("signature", text.as_bytes()),
        }
    }
}

/// Binary layout of a signature before text encoding
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SignatureFormat {
    /// `SEQUENCE { INTEGER r, INTEGER s }`
    #[default]
    Der,
    /// Fixed-width `r ∥ s`, 64 bytes
    Raw,
}

pub(crate) fn decode_hex(context: &'static str, input: &[u8]) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| Error::encoding(context, e.to_string()))
}

fn decode_base64(context: &'static str, input: &[u8]) -> Result<Vec<u8>> {
    STANDARD
        .decode(input)
        .map_err(|e| Error::encoding(context, e.to_string()))
}
