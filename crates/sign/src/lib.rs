//! Digital signature schemes
//!
//! SM2 signatures (GB/T 32918.2): Z-value identity binding, bounded retry
//! with a pluggable nonce source, and DER / raw signature codecs.

#![forbid(unsafe_code)]

pub mod traditional;

pub use traditional::sm2::{
    compute_z, message_digest, sign_message, sign_prehashed, verify_message, verify_prehashed,
    SignatureComponents,
};
pub use traditional::{Sm2Dsa, Sm2PublicKey, Sm2SecretKey, Sm2Signature};
