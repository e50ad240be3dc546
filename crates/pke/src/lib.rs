//! Public Key Encryption (PKE) schemes for the smcrypt library.
//!
//! Currently a single scheme: SM2 encryption (GB/T 32918.4), producing
//! `C1 ∥ C3 ∥ C2` by default and the legacy `C1 ∥ C2 ∥ C3` on request.
#![forbid(unsafe_code)]

pub mod error;
pub mod sm2;

// Re-export key items
pub use error::{Error, Result};
pub use sm2::{
    decrypt_with, encrypt_with, CipherMode, CiphertextLayout, Sm2Ciphertext, Sm2EncPublicKey,
    Sm2EncSecretKey, Sm2Pke,
};
