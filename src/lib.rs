//! # smcrypt
//!
//! SM2 public-key cryptography (GB/T 32918) and the SM3 hash (GB/T 32905) in
//! pure Rust.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! smcrypt = "0.3"
//! ```
//!
//! ```no_run
//! use smcrypt::prelude::*;
//!
//! let engine = Sm2Engine::new(Sm2Config::default())?;
//! let keys = engine.generate_keypair()?;
//!
//! let sig = engine.sign(&keys.private_key_hex(), b"hello")?;
//! assert!(engine.verify(&keys.public_key_hex(), b"hello", &sig.to_hex()));
//!
//! let ct = engine.encrypt(&keys.public_key_hex(), b"secret")?;
//! assert_eq!(engine.decrypt(&keys.private_key_hex(), &ct)?, b"secret");
//! # Ok::<(), smcrypt::api::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default)
//! - `trace`: diagnostics through the `log` facade; key material, nonces
//!   and plaintext are never logged
//! - `serde`: `Serialize` / `Deserialize` for the configuration types
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`smcrypt-algorithms`]: curve arithmetic, SM3, HMAC-SM3, the SM3 KDF
//! - [`smcrypt-sign`]: SM2 signatures
//! - [`smcrypt-pke`]: SM2 encryption
//!
//! and adds [`Sm2Engine`](engine::Sm2Engine), which works on hex key
//! material and configurable wire formats.

#![forbid(unsafe_code)]

pub mod engine;

// Core re-exports
pub use smcrypt_algorithms as algorithms;
pub use smcrypt_api as api;
pub use smcrypt_common as common;
pub use smcrypt_internal as internal;
pub use smcrypt_params as params;
pub use smcrypt_pke as pke;
pub use smcrypt_sign as sign;

pub use engine::{
    Encoding, KeyCache, KeyPair, Signature, SignatureEncoding, SignatureFormat, Sm2Config,
    Sm2Engine,
};

/// Common imports for smcrypt users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    pub use crate::engine::{
        Encoding, KeyCache, KeyPair, Signature, SignatureEncoding, SignatureFormat, Sm2Config,
        Sm2Engine,
    };
    pub use crate::pke::CipherMode;

    pub use crate::algorithms::ec::sm2p256::{DeterministicNonce, NonceSource, OsNonce, RngNonce};
    pub use crate::algorithms::hash::{sm3, HashFunction, Sm3};

    // Re-export security types
    pub use crate::common::security::{EphemeralSecret, SecretBuffer, SecretVec};
}
