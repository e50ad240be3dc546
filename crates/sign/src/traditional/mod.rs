//! Traditional (elliptic-curve) signature schemes
//!
//! SM2 digital signatures over sm2p256v1 with SM3 as the hash.

pub mod sm2;

pub use sm2::{Sm2Dsa, Sm2PublicKey, Sm2SecretKey, Sm2Signature};
