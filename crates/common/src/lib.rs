//! Common functionality for the smcrypt library
//!
//! Holds the secret containers every crate uses for key material,
//! ephemeral scalars and intermediate hash state.

pub mod security;

pub use security::{EphemeralSecret, SecretBuffer, SecretVec, SecureZeroingType};
