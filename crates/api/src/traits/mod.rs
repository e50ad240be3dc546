//! Traits implemented by the algorithm crates

pub mod pke;
pub mod serialize;
pub mod signature;

pub use pke::Pke;
pub use serialize::{Serialize, SerializeSecret};
pub use signature::{Signature, SignatureDerive};
