//! Error handling shared by every smcrypt crate

pub mod types;

pub use types::{Error, Result};

impl From<core::array::TryFromSliceError> for Error {
    fn from(_: core::array::TryFromSliceError) -> Self {
        Self::Validation {
            context: "array conversion",
            message: "slice has the wrong length".into(),
        }
    }
}

// Specialized result types for different operations
pub type KeyResult<T> = Result<T>;
pub type SignatureResult<T> = Result<T>;
pub type CipherResult<T> = Result<T>;
