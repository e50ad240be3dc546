//! Error handling for PKE operations

use core::fmt;
use smcrypt_algorithms::error::Error as PrimitiveError;
use smcrypt_api::error::Error as CoreError;

/// Error type for PKE operations
#[derive(Debug)]
pub enum Error {
    Primitive(PrimitiveError),
    Api(CoreError),
    /// Ciphertext too short or otherwise unparseable
    InvalidCiphertextFormat(&'static str),
    /// Every encryption attempt produced an all-zero keystream
    EncryptionExhausted { attempts: u32 },
    /// C3 did not match the recomputed tag
    IntegrityCheckFailed,
    /// The KDF produced an all-zero keystream during decryption
    ZeroKeystream,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Primitive(e) => write!(f, "SM2 primitive error: {}", e),
            Error::Api(e) => write!(f, "SM2 API error: {}", e),
            Error::InvalidCiphertextFormat(reason) => {
                write!(f, "Invalid SM2 ciphertext format: {}", reason)
            }
            Error::EncryptionExhausted { attempts } => {
                write!(f, "SM2 encryption failed after {} attempts", attempts)
            }
            Error::IntegrityCheckFailed => write!(f, "SM2 decryption failed: C3 mismatch"),
            Error::ZeroKeystream => write!(f, "SM2 decryption failed: zero keystream"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Primitive(e) => Some(e),
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PrimitiveError> for Error {
    fn from(err: PrimitiveError) -> Self {
        Error::Primitive(err)
    }
}

impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        Error::Api(err)
    }
}

// Conversion from PKE Error to API Error
impl From<Error> for CoreError {
    fn from(err: Error) -> Self {
        match err {
            Error::Primitive(e) => e.into(),
            Error::Api(e) => e,
            Error::InvalidCiphertextFormat(reason) => CoreError::Validation {
                context: "SM2 ciphertext",
                message: reason.to_string(),
            },
            Error::EncryptionExhausted { attempts } => CoreError::EncryptionGeneration { attempts },
            // a zero keystream on decrypt can only come from a forged C1
            Error::IntegrityCheckFailed | Error::ZeroKeystream => CoreError::DecryptionIntegrity,
        }
    }
}

/// Result type for PKE operations
pub type Result<T> = core::result::Result<T, Error>;
