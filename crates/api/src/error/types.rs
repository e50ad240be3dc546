//! Error type definitions for SM2 / SM3 operations

use std::string::String;
use thiserror::Error as ThisError;

/// Primary error type for cryptographic operations
///
/// Every failure surfaces at the point of detection. No operation returns a
/// default or partial result in place of an error.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Malformed input: key length or prefix, out-of-range scalar,
    /// truncated ciphertext, bad configuration value
    #[error("{context}: {message}")]
    Validation {
        context: &'static str,
        message: String,
    },

    /// Input with a fixed length had the wrong one
    #[error("{context}: invalid length (expected {expected}, got {actual})")]
    InvalidLength {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Hex or base64 transport decoding failed
    #[error("{context}: malformed encoding: {message}")]
    Encoding {
        context: &'static str,
        message: String,
    },

    /// A point is not on the curve, is the identity where that is not
    /// allowed, or has a coordinate outside the field
    #[error("invalid point: {context}: {message}")]
    InvalidPoint {
        context: &'static str,
        message: String,
    },

    /// Every signing attempt produced a degenerate value
    #[error("signature generation failed after {attempts} attempts")]
    SignatureGeneration { attempts: u32 },

    /// Every encryption attempt produced an all-zero keystream
    #[error("encryption failed after {attempts} attempts")]
    EncryptionGeneration { attempts: u32 },

    /// Malformed DER or raw signature bytes
    #[error("malformed signature: {context}: {message}")]
    SignatureFormat {
        context: &'static str,
        message: String,
    },

    /// A well-formed signature did not verify. Only the `Signature` trait
    /// reports this; the engine's `verify` returns `false` instead.
    #[error("signature verification failed")]
    VerificationFailed,

    /// C3 did not match: the ciphertext was tampered with or the wrong key
    /// was used
    #[error("decryption failed: integrity check mismatch")]
    DecryptionIntegrity,

    /// The nonce source could not produce a scalar
    #[error("random generation error: {context}: {message}")]
    RandomGeneration {
        context: &'static str,
        message: String,
    },

    /// Anything that does not fit the categories above
    #[error("{context}: {message}")]
    Other {
        context: &'static str,
        message: String,
    },
}

/// Result type for cryptographic operations
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Shorthand for [`Error::Validation`]
    pub fn validation(context: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::InvalidPoint`]
    pub fn invalid_point(context: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidPoint {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::SignatureFormat`]
    pub fn signature_format(context: &'static str, message: impl Into<String>) -> Self {
        Self::SignatureFormat {
            context,
            message: message.into(),
        }
    }

    /// Shorthand for [`Error::Encoding`]
    pub fn encoding(context: &'static str, message: impl Into<String>) -> Self {
        Self::Encoding {
            context,
            message: message.into(),
        }
    }

    /// Replace the context of an existing error, keeping its message
    pub fn with_context(self, context: &'static str) -> Self {
        match self {
            Self::Validation { message, .. } => Self::Validation { context, message },
            Self::InvalidLength {
                expected, actual, ..
            } => Self::InvalidLength {
                context,
                expected,
                actual,
            },
            Self::Encoding { message, .. } => Self::Encoding { context, message },
            Self::InvalidPoint { message, .. } => Self::InvalidPoint { context, message },
            Self::SignatureFormat { message, .. } => Self::SignatureFormat { context, message },
            Self::RandomGeneration { message, .. } => Self::RandomGeneration { context, message },
            Self::Other { message, .. } => Self::Other { context, message },
            other => other,
        }
    }

    /// True for the malformed-input family (validation, length, encoding)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::InvalidLength { .. } | Self::Encoding { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::SignatureGeneration { attempts: 5 };
        assert_eq!(err.to_string(), "signature generation failed after 5 attempts");

        let err = Error::InvalidLength {
            context: "public key",
            expected: 65,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "public key: invalid length (expected 65, got 12)"
        );

        assert_eq!(
            Error::DecryptionIntegrity.to_string(),
            "decryption failed: integrity check mismatch"
        );
    }

    #[test]
    fn test_with_context_keeps_message() {
        let err = Error::validation("inner", "bad prefix").with_context("outer");
        assert_eq!(
            err,
            Error::Validation {
                context: "outer",
                message: "bad prefix".into()
            }
        );
        assert!(err.is_validation());
        assert!(!Error::DecryptionIntegrity.is_validation());
    }
}
