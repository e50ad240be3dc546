//! Engine configuration

use smcrypt_api::{Error, Result};
use smcrypt_params::traditional::sm2::{
    SM2_DEFAULT_MAX_ATTEMPTS, SM2_DEFAULT_USER_ID, SM2_MAX_USER_ID_LEN,
};
use smcrypt_pke::{CipherMode, CiphertextLayout};

use super::encoding::{SignatureEncoding, SignatureFormat};

/// Settings shared by every operation of one [`Sm2Engine`](super::Sm2Engine)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Sm2Config {
    /// Order of C2 and C3 in ciphertexts
    pub mode: CipherMode,
    /// Nonces tried per sign or encrypt call before giving up
    pub max_attempts: u32,
    /// Identity bound into the Z-value when the caller gives none
    pub user_id: Vec<u8>,
    /// Emit and expect the `0x04` marker on C1
    pub c1_prefix: bool,
    pub signature_encoding: SignatureEncoding,
    pub signature_format: SignatureFormat,
}

impl Default for Sm2Config {
    fn default() -> Self {
        Self {
            mode: CipherMode::C1C3C2,
            max_attempts: SM2_DEFAULT_MAX_ATTEMPTS,
            user_id: SM2_DEFAULT_USER_ID.to_vec(),
            c1_prefix: true,
            signature_encoding: SignatureEncoding::Hex,
            signature_format: SignatureFormat::Der,
        }
    }
}

impl Sm2Config {
    pub fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<Vec<u8>>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_c1_prefix(mut self, c1_prefix: bool) -> Self {
        self.c1_prefix = c1_prefix;
        self
    }

    pub fn with_signature_encoding(mut self, encoding: SignatureEncoding) -> Self {
        self.signature_encoding = encoding;
        self
    }

    pub fn with_signature_format(mut self, format: SignatureFormat) -> Self {
        self.signature_format = format;
        self
    }

    /// The legacy convention: `C1 ∥ C2 ∥ C3` with a prefix-less C1
    pub fn legacy() -> Self {
        Self::default()
            .with_mode(CipherMode::C1C2C3)
            .with_c1_prefix(false)
    }

    /// Reject settings no operation could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::validation(
                "Sm2Config",
                "max_attempts must be at least 1",
            ));
        }
        if self.user_id.len() > SM2_MAX_USER_ID_LEN {
            return Err(Error::validation(
                "Sm2Config",
                format!("user_id longer than {} bytes", SM2_MAX_USER_ID_LEN),
            ));
        }
        Ok(())
    }

    pub fn layout(&self) -> CiphertextLayout {
        CiphertextLayout::new(self.mode, self.c1_prefix)
    }
}
