//! SM2 engine: hex keys in, encoded signatures and ciphertexts out
//!
//! [`Sm2Engine`] bundles an [`Sm2Config`] with a nonce source. Every method
//! takes `&self`, so an engine whose nonce source is `Send + Sync` can be
//! shared across threads behind an `Arc` or a plain reference.

mod cache;
mod config;
mod encoding;
mod keys;

pub use cache::{KeyCache, DEFAULT_KEY_CACHE_CAPACITY};
pub use config::Sm2Config;
pub use encoding::{Encoding, SignatureEncoding, SignatureFormat};
pub use keys::{parse_private_key, parse_public_key, private_key_hex, public_key_hex};

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use smcrypt_algorithms::ec::sm2p256::{DeterministicNonce, NonceSource, OsNonce};
use smcrypt_api::{Result, Signature as _};
use smcrypt_pke::{decrypt_with, encrypt_with};
use smcrypt_sign::{sign_message, verify_message, SignatureComponents, Sm2Dsa};
use smcrypt_sign::{Sm2PublicKey, Sm2SecretKey};
use zeroize::Zeroizing;

/// A freshly generated or imported key pair
#[derive(Clone)]
pub struct KeyPair {
    secret: Sm2SecretKey,
    public: Sm2PublicKey,
}

impl KeyPair {
    pub fn from_secret(secret: Sm2SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn secret_key(&self) -> &Sm2SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &Sm2PublicKey {
        &self.public
    }

    /// 64 lowercase hex characters
    pub fn private_key_hex(&self) -> Zeroizing<String> {
        private_key_hex(&self.secret)
    }

    /// `04 ∥ X ∥ Y` as 130 lowercase hex characters
    pub fn public_key_hex(&self) -> String {
        public_key_hex(&self.public)
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

/// An SM2 signature (r, s)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    components: SignatureComponents,
}

impl Signature {
    pub fn from_components(components: SignatureComponents) -> Self {
        Self { components }
    }

    /// Strict DER parse
    pub fn from_der(der: &[u8]) -> Result<Self> {
        SignatureComponents::from_der(der).map(Self::from_components)
    }

    /// 64-byte `r ∥ s`
    pub fn from_raw(raw: &[u8]) -> Result<Self> {
        SignatureComponents::from_raw(raw).map(Self::from_components)
    }

    /// Decode text produced by [`Signature::encode`] with the same settings
    pub fn decode(text: &str, encoding: SignatureEncoding, format: SignatureFormat) -> Result<Self> {
        let bytes = encoding.decode(text)?;
        match format {
            SignatureFormat::Der => Self::from_der(&bytes),
            SignatureFormat::Raw => Self::from_raw(&bytes),
        }
    }

    pub fn components(&self) -> &SignatureComponents {
        &self.components
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.components.to_der()
    }

    pub fn to_raw(&self) -> [u8; 64] {
        self.components.to_raw()
    }

    /// DER as lowercase hex
    pub fn to_hex(&self) -> String {
        SignatureEncoding::Hex.encode(&self.to_der())
    }

    /// DER as standard base64
    pub fn to_base64(&self) -> String {
        SignatureEncoding::Base64.encode(&self.to_der())
    }

    pub fn encode(&self, encoding: SignatureEncoding, format: SignatureFormat) -> String {
        match format {
            SignatureFormat::Der => encoding.encode(&self.to_der()),
            SignatureFormat::Raw => encoding.encode(&self.to_raw()),
        }
    }
}

/// SM2 sign / verify / encrypt / decrypt over hex key material
#[derive(Debug)]
pub struct Sm2Engine<N = OsNonce> {
    config: Sm2Config,
    nonce: N,
}

impl Sm2Engine<OsNonce> {
    /// Engine drawing nonces from the OS CSPRNG
    pub fn new(config: Sm2Config) -> Result<Self> {
        Self::with_nonce_source(config, OsNonce)
    }
}

impl Default for Sm2Engine<OsNonce> {
    fn default() -> Self {
        Self {
            config: Sm2Config::default(),
            nonce: OsNonce,
        }
    }
}

impl Sm2Engine<DeterministicNonce> {
    /// NOT FOR PRODUCTION. Signatures and ciphertexts become a function of
    /// `seed` and the inputs; anyone holding the seed can recover the nonces
    /// and with them the private key.
    pub fn deterministic(config: Sm2Config, seed: &[u8]) -> Result<Self> {
        #[cfg(feature = "trace")]
        log::warn!("Sm2Engine: deterministic nonces enabled");
        Self::with_nonce_source(config, DeterministicNonce::new(seed))
    }
}

impl<N: NonceSource> Sm2Engine<N> {
    pub fn with_nonce_source(config: Sm2Config, nonce: N) -> Result<Self> {
        config.validate()?;
        #[cfg(feature = "trace")]
        log::debug!(
            "Sm2Engine: mode {:?}, c1_prefix {}, max_attempts {}",
            config.mode,
            config.c1_prefix,
            config.max_attempts
        );
        Ok(Self { config, nonce })
    }

    pub fn config(&self) -> &Sm2Config {
        &self.config
    }

    /// Generate a key pair from the OS CSPRNG
    pub fn generate_keypair(&self) -> Result<KeyPair> {
        self.generate_keypair_with(&mut OsRng)
    }

    pub fn generate_keypair_with<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<KeyPair> {
        let (public, secret) = Sm2Dsa::keypair(rng)?;
        Ok(KeyPair { secret, public })
    }

    /// Derive `04 ∥ X ∥ Y` hex from a private key
    pub fn public_key_from_private(&self, private_hex: &str) -> Result<String> {
        let secret = parse_private_key(private_hex)?;
        Ok(public_key_hex(&secret.public_key()))
    }

    /// Sign under the configured identity
    pub fn sign(&self, private_hex: &str, message: &[u8]) -> Result<Signature> {
        self.sign_with_id(private_hex, message, &self.config.user_id)
    }

    pub fn sign_with_id(
        &self,
        private_hex: &str,
        message: &[u8],
        user_id: &[u8],
    ) -> Result<Signature> {
        let secret = parse_private_key(private_hex)?;
        self.sign_with_key(&secret, message, user_id)
    }

    pub fn sign_with_key(
        &self,
        secret: &Sm2SecretKey,
        message: &[u8],
        user_id: &[u8],
    ) -> Result<Signature> {
        let components = sign_message(
            message,
            user_id,
            secret,
            &self.nonce,
            self.config.max_attempts,
        )?;
        Ok(Signature::from_components(components))
    }

    /// Sign and render per `signature_encoding` / `signature_format`
    pub fn sign_to_string(&self, private_hex: &str, message: &[u8]) -> Result<String> {
        let sig = self.sign(private_hex, message)?;
        Ok(self.format_signature(&sig))
    }

    pub fn format_signature(&self, signature: &Signature) -> String {
        signature.encode(self.config.signature_encoding, self.config.signature_format)
    }

    /// Verify under the configured identity
    ///
    /// `signature` is text in the configured encoding and format. Any
    /// malformed key or signature yields false.
    pub fn verify(&self, public_hex: &str, message: &[u8], signature: &str) -> bool {
        self.verify_with_id(public_hex, message, signature, &self.config.user_id)
    }

    pub fn verify_with_id(
        &self,
        public_hex: &str,
        message: &[u8],
        signature: &str,
        user_id: &[u8],
    ) -> bool {
        match parse_public_key(public_hex) {
            Ok(public) => self.verify_with_key(&public, message, signature, user_id),
            Err(_) => false,
        }
    }

    pub fn verify_with_key(
        &self,
        public: &Sm2PublicKey,
        message: &[u8],
        signature: &str,
        user_id: &[u8],
    ) -> bool {
        match Signature::decode(
            signature,
            self.config.signature_encoding,
            self.config.signature_format,
        ) {
            Ok(sig) => self.verify_signature(public, message, &sig, user_id),
            Err(_) => false,
        }
    }

    /// Verify an already decoded signature
    pub fn verify_signature(
        &self,
        public: &Sm2PublicKey,
        message: &[u8],
        signature: &Signature,
        user_id: &[u8],
    ) -> bool {
        verify_message(message, user_id, &signature.components, public)
    }

    /// Verify with the public key looked up in a caller-owned cache
    pub fn verify_cached(
        &self,
        cache: &mut KeyCache,
        public_hex: &str,
        message: &[u8],
        signature: &str,
    ) -> bool {
        match cache.get_or_parse(public_hex) {
            Ok(public) => self.verify_with_key(&public, message, signature, &self.config.user_id),
            Err(_) => false,
        }
    }

    /// Encrypt to raw ciphertext bytes in the configured layout
    pub fn encrypt(&self, public_hex: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        let public = parse_public_key(public_hex)?;
        self.encrypt_with_key(&public, plaintext)
    }

    pub fn encrypt_with_key(&self, public: &Sm2PublicKey, plaintext: &[u8]) -> Result<Vec<u8>> {
        Ok(encrypt_with(
            public.point(),
            plaintext,
            &self.nonce,
            self.config.max_attempts,
            self.config.layout(),
        )?)
    }

    /// Encrypt and encode; hex and base64 come back as ASCII bytes
    pub fn encrypt_to(
        &self,
        public_hex: &str,
        plaintext: &[u8],
        encoding: Encoding,
    ) -> Result<Vec<u8>> {
        let ct = self.encrypt(public_hex, plaintext)?;
        Ok(encoding.encode(&ct))
    }

    /// Decrypt raw ciphertext bytes in the configured layout
    pub fn decrypt(&self, private_hex: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let secret = parse_private_key(private_hex)?;
        self.decrypt_with_key(&secret, ciphertext)
    }

    pub fn decrypt_with_key(&self, secret: &Sm2SecretKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
        Ok(decrypt_with(
            secret.scalar(),
            ciphertext,
            self.config.layout(),
        )?)
    }

    pub fn decrypt_from(
        &self,
        private_hex: &str,
        ciphertext: &[u8],
        encoding: Encoding,
    ) -> Result<Vec<u8>> {
        let raw = encoding.decode(ciphertext)?;
        self.decrypt(private_hex, &raw)
    }
}
