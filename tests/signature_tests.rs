//! Integration tests for the SM2 scheme traits

use rand::rngs::OsRng;
use smcrypt::api::{Pke, Serialize, SerializeSecret, Signature, SignatureDerive};
use smcrypt::pke::Sm2Pke;
use smcrypt::sign::Sm2Dsa;

#[test]
fn test_sm2_signature() {
    let mut rng = OsRng;

    let (public_key, secret_key) = Sm2Dsa::keypair(&mut rng).unwrap();
    let message = b"Test message for SM2 signature";

    let signature = Sm2Dsa::sign(message, &secret_key).unwrap();
    assert!(Sm2Dsa::verify(message, &signature, &public_key).is_ok());

    let modified_message = b"Modified message that should not verify";
    let result = Sm2Dsa::verify(modified_message, &signature, &public_key);
    assert!(result.is_err());
}

#[test]
fn test_sm2_key_serialization() {
    let (public_key, secret_key) = Sm2Dsa::keypair(&mut OsRng).unwrap();

    let pk_bytes = public_key.to_bytes();
    assert_eq!(pk_bytes.len(), 65);
    assert_eq!(pk_bytes[0], 0x04);
    let restored_pk = <Sm2Dsa as Signature>::PublicKey::from_bytes(&pk_bytes).unwrap();
    assert_eq!(restored_pk, public_key);

    let sk_bytes = secret_key.to_bytes_zeroizing();
    let restored_sk = <Sm2Dsa as Signature>::SecretKey::from_bytes(&sk_bytes).unwrap();
    assert_eq!(Sm2Dsa::derive_public_key(&restored_sk).unwrap(), public_key);
}

#[test]
fn test_sm2_encryption() {
    let mut rng = OsRng;
    let (public_key, secret_key) = Sm2Pke::keypair(&mut rng).unwrap();

    let plaintext = b"Test message for SM2 encryption";
    let ciphertext = Sm2Pke::encrypt(&public_key, plaintext, &mut rng).unwrap();
    assert_eq!(Sm2Pke::decrypt(&secret_key, &ciphertext).unwrap(), plaintext);

    let mut tampered = ciphertext.clone();
    let last = tampered.0.len() - 1;
    tampered.0[last] ^= 0xff;
    assert!(Sm2Pke::decrypt(&secret_key, &tampered).is_err());
}
