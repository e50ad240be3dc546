//! End-to-end checks through the `smcrypt` facade against published vectors

use smcrypt::algorithms::hash::sm3::{self, BlankInput};
use smcrypt::api::Error;
use smcrypt::pke::CipherMode;
use smcrypt::prelude::*;
use smcrypt_tests::{seeded_keypair, vectors::*};

const N_HEX: &str = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";
const S_HEX: &str = "b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa";

fn der_integer(value_hex: &str) -> String {
    let mut bytes = hex::decode(value_hex).unwrap();
    while bytes.len() > 1 && bytes[0] == 0 {
        bytes.remove(0);
    }
    if bytes[0] & 0x80 != 0 {
        bytes.insert(0, 0);
    }
    format!("02{:02x}{}", bytes.len(), hex::encode(bytes))
}

fn der_signature(r_hex: &str, s_hex: &str) -> String {
    let body = format!("{}{}", der_integer(r_hex), der_integer(s_hex));
    format!("30{:02x}{}", body.len() / 2, body)
}

#[test]
fn test_sm3_vectors() {
    assert_eq!(sm3::hash_hex(b"abc").unwrap(), SM3_ABC);
    assert_eq!(sm3::hash_hex(&b"abcd".repeat(16)).unwrap(), SM3_ABCD16);
    assert_eq!(sm3::hash_hex(b"").unwrap(), SM3_EMPTY);
    assert_eq!(hex::encode(Sm3::digest(b"abc").unwrap()), SM3_ABC);
}

#[test]
fn test_sm3_blank_input_modes() {
    assert_eq!(sm3::hash_hex_with(b"", BlankInput::Standard).unwrap(), SM3_EMPTY);
    assert_eq!(sm3::hash_hex_with(b"", BlankInput::LegacyEmpty).unwrap(), "");
    assert_eq!(sm3::hash_hex_with(b" \t\n", BlankInput::LegacyEmpty).unwrap(), "");
    assert_eq!(
        sm3::hash_hex_with(b"abc", BlankInput::LegacyEmpty).unwrap(),
        SM3_ABC
    );
}

#[test]
fn test_published_signature_verifies() {
    let engine = Sm2Engine::default();
    assert!(engine.verify(SM2_PUBLIC, b"message digest", SM2_SIGNATURE_DER));
    assert_eq!(engine.public_key_from_private(SM2_PRIVATE).unwrap(), SM2_PUBLIC);
}

#[test]
fn test_published_ciphertext_decrypts() {
    let engine = Sm2Engine::default();
    let ct = hex::decode(SM2_CIPHERTEXT_C1C3C2).unwrap();
    assert_eq!(engine.decrypt(SM2_PRIVATE, &ct).unwrap(), b"encryption standard");

    let from_hex = engine
        .decrypt_from(SM2_PRIVATE, SM2_CIPHERTEXT_C1C3C2.as_bytes(), Encoding::Hex)
        .unwrap();
    assert_eq!(from_hex, b"encryption standard");
}

#[test]
fn test_signature_component_boundaries() {
    let engine = Sm2Engine::default();
    let r_hex = &SM2_SIGNATURE_DER[10..74];
    assert_eq!(der_signature(r_hex, S_HEX), SM2_SIGNATURE_DER);

    let zero = "00".repeat(32);
    let ones = "ff".repeat(32);
    let n_plus_1 = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54124";
    for bad in [zero.as_str(), N_HEX, n_plus_1, ones.as_str()] {
        let bad_r = der_signature(bad, S_HEX);
        assert!(!engine.verify(SM2_PUBLIC, b"message digest", &bad_r), "r = {}", bad);
        let bad_s = der_signature(r_hex, bad);
        assert!(!engine.verify(SM2_PUBLIC, b"message digest", &bad_s), "s = {}", bad);
    }
}

#[test]
fn test_signature_tampering() {
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(21);
    let sig = engine.sign(&keys.private_key_hex(), b"transfer 100").unwrap();
    let der = sig.to_der();

    assert!(engine.verify(&keys.public_key_hex(), b"transfer 100", &sig.to_hex()));
    assert!(!engine.verify(&keys.public_key_hex(), b"transfer 900", &sig.to_hex()));

    for idx in 0..der.len() {
        let mut bad = der.clone();
        bad[idx] ^= 0x04;
        assert!(
            !engine.verify(&keys.public_key_hex(), b"transfer 100", &hex::encode(&bad)),
            "flip at byte {}",
            idx
        );
    }

    let other = seeded_keypair(22);
    assert!(!engine.verify(&other.public_key_hex(), b"transfer 100", &sig.to_hex()));
}

#[test]
fn test_ciphertext_tampering_every_part() {
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(23);
    let msg = b"tamper with any part and decryption must fail";
    let ct = engine.encrypt(&keys.public_key_hex(), msg).unwrap();

    // C1 (1..65), C3 (65..97), C2 (97..)
    for idx in [1usize, 40, 64, 65, 80, 96, 97, ct.len() - 1] {
        let mut bad = ct.clone();
        bad[idx] ^= 0x01;
        let err = engine.decrypt(&keys.private_key_hex(), &bad).unwrap_err();
        assert!(
            matches!(err, Error::DecryptionIntegrity | Error::InvalidPoint { .. }),
            "byte {} gave {:?}",
            idx,
            err
        );
    }
}

#[test]
fn test_ordering_mismatch_fails_both_ways() {
    let keys = seeded_keypair(24);
    let modern = Sm2Engine::new(Sm2Config::default().with_mode(CipherMode::C1C3C2)).unwrap();
    let legacy = Sm2Engine::new(Sm2Config::default().with_mode(CipherMode::C1C2C3)).unwrap();
    let msg = b"the order of C2 and C3 is not self-describing";

    let ct = modern.encrypt(&keys.public_key_hex(), msg).unwrap();
    assert_eq!(
        legacy.decrypt(&keys.private_key_hex(), &ct),
        Err(Error::DecryptionIntegrity)
    );
    assert_eq!(modern.decrypt(&keys.private_key_hex(), &ct).unwrap(), msg);

    let ct = legacy.encrypt(&keys.public_key_hex(), msg).unwrap();
    assert_eq!(
        modern.decrypt(&keys.private_key_hex(), &ct),
        Err(Error::DecryptionIntegrity)
    );
    assert_eq!(legacy.decrypt(&keys.private_key_hex(), &ct).unwrap(), msg);
}

#[test]
fn test_round_trip_including_empty() {
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(25);
    for msg in [&b""[..], &b"x"[..], &[0xa5u8; 4097][..]] {
        let sig = engine.sign(&keys.private_key_hex(), msg).unwrap();
        assert!(engine.verify(&keys.public_key_hex(), msg, &sig.to_hex()));

        let ct = engine.encrypt(&keys.public_key_hex(), msg).unwrap();
        assert_eq!(ct.is_empty(), msg.is_empty());
        assert_eq!(engine.decrypt(&keys.private_key_hex(), &ct).unwrap(), msg);
    }
}

#[test]
fn test_hash_is_deterministic() {
    let data = b"determinism";
    assert_eq!(Sm3::digest(data).unwrap(), Sm3::digest(data).unwrap());
    let mut h = Sm3::new();
    h.update(b"determ").unwrap().update(b"inism").unwrap();
    assert_eq!(h.finalize().unwrap(), Sm3::digest(data).unwrap());
}
