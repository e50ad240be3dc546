//! Property-based tests for SM2 sign / verify and encrypt / decrypt

use proptest::prelude::*;
use smcrypt::pke::CipherMode;
use smcrypt::prelude::*;
use smcrypt_tests::seeded_keypair;

fn any_mode() -> impl Strategy<Value = CipherMode> {
    prop_oneof![Just(CipherMode::C1C3C2), Just(CipherMode::C1C2C3)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn sign_verify_roundtrip(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..512),
        user_id in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let engine = Sm2Engine::default();
        let keys = seeded_keypair(seed);
        let sig = engine.sign_with_id(&keys.private_key_hex(), &message, &user_id).unwrap();
        prop_assert!(engine.verify_with_id(&keys.public_key_hex(), &message, &sig.to_hex(), &user_id));
    }

    #[test]
    fn altered_message_fails_verification(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 1..256),
        idx in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let engine = Sm2Engine::default();
        let keys = seeded_keypair(seed);
        let sig = engine.sign(&keys.private_key_hex(), &message).unwrap();

        let mut altered = message.clone();
        altered[idx.index(message.len())] ^= 1 << bit;
        prop_assert!(!engine.verify(&keys.public_key_hex(), &altered, &sig.to_hex()));
    }

    #[test]
    fn encrypt_decrypt_roundtrip(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 0..1024),
        mode in any_mode(),
        c1_prefix in any::<bool>(),
    ) {
        let config = Sm2Config::default().with_mode(mode).with_c1_prefix(c1_prefix);
        let engine = Sm2Engine::new(config).unwrap();
        let keys = seeded_keypair(seed);

        let ct = engine.encrypt(&keys.public_key_hex(), &message).unwrap();
        if message.is_empty() {
            prop_assert!(ct.is_empty());
        } else {
            let c1 = if c1_prefix { 65 } else { 64 };
            prop_assert_eq!(ct.len(), c1 + 32 + message.len());
        }
        prop_assert_eq!(engine.decrypt(&keys.private_key_hex(), &ct).unwrap(), message);
    }

    #[test]
    fn any_bit_flip_breaks_ciphertext(
        seed in any::<u64>(),
        message in prop::collection::vec(any::<u8>(), 1..128),
        idx in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let engine = Sm2Engine::default();
        let keys = seeded_keypair(seed);
        let mut ct = engine.encrypt(&keys.public_key_hex(), &message).unwrap();

        let pos = idx.index(ct.len());
        ct[pos] ^= 1 << bit;
        prop_assert!(engine.decrypt(&keys.private_key_hex(), &ct).is_err());
    }
}
