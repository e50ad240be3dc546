//! One engine shared across threads

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use smcrypt::prelude::*;
use smcrypt_tests::seeded_keypair;

const THREADS: usize = 8;
const SIGNS_PER_THREAD: usize = 4;

#[test]
fn test_parallel_signs_verify_and_are_distinct() {
    let engine = Arc::new(Sm2Engine::default());
    let keys = seeded_keypair(100);
    let private = Arc::new((*keys.private_key_hex()).clone());
    let message = b"the same message from every thread";

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let private = Arc::clone(&private);
            thread::spawn(move || {
                (0..SIGNS_PER_THREAD)
                    .map(|_| engine.sign(&private, message).unwrap().to_hex())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let signatures: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().expect("signing thread panicked"))
        .collect();
    assert_eq!(signatures.len(), THREADS * SIGNS_PER_THREAD);

    for sig in &signatures {
        assert!(engine.verify(&keys.public_key_hex(), message, sig));
    }
    let distinct: HashSet<_> = signatures.iter().collect();
    assert_eq!(distinct.len(), signatures.len());
}

#[test]
fn test_shared_rng_nonce_source() {
    let nonce = RngNonce::new(ChaCha20Rng::seed_from_u64(7));
    let engine = Sm2Engine::with_nonce_source(Sm2Config::default(), nonce).unwrap();
    let keys = seeded_keypair(101);
    let private = keys.private_key_hex();

    let signatures: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let engine = &engine;
                let private = &private;
                s.spawn(move || {
                    let msg = format!("message {}", i % 2);
                    engine.sign(private, msg.as_bytes()).unwrap().to_hex()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, sig) in signatures.iter().enumerate() {
        let msg = format!("message {}", i % 2);
        assert!(engine.verify(&keys.public_key_hex(), msg.as_bytes(), sig));
    }
    let distinct: HashSet<_> = signatures.iter().collect();
    assert_eq!(distinct.len(), THREADS);
}

#[test]
fn test_parallel_encrypt_decrypt() {
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(102);

    thread::scope(|s| {
        for i in 0..THREADS {
            let engine = &engine;
            let keys = &keys;
            s.spawn(move || {
                let msg = vec![i as u8; 16 + i];
                let ct = engine.encrypt(&keys.public_key_hex(), &msg).unwrap();
                assert_eq!(engine.decrypt(&keys.private_key_hex(), &ct).unwrap(), msg);
            });
        }
    });
}

#[test]
fn test_key_cache_per_thread() {
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(103);
    let sig = engine.sign(&keys.private_key_hex(), b"cached").unwrap().to_hex();

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let mut cache = KeyCache::new();
                for _ in 0..3 {
                    assert!(engine.verify_cached(&mut cache, &keys.public_key_hex(), b"cached", &sig));
                }
                assert_eq!(cache.len(), 1);
            });
        }
    });
}
