//! Benchmarks for SM2 operations
//!
//! This benchmark suite measures the performance of:
//! - Key generation
//! - Signing and verification
//! - Encryption and decryption across message sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::OsRng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use smcrypt::prelude::*;
use smcrypt_tests::seeded_keypair;

fn bench_keypair_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2/Keypair");
    let engine = Sm2Engine::default();

    group.bench_function("OsRng", |b| {
        b.iter(|| black_box(engine.generate_keypair_with(&mut OsRng).unwrap()));
    });

    group.bench_function("ChaCha20Rng", |b| {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        b.iter(|| black_box(engine.generate_keypair_with(&mut rng).unwrap()));
    });

    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2/Signature");
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(42);
    let secret = keys.secret_key();
    let public = keys.public_key();
    let message = b"benchmark message for SM2 signatures";
    let user_id = engine.config().user_id.clone();

    group.bench_function("sign", |b| {
        b.iter(|| black_box(engine.sign_with_key(secret, message, &user_id).unwrap()));
    });

    let sig = engine.sign_with_key(secret, message, &user_id).unwrap();
    group.bench_function("verify", |b| {
        b.iter(|| black_box(engine.verify_signature(public, message, &sig, &user_id)));
    });

    let private_hex = keys.private_key_hex();
    group.bench_function("sign_hex_keys", |b| {
        b.iter(|| black_box(engine.sign(&private_hex, message).unwrap()));
    });

    group.finish();
}

fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM2/Encryption");
    let engine = Sm2Engine::default();
    let keys = seeded_keypair(43);

    for size in [32usize, 1024, 16 * 1024] {
        let plaintext = vec![0x5au8; size];
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", size), &plaintext, |b, pt| {
            b.iter(|| black_box(engine.encrypt_with_key(keys.public_key(), pt).unwrap()));
        });

        let ct = engine.encrypt_with_key(keys.public_key(), &plaintext).unwrap();
        group.bench_with_input(BenchmarkId::new("decrypt", size), &ct, |b, ct| {
            b.iter(|| black_box(engine.decrypt_with_key(keys.secret_key(), ct).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_verify,
    bench_encrypt_decrypt
);
criterion_main!(benches);
