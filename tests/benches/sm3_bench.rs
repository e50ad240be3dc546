//! Benchmarks for SM3, HMAC-SM3 and the SM3 KDF

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use smcrypt::algorithms::kdf::kdf;
use smcrypt::algorithms::mac::HmacSm3;
use smcrypt::prelude::*;

fn bench_sm3(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM3");
    for size in [64usize, 1024, 64 * 1024] {
        let data = vec![0x61u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("digest", size), &data, |b, data| {
            b.iter(|| black_box(Sm3::digest(data).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("hmac", size), &data, |b, data| {
            b.iter(|| black_box(HmacSm3::mac(b"benchmark key", data).unwrap()));
        });
    }
    group.finish();
}

fn bench_kdf(c: &mut Criterion) {
    let mut group = c.benchmark_group("SM3-KDF");
    let z = [0x42u8; 64];
    for klen in [32usize, 256, 4096] {
        group.throughput(Throughput::Bytes(klen as u64));
        group.bench_with_input(BenchmarkId::from_parameter(klen), &klen, |b, &klen| {
            b.iter(|| black_box(kdf(&z, klen).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sm3, bench_kdf);
criterion_main!(benches);
