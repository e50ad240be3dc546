//! Shared fixtures for the smcrypt integration tests and benchmarks
pub mod vectors;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use smcrypt::{KeyPair, Sm2Engine};

/// Key pair drawn from a seeded ChaCha20 generator
pub fn seeded_keypair(seed: u64) -> KeyPair {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    Sm2Engine::default()
        .generate_keypair_with(&mut rng)
        .expect("keypair generation from a seeded rng")
}
