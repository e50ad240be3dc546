//! Caller-owned cache of parsed public keys
//!
//! Maps public-key hex to the decoded, curve-checked key. One cache belongs
//! to one caller or session; it is never global and never holds private
//! keys.

use std::collections::{HashMap, VecDeque};

use smcrypt_api::Result;
use smcrypt_sign::Sm2PublicKey;

use super::keys::parse_public_key;

/// Default number of entries kept
pub const DEFAULT_KEY_CACHE_CAPACITY: usize = 64;

/// Bounded FIFO map from public-key hex to parsed key
#[derive(Debug, Clone)]
pub struct KeyCache {
    capacity: usize,
    entries: HashMap<String, Sm2PublicKey>,
    order: VecDeque<String>,
}

impl Default for KeyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_KEY_CACHE_CAPACITY)
    }

    /// A capacity of zero is raised to one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, public_hex: &str) -> bool {
        self.entries.contains_key(&cache_key(public_hex))
    }

    /// Return the cached key or parse, validate and insert it
    ///
    /// Keys that fail to parse are not cached.
    pub fn get_or_parse(&mut self, public_hex: &str) -> Result<Sm2PublicKey> {
        let key = cache_key(public_hex);
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.clone());
        }

        let parsed = parse_public_key(public_hex)?;
        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                #[cfg(feature = "trace")]
                log::debug!("KeyCache: evicted oldest entry ({} held)", self.capacity);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, parsed.clone());
        Ok(parsed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Hex is case-insensitive, so `04AB..` and `04ab..` share an entry
fn cache_key(public_hex: &str) -> String {
    public_hex.to_ascii_lowercase()
}
