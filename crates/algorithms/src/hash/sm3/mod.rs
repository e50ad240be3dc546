//! SM3 cryptographic hash function (GB/T 32905-2016)
//!
//! Merkle-Damgård construction over 512-bit blocks with a 256-bit chaining
//! state. Padding is the same shape as SHA-256: a single `0x80` byte, zero
//! fill, then the message length in bits as a 64-bit big-endian integer.

use byteorder::{BigEndian, ByteOrder};
use std::sync::atomic::{compiler_fence, Ordering};
use zeroize::Zeroize;

use crate::error::{validate, Error, Result};
use crate::hash::{HashAlgorithm, HashFunction};
use smcrypt_common::security::{EphemeralSecret, SecureZeroingType};
use smcrypt_params::utils::hash::{SM3_BLOCK_SIZE, SM3_OUTPUT_SIZE, SM3_ROUNDS, SM3_STATE_WORDS};

const IV: [u32; SM3_STATE_WORDS] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

/// Round constant for rounds 0..16
const T_LOW: u32 = 0x79cc4519;
/// Round constant for rounds 16..64
const T_HIGH: u32 = 0x7a879d8a;

/// Longest input whose bit length still fits the 64-bit length field
const MAX_INPUT_BYTES: u64 = u64::MAX / 8;

/// Marker type for the SM3 algorithm
pub enum Sm3Algorithm {}

impl HashAlgorithm for Sm3Algorithm {
    const OUTPUT_SIZE: usize = SM3_OUTPUT_SIZE;
    const BLOCK_SIZE: usize = SM3_BLOCK_SIZE;
    const ALGORITHM_ID: &'static str = "SM3";
}

/// How [`hash_hex_with`] treats an input that is empty or only whitespace
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlankInput {
    /// Hash the bytes as given; `""` yields the standard empty-input digest
    #[default]
    Standard,
    /// Return an empty string when the input is empty or consists only of
    /// ASCII whitespace and NUL bytes, optionally around a single `0`. Kept
    /// for callers that depend on the behavior of older SM3 helpers; the
    /// result is not an SM3 digest.
    LegacyEmpty,
}

/// SM3 hash state, zeroized on drop
#[derive(Clone, Zeroize)]
pub struct Sm3 {
    state: [u32; SM3_STATE_WORDS],
    buffer: [u8; SM3_BLOCK_SIZE],
    buffer_idx: usize,
    total_bytes: u64,
}

impl Drop for Sm3 {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn gg(j: usize, x: u32, y: u32, z: u32) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

impl Sm3 {
    fn init() -> Self {
        Sm3 {
            state: IV,
            buffer: [0u8; SM3_BLOCK_SIZE],
            buffer_idx: 0,
            total_bytes: 0,
        }
    }

    fn compress(state: &mut [u32; SM3_STATE_WORDS], block: &[u8; SM3_BLOCK_SIZE]) {
        // 68 expanded words followed by the 64 words W'[j] = W[j] ^ W[j + 4]
        let mut w = EphemeralSecret::new([0u32; 68]);
        let mut w1 = EphemeralSecret::new([0u32; SM3_ROUNDS]);

        compiler_fence(Ordering::SeqCst);

        for (i, word) in w.iter_mut().take(16).enumerate() {
            *word = BigEndian::read_u32(&block[i * 4..]);
        }
        for j in 16..68 {
            w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
                ^ w[j - 13].rotate_left(7)
                ^ w[j - 6];
        }
        for j in 0..SM3_ROUNDS {
            w1[j] = w[j] ^ w[j + 4];
        }

        let v = EphemeralSecret::new(*state);
        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *v;

        for j in 0..SM3_ROUNDS {
            let t = if j < 16 { T_LOW } else { T_HIGH };
            let a12 = a.rotate_left(12);
            let ss1 = a12
                .wrapping_add(e)
                .wrapping_add(t.rotate_left((j % 32) as u32))
                .rotate_left(7);
            let ss2 = ss1 ^ a12;
            let tt1 = ff(j, a, b, c)
                .wrapping_add(d)
                .wrapping_add(ss2)
                .wrapping_add(w1[j]);
            let tt2 = gg(j, e, f, g)
                .wrapping_add(h)
                .wrapping_add(ss1)
                .wrapping_add(w[j]);
            d = c;
            c = b.rotate_left(9);
            b = a;
            a = tt1;
            h = g;
            g = f.rotate_left(19);
            f = e;
            e = p0(tt2);
        }

        let out = [a, b, c, d, e, f, g, h];
        for ((s, old), new) in state.iter_mut().zip(v.iter()).zip(out.iter()) {
            *s = old ^ new;
        }
        compiler_fence(Ordering::SeqCst);
    }

    fn update_internal(&mut self, mut input: &[u8]) -> Result<()> {
        let pending = self.total_bytes + self.buffer_idx as u64;
        if (input.len() as u64) > MAX_INPUT_BYTES - pending {
            return Err(Error::param("SM3 input", "message longer than 2^64 bits"));
        }

        while !input.is_empty() {
            let fill = core::cmp::min(input.len(), SM3_BLOCK_SIZE - self.buffer_idx);
            self.buffer[self.buffer_idx..self.buffer_idx + fill].copy_from_slice(&input[..fill]);
            self.buffer_idx += fill;
            input = &input[fill..];
            if self.buffer_idx == SM3_BLOCK_SIZE {
                let block = self.buffer;
                Self::compress(&mut self.state, &block);
                self.total_bytes += SM3_BLOCK_SIZE as u64;
                self.buffer_idx = 0;
            }
        }
        Ok(())
    }

    fn finalize_internal(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE]> {
        validate::max_length("SM3 buffer", self.buffer_idx, SM3_BLOCK_SIZE - 1)?;
        self.total_bytes += self.buffer_idx as u64;
        let bit_len = self.total_bytes * 8;

        self.buffer[self.buffer_idx] = 0x80;
        if self.buffer_idx >= 56 {
            for b in &mut self.buffer[self.buffer_idx + 1..] {
                *b = 0;
            }
            let block = self.buffer;
            Self::compress(&mut self.state, &block);
            self.buffer = [0u8; SM3_BLOCK_SIZE];
        } else {
            for b in &mut self.buffer[self.buffer_idx + 1..56] {
                *b = 0;
            }
        }

        BigEndian::write_u64(&mut self.buffer[56..], bit_len);
        let block = self.buffer;
        Self::compress(&mut self.state, &block);

        let mut out = [0u8; SM3_OUTPUT_SIZE];
        BigEndian::write_u32_into(&self.state, &mut out);

        self.zeroize();
        *self = Self::init();
        Ok(out)
    }
}

impl SecureZeroingType for Sm3 {
    fn zeroed() -> Self {
        Self::init()
    }
}

impl Default for Sm3 {
    fn default() -> Self {
        Self::init()
    }
}

impl HashFunction for Sm3 {
    type Algorithm = Sm3Algorithm;
    type Output = [u8; SM3_OUTPUT_SIZE];

    fn new() -> Self {
        Self::init()
    }

    fn update(&mut self, data: &[u8]) -> Result<&mut Self> {
        self.update_internal(data)?;
        Ok(self)
    }

    fn finalize(&mut self) -> Result<Self::Output> {
        self.finalize_internal()
    }
}

/// SM3 over the concatenation of `parts`
pub fn hash_parts(parts: &[&[u8]]) -> Result<[u8; SM3_OUTPUT_SIZE]> {
    let mut h = Sm3::new();
    for part in parts {
        h.update(part)?;
    }
    h.finalize()
}

/// SM3 digest of `message` as 64 lowercase hex characters
pub fn hash_hex(message: &[u8]) -> Result<String> {
    Ok(hex::encode(Sm3::digest(message)?))
}

/// [`hash_hex`] with an explicit policy for blank input
pub fn hash_hex_with(message: &[u8], blank: BlankInput) -> Result<String> {
    match blank {
        BlankInput::LegacyEmpty if is_blank(message) => Ok(String::new()),
        _ => hash_hex(message),
    }
}

/// Legacy blankness: after stripping space, tab, LF, CR, NUL and vertical
/// tab, nothing or a lone `0` remains
fn is_blank(message: &[u8]) -> bool {
    let stripped = |b: &u8| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x00 | 0x0B);
    let start = message.iter().position(|b| !stripped(b));
    let end = message.iter().rposition(|b| !stripped(b));
    match (start, end) {
        (Some(start), Some(end)) => &message[start..=end] == b"0",
        _ => true,
    }
}

#[cfg(test)]
mod tests;
