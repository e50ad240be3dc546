//! Sizes and fixed exponents for sm2p256v1

pub use smcrypt_params::traditional::sm2::{
    SM2_FIELD_ELEMENT_SIZE, SM2_POINT_COMPRESSED_SIZE, SM2_POINT_UNCOMPRESSED_SIZE,
    SM2_SCALAR_SIZE,
};

/// Number of 32-bit limbs in a field element or scalar (8 × 32 = 256 bits)
pub(crate) const NLIMBS: usize = 8;

/// p − 2, the Fermat inversion exponent in 𝔽ₚ (big-endian)
pub(crate) const P_MINUS_2: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFD,
];

/// (p + 1) / 4, the square-root exponent (p ≡ 3 mod 4)
pub(crate) const P_PLUS_1_DIV_4: [u8; 32] = [
    0x3F, 0xFF, 0xFF, 0xFF, 0xBF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xC0, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// n − 2, the Fermat inversion exponent mod n (big-endian)
pub(crate) const N_MINUS_2: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x72, 0x03, 0xDF, 0x6B, 0x21, 0xC6, 0x05, 0x2B, 0x53, 0xBB, 0xF4, 0x09, 0x39, 0xD5, 0x41, 0x21,
];

/// Big-endian bytes → little-endian limbs
#[inline]
pub(crate) fn bytes_to_limbs_le(be_bytes: &[u8; 32]) -> [u32; NLIMBS] {
    let mut limbs = [0u32; NLIMBS];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let offset = (NLIMBS - 1 - i) * 4;
        *limb = u32::from_be_bytes([
            be_bytes[offset],
            be_bytes[offset + 1],
            be_bytes[offset + 2],
            be_bytes[offset + 3],
        ]);
    }
    limbs
}

/// Little-endian limbs → big-endian bytes
#[inline]
pub(crate) fn limbs_to_bytes_be(limbs: &[u32; NLIMBS]) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let offset = (NLIMBS - 1 - i) * 4;
        out[offset..offset + 4].copy_from_slice(&limb.to_be_bytes());
    }
    out
}
