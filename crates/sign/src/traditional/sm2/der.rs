//! DER and raw codecs for SM2 signatures
//!
//! DER form: `SEQUENCE { INTEGER r, INTEGER s }` with minimal unsigned
//! INTEGER encodings. Raw form: fixed-width 32-byte `r ∥ s`.

use smcrypt_api::{error::Error as ApiError, Result as ApiResult};
use smcrypt_params::traditional::sm2::{
    SM2_SCALAR_SIZE, SM2_SIGNATURE_DER_MAX_SIZE, SM2_SIGNATURE_RAW_SIZE,
};

const TAG_SEQUENCE: u8 = 0x30;
const TAG_INTEGER: u8 = 0x02;

/// Longest INTEGER body: 32 value bytes plus a sign-padding zero
const MAX_INTEGER_LEN: usize = SM2_SCALAR_SIZE + 1;

/// Signature components (r, s) as fixed-width big-endian integers
///
/// The codec does not range-check against n; verification does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureComponents {
    pub r: [u8; SM2_SCALAR_SIZE],
    pub s: [u8; SM2_SCALAR_SIZE],
}

impl SignatureComponents {
    /// Serialize to DER
    pub fn to_der(&self) -> Vec<u8> {
        let r = encode_integer(&self.r);
        let s = encode_integer(&self.s);

        let body_len = 2 + r.len() + 2 + s.len();
        let mut der = Vec::with_capacity(2 + body_len);
        der.push(TAG_SEQUENCE);
        // at most 70 bytes, so the short length form always applies
        der.push(body_len as u8);
        der.push(TAG_INTEGER);
        der.push(r.len() as u8);
        der.extend_from_slice(&r);
        der.push(TAG_INTEGER);
        der.push(s.len() as u8);
        der.extend_from_slice(&s);
        der
    }

    /// Parse strict DER
    ///
    /// Rejects long-form lengths, trailing bytes, negative or non-minimal
    /// INTEGERs and values wider than 256 bits.
    pub fn from_der(der: &[u8]) -> ApiResult<Self> {
        if der.len() > SM2_SIGNATURE_DER_MAX_SIZE {
            return Err(format_error("DER signature too long"));
        }
        let mut reader = DerReader::new(der);
        let body = reader.read_tlv(TAG_SEQUENCE, "SEQUENCE")?;
        if !reader.is_empty() {
            return Err(format_error("trailing bytes after SEQUENCE"));
        }

        let mut inner = DerReader::new(body);
        let r = decode_integer(inner.read_tlv(TAG_INTEGER, "INTEGER r")?, "r")?;
        let s = decode_integer(inner.read_tlv(TAG_INTEGER, "INTEGER s")?, "s")?;
        if !inner.is_empty() {
            return Err(format_error("trailing bytes inside SEQUENCE"));
        }
        Ok(Self { r, s })
    }

    /// Fixed-width `r ∥ s`
    pub fn to_raw(&self) -> [u8; SM2_SIGNATURE_RAW_SIZE] {
        let mut out = [0u8; SM2_SIGNATURE_RAW_SIZE];
        out[..SM2_SCALAR_SIZE].copy_from_slice(&self.r);
        out[SM2_SCALAR_SIZE..].copy_from_slice(&self.s);
        out
    }

    /// Parse fixed-width `r ∥ s`
    pub fn from_raw(raw: &[u8]) -> ApiResult<Self> {
        if raw.len() != SM2_SIGNATURE_RAW_SIZE {
            return Err(ApiError::signature_format(
                "SM2 raw signature",
                format!("expected {} bytes, got {}", SM2_SIGNATURE_RAW_SIZE, raw.len()),
            ));
        }
        let mut r = [0u8; SM2_SCALAR_SIZE];
        let mut s = [0u8; SM2_SCALAR_SIZE];
        r.copy_from_slice(&raw[..SM2_SCALAR_SIZE]);
        s.copy_from_slice(&raw[SM2_SCALAR_SIZE..]);
        Ok(Self { r, s })
    }
}

fn format_error(message: &str) -> ApiError {
    ApiError::signature_format("SM2 DER parsing", message)
}

struct DerReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DerReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    fn read_byte(&mut self, what: &str) -> ApiResult<u8> {
        let b = *self
            .data
            .get(self.pos)
            .ok_or_else(|| format_error(&format!("truncated {}", what)))?;
        self.pos += 1;
        Ok(b)
    }

    /// Read one tag-length-value and return the value
    fn read_tlv(&mut self, tag: u8, what: &str) -> ApiResult<&'a [u8]> {
        if self.read_byte(what)? != tag {
            return Err(format_error(&format!("expected {} tag", what)));
        }
        let len = self.read_byte(what)?;
        if len & 0x80 != 0 {
            return Err(format_error("long-form length"));
        }
        let len = len as usize;
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or_else(|| format_error(&format!("truncated {}", what)))?;
        let value = &self.data[self.pos..end];
        self.pos = end;
        Ok(value)
    }
}

/// Minimal unsigned INTEGER body: leading zeros stripped, one zero byte
/// prepended when the high bit is set
fn encode_integer(bytes: &[u8; SM2_SCALAR_SIZE]) -> Vec<u8> {
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(SM2_SCALAR_SIZE - 1);
    let trimmed = &bytes[first..];
    let mut out = Vec::with_capacity(trimmed.len() + 1);
    if trimmed[0] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
    out
}

fn decode_integer(body: &[u8], name: &str) -> ApiResult<[u8; SM2_SCALAR_SIZE]> {
    if body.is_empty() {
        return Err(format_error(&format!("empty INTEGER {}", name)));
    }
    if body.len() > MAX_INTEGER_LEN {
        return Err(format_error(&format!("INTEGER {} too long", name)));
    }
    if body[0] & 0x80 != 0 {
        return Err(format_error(&format!("negative INTEGER {}", name)));
    }
    if body.len() > 1 && body[0] == 0x00 && body[1] & 0x80 == 0 {
        return Err(format_error(&format!("non-minimal INTEGER {}", name)));
    }

    let value = if body[0] == 0x00 && body.len() > 1 {
        &body[1..]
    } else {
        body
    };
    if value.len() > SM2_SCALAR_SIZE {
        return Err(format_error(&format!("INTEGER {} wider than 256 bits", name)));
    }
    let mut out = [0u8; SM2_SCALAR_SIZE];
    out[SM2_SCALAR_SIZE - value.len()..].copy_from_slice(value);
    Ok(out)
}
