//! Secret data types with guaranteed zeroization
//!
//! Wrappers for private scalars, shared points and keystream bytes. Each
//! clears its contents on drop and redacts itself in `Debug` output.

use core::fmt;
use core::ops::{Deref, DerefMut};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Types that can be securely zeroed and cloned
pub trait SecureZeroingType: Zeroize + Clone {
    /// Create a zeroed instance
    fn zeroed() -> Self;
}

/// Fixed-size secret buffer that is zeroized on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBuffer<const N: usize> {
    data: [u8; N],
}

impl<const N: usize> SecretBuffer<N> {
    /// Create a new secret buffer with the given data
    pub fn new(data: [u8; N]) -> Self {
        Self { data }
    }

    /// Create a zeroed secret buffer
    pub fn zeroed() -> Self {
        Self { data: [0u8; N] }
    }

    /// Length of the buffer (always `N`)
    pub fn len(&self) -> usize {
        N
    }

    /// True only for `N == 0`
    pub fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> SecureZeroingType for SecretBuffer<N> {
    fn zeroed() -> Self {
        Self::zeroed()
    }
}

impl<const N: usize> AsRef<[u8]> for SecretBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<const N: usize> AsMut<[u8]> for SecretBuffer<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl<const N: usize> fmt::Debug for SecretBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBuffer<{}>([REDACTED])", N)
    }
}

/// Variable-size secret vector that is zeroized on drop
///
/// Used for buffers whose length follows the message, such as the SM2
/// keystream and candidate plaintexts.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecretVec {
    data: Vec<u8>,
}

impl SecretVec {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn from_slice(slice: &[u8]) -> Self {
        Self {
            data: slice.to_vec(),
        }
    }

    /// Allocate a vector of `len` zero bytes
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0u8; len],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn extend_from_slice(&mut self, slice: &[u8]) {
        self.data.extend_from_slice(slice);
    }

    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Move the contents out, leaving an empty vector behind
    ///
    /// The caller becomes responsible for the returned bytes.
    pub fn into_unprotected(mut self) -> Vec<u8> {
        core::mem::take(&mut self.data)
    }
}

impl SecureZeroingType for SecretVec {
    fn zeroed() -> Self {
        Self::default()
    }
}

impl AsRef<[u8]> for SecretVec {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl AsMut<[u8]> for SecretVec {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl From<Vec<u8>> for SecretVec {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl fmt::Debug for SecretVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretVec(len={}, [REDACTED])", self.data.len())
    }
}

/// Short-lived secret value, zeroized when it goes out of scope
///
/// Wraps per-operation values such as the ephemeral scalar `k` or the
/// message schedule inside a hash compression.
pub struct EphemeralSecret<T: Zeroize> {
    value: T,
}

impl<T: Zeroize> EphemeralSecret<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Zeroize> Drop for EphemeralSecret<T> {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

impl<T: Zeroize> Deref for EphemeralSecret<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Zeroize> DerefMut for EphemeralSecret<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Zeroize> fmt::Debug for EphemeralSecret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EphemeralSecret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let buf = SecretBuffer::new([0x42u8; 4]);
        assert_eq!(format!("{:?}", buf), "SecretBuffer<4>([REDACTED])");

        let v = SecretVec::from_slice(b"secret");
        let shown = format!("{:?}", v);
        assert!(!shown.contains("secret"));
        assert!(shown.contains("len=6"));

        let e = EphemeralSecret::new([1u32; 2]);
        assert_eq!(format!("{:?}", e), "EphemeralSecret([REDACTED])");
    }

    #[test]
    fn test_zeroize_clears_contents() {
        let mut buf = SecretBuffer::new([0xAAu8; 8]);
        buf.zeroize();
        assert_eq!(buf.as_slice(), &[0u8; 8]);

        let mut v = SecretVec::zeros(3);
        v.as_mut_slice()[1] = 9;
        assert_eq!(v.as_slice(), &[0, 9, 0]);
        v.zeroize();
        assert!(v.is_empty());
    }

    #[test]
    fn test_into_unprotected() {
        let v = SecretVec::from(vec![1, 2, 3]);
        assert_eq!(v.into_unprotected(), vec![1, 2, 3]);
    }
}
