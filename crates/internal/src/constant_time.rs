//! Constant-time byte operations

use subtle::{Choice, ConstantTimeEq};

/// Constant-time comparison of two byte slices
///
/// Slices of different length compare unequal immediately; lengths are
/// public in every caller.
pub fn ct_eq<A, B>(a: A, b: B) -> bool
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    ct_eq_choice(a, b).into()
}

/// Constant-time equality check that returns a Choice (0 or 1)
pub fn ct_eq_choice<A, B>(a: A, b: B) -> Choice
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    let a = a.as_ref();
    let b = b.as_ref();

    if a.len() != b.len() {
        return Choice::from(0);
    }

    a.ct_eq(b)
}

/// Returns true when every byte of `data` is zero, without early exit
pub fn ct_is_zero(data: &[u8]) -> bool {
    let acc = data.iter().fold(0u8, |acc, &b| acc | b);
    acc.ct_eq(&0u8).into()
}

/// XOR `mask` into `dst` in place
///
/// # Panics
///
/// Panics if the lengths differ; callers derive `mask` from `dst.len()`.
pub fn xor_in_place(dst: &mut [u8], mask: &[u8]) {
    assert_eq!(dst.len(), mask.len(), "xor_in_place length mismatch");
    for (d, m) in dst.iter_mut().zip(mask.iter()) {
        *d ^= m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ct_eq() {
        assert!(ct_eq(b"abc", b"abc"));
        assert!(!ct_eq(b"abc", b"abd"));
        assert!(!ct_eq(b"abc", b"ab"));
        assert!(ct_eq(b"", b""));
    }

    #[test]
    fn test_ct_is_zero() {
        assert!(ct_is_zero(&[0u8; 40]));
        assert!(ct_is_zero(&[]));
        let mut buf = [0u8; 40];
        buf[39] = 1;
        assert!(!ct_is_zero(&buf));
    }

    #[test]
    fn test_xor_in_place() {
        let mut data = [0x0f, 0xf0, 0xaa];
        xor_in_place(&mut data, &[0xff, 0xff, 0xaa]);
        assert_eq!(data, [0xf0, 0x0f, 0x00]);
    }
}
