//! Limb arithmetic shared by the field and scalar types
//!
//! All routines work on eight little-endian 32-bit limbs and run in time
//! independent of the limb values.

use super::constants::NLIMBS;
use subtle::{Choice, ConditionallySelectable};

pub(crate) type Limbs = [u32; NLIMBS];

/// 8-limb addition, returning the sum and the carry out
#[inline(always)]
pub(crate) fn adc8(a: &Limbs, b: &Limbs) -> (Limbs, u32) {
    let mut r = [0u32; NLIMBS];
    let mut carry = 0u64;
    for i in 0..NLIMBS {
        let t = a[i] as u64 + b[i] as u64 + carry;
        r[i] = t as u32;
        carry = t >> 32;
    }
    (r, carry as u32)
}

/// 8-limb subtraction, returning the difference and the borrow out
#[inline(always)]
pub(crate) fn sbb8(a: &Limbs, b: &Limbs) -> (Limbs, u32) {
    let mut r = [0u32; NLIMBS];
    let mut borrow = 0u64;
    for i in 0..NLIMBS {
        let t = (a[i] as u64)
            .wrapping_sub(b[i] as u64)
            .wrapping_sub(borrow);
        r[i] = t as u32;
        borrow = (t >> 63) & 1;
    }
    (r, borrow as u32)
}

/// Return `a` when `flag` is 0, `b` when it is 1
#[inline(always)]
pub(crate) fn select8(a: &Limbs, b: &Limbs, flag: Choice) -> Limbs {
    let mut r = [0u32; NLIMBS];
    for i in 0..NLIMBS {
        r[i] = u32::conditional_select(&a[i], &b[i], flag);
    }
    r
}

/// (a + b) mod m for a, b < m
#[inline(always)]
pub(crate) fn add_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (sum, carry) = adc8(a, b);
    let (reduced, borrow) = sbb8(&sum, m);
    // keep the reduced value on overflow or when sum ≥ m
    let use_reduced = Choice::from(((carry | (borrow ^ 1)) & 1) as u8);
    select8(&sum, &reduced, use_reduced)
}

/// (a − b) mod m for a, b < m
#[inline(always)]
pub(crate) fn sub_mod(a: &Limbs, b: &Limbs, m: &Limbs) -> Limbs {
    let (diff, borrow) = sbb8(a, b);
    let (wrapped, _) = adc8(&diff, m);
    select8(&diff, &wrapped, Choice::from(borrow as u8))
}

/// Schoolbook 8×8 → 16-limb product
#[inline(always)]
pub(crate) fn mul_wide(a: &Limbs, b: &Limbs) -> [u32; 2 * NLIMBS] {
    let mut t = [0u32; 2 * NLIMBS];
    for i in 0..NLIMBS {
        let mut carry = 0u64;
        for j in 0..NLIMBS {
            let s = t[i + j] as u64 + (a[i] as u64) * (b[j] as u64) + carry;
            t[i + j] = s as u32;
            carry = s >> 32;
        }
        t[i + NLIMBS] = carry as u32;
    }
    t
}

/// Montgomery reduction: t · 2⁻²⁵⁶ mod m, for t < m · 2²⁵⁶
///
/// `n0` is −m⁻¹ mod 2³².
pub(crate) fn mont_reduce(mut t: [u32; 2 * NLIMBS], m: &Limbs, n0: u32) -> Limbs {
    let mut hi = 0u32;
    for i in 0..NLIMBS {
        let k = t[i].wrapping_mul(n0);
        let mut carry = 0u64;
        for j in 0..NLIMBS {
            let s = t[i + j] as u64 + (k as u64) * (m[j] as u64) + carry;
            t[i + j] = s as u32;
            carry = s >> 32;
        }
        for limb in t.iter_mut().skip(i + NLIMBS) {
            let s = *limb as u64 + carry;
            *limb = s as u32;
            carry = s >> 32;
        }
        hi += carry as u32;
    }

    let mut r = [0u32; NLIMBS];
    r.copy_from_slice(&t[NLIMBS..]);
    let (sub, borrow) = sbb8(&r, m);
    let use_sub = Choice::from(((hi | (borrow ^ 1)) & 1) as u8);
    select8(&r, &sub, use_sub)
}

/// a · b mod m for a, b < m, with both values in plain (non-Montgomery) form
///
/// The first reduction leaves a·b·R⁻¹; multiplying by R² mod m and reducing
/// again cancels the factor.
#[inline(always)]
pub(crate) fn mul_mod(a: &Limbs, b: &Limbs, m: &Limbs, n0: u32, r2: &Limbs) -> Limbs {
    let ab = mont_reduce(mul_wide(a, b), m, n0);
    mont_reduce(mul_wide(&ab, r2), m, n0)
}

/// True when a ≥ m
#[inline(always)]
pub(crate) fn geq(a: &Limbs, m: &Limbs) -> bool {
    let (_, borrow) = sbb8(a, m);
    borrow == 0
}
