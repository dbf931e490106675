/// `a - b - borrow` as (difference, borrow out), borrow being 0 or 1.
#[inline(always)]
pub const fn limb_sub_borrow(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (res as u64, ((res >> 64) as u64) & 1)
}

/// `a -= b` over the full length of `a`; `b` may be shorter.
///
/// Returns 1 when the subtraction wrapped.
pub fn sub_assign(a: &mut [u64], b: &[u64]) -> u64 {
    debug_assert!(a.len() >= b.len());
    let mut borrow = 0;
    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if rhs == 0 && borrow == 0 && i >= b.len() {
            break;
        }
        (*limb, borrow) = limb_sub_borrow(*limb, rhs, borrow);
    }
    borrow
}

/// `a >>= 1`, top bit filled with `carry`.
pub fn halve_assign(a: &mut [u64], carry: u64) {
    let mut top = carry & 1;
    for limb in a.iter_mut().rev() {
        let low = *limb & 1;
        *limb = (*limb >> 1) | (top << 63);
        top = low;
    }
}
