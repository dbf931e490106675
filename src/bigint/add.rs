/// `a + b + carry` as (sum, carry out).
#[inline(always)]
pub const fn limb_add_carry(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry as u128;
    (res as u64, (res >> 64) as u64)
}

/// `a += b` over the full length of `a`; `b` may be shorter.
///
/// Returns the carry out of the top limb of `a`.
pub fn add_assign(a: &mut [u64], b: &[u64]) -> u64 {
    debug_assert!(a.len() >= b.len());
    let mut carry = 0;
    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if rhs == 0 && carry == 0 && i >= b.len() {
            break;
        }
        (*limb, carry) = limb_add_carry(*limb, rhs, carry);
    }
    carry
}

/// `a + b` into a fresh vector one limb longer than the wider operand.
pub fn add(a: &[u64], b: &[u64]) -> Vec<u64> {
    let (wide, narrow) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut sum = wide.to_vec();
    sum.push(0);
    let carry = add_assign(&mut sum, narrow);
    debug_assert_eq!(carry, 0);
    sum
}

/// `a <<= 1`, returns the bit shifted out.
pub fn double_assign(a: &mut [u64]) -> u64 {
    let mut carry = 0;
    for limb in a.iter_mut() {
        let top = *limb >> 63;
        *limb = (*limb << 1) | carry;
        carry = top;
    }
    carry
}
