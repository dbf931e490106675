/// `acc + a * b + carry` as (low limb, high limb). Never overflows 128 bits.
#[inline(always)]
pub const fn limb_mul_add(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let res = acc as u128 + (a as u128 * b as u128) + carry as u128;
    (res as u64, (res >> 64) as u64)
}

/// `acc += limb * b`, the single-limb by multi-limb multiply-add.
///
/// `acc` must be at least one limb longer than `b`; the returned carry is
/// whatever falls off the top of `acc` and is zero for a correctly sized
/// accumulator.
pub fn mul_limb_add_assign(acc: &mut [u64], b: &[u64], limb: u64) -> u64 {
    debug_assert!(acc.len() > b.len());
    if limb == 0 {
        return 0;
    }

    let mut carry = 0;
    for (i, &bi) in b.iter().enumerate() {
        (acc[i], carry) = limb_mul_add(acc[i], limb, bi, carry);
    }
    for slot in acc.iter_mut().skip(b.len()) {
        if carry == 0 {
            break;
        }
        let (sum, overflow) = slot.overflowing_add(carry);
        *slot = sum;
        carry = overflow as u64;
    }
    carry
}

/// Exact division by the limb radix: drops `acc[0]` and shifts every limb
/// down one position.
pub fn shr_limb_assign(acc: &mut [u64]) -> u64 {
    let dropped = acc[0];
    acc.copy_within(1.., 0);
    if let Some(top) = acc.last_mut() {
        *top = 0;
    }
    dropped
}

/// Full schoolbook product, `a.len() + b.len()` limbs.
pub fn mul(a: &[u64], b: &[u64]) -> Vec<u64> {
    let mut product = vec![0u64; a.len() + b.len()];
    for (j, &aj) in a.iter().enumerate() {
        let carry = mul_limb_add_assign(&mut product[j..], b, aj);
        debug_assert_eq!(carry, 0);
    }
    product
}
