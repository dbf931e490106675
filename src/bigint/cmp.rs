use core::cmp::Ordering;

/// Compare two little-endian limb vectors as integers; lengths may differ.
pub fn cmp(a: &[u64], b: &[u64]) -> Ordering {
    let len = a.len().max(b.len());
    for i in (0..len).rev() {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

pub fn lessthan(a: &[u64], b: &[u64]) -> bool { cmp(a, b) == Ordering::Less }

pub fn greaterthanorequal(a: &[u64], b: &[u64]) -> bool { !lessthan(a, b) }

#[cfg(test)]
mod test {
    use super::*;
    use crate::bigint::Limbs;
    use num_bigint::{BigUint, RandomBits};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_cmp() {
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        for _ in 0..100 {
            let a: BigUint = prng.sample(RandomBits::new(256));
            let b: BigUint = prng.sample(RandomBits::new(256));
            let la = Limbs::from_biguint(&a, 4);
            let lb = Limbs::from_biguint(&b, 6);
            assert_eq!(cmp(&la, &lb), a.cmp(&b));
            assert_eq!(lessthan(&la, &lb), a < b);
            assert_eq!(cmp(&la, &la), Ordering::Equal);
        }
    }

    #[test]
    fn test_cmp_ignores_padding() {
        assert_eq!(cmp(&[1, 2], &[1, 2, 0, 0]), Ordering::Equal);
        assert_eq!(cmp(&[1, 2], &[1, 2, 0, 1]), Ordering::Less);
        assert!(greaterthanorequal(&[0, 0, 1], &[u64::MAX, u64::MAX]));
    }
}
