pub mod add;
pub mod cmp;
pub mod mul;
pub mod std;
pub mod sub;

use core::ops::{Deref, DerefMut};

use num_bigint::BigUint;

/// Bits per limb used by the field kernels.
pub const LIMB_BITS: u32 = 64;

/// Little-endian vector of 64-bit limbs: `limbs[0]` is the least significant.
///
/// The length is fixed by whoever builds it (normally the field's `n`), not
/// by the value it holds, so leading zero limbs are significant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Limbs(pub(crate) Vec<u64>);

impl Limbs {
    pub fn zero(n_limbs: usize) -> Self { Limbs(vec![0; n_limbs]) }

    pub fn one(n_limbs: usize) -> Self {
        let mut limbs = Self::zero(n_limbs);
        limbs.0[0] = 1;
        limbs
    }

    pub fn from_slice(limbs: &[u64]) -> Self { Limbs(limbs.to_vec()) }

    pub fn from_u64(value: u64, n_limbs: usize) -> Self {
        let mut limbs = Self::zero(n_limbs.max(1));
        limbs.0[0] = value;
        limbs
    }

    /// Encode `value` into at least `n_limbs` limbs.
    pub fn from_biguint(value: &BigUint, n_limbs: usize) -> Self {
        Limbs(self::std::encode_unsigned(value, LIMB_BITS, n_limbs))
    }

    pub fn to_biguint(&self) -> BigUint { BigUint::from_slice(&self.to_u32_digits()) }

    pub fn as_slice(&self) -> &[u64] { &self.0 }

    pub fn into_vec(self) -> Vec<u64> { self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn is_zero(&self) -> bool { self.0.iter().all(|&l| l == 0) }

    /// Number of significant bits, ignoring zero padding.
    pub fn bit_length(&self) -> u64 {
        match self.0.iter().rposition(|&l| l != 0) {
            Some(top) => top as u64 * LIMB_BITS as u64 + (64 - self.0[top].leading_zeros()) as u64,
            None => 0,
        }
    }

    /// Pad with zero limbs or drop zero high limbs to reach `n_limbs`.
    ///
    /// Panics when a non-zero limb would be dropped.
    pub fn resized(mut self, n_limbs: usize) -> Self {
        assert!(
            self.0.iter().skip(n_limbs).all(|&l| l == 0),
            "value does not fit in {} limbs",
            n_limbs
        );
        self.0.resize(n_limbs, 0);
        self
    }

    fn to_u32_digits(&self) -> Vec<u32> {
        self.0
            .iter()
            .flat_map(|&l| [l as u32, (l >> 32) as u32])
            .collect()
    }
}

impl Deref for Limbs {
    type Target = [u64];

    fn deref(&self) -> &[u64] { &self.0 }
}

impl DerefMut for Limbs {
    fn deref_mut(&mut self) -> &mut [u64] { &mut self.0 }
}

impl From<Vec<u64>> for Limbs {
    fn from(limbs: Vec<u64>) -> Self { Limbs(limbs) }
}
