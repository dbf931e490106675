//! GF(p²) = GF(p)[i] / (i² + 1).

use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::BigUint;

use crate::error::Result;
use crate::field::fp::{Form, Fp, Montgomery, Plain};
use crate::field::montgomery;
use crate::field::params::ModulusParameters;

/// `c0 + c1·i`, both coordinates in the same form and field.
#[derive(Clone, PartialEq, Eq)]
pub struct Fp2<F: Form> {
    pub c0: Fp<F>,
    pub c1: Fp<F>,
}

impl<F: Form> Fp2<F> {
    pub fn new(c0: Fp<F>, c1: Fp<F>) -> Self {
        assert_eq!(c0.params().modulus(), c1.params().modulus(), "elements belong to different fields");
        Fp2 { c0, c1 }
    }

    pub fn from_biguints(params: &Arc<ModulusParameters>, c0: &BigUint, c1: &BigUint) -> Self {
        Fp2 { c0: Fp::from_biguint(params, c0), c1: Fp::from_biguint(params, c1) }
    }

    pub fn from_hex(params: &Arc<ModulusParameters>, c0: &str, c1: &str) -> Result<Self> {
        Ok(Fp2 { c0: Fp::from_hex(params, c0)?, c1: Fp::from_hex(params, c1)? })
    }

    pub fn zero(params: &Arc<ModulusParameters>) -> Self { Fp2 { c0: Fp::zero(params), c1: Fp::zero(params) } }

    pub fn one(params: &Arc<ModulusParameters>) -> Self { Fp2 { c0: Fp::one(params), c1: Fp::zero(params) } }

    pub fn params(&self) -> &Arc<ModulusParameters> { self.c0.params() }

    pub fn is_zero(&self) -> bool { self.c0.is_zero() && self.c1.is_zero() }

    pub fn is_one(&self) -> bool { self.c0.is_one() && self.c1.is_zero() }

    pub fn add(&self, other: &Self) -> Self { Fp2 { c0: &self.c0 + &other.c0, c1: &self.c1 + &other.c1 } }

    pub fn sub(&self, other: &Self) -> Self { Fp2 { c0: &self.c0 - &other.c0, c1: &self.c1 - &other.c1 } }

    pub fn neg(&self) -> Self { Fp2 { c0: -&self.c0, c1: -&self.c1 } }

    pub fn double(&self) -> Self { Fp2 { c0: self.c0.double(), c1: self.c1.double() } }

    pub fn div2(&self) -> Self { Fp2 { c0: self.c0.div2(), c1: self.c1.div2() } }

    pub fn conjugate(&self) -> Self { Fp2 { c0: self.c0.clone(), c1: -&self.c1 } }

    /// Fused product: each coordinate is one interleaved pass over two
    /// streamed operands with a single shared reduction per limb.
    ///
    /// `c0 = a0·b0 + a1·(p − b1)`, `c1 = a0·b1 + a1·b0`.
    pub fn mul(&self, other: &Self) -> Self {
        let params = self.params();
        assert_eq!(params.modulus(), other.params().modulus(), "elements belong to different fields");

        let a0 = F::lift(params, self.c0.limbs());
        let a1 = F::lift(params, self.c1.limbs());
        let (b0, b1) = (other.c0.limbs(), other.c1.limbs());
        let neg_b1 = montgomery::negate_offset(params, b1);

        let c0 = montgomery::fused_mul(params, [b0.as_slice(), neg_b1.as_slice()], [&*a0, &*a1]);
        let c1 = montgomery::fused_mul(params, [b1.as_slice(), b0.as_slice()], [&*a0, &*a1]);

        Fp2 { c0: Fp::from_limbs_unchecked(params, c0), c1: Fp::from_limbs_unchecked(params, c1) }
    }

    /// Four independent products combined with modular add/sub.
    pub fn mul_unfused(&self, other: &Self) -> Self {
        let c0 = &(&self.c0 * &other.c0) - &(&self.c1 * &other.c1);
        let c1 = &(&self.c0 * &other.c1) + &(&self.c1 * &other.c0);
        Fp2 { c0, c1 }
    }

    /// `(a0 + a1)(a0 − a1) + 2·a0·a1·i`.
    pub fn square(&self) -> Self {
        let c0 = &(&self.c0 + &self.c1) * &(&self.c0 - &self.c1);
        let c1 = (&self.c0 * &self.c1).double();
        Fp2 { c0, c1 }
    }

    /// `(a0 − a1·i) / (a0² + a1²)`, or `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        let norm = &self.c0.square() + &self.c1.square();
        let inv = norm.inverse()?;
        Some(Fp2 { c0: &self.c0 * &inv, c1: -&(&self.c1 * &inv) })
    }

    pub fn to_form<G: Form>(&self) -> Fp2<G> { Fp2 { c0: self.c0.to_form(), c1: self.c1.to_form() } }
}

impl Fp2<Plain> {
    pub fn to_montgomery(&self) -> Fp2<Montgomery> {
        Fp2 { c0: self.c0.to_montgomery(), c1: self.c1.to_montgomery() }
    }
}

impl Fp2<Montgomery> {
    pub fn to_plain(&self) -> Fp2<Plain> { Fp2 { c0: self.c0.to_plain(), c1: self.c1.to_plain() } }
}

impl<F: Form> fmt::Debug for Fp2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fp2").field("c0", &self.c0).field("c1", &self.c1).finish()
    }
}

impl<F: Form> fmt::Display for Fp2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{} + {}*i", self.c0, self.c1) }
}

impl<'a, F: Form> Add<&'a Fp2<F>> for &'a Fp2<F> {
    type Output = Fp2<F>;

    fn add(self, rhs: &'a Fp2<F>) -> Fp2<F> { Fp2::add(self, rhs) }
}

impl<'a, F: Form> Sub<&'a Fp2<F>> for &'a Fp2<F> {
    type Output = Fp2<F>;

    fn sub(self, rhs: &'a Fp2<F>) -> Fp2<F> { Fp2::sub(self, rhs) }
}

impl<'a, F: Form> Mul<&'a Fp2<F>> for &'a Fp2<F> {
    type Output = Fp2<F>;

    fn mul(self, rhs: &'a Fp2<F>) -> Fp2<F> { Fp2::mul(self, rhs) }
}

impl<'a, F: Form> Neg for &'a Fp2<F> {
    type Output = Fp2<F>;

    fn neg(self) -> Fp2<F> { Fp2::neg(self) }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::ops::Rem;
    use num_bigint::RandBigInt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn p217() -> Arc<ModulusParameters> { Arc::new(ModulusParameters::p217()) }

    fn random<F: Form>(prng: &mut ChaCha20Rng, params: &Arc<ModulusParameters>) -> (BigUint, BigUint, Fp2<F>) {
        let c0 = prng.gen_biguint_below(params.modulus());
        let c1 = prng.gen_biguint_below(params.modulus());
        let element = Fp2::from_biguints(params, &c0, &c1);
        (c0, c1, element)
    }

    fn check_fused_matches_unfused<F: Form>(params: &Arc<ModulusParameters>) {
        let m = params.modulus().clone();
        let mut prng = ChaCha20Rng::seed_from_u64(0);

        for _ in 0..100 {
            let (a0, a1, a) = random::<F>(&mut prng, params);
            let (b0, b1, b) = random::<F>(&mut prng, params);

            let fused = &a * &b;
            assert_eq!(fused, a.mul_unfused(&b));
            assert_eq!(fused.c0.to_biguint(), (&a0 * &b0 + &m * &m - &a1 * &b1).rem(&m));
            assert_eq!(fused.c1.to_biguint(), (&a0 * &b1 + &a1 * &b0).rem(&m));
        }
    }

    #[test]
    fn test_fused_mul() {
        let params = p217();
        check_fused_matches_unfused::<Montgomery>(&params);
        check_fused_matches_unfused::<Plain>(&params);

        let p503 = Arc::new(ModulusParameters::derive(250, 159, 64).unwrap());
        check_fused_matches_unfused::<Montgomery>(&p503);
    }

    #[test]
    fn test_fused_mul_extremes() {
        // b1 = 0 makes p - b1 equal p itself, the widest streamed operand
        let params = p217();
        let max = params.modulus() - 1u32;
        let zero = BigUint::from(0u32);

        for (a, b) in [((&max, &max), (&max, &zero)), ((&max, &max), (&max, &max)), ((&zero, &max), (&zero, &max))] {
            let a = Fp2::<Montgomery>::from_biguints(&params, a.0, a.1);
            let b = Fp2::<Montgomery>::from_biguints(&params, b.0, b.1);
            assert_eq!(&a * &b, a.mul_unfused(&b));
        }
    }

    #[test]
    fn test_square_and_inverse() {
        let params = p217();
        let mut prng = ChaCha20Rng::seed_from_u64(0);

        for _ in 0..50 {
            let (_, _, a) = random::<Montgomery>(&mut prng, &params);
            assert_eq!(a.square(), &a * &a);
            let inv = a.inverse().unwrap();
            assert!((&a * &inv).is_one());
        }
        assert!(Fp2::<Montgomery>::zero(&params).inverse().is_none());
    }

    #[test]
    fn test_ring_identities() {
        let params = p217();
        let mut prng = ChaCha20Rng::seed_from_u64(0);
        let i = Fp2::<Montgomery>::new(Fp::zero(&params), Fp::one(&params));

        // i^2 = -1
        assert_eq!(&i * &i, Fp2::one(&params).neg());

        for _ in 0..50 {
            let (_, _, a) = random::<Montgomery>(&mut prng, &params);
            let (_, _, b) = random::<Montgomery>(&mut prng, &params);

            assert_eq!(&(&a + &b) - &b, a);
            assert_eq!(a.double(), &a + &a);
            assert_eq!(a.div2().double(), a);
            assert!((&a + &(-&a)).is_zero());
            assert_eq!(&a * &Fp2::one(&params), a);
            // a * conj(a) is the norm, a base field element
            assert!((&a * &a.conjugate()).c1.is_zero());
        }
    }

    #[test]
    fn test_conversions() {
        let params = p217();
        let mut prng = ChaCha20Rng::seed_from_u64(0);

        for _ in 0..20 {
            let (_, _, a) = random::<Plain>(&mut prng, &params);
            let (_, _, b) = random::<Plain>(&mut prng, &params);
            let product = &a.to_montgomery() * &b.to_montgomery();
            assert_eq!(product.to_plain(), &a * &b);
            assert_eq!(a.to_form::<Montgomery>().to_form::<Plain>(), a);
        }
    }
}
