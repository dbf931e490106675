use core::fmt;
use core::marker::PhantomData;
use core::ops::{Add, Mul, Neg, Sub};
use std::borrow::Cow;
use std::sync::Arc;

use num_bigint::BigUint;
use strum_macros::Display;

use crate::bigint::add::add_assign;
use crate::bigint::sub::halve_assign;
use crate::bigint::Limbs;
use crate::error::Result;
use crate::field::montgomery;
use crate::field::params::ModulusParameters;

/// Runtime name of a representation, shown in `Debug` output of elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Representation {
    Plain,
    Montgomery,
}

mod sealed {
    pub trait Sealed {}
}

/// How the limbs of an element relate to the value they stand for.
///
/// A plain element stores `a`, a Montgomery element stores `a·R mod p`.
/// Only elements of the same form can be combined.
pub trait Form: sealed::Sealed + Clone + Copy + fmt::Debug + PartialEq + Eq + Send + Sync + 'static {
    const REPRESENTATION: Representation;

    /// Turn an operand into one that, multiplied by a second operand of
    /// this form through the kernel, gives a product of this form.
    fn lift<'a>(params: &ModulusParameters, limbs: &'a [u64]) -> Cow<'a, [u64]>;

    /// Plain canonical limbs into this form.
    fn encode(params: &ModulusParameters, plain: Limbs) -> Limbs;

    /// Limbs of this form back to the plain value.
    fn decode(params: &ModulusParameters, limbs: &[u64]) -> Limbs;

    fn one(params: &ModulusParameters) -> Limbs;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plain;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Montgomery;

impl sealed::Sealed for Plain {}
impl sealed::Sealed for Montgomery {}

impl Form for Plain {
    const REPRESENTATION: Representation = Representation::Plain;

    fn lift<'a>(params: &ModulusParameters, limbs: &'a [u64]) -> Cow<'a, [u64]> {
        Cow::Owned(montgomery::to_montgomery(params, limbs).into_vec())
    }

    fn encode(_params: &ModulusParameters, plain: Limbs) -> Limbs { plain }

    fn decode(_params: &ModulusParameters, limbs: &[u64]) -> Limbs { Limbs::from_slice(limbs) }

    fn one(params: &ModulusParameters) -> Limbs { Limbs::one(params.n_limbs()) }
}

impl Form for Montgomery {
    const REPRESENTATION: Representation = Representation::Montgomery;

    fn lift<'a>(_params: &ModulusParameters, limbs: &'a [u64]) -> Cow<'a, [u64]> { Cow::Borrowed(limbs) }

    fn encode(params: &ModulusParameters, plain: Limbs) -> Limbs { montgomery::to_montgomery(params, &plain) }

    fn decode(params: &ModulusParameters, limbs: &[u64]) -> Limbs { montgomery::from_montgomery(params, limbs) }

    fn one(params: &ModulusParameters) -> Limbs { params.montgomery_one().clone() }
}

/// An element of GF(p), canonical in `[0, p)` in its form `F`.
#[derive(Clone)]
pub struct Fp<F: Form> {
    params: Arc<ModulusParameters>,
    limbs: Limbs,
    form: PhantomData<F>,
}

impl<F: Form> Fp<F> {
    fn from_raw(params: &Arc<ModulusParameters>, limbs: Limbs) -> Self {
        debug_assert_eq!(limbs.len(), params.n_limbs());
        Fp { params: Arc::clone(params), limbs, form: PhantomData }
    }

    /// For kernel outputs that are canonical by construction.
    pub(crate) fn from_limbs_unchecked(params: &Arc<ModulusParameters>, limbs: Limbs) -> Self {
        Self::from_raw(params, limbs)
    }

    fn with_limbs(&self, limbs: Limbs) -> Self { Self::from_raw(&self.params, limbs) }

    fn with_form<G: Form>(&self, limbs: Limbs) -> Fp<G> { Fp::from_raw(&self.params, limbs) }

    fn check_same_field(&self, other: &Self) {
        assert!(
            Arc::ptr_eq(&self.params, &other.params) || self.params.modulus() == other.params.modulus(),
            "elements belong to different fields"
        );
    }

    /// `value mod p`, converted into form `F`.
    pub fn from_biguint(params: &Arc<ModulusParameters>, value: &BigUint) -> Self {
        let reduced = value % params.modulus();
        let plain = Limbs::from_biguint(&reduced, params.n_limbs());
        Self::from_raw(params, F::encode(params, plain))
    }

    pub fn from_u64(params: &Arc<ModulusParameters>, value: u64) -> Self {
        Self::from_biguint(params, &BigUint::from(value))
    }

    /// Wrap limbs that are already in form `F`. They must be exactly `n`
    /// limbs and below p.
    pub fn from_limbs(params: &Arc<ModulusParameters>, limbs: &[u64]) -> Result<Self> {
        params.check_limbs(limbs)?;
        Ok(Self::from_raw(params, Limbs::from_slice(limbs)))
    }

    /// Parse the plain value from hex; it must already be below p.
    pub fn from_hex(params: &Arc<ModulusParameters>, hex_string: &str) -> Result<Self> {
        let parsed = Limbs::from_hex(hex_string, params.n_limbs())?;
        let plain = params.canonical_limbs(&parsed.to_biguint())?;
        Ok(Self::from_raw(params, F::encode(params, plain)))
    }

    pub fn zero(params: &Arc<ModulusParameters>) -> Self { Self::from_raw(params, Limbs::zero(params.n_limbs())) }

    pub fn one(params: &Arc<ModulusParameters>) -> Self { Self::from_raw(params, F::one(params)) }

    pub fn params(&self) -> &Arc<ModulusParameters> { &self.params }

    /// The stored limbs, in form `F`.
    pub fn limbs(&self) -> &Limbs { &self.limbs }

    pub fn representation(&self) -> Representation { F::REPRESENTATION }

    /// The value this element stands for, whatever its form.
    pub fn to_biguint(&self) -> BigUint { F::decode(&self.params, &self.limbs).to_biguint() }

    pub fn is_zero(&self) -> bool { self.limbs.is_zero() }

    pub fn is_one(&self) -> bool { self.limbs == F::one(&self.params) }

    pub fn add(&self, other: &Self) -> Self {
        self.check_same_field(other);
        self.with_limbs(montgomery::add(&self.params, &self.limbs, &other.limbs))
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.check_same_field(other);
        self.with_limbs(montgomery::sub(&self.params, &self.limbs, &other.limbs))
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        self.with_limbs(montgomery::negate_offset(&self.params, &self.limbs))
    }

    pub fn double(&self) -> Self { self.with_limbs(montgomery::double(&self.params, &self.limbs)) }

    /// `a / 2 mod p`: add p to odd values first so the shift is exact.
    pub fn div2(&self) -> Self {
        let mut halved = self.limbs.clone();
        let carry = if halved[0] & 1 == 1 { add_assign(&mut halved, self.params.modulus_limbs()) } else { 0 };
        halve_assign(&mut halved, carry);
        self.with_limbs(halved)
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.check_same_field(other);
        let lifted = F::lift(&self.params, &self.limbs);
        self.with_limbs(montgomery::mul(&self.params, &lifted, &other.limbs))
    }

    pub fn square(&self) -> Self { self.mul(self) }

    /// Left-to-right square and multiply.
    pub fn pow(&self, exponent: &BigUint) -> Self {
        let mut result = Self::one(&self.params);
        for i in (0..exponent.bits()).rev() {
            result = result.square();
            if exponent.bit(i) {
                result = result.mul(self);
            }
        }
        result
    }

    /// `a^(p-2)`, or `None` for zero.
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        let exponent = self.params.modulus() - BigUint::from(2u32);
        Some(self.pow(&exponent))
    }

    /// Re-encode the same value in another form.
    pub fn to_form<G: Form>(&self) -> Fp<G> {
        let plain = F::decode(&self.params, &self.limbs);
        self.with_form(G::encode(&self.params, plain))
    }
}

impl Fp<Plain> {
    pub fn to_montgomery(&self) -> Fp<Montgomery> {
        self.with_form(montgomery::to_montgomery(&self.params, &self.limbs))
    }
}

impl Fp<Montgomery> {
    pub fn to_plain(&self) -> Fp<Plain> { self.with_form(montgomery::from_montgomery(&self.params, &self.limbs)) }
}

impl<F: Form> PartialEq for Fp<F> {
    fn eq(&self, other: &Self) -> bool {
        self.params.modulus() == other.params.modulus() && self.limbs == other.limbs
    }
}

impl<F: Form> Eq for Fp<F> {}

impl<F: Form> fmt::Debug for Fp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fp")
            .field("representation", &format_args!("{}", F::REPRESENTATION))
            .field("limbs", &self.limbs.to_hex_words())
            .finish()
    }
}

impl<F: Form> fmt::Display for Fp<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", F::decode(&self.params, &self.limbs).to_hex())
    }
}

impl<'a, F: Form> Add<&'a Fp<F>> for &'a Fp<F> {
    type Output = Fp<F>;

    fn add(self, rhs: &'a Fp<F>) -> Fp<F> { Fp::add(self, rhs) }
}

impl<'a, F: Form> Sub<&'a Fp<F>> for &'a Fp<F> {
    type Output = Fp<F>;

    fn sub(self, rhs: &'a Fp<F>) -> Fp<F> { Fp::sub(self, rhs) }
}

impl<'a, F: Form> Mul<&'a Fp<F>> for &'a Fp<F> {
    type Output = Fp<F>;

    fn mul(self, rhs: &'a Fp<F>) -> Fp<F> { Fp::mul(self, rhs) }
}

impl<'a, F: Form> Neg for &'a Fp<F> {
    type Output = Fp<F>;

    fn neg(self) -> Fp<F> { Fp::neg(self) }
}
