//! Interleaved (word-serial) Montgomery multiplication.
//!
//! With `R = 2^(64·n)`, [`mul`] returns `a·b·R⁻¹ mod p`: one limb of the
//! streamed operand is multiplied in, then one limb is reduced away, `n`
//! times. The accumulator never grows past `n + 2` limbs.

use strum_macros::{Display, EnumIter, EnumString};

use crate::bigint::add::{add_assign, double_assign};
use crate::bigint::cmp::greaterthanorequal;
use crate::bigint::mul::{mul_limb_add_assign, shr_limb_assign};
use crate::bigint::sub::sub_assign;
use crate::bigint::Limbs;
use crate::error::{ModulusError, Result};
use crate::field::params::ModulusParameters;

/// How each per-limb reduction step folds the quotient back in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Reduction {
    /// `u ← (u + q·p) / 2^64`, any odd modulus.
    #[default]
    Reference,
    /// `u ← ⌊u / 2^64⌋ + q·p̂·2^(64·(z−1))` with `p̂ = (p + 1) / 2^(64·z)`.
    /// Needs `2^64 | p + 1`, i.e. `z ≥ 1`.
    TruncatedModulus,
}

impl Reduction {
    /// The truncated modulus folded in per step, `None` for the reference step.
    fn resolve(self, params: &ModulusParameters) -> Result<Option<&Limbs>> {
        match self {
            Reduction::Reference => Ok(None),
            Reduction::TruncatedModulus => params
                .p_hat()
                .map(Some)
                .ok_or_else(|| ModulusError::TruncationUnavailable { e2: params.e2() }.into()),
        }
    }
}

fn accumulator(params: &ModulusParameters) -> Vec<u64> { vec![0u64; params.n_limbs() + 2] }

/// One reduction step: make the low limb vanish and divide by the radix.
fn reduce_step(params: &ModulusParameters, acc: &mut [u64], p_hat: Option<&Limbs>) {
    let q = acc[0].wrapping_mul(params.m0());
    match p_hat {
        None => {
            let carry = mul_limb_add_assign(acc, params.modulus_limbs(), q);
            debug_assert_eq!(carry, 0);
            assert_eq!(acc[0], 0, "montgomery step left a remainder, modulus constants are inconsistent");
            shr_limb_assign(acc);
        }
        Some(p_hat) => {
            // u - q is divisible by the radix because p = -1 mod 2^64
            shr_limb_assign(acc);
            let carry = mul_limb_add_assign(&mut acc[params.z() - 1..], p_hat, q);
            debug_assert_eq!(carry, 0);
        }
    }
}

fn interleave(params: &ModulusParameters, a: &[u64], b: &[u64], p_hat: Option<&Limbs>) -> Vec<u64> {
    let n = params.n_limbs();
    assert_eq!(a.len(), n);
    assert_eq!(b.len(), n);

    let mut acc = accumulator(params);
    for &aj in a {
        mul_limb_add_assign(&mut acc, b, aj);
        reduce_step(params, &mut acc, p_hat);
    }
    acc
}

/// Subtract p until the value is below it, then trim to `n` limbs.
///
/// `bound` is the caller's guarantee that the input is below `bound · p`.
fn correct(params: &ModulusParameters, mut acc: Vec<u64>, bound: usize) -> Limbs {
    let mut subtractions = 0;
    while greaterthanorequal(&acc, params.modulus_limbs()) {
        sub_assign(&mut acc, params.modulus_limbs());
        subtractions += 1;
        assert!(subtractions < bound, "montgomery result exceeded {}p", bound);
    }
    Limbs::from(acc).resized(params.n_limbs())
}

/// `a·b·R⁻¹` before the final correction; the result lies in `[0, 2p)`.
///
/// `a` is streamed limb by limb, least significant first. Both operands
/// must be `n` limbs with `b < p`. Fails when `reduction` is
/// [`Reduction::TruncatedModulus`] and the modulus has `z = 0`.
pub fn mul_raw(params: &ModulusParameters, a: &[u64], b: &[u64], reduction: Reduction) -> Result<Vec<u64>> {
    let p_hat = reduction.resolve(params)?;
    Ok(interleave(params, a, b, p_hat))
}

/// Canonical `a·b·R⁻¹ mod p`.
pub fn mul_with(params: &ModulusParameters, a: &[u64], b: &[u64], reduction: Reduction) -> Result<Limbs> {
    Ok(correct(params, mul_raw(params, a, b, reduction)?, 2))
}

pub fn mul(params: &ModulusParameters, a: &[u64], b: &[u64]) -> Limbs { correct(params, interleave(params, a, b, None), 2) }

/// `(x0·y0 + x1·y1)·R⁻¹ mod p` in a single pass: the limbs of `x0` and `x1`
/// are streamed together and share one reduction per limb index.
///
/// All operands are `n` limbs; `y0`, `y1` are below p and `x0`, `x1` at most p.
pub fn fused_mul(params: &ModulusParameters, x: [&[u64]; 2], y: [&[u64]; 2]) -> Limbs {
    let n = params.n_limbs();
    assert!(x.iter().chain(y.iter()).all(|limbs| limbs.len() == n));

    let mut acc = accumulator(params);
    for j in 0..n {
        mul_limb_add_assign(&mut acc, y[0], x[0][j]);
        mul_limb_add_assign(&mut acc, y[1], x[1][j]);
        reduce_step(params, &mut acc, None);
    }
    // each product contributes less than p, the reduction less than p more
    correct(params, acc, 3)
}

/// `p - b`, the offset negation used to fold a subtraction into
/// [`fused_mul`]. Stays non-negative for every canonical `b`.
pub fn negate_offset(params: &ModulusParameters, b: &[u64]) -> Limbs {
    let mut neg = params.modulus_limbs().clone();
    let borrow = sub_assign(&mut neg, b);
    assert_eq!(borrow, 0, "operand is not below the modulus");
    neg
}

/// `a·R mod p` for canonical `a`.
pub fn to_montgomery(params: &ModulusParameters, a: &[u64]) -> Limbs { mul(params, a, params.montgomery_r2()) }

/// `a·R⁻¹ mod p`.
pub fn from_montgomery(params: &ModulusParameters, a: &[u64]) -> Limbs {
    mul(params, a, &Limbs::one(params.n_limbs()))
}

/// `a + b mod p` for canonical inputs.
pub fn add(params: &ModulusParameters, a: &[u64], b: &[u64]) -> Limbs {
    let mut sum = a.to_vec();
    sum.push(0);
    add_assign(&mut sum, b);
    correct(params, sum, 2)
}

/// `2a mod p` for canonical input.
pub fn double(params: &ModulusParameters, a: &[u64]) -> Limbs {
    let mut doubled = a.to_vec();
    doubled.push(0);
    double_assign(&mut doubled);
    correct(params, doubled, 2)
}

/// `a - b mod p` for canonical inputs.
pub fn sub(params: &ModulusParameters, a: &[u64], b: &[u64]) -> Limbs {
    let mut diff = Limbs::from_slice(a);
    if sub_assign(&mut diff, b) == 1 {
        add_assign(&mut diff, params.modulus_limbs());
    }
    diff
}
