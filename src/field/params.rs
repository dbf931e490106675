use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::bigint::{Limbs, LIMB_BITS};
use crate::error::{ModulusError, Result};

pub const P217_E2: u32 = 110;
pub const P217_E3: u32 = 67;

/// p217 = 2^110 * 3^67 - 1
pub const P217_MODULUS: [u64; 4] =
    [0xFFFFFFFFFFFFFFFF, 0x7BC6BFFFFFFFFFFF, 0xA10872128AF43417, 0x0000000001248A1B];
/// 2^256 mod p217
pub const P217_MONTGOMERY_ONE: [u64; 4] =
    [0x000000E006430584, 0x0BC5000000000000, 0xEDA1260B181CA0F5, 0x000000000011177F];
/// (2^256)^2 mod p217
pub const P217_MONTGOMERY_R2: [u64; 4] =
    [0x2A732D236E62C233, 0x9B7E8A53EDA2096F, 0xB06C6BF6EE0B9770, 0x00000000002ED0F8];

/// Exponents and limb width of a modulus `2^e2 * 3^e3 - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub e2: u32,
    pub e3: u32,
    pub limb_width: u32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig { e2: P217_E2, e3: P217_E3, limb_width: LIMB_BITS }
    }
}

impl FieldConfig {
    pub fn derive(&self) -> Result<ModulusParameters> {
        ModulusParameters::derive(self.e2, self.e3, self.limb_width)
    }
}

/// Every constant the Montgomery kernel needs, derived once from the
/// exponents and shared read-only by all elements of the field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulusParameters {
    e2: u32,
    e3: u32,
    limb_width: u32,
    n_limbs: usize,
    modulus: BigUint,
    modulus_limbs: Limbs,
    /// floor(e2 / limb_width)
    z: usize,
    /// (p + 1) / 2^(z * limb_width) without zero padding, only when z >= 1
    p_hat: Option<Limbs>,
    r: BigUint,
    r_inv: BigUint,
    montgomery_one: Limbs,
    montgomery_r2: Limbs,
    /// -p^-1 mod 2^64
    m0: u64,
}

impl ModulusParameters {
    pub fn derive(e2: u32, e3: u32, limb_width: u32) -> Result<Self> {
        if limb_width != LIMB_BITS {
            return Err(ModulusError::UnsupportedLimbWidth(limb_width).into());
        }

        let power = (BigUint::one() << e2 as usize) * BigUint::from(3u32).pow(e3);
        if power <= BigUint::from(2u32) {
            return Err(ModulusError::NonPositiveModulus.into());
        }
        let modulus = power - BigUint::one();
        if (&modulus % 2u32).is_zero() {
            return Err(ModulusError::EvenModulus.into());
        }

        let width = limb_width as u64;
        let n_limbs = modulus.bits().div_ceil(width) as usize;
        let z = (e2 / limb_width) as usize;
        let r_bits = n_limbs * limb_width as usize;
        let r = BigUint::one() << r_bits;

        let p_hat = (z >= 1).then(|| {
            let p_hat = (&modulus + BigUint::one()) >> (z * limb_width as usize);
            Limbs::from_biguint(&p_hat, 1)
        });

        // 1/2 mod p is (p + 1) / 2, so R^-1 = ((p + 1) / 2)^(n * w)
        let half = (&modulus + BigUint::one()) >> 1usize;
        let r_inv = half.modpow(&BigUint::from(r_bits), &modulus);

        let montgomery_one = Limbs::from_biguint(&(&r % &modulus), n_limbs);
        let montgomery_r2 = Limbs::from_biguint(&((&r * &r) % &modulus), n_limbs);
        let modulus_limbs = Limbs::from_biguint(&modulus, n_limbs);
        let m0 = neg_inverse_limb(modulus_limbs[0]);

        debug!(
            "derived modulus 2^{} * 3^{} - 1: {} bits, {} limbs, z = {}, m0 = {:#x}",
            e2,
            e3,
            modulus.bits(),
            n_limbs,
            z,
            m0
        );

        Ok(ModulusParameters {
            e2,
            e3,
            limb_width,
            n_limbs,
            modulus,
            modulus_limbs,
            z,
            p_hat,
            r,
            r_inv,
            montgomery_one,
            montgomery_r2,
            m0,
        })
    }

    /// The 217-bit SIDH prime, four 64-bit limbs.
    pub fn p217() -> Self {
        Self::derive(P217_E2, P217_E3, LIMB_BITS).expect("p217 exponents describe a valid modulus")
    }

    pub fn e2(&self) -> u32 { self.e2 }

    pub fn e3(&self) -> u32 { self.e3 }

    pub fn limb_width(&self) -> u32 { self.limb_width }

    pub fn n_limbs(&self) -> usize { self.n_limbs }

    pub fn modulus(&self) -> &BigUint { &self.modulus }

    pub fn modulus_limbs(&self) -> &Limbs { &self.modulus_limbs }

    pub fn z(&self) -> usize { self.z }

    pub fn p_hat(&self) -> Option<&Limbs> { self.p_hat.as_ref() }

    pub fn r(&self) -> &BigUint { &self.r }

    pub fn r_inv(&self) -> &BigUint { &self.r_inv }

    pub fn montgomery_one(&self) -> &Limbs { &self.montgomery_one }

    pub fn montgomery_r2(&self) -> &Limbs { &self.montgomery_r2 }

    pub fn m0(&self) -> u64 { self.m0 }

    pub fn bits(&self) -> u64 { self.modulus.bits() }

    /// Encode `value` into exactly `n` limbs, failing when it is not below p.
    pub fn canonical_limbs(&self, value: &BigUint) -> Result<Limbs> {
        if value >= &self.modulus {
            return Err(ModulusError::NotCanonical.into());
        }
        Ok(Limbs::from_biguint(value, self.n_limbs))
    }

    pub fn check_limbs(&self, limbs: &[u64]) -> Result<()> {
        if limbs.len() != self.n_limbs {
            return Err(ModulusError::LimbCountMismatch { expected: self.n_limbs, actual: limbs.len() }.into());
        }
        if crate::bigint::cmp::greaterthanorequal(limbs, &self.modulus_limbs) {
            return Err(ModulusError::NotCanonical.into());
        }
        Ok(())
    }
}

/// `-x^-1 mod 2^64` for odd `x`, by Newton iteration (each step doubles the
/// number of correct low bits).
fn neg_inverse_limb(x: u64) -> u64 {
    debug_assert!(x & 1 == 1);
    let mut inv = 1u64;
    for _ in 0..6 {
        inv = inv.wrapping_mul(2u64.wrapping_sub(x.wrapping_mul(inv)));
    }
    inv.wrapping_neg()
}
