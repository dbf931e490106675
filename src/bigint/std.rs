use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::bigint::{Limbs, LIMB_BITS};
use crate::error::{CodecError, Result};

fn check_limb_width(limb_width: u32) -> Result<()> {
    if limb_width == 0 || limb_width > 64 {
        return Err(CodecError::InvalidLimbWidth(limb_width).into());
    }
    Ok(())
}

fn limb_mask(limb_width: u32) -> u64 {
    if limb_width == 64 {
        u64::MAX
    } else {
        (1u64 << limb_width) - 1
    }
}

/// Split `value` into `max(ceil(bits / limb_width), min_limbs)` limbs, least
/// significant first.
///
/// Fails on negative input and on limb widths outside `1..=64`.
pub fn encode(value: &BigInt, limb_width: u32, min_limbs: usize) -> Result<Vec<u64>> {
    check_limb_width(limb_width)?;
    if value.sign() == Sign::Minus {
        return Err(CodecError::NegativeValue.into());
    }
    Ok(encode_unsigned(value.magnitude(), limb_width, min_limbs))
}

/// Infallible form of [`encode`] for values that are unsigned by type.
///
/// `limb_width` must already be in `1..=64`.
pub fn encode_unsigned(value: &BigUint, limb_width: u32, min_limbs: usize) -> Vec<u64> {
    debug_assert!(limb_width >= 1 && limb_width <= 64);

    let word_len = (value.bits().div_ceil(limb_width as u64) as usize).max(min_limbs);

    if limb_width == LIMB_BITS {
        let mut limbs = value.to_u64_digits();
        limbs.resize(word_len, 0);
        return limbs;
    }

    let mask = BigUint::from(limb_mask(limb_width));
    (0..word_len)
        .map(|i| {
            let limb: BigUint = (value >> (i * limb_width as usize)) & &mask;
            limb.to_u64().unwrap_or(0)
        })
        .collect()
}

/// `Σ limbs[i] · 2^(i · limb_width)`.
pub fn decode(limbs: &[u64], limb_width: u32) -> Result<BigUint> {
    check_limb_width(limb_width)?;
    let mask = limb_mask(limb_width);

    let mut value = BigUint::zero();
    for (index, &limb) in limbs.iter().enumerate().rev() {
        if limb & !mask != 0 {
            return Err(CodecError::LimbOutOfRange { index, limb, width: limb_width }.into());
        }
        value <<= limb_width as usize;
        value += limb;
    }
    Ok(value)
}

impl Limbs {
    /// Parse a big-endian hex string (optional `0x` prefix) into at least
    /// `n_limbs` limbs.
    pub fn from_hex(hex_string: &str, n_limbs: usize) -> Result<Self> {
        let digits = hex_string.trim().trim_start_matches("0x");
        let padded = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded).map_err(|_| CodecError::InvalidHex(hex_string.to_string()))?;
        Ok(Limbs::from_biguint(&BigUint::from_bytes_be(&bytes), n_limbs))
    }

    /// One `0x…` string per limb, least significant first.
    pub fn to_hex_words(&self) -> Vec<String> {
        self.iter().map(|limb| format!("{:#x}", limb)).collect()
    }

    /// The whole value as a single big-endian hex string.
    pub fn to_hex(&self) -> String {
        let bytes: Vec<u8> = self.iter().rev().flat_map(|limb| limb.to_be_bytes()).collect();
        let encoded = hex::encode(bytes);
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}
