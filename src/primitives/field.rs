use crypto_bigint::modular::{BoxedMontyForm, BoxedMontyParams};
use crypto_bigint::{BoxedUint, Odd};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::Zero;

use crate::{Error, Result};

/// Limb width used to size Montgomery operands.
const LIMB_BITS: u64 = 64;

/// Computes `base^exp mod modulus` for public exponents.
///
/// Variable-time. Only use with exponents that are already public (challenges, responses).
pub fn mod_pow(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exp, modulus)
}

/// Computes `base^exp mod modulus` for secret exponents.
///
/// Uses constant-time Montgomery exponentiation from `crypto-bigint` with the exponent padded
/// to the modulus precision, so timing depends on the modulus size and not on the exponent bits.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if the modulus is zero or even, and
/// [`Error::Encoding`] if `exp` is wider than the modulus.
pub fn mod_pow_secret(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParams("modulus cannot be zero".to_string()));
    }

    let precision = limb_precision(modulus);
    let odd_modulus: Option<Odd<BoxedUint>> = Odd::new(to_boxed(modulus, precision)?).into();
    let odd_modulus = odd_modulus.ok_or_else(|| {
        Error::InvalidParams("modulus must be odd for Montgomery form".to_string())
    })?;

    let params = BoxedMontyParams::new(odd_modulus);
    let base = to_boxed(&(base % modulus), precision)?;
    let exp = to_boxed(exp, precision)?;

    let result = BoxedMontyForm::new(base, params).pow(&exp).retrieve();
    Ok(BigUint::from_bytes_be(&result.to_be_bytes()))
}

/// Computes `(a - b) mod modulus` without underflow.
pub fn mod_sub(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    let a = a % modulus;
    let b = b % modulus;
    if a >= b {
        a - b
    } else {
        modulus - (b - a)
    }
}

/// Reduces a signed integer into `[0, modulus)` with floored division.
///
/// `-5 mod 22` is `17`, so `g^-5` and `g^17` agree in a group of order 22.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if the modulus is zero.
pub fn reduce_signed(value: &BigInt, modulus: &BigUint) -> Result<BigUint> {
    if modulus.is_zero() {
        return Err(Error::InvalidParams("modulus cannot be zero".to_string()));
    }
    let modulus = BigInt::from_biguint(Sign::Plus, modulus.clone());
    // Floored remainder is non-negative, so the magnitude is the value.
    let (_, reduced) = value.mod_floor(&modulus).into_parts();
    Ok(reduced)
}

/// Computes the Schnorr-style response `s = (k - e*x) mod order`.
///
/// Variable-time in `x`: the product and remainder use `num-bigint` arithmetic. Only the
/// exponentiations in this crate are constant-time.
pub fn response(k: &BigUint, e: &BigUint, x: &BigUint, order: &BigUint) -> BigUint {
    let ex = (e * x) % order;
    mod_sub(k, &ex, order)
}

/// Computes `a * b mod modulus`.
pub fn mod_mul(a: &BigUint, b: &BigUint, modulus: &BigUint) -> BigUint {
    (a * b) % modulus
}

fn limb_precision(modulus: &BigUint) -> u32 {
    let bits = modulus.bits().max(1);
    let limbs = bits.div_ceil(LIMB_BITS);
    // Group sizes are capped well below u32::MAX bits by parameter validation.
    (limbs * LIMB_BITS) as u32
}

fn to_boxed(value: &BigUint, precision: u32) -> Result<BoxedUint> {
    BoxedUint::from_be_slice(&value.to_bytes_be(), precision)
        .map_err(|e| Error::Encoding(format!("operand does not fit modulus precision: {e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: u64) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn secret_and_public_exponentiation_agree() {
        let p = BigUint::parse_bytes(b"a6caf4a2820475daa9de24b44b7b4cb3", 16).unwrap();
        let base = big(2);
        for exp in [0u64, 1, 2, 65_537, u64::MAX] {
            let exp = big(exp);
            assert_eq!(
                mod_pow_secret(&base, &exp, &p).unwrap(),
                mod_pow(&base, &exp, &p)
            );
        }
    }

    #[test]
    fn secret_exponentiation_small_modulus() {
        // 5^5 mod 23 = 20
        assert_eq!(mod_pow_secret(&big(5), &big(5), &big(23)).unwrap(), big(20));
        // 7^7 mod 23 = 5
        assert_eq!(mod_pow_secret(&big(7), &big(7), &big(23)).unwrap(), big(5));
    }

    #[test]
    fn secret_exponentiation_rejects_even_modulus() {
        assert!(matches!(
            mod_pow_secret(&big(3), &big(5), &big(24)),
            Err(Error::InvalidParams(_))
        ));
        assert!(matches!(
            mod_pow_secret(&big(3), &big(5), &big(0)),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn response_wraps_negative_values() {
        // (4 - 12*3) mod 22 = -32 mod 22 = 12
        assert_eq!(response(&big(4), &big(12), &big(3), &big(22)), big(12));
        assert_eq!(response(&big(30), &big(1), &big(3), &big(22)), big(5));
    }

    #[test]
    fn reduce_signed_wraps_negative_values() {
        let order = big(22);
        assert_eq!(reduce_signed(&BigInt::from(-5), &order).unwrap(), big(17));
        assert_eq!(reduce_signed(&BigInt::from(-22), &order).unwrap(), big(0));
        assert_eq!(reduce_signed(&BigInt::from(49), &order).unwrap(), big(5));
        assert!(matches!(
            reduce_signed(&BigInt::from(1), &big(0)),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn mod_sub_handles_unreduced_inputs() {
        assert_eq!(mod_sub(&big(50), &big(3), &big(22)), big(3));
        assert_eq!(mod_sub(&big(3), &big(50), &big(22)), big(19));
    }
}
