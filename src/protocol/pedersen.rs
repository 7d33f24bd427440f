//! Pedersen commitments `c = g^v * h^r mod p`.
//!
//! Committed values are arbitrary signed integers, reduced modulo `p - 1` before exponentiation.
//!
//! Hiding rests on `r` being uniform and independent of `v`; binding rests on nobody knowing
//! `log_g(h)`, which is why the parameters must carry two independently selected generators.

use num_bigint::{BigInt, BigUint};
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::primitives::encoding::{decode_element, encode_element, encode_fixed};
use crate::primitives::field::{mod_mul, mod_pow, mod_pow_secret, reduce_signed};
use crate::primitives::rng::sample_range;
use crate::{Error, GroupParameters, Result};

/// A commitment together with its opening randomness.
///
/// Both fields are fixed-width big-endian encodings at the width of `p`. The randomness is
/// known only to the committer until the commitment is opened, and is wiped on drop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Commitment {
    value: Vec<u8>,
    randomness: Vec<u8>,
}

impl Commitment {
    /// Rebuilds a commitment from its encoded parts, checking both widths against `params`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if either part has the wrong width or is not below `p`.
    pub fn from_parts(
        value: Vec<u8>,
        randomness: Vec<u8>,
        params: &GroupParameters,
    ) -> Result<Self> {
        decode_element(&value, params.p())?;
        decode_element(&randomness, params.p())?;
        Ok(Self { value, randomness })
    }

    /// Returns the encoded commitment value `c`.
    pub fn value(&self) -> &[u8] {
        &self.value
    }

    /// Returns the encoded blinding factor `r`.
    pub fn randomness(&self) -> &[u8] {
        &self.randomness
    }
}

/// Commits to `value` with fresh randomness drawn from `[2, p-2]`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if the parameters carry no second generator.
pub fn commit<R: CryptoRngCore + ?Sized>(
    value: &BigInt,
    params: &GroupParameters,
    rng: &mut R,
) -> Result<Commitment> {
    params.require_h()?;
    let r = sample_range(rng, &BigUint::from(2u32), &(params.p() - 1u32))?;
    commit_with_randomness(value, &r, params)
}

/// Commits to `value` with caller-chosen randomness `r`.
///
/// Deterministic; meant for reproducing known commitments.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if `r` lies outside `[2, p-2]` or the parameters carry
/// no second generator.
pub fn commit_with_randomness(
    value: &BigInt,
    r: &BigUint,
    params: &GroupParameters,
) -> Result<Commitment> {
    let p = params.p();
    let h = params.require_h()?;

    if r < &BigUint::from(2u32) || r > &(p - 2u32) {
        return Err(Error::InvalidParams(
            "commitment randomness must lie in [2, p - 2]".to_string(),
        ));
    }

    let v = reduce_signed(value, &params.order())?;
    let c = mod_mul(
        &mod_pow_secret(params.g(), &v, p)?,
        &mod_pow_secret(h, r, p)?,
        p,
    );

    Ok(Commitment {
        value: encode_element(&c, p)?,
        randomness: encode_fixed(r, params.byte_width())?,
    })
}

/// Opens `commitment` against the claimed `value`.
///
/// Returns `false` for a mismatch and for malformed encodings.
pub fn verify(commitment: &Commitment, value: &BigInt, params: &GroupParameters) -> bool {
    match check(commitment, value, params) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting malformed commitment");
            false
        }
    }
}

/// Opens `commitment` against `value`, reporting malformed encodings as errors.
///
/// # Errors
///
/// Returns [`Error::Encoding`] for wrong-width or out-of-range fields and
/// [`Error::InvalidParams`] if the parameters carry no second generator.
pub fn check(commitment: &Commitment, value: &BigInt, params: &GroupParameters) -> Result<bool> {
    let p = params.p();
    let h = params.require_h()?;

    decode_element(&commitment.value, p)?;
    let r = decode_element(&commitment.randomness, p)?;
    let v = reduce_signed(value, &params.order())?;

    let expected = mod_mul(&mod_pow(params.g(), &v, p), &mod_pow(h, &r, p), p);
    let expected = encode_element(&expected, p)?;

    Ok(bool::from(expected.as_slice().ct_eq(commitment.value.as_slice())))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::SecureRng;

    fn big(v: u32) -> BigUint {
        BigUint::from(v)
    }

    fn int(v: i64) -> BigInt {
        BigInt::from(v)
    }

    fn toy_params() -> GroupParameters {
        GroupParameters::new(big(23), big(5), Some(big(7))).unwrap()
    }

    #[test]
    fn toy_group_vector() {
        // 5^5 * 7^7 mod 23 = 20 * 5 mod 23 = 8
        let params = toy_params();
        let commitment = commit_with_randomness(&int(5), &big(7), &params).unwrap();

        assert_eq!(commitment.value(), &[8]);
        assert_eq!(commitment.randomness(), &[7]);
        assert!(verify(&commitment, &int(5), &params));
    }

    #[test]
    fn commit_then_verify() {
        let params = toy_params();
        let mut rng = SecureRng::new();

        for v in -30..30i64 {
            let commitment = commit(&int(v), &params, &mut rng).unwrap();
            assert!(verify(&commitment, &int(v), &params));
        }
    }

    #[test]
    fn negative_values_wrap_modulo_group_order() {
        // -5 = 17 mod 22: 5^17 * 7^7 mod 23 = 6
        let params = toy_params();
        let negative = commit_with_randomness(&int(-5), &big(7), &params).unwrap();
        let positive = commit_with_randomness(&int(17), &big(7), &params).unwrap();

        assert_eq!(negative.value(), &[6]);
        assert_eq!(negative, positive);
        assert!(verify(&negative, &int(-5), &params));
        assert!(verify(&negative, &int(17), &params));
    }

    #[test]
    fn wrong_value_is_rejected() {
        let params = toy_params();
        let commitment = commit_with_randomness(&int(5), &big(7), &params).unwrap();

        assert!(!verify(&commitment, &int(6), &params));
        assert!(!verify(&commitment, &int(4), &params));
        assert!(!verify(&commitment, &int(-5), &params));
    }

    #[test]
    fn randomness_is_range_checked() {
        let params = toy_params();
        for r in [0u32, 1, 22, 23] {
            assert!(matches!(
                commit_with_randomness(&int(5), &big(r), &params),
                Err(Error::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn requires_second_generator() {
        let params = GroupParameters::new(big(23), big(5), None).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            commit(&int(1), &params, &mut rng),
            Err(Error::InvalidParams(_))
        ));
    }

    #[test]
    fn malformed_commitment_is_an_error_for_check_and_false_for_verify() {
        let params = toy_params();
        let commitment = Commitment {
            value: vec![0, 8],
            randomness: vec![7],
        };

        assert!(matches!(
            check(&commitment, &int(5), &params),
            Err(Error::Encoding(_))
        ));
        assert!(!verify(&commitment, &int(5), &params));
        assert!(Commitment::from_parts(vec![0, 8], vec![7], &params).is_err());
        assert!(Commitment::from_parts(vec![8], vec![7], &params).is_ok());
    }
}
