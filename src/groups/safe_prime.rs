//! Safe-prime groups `Z_p^*` with `p = 2q + 1`.
//!
//! # Generator convention
//!
//! A generator is any `g` in `[2, p-2]` with `g^q mod p != 1`. For a safe prime this selects
//! elements of order `2q` (the full group; order 2 is only `p-1`, which the range excludes),
//! not generators of the order-`q` subgroup. Every protocol in this crate accordingly reduces
//! exponents modulo `p - 1`. Switching to subgroup generators would change the exponent
//! modulus and invalidate existing proofs and test vectors.

use num_bigint::BigUint;
use num_traits::One;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use crate::config::{check_bits, GenerationSettings};
use crate::primitives::encoding::byte_width;
use crate::primitives::field::mod_pow;
use crate::primitives::primes::{has_small_factor, is_probable_prime};
use crate::primitives::rng::{sample_odd_with_bits, sample_range};
use crate::{Error, Result};

/// Miller-Rabin rounds used when validating caller-supplied parameters.
const VALIDATION_ROUNDS: u32 = 40;

/// Public parameters of a safe-prime group.
///
/// Immutable once constructed; shared by reference across every commit, prove and verify call.
/// Deserialization runs the same checks as [`GroupParameters::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupParameters")]
pub struct GroupParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    h: Option<BigUint>,
}

impl GroupParameters {
    /// Creates parameters from a modulus and generators, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if:
    /// - `p` or `q = (p-1)/2` is not a probable prime
    /// - a generator lies outside `[2, p-2]` or has `g^q mod p == 1`
    /// - `h` equals `g`
    pub fn new(p: BigUint, g: BigUint, h: Option<BigUint>) -> Result<Self> {
        let mut rng = crate::SecureRng::new();
        Self::new_with_rng(p, g, h, &mut rng)
    }

    /// Same as [`GroupParameters::new`] with an explicit RNG for the primality witnesses.
    ///
    /// # Errors
    ///
    /// See [`GroupParameters::new`].
    pub fn new_with_rng<R: CryptoRngCore + ?Sized>(
        p: BigUint,
        g: BigUint,
        h: Option<BigUint>,
        rng: &mut R,
    ) -> Result<Self> {
        if p < BigUint::from(7u32) || !p.bit(0) {
            return Err(Error::InvalidParams(
                "modulus must be an odd prime of at least 7".to_string(),
            ));
        }

        let q: BigUint = (&p - 1u32) >> 1u32;
        if !is_probable_prime(&p, VALIDATION_ROUNDS, rng) {
            return Err(Error::InvalidParams("modulus p is not prime".to_string()));
        }
        if !is_probable_prime(&q, VALIDATION_ROUNDS, rng) {
            return Err(Error::InvalidParams(
                "(p - 1) / 2 is not prime, p is not a safe prime".to_string(),
            ));
        }

        check_generator(&g, &p, &q, "g")?;
        if let Some(h) = &h {
            check_generator(h, &p, &q, "h")?;
            if h == &g {
                return Err(Error::InvalidParams(
                    "generators g and h must be different".to_string(),
                ));
            }
        }

        Ok(Self { p, q, g, h })
    }

    /// Returns the safe prime modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the Sophie Germain prime `q = (p - 1) / 2`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// Returns the generator `g`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Returns the second generator `h`, present on Pedersen parameters.
    pub fn h(&self) -> Option<&BigUint> {
        self.h.as_ref()
    }

    /// Returns the second generator or an error naming the operation that needs it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] when the parameters carry a single generator.
    pub fn require_h(&self) -> Result<&BigUint> {
        self.h.as_ref().ok_or_else(|| {
            Error::InvalidParams("parameters carry no second generator h".to_string())
        })
    }

    /// Returns the exponent modulus `p - 1`.
    pub fn order(&self) -> BigUint {
        &self.p - 1u32
    }

    /// Returns the bit length of `p`.
    pub fn bits(&self) -> u64 {
        self.p.bits()
    }

    /// Returns the encoded width of elements and exponents.
    pub fn byte_width(&self) -> usize {
        byte_width(&self.p)
    }
}

#[derive(Deserialize)]
struct RawGroupParameters {
    p: BigUint,
    q: BigUint,
    g: BigUint,
    h: Option<BigUint>,
}

impl TryFrom<RawGroupParameters> for GroupParameters {
    type Error = Error;

    fn try_from(raw: RawGroupParameters) -> Result<Self> {
        let params = Self::new(raw.p, raw.g, raw.h)?;
        if params.q != raw.q {
            return Err(Error::InvalidParams(
                "q does not equal (p - 1) / 2".to_string(),
            ));
        }
        Ok(params)
    }
}

/// Returns `true` if `g` satisfies the generator predicate `g^q mod p != 1`.
pub fn satisfies_generator_predicate(g: &BigUint, p: &BigUint, q: &BigUint) -> bool {
    !mod_pow(g, q, p).is_one()
}

fn check_generator(g: &BigUint, p: &BigUint, q: &BigUint, name: &str) -> Result<()> {
    let two = BigUint::from(2u32);
    let upper = p - 2u32;
    if g < &two || g > &upper {
        return Err(Error::InvalidParams(format!(
            "generator {name} must lie in [2, p - 2]"
        )));
    }
    if !satisfies_generator_predicate(g, p, q) {
        return Err(Error::InvalidParams(format!(
            "generator {name} lies in the order-q subgroup ({name}^q mod p == 1)"
        )));
    }
    Ok(())
}

/// Generates a safe-prime group with a single generator `g`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for an unsupported size and
/// [`Error::PrimeGenerationTimeout`] when a search budget is exhausted.
pub fn generate_safe_prime_group<R: CryptoRngCore + ?Sized>(
    bits: u32,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<GroupParameters> {
    let (p, q) = search_safe_prime(bits, settings, rng)?;
    let g = search_generator(&p, &q, None, bits, settings, rng)?;
    Ok(GroupParameters { p, q, g, h: None })
}

/// Generates a safe-prime group with two distinct generators `g` and `h` for commitments.
///
/// # Errors
///
/// See [`generate_safe_prime_group`].
pub fn generate_pedersen_group<R: CryptoRngCore + ?Sized>(
    bits: u32,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<GroupParameters> {
    let (p, q) = search_safe_prime(bits, settings, rng)?;
    let g = search_generator(&p, &q, None, bits, settings, rng)?;
    let h = search_generator(&p, &q, Some(&g), bits, settings, rng)?;
    Ok(GroupParameters {
        p,
        q,
        g,
        h: Some(h),
    })
}

fn search_safe_prime<R: CryptoRngCore + ?Sized>(
    bits: u32,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<(BigUint, BigUint)> {
    check_bits(bits)?;
    let rounds = settings.primality_rounds;

    for attempt in 1..=settings.max_prime_attempts {
        let q = sample_odd_with_bits(rng, u64::from(bits - 1));
        let p: BigUint = (&q << 1u32) + 1u32;

        // Cheap sieve on both halves before any Miller-Rabin round.
        if has_small_factor(&q) || has_small_factor(&p) {
            continue;
        }
        if !is_probable_prime(&q, rounds, rng) || !is_probable_prime(&p, rounds, rng) {
            continue;
        }

        tracing::debug!(bits, attempt, "found safe prime");
        return Ok((p, q));
    }

    tracing::warn!(
        bits,
        attempts = settings.max_prime_attempts,
        "safe prime search exhausted its budget"
    );
    Err(Error::PrimeGenerationTimeout {
        target: "safe prime",
        bits,
        attempts: settings.max_prime_attempts,
    })
}

fn search_generator<R: CryptoRngCore + ?Sized>(
    p: &BigUint,
    q: &BigUint,
    distinct_from: Option<&BigUint>,
    bits: u32,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<BigUint> {
    let target = if distinct_from.is_some() {
        "generator h"
    } else {
        "generator g"
    };
    let low = BigUint::from(2u32);
    let high = p - 1u32;

    for attempt in 1..=settings.max_generator_attempts {
        let candidate = sample_range(rng, &low, &high)?;
        if distinct_from == Some(&candidate) {
            continue;
        }
        if satisfies_generator_predicate(&candidate, p, q) {
            tracing::debug!(bits, attempt, search = target, "found generator");
            return Ok(candidate);
        }
    }

    tracing::warn!(
        bits,
        attempts = settings.max_generator_attempts,
        search = target,
        "generator search exhausted its budget"
    );
    Err(Error::PrimeGenerationTimeout {
        target,
        bits,
        attempts: settings.max_generator_attempts,
    })
}
