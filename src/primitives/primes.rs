//! Probabilistic primality testing.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::CryptoRngCore;

use super::rng::sample_range;

/// Odd primes used for trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 53] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
    101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191, 193,
    197, 199, 211, 223, 227, 229, 233, 239, 241, 251,
];

/// Returns `true` if `n` is divisible by one of the small sieve primes (other than itself).
pub fn has_small_factor(n: &BigUint) -> bool {
    SMALL_PRIMES.iter().any(|&sp| {
        let sp = BigUint::from(sp);
        n != &sp && (n % &sp).is_zero()
    })
}

/// Tests `n` for primality with trial division followed by `rounds` Miller-Rabin rounds.
///
/// A composite passes with probability at most `4^-rounds`.
pub fn is_probable_prime<R: CryptoRngCore + ?Sized>(n: &BigUint, rounds: u32, rng: &mut R) -> bool {
    let two = BigUint::from(2u32);
    if n < &two {
        return false;
    }
    if n == &two {
        return true;
    }
    if !n.bit(0) || has_small_factor(n) {
        return false;
    }
    if n < &BigUint::from(256u32) {
        return true;
    }

    let one = BigUint::one();
    let n_minus_one = n - &one;
    let shift = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> shift;

    'witness: for _ in 0..rounds {
        let a = match sample_range(rng, &two, &n_minus_one) {
            Ok(a) => a,
            Err(_) => return false,
        };
        let mut x = a.modpow(&d, n);
        if x == one || x == n_minus_one {
            continue;
        }
        for _ in 1..shift {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
            if x == one {
                return false;
            }
        }
        return false;
    }
    true
}
