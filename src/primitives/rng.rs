//! Cryptographically secure randomness and uniform range sampling.

use num_bigint::{BigUint, RandBigInt};
use rand_core::{CryptoRng, CryptoRngCore, OsRng, RngCore};

use crate::{Error, Result};

/// Cryptographically secure random number generator.
///
/// A thin wrapper around `OsRng`. It holds no state of its own, so every caller can own an
/// instance and concurrent proving sessions never share generator state.
#[derive(Clone, Copy, Debug)]
pub struct SecureRng(OsRng);

impl SecureRng {
    /// Creates a new cryptographically secure random number generator.
    pub fn new() -> Self {
        Self(OsRng)
    }
}

impl Default for SecureRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for SecureRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl CryptoRng for SecureRng {}

/// Samples uniformly from the half-open range `[low, high)`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if the range is empty.
pub fn sample_range<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint> {
    if low >= high {
        return Err(Error::InvalidParams(format!(
            "empty sampling range [{low}, {high})"
        )));
    }
    Ok(rng.gen_biguint_range(low, high))
}

/// Samples a random odd integer of exactly `bits` bits (top and bottom bit set).
pub fn sample_odd_with_bits<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: u64) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);
    candidate.set_bit(bits - 1, true);
    candidate.set_bit(0, true);
    candidate
}
