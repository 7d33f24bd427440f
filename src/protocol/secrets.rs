use num_bigint::BigUint;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret exponent `x` known only to the prover.
///
/// Stored as big-endian bytes so the buffer can be wiped on drop.
///
/// # Security
///
/// - Never reuse witness values across unrelated protocol instances
/// - Keep witness values secret and never transmit them
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Witness {
    x: Vec<u8>,
}

impl Witness {
    /// Creates a witness from a secret exponent.
    pub fn new(x: &BigUint) -> Self {
        Self { x: x.to_bytes_be() }
    }

    /// Returns the secret exponent. The returned copy is not zeroized.
    pub(crate) fn secret(&self) -> BigUint {
        BigUint::from_bytes_be(&self.x)
    }
}

impl core::fmt::Debug for Witness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Witness(..)")
    }
}

/// Secret nonce `k` used in the commitment phase.
///
/// Automatically zeroized when dropped. Reusing a nonce for two different challenges reveals
/// the witness.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Nonce {
    k: Vec<u8>,
}

impl Nonce {
    /// Creates a nonce from a scalar.
    pub fn new(k: &BigUint) -> Self {
        Self { k: k.to_bytes_be() }
    }

    /// Returns the nonce scalar. The returned copy is not zeroized.
    pub(crate) fn k(&self) -> BigUint {
        BigUint::from_bytes_be(&self.k)
    }
}

impl core::fmt::Debug for Nonce {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Nonce(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_does_not_leak_secrets() {
        let witness = Witness::new(&BigUint::from(123_456u32));
        let nonce = Nonce::new(&BigUint::from(654_321u32));

        assert_eq!(format!("{witness:?}"), "Witness(..)");
        assert_eq!(format!("{nonce:?}"), "Nonce(..)");
    }

    #[test]
    fn roundtrip_secret_values() {
        let x = BigUint::from(987_654_321u64);
        assert_eq!(Witness::new(&x).secret(), x);
        assert_eq!(Nonce::new(&x).k(), x);
    }
}
