//! Zero-knowledge proofs over safe-prime groups.
//!
//! This crate provides:
//! - safe-prime group generation (`p = 2q + 1`) with one or two generators
//! - Pedersen commitments `c = g^v * h^r mod p`
//! - non-interactive Schnorr proofs of knowledge of a discrete logarithm
//! - non-interactive Chaum-Pedersen proofs that two discrete logarithms are equal
//!
//! Challenges come from a SHA-256 Fiat-Shamir transcript over the decimal renderings of the
//! public values, reduced modulo `p - 1`. Values bound by `p` are encoded big-endian at the
//! fixed width `ceil(bits(p) / 8)`; challenges always occupy 32 bytes.
//!
//! # Example
//!
//! ```rust
//! use dlog_zkp::{schnorr_prove, schnorr_verify, GroupParameters, KeyPair};
//! use num_bigint::BigUint;
//!
//! // A fixed 128-bit safe-prime group keeps the example fast.
//! let p = BigUint::parse_bytes(b"a6caf4a2820475daa9de24b44b7b4cb3", 16).unwrap();
//! let params = GroupParameters::new(p, BigUint::from(2u32), None).unwrap();
//!
//! let x = BigUint::from(123_456_789u64);
//! let keypair = KeyPair::from_secret(&x, &params).unwrap();
//!
//! let proof = schnorr_prove(&x, &params, keypair.public()).unwrap();
//! assert!(schnorr_verify(&proof, &params, keypair.public()));
//! ```
//!
//! # Security
//!
//! - Exponentiations with a secret exponent (`x`, `k`, `r`) run in constant time
//! - Never reuse a nonce across proofs
//! - The 32-byte challenge caps soundness at 256 bits regardless of the group size

#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Suite configuration and availability gating.
pub mod config;
/// Error types.
pub mod error;
/// Safe-prime group parameters.
pub mod groups;
/// Arithmetic, encoding and hashing building blocks.
pub mod primitives;
/// Commitment and proof protocols.
pub mod protocol;
/// Configured entry point.
pub mod suite;

use num_bigint::{BigInt, BigUint};

pub use config::{DisableMode, GenerationSettings, Stability, SuiteConfig};
pub use error::Error;
pub use groups::GroupParameters;
pub use primitives::{SecureRng, Transcript, CHALLENGE_BYTES};
pub use protocol::{
    ChaumPedersenProof, ChaumPedersenProver, ChaumPedersenStatement, ChaumPedersenVerifier,
    Commitment, KeyPair, Nonce, SchnorrProof, SchnorrProver, SchnorrVerifier, Witness,
};
pub use suite::ProofSuite;

/// Result type for proof suite operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Generates a safe-prime group of `bits` bits with a single generator.
///
/// Uses the default search budgets and OS randomness.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for an unsupported size and
/// [`Error::PrimeGenerationTimeout`] when a search budget is exhausted.
pub fn generate_safe_prime_group(bits: u32) -> Result<GroupParameters> {
    groups::generate_safe_prime_group(bits, &GenerationSettings::default(), &mut SecureRng::new())
}

/// Generates a safe-prime group of `bits` bits with two distinct generators.
///
/// # Errors
///
/// See [`generate_safe_prime_group`].
pub fn generate_pedersen_group(bits: u32) -> Result<GroupParameters> {
    groups::generate_pedersen_group(bits, &GenerationSettings::default(), &mut SecureRng::new())
}

/// Generates a group and a Schnorr key pair over it.
///
/// # Errors
///
/// See [`generate_safe_prime_group`].
pub fn schnorr_setup(bits: u32) -> Result<(GroupParameters, KeyPair)> {
    protocol::schnorr::setup(bits, &GenerationSettings::default(), &mut SecureRng::new())
}

/// Commits to `value` with fresh randomness.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if `params` carries no second generator.
pub fn pedersen_commit(value: &BigInt, params: &GroupParameters) -> Result<Commitment> {
    protocol::pedersen::commit(value, params, &mut SecureRng::new())
}

/// Opens a commitment against `value`. Values congruent modulo `p - 1` open the same commitment.
pub fn pedersen_verify(commitment: &Commitment, value: &BigInt, params: &GroupParameters) -> bool {
    protocol::pedersen::verify(commitment, value, params)
}

/// Proves knowledge of `secret` with `public = g^secret mod p`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for out-of-range inputs.
pub fn schnorr_prove(
    secret: &BigUint,
    params: &GroupParameters,
    public: &BigUint,
) -> Result<SchnorrProof> {
    protocol::schnorr::prove(secret, params, public, &mut SecureRng::new())
}

/// Verifies a Schnorr proof for `public`.
pub fn schnorr_verify(proof: &SchnorrProof, params: &GroupParameters, public: &BigUint) -> bool {
    protocol::schnorr::verify(proof, params, public)
}

/// Proves that `h1 = g1^x` and `h2 = g2^x` modulo `p` share the exponent `x`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for out-of-range inputs.
pub fn chaum_pedersen_prove(
    g1: &BigUint,
    h1: &BigUint,
    g2: &BigUint,
    h2: &BigUint,
    x: &BigUint,
    p: &BigUint,
) -> Result<ChaumPedersenProof> {
    protocol::chaum_pedersen::prove(g1, h1, g2, h2, x, p, &mut SecureRng::new())
}

/// Verifies a Chaum-Pedersen proof.
pub fn chaum_pedersen_verify(
    proof: &ChaumPedersenProof,
    g1: &BigUint,
    h1: &BigUint,
    g2: &BigUint,
    h2: &BigUint,
    p: &BigUint,
) -> bool {
    protocol::chaum_pedersen::verify(proof, g1, h1, g2, h2, p)
}
