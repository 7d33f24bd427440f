//! Core arithmetic and encoding building blocks shared by every protocol.
//!
//! - **encoding**: fixed-width big-endian codecs and the 32-byte challenge field
//! - **field**: modular exponentiation (public and constant-time secret) and exponent arithmetic
//! - **primes**: probabilistic primality testing for parameter generation
//! - **rng**: secure randomness and range sampling
//! - **transcript**: Fiat-Shamir challenge derivation

/// Fixed-width encodings.
pub mod encoding;
/// Modular arithmetic primitives.
pub mod field;
/// Primality testing.
pub mod primes;
/// Cryptographically secure random number generation.
pub mod rng;
/// Transcript for Fiat-Shamir transform.
pub mod transcript;

pub use encoding::CHALLENGE_BYTES;
pub use rng::SecureRng;
pub use transcript::Transcript;
