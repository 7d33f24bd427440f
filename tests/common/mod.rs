//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use dlog_zkp::GroupParameters;
use num_bigint::BigUint;

/// 128-bit safe prime; `q = (p - 1) / 2` is prime.
pub const P128: &str = "a6caf4a2820475daa9de24b44b7b4cb3";

/// 256-bit safe prime; `q = (p - 1) / 2` is prime.
pub const P256: &str = "c1bb77736557d74e0f7402388c98bc06d12bc24e0901bb1d653019ad548f482b";

/// Initialize test tracing (call once at the beginning of tests).
///
/// Shows debug output from the library under test. Subsequent calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("dlog_zkp=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Parses a hex constant.
pub fn hex_int(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("valid hex constant")
}

/// The fixed 128-bit group with `g = 2`, `h = 5`.
pub fn group_128() -> GroupParameters {
    GroupParameters::new(hex_int(P128), BigUint::from(2u32), Some(BigUint::from(5u32)))
        .expect("fixture group is valid")
}

/// The fixed 256-bit group with `g = 2`, `h = 6`.
pub fn group_256() -> GroupParameters {
    GroupParameters::new(hex_int(P256), BigUint::from(2u32), Some(BigUint::from(6u32)))
        .expect("fixture group is valid")
}
