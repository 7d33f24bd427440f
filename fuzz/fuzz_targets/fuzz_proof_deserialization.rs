#![no_main]

use dlog_zkp::{ChaumPedersenProof, GroupParameters, SchnorrProof, SchnorrVerifier};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

fuzz_target!(|data: &[u8]| {
    // Toy group p = 23 with full-order generators 5 and 7.
    let Ok(params) = GroupParameters::new(
        BigUint::from(23u32),
        BigUint::from(5u32),
        Some(BigUint::from(7u32)),
    ) else {
        return;
    };

    if let Ok(proof) = SchnorrProof::from_bytes(data, &params) {
        let _ = SchnorrVerifier::new(params.clone(), BigUint::from(10u32)).verify(&proof);
    }
    let _ = ChaumPedersenProof::from_bytes(data, params.p());
});
