#![no_main]

use dlog_zkp::{ChaumPedersenStatement, GroupParameters};
use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

fuzz_target!(|data: &[u8]| {
    if data.len() < 12 {
        return;
    }

    let p = BigUint::from_bytes_be(&data[..4]);
    let g = BigUint::from_bytes_be(&data[4..8]);
    let h = BigUint::from_bytes_be(&data[8..12]);

    if let Ok(params) = GroupParameters::new(p.clone(), g.clone(), Some(h.clone())) {
        if let Some(h) = params.h() {
            assert_ne!(h, params.g());
        }
    }
    let _ = ChaumPedersenStatement::new(g.clone(), h.clone(), h, g, p);
});
