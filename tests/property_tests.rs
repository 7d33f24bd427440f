mod common;

use common::group_128;
use dlog_zkp::primitives::encoding::{decode_element, encode_element};
use dlog_zkp::protocol::{chaum_pedersen, pedersen, schnorr};
use dlog_zkp::{Error, KeyPair, SchnorrProof, SchnorrProver};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn commitment_opens_to_its_value(value in any::<i128>(), seed in any::<u64>()) {
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);
        let value = BigInt::from(value);

        let commitment = pedersen::commit(&value, &params, &mut rng)
            .expect("Commitment should succeed");

        prop_assert!(pedersen::verify(&commitment, &value, &params));
    }

    #[test]
    fn commitment_opens_to_congruent_values(value in any::<i128>(), seed in any::<u64>()) {
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);
        let value = BigInt::from(value);
        let order = BigInt::from(params.order());

        let commitment = pedersen::commit(&value, &params, &mut rng)
            .expect("Commitment should succeed");

        prop_assert!(pedersen::verify(&commitment, &(&value + &order), &params));
        prop_assert!(pedersen::verify(&commitment, &(&value - &order), &params));
    }

    #[test]
    fn commitment_binds_to_its_value(v1 in any::<i64>(), v2 in any::<i64>(), seed in any::<u64>()) {
        prop_assume!(v1 != v2);
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);

        let commitment = pedersen::commit(&BigInt::from(v1), &params, &mut rng)
            .expect("Commitment should succeed");

        prop_assert!(!pedersen::verify(&commitment, &BigInt::from(v2), &params));
    }

    #[test]
    fn schnorr_proof_verifies_for_any_valid_keypair(seed in any::<u64>()) {
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);

        let keypair = KeyPair::generate(&params, &mut rng)
            .expect("Key generation should succeed");
        let proof = SchnorrProver::new(params.clone(), &keypair)
            .prove(&mut rng)
            .expect("Proof generation should succeed");

        prop_assert!(schnorr::verify(&proof, &params, keypair.public()));
    }

    #[test]
    fn schnorr_proof_serialization_roundtrip(seed in any::<u64>()) {
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);

        let keypair = KeyPair::generate(&params, &mut rng)
            .expect("Key generation should succeed");
        let proof = SchnorrProver::new(params.clone(), &keypair)
            .prove(&mut rng)
            .expect("Proof generation should succeed");

        let bytes = proof.to_bytes();
        prop_assert_eq!(bytes.len(), 2 * params.byte_width() + 32);

        let decoded = SchnorrProof::from_bytes(&bytes, &params)
            .expect("Deserialization should succeed");
        prop_assert!(schnorr::verify(&decoded, &params, keypair.public()));
    }

    #[test]
    fn chaum_pedersen_proof_verifies_for_consistent_secret(x in 1u128.., seed in any::<u64>()) {
        let params = group_128();
        let mut rng = StdRng::seed_from_u64(seed);
        let (g1, g2, p) = (params.g(), params.require_h().expect("group has h"), params.p());

        let x = BigUint::from(x) % (params.order() - 1u32) + 1u32;
        let h1 = g1.modpow(&x, p);
        let h2 = g2.modpow(&x, p);

        let proof = chaum_pedersen::prove(g1, &h1, g2, &h2, &x, p, &mut rng)
            .expect("Proof generation should succeed");

        prop_assert!(chaum_pedersen::verify(&proof, g1, &h1, g2, &h2, p));
    }

    #[test]
    fn element_encoding_roundtrip(value in any::<u128>()) {
        let params = group_128();
        let value = BigUint::from(value) % params.p();

        let encoded = encode_element(&value, params.p()).expect("Value is below p");
        prop_assert_eq!(encoded.len(), params.byte_width());
        prop_assert_eq!(decode_element(&encoded, params.p()).expect("Width matches"), value);
    }

    #[test]
    fn wrong_width_is_an_encoding_error(len in 0usize..40) {
        prop_assume!(len != 16);
        let params = group_128();

        let result = decode_element(&vec![0u8; len], params.p());
        prop_assert!(matches!(result, Err(Error::Encoding(_))));
    }
}
