//! Walkthrough of the proof suite.
//!
//! This example demonstrates:
//! - Initializing the suite from configuration
//! - Generating a safe-prime group with two generators
//! - Committing to a value and opening the commitment
//! - Proving knowledge of a discrete logarithm (Schnorr)
//! - Proving two discrete logarithms are equal (Chaum-Pedersen)
//!
//! Run with `RUST_LOG=dlog_zkp=debug` to see parameter search progress.

use dlog_zkp::protocol::pedersen;
use dlog_zkp::{
    ChaumPedersenProof, ChaumPedersenProver, ChaumPedersenStatement, ChaumPedersenVerifier,
    KeyPair, ProofSuite, SchnorrProof, SchnorrProver, SchnorrVerifier, SecureRng, SuiteConfig,
    Transcript,
};
use num_bigint::{BigInt, BigUint};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Discrete-log proof suite: basic example\n");

    println!("Step 1: Initialize the suite");
    let config = SuiteConfig::from_env().unwrap_or_default();
    let suite = ProofSuite::init(config).expect("Suite should be enabled");
    let mut rng = SecureRng::new();
    println!("  Stability: {:?}\n", suite.stability());

    println!("Step 2: Generate a 256-bit safe-prime group");
    let params = suite
        .generate_pedersen_group_with_rng(Some(256), &mut rng)
        .expect("Group generation should succeed");
    println!("  p = {:#x}", params.p());
    println!("  g = {}, h = {}\n", params.g(), params.require_h().expect("group has h"));

    println!("Step 3: Commit to a value");
    let value = BigInt::from(42);
    let commitment =
        pedersen::commit(&value, &params, &mut rng).expect("Commitment should succeed");
    println!("  c = {}", hex::encode(commitment.value()));
    println!("  Opens to 42: {}", pedersen::verify(&commitment, &value, &params));
    println!("  Opens to 43: {}\n", pedersen::verify(&commitment, &BigInt::from(43), &params));

    println!("Step 4: Schnorr proof of knowledge");
    let keypair = KeyPair::generate(&params, &mut rng).expect("Key generation should succeed");
    let mut transcript = Transcript::new();
    transcript.append_context(b"hello-world-demo");
    let proof = SchnorrProver::new(params.clone(), &keypair)
        .prove_with_transcript(&mut rng, transcript)
        .expect("Proof generation should succeed");
    let proof_bytes = proof.to_bytes();
    println!("  Proof size: {} bytes", proof_bytes.len());

    let received = SchnorrProof::from_bytes(&proof_bytes, &params)
        .expect("Deserialization should succeed");
    let mut transcript = Transcript::new();
    transcript.append_context(b"hello-world-demo");
    let verifier = SchnorrVerifier::new(params.clone(), keypair.public().clone());
    println!("  Verified: {}\n", verifier.verify_with_transcript(&received, transcript));

    println!("Step 5: Chaum-Pedersen proof of equal discrete logs");
    let x = BigUint::from(123_456_789u64);
    let statement = ChaumPedersenStatement::from_secret(
        params.g().clone(),
        params.require_h().expect("group has h").clone(),
        &x,
        params.p().clone(),
    )
    .expect("Statement should be valid");
    let proof = ChaumPedersenProver::new(statement.clone(), &x)
        .expect("Secret is in range")
        .prove(&mut rng)
        .expect("Proof generation should succeed");
    let received = ChaumPedersenProof::from_hex(&proof.to_hex(), params.p())
        .expect("Deserialization should succeed");
    println!("  Verified: {}", ChaumPedersenVerifier::new(statement).verify(&received));
}
