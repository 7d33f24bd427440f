//! Non-interactive Schnorr proof of knowledge of a discrete logarithm.
//!
//! The prover shows it knows `x` with `y = g^x mod p`:
//! - commitment `r = g^k mod p` for a fresh nonce `k` in `[2, p-2]`
//! - challenge `e = H(g, y, r) mod (p-1)`
//! - response `s = (k - e*x) mod (p-1)`
//!
//! The verifier accepts iff `r == g^s * y^e mod p` **and** `e` equals the challenge recomputed
//! from the proof's own `r`. The first check alone is satisfiable without `x` by choosing `e`
//! first and solving for `r`.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::secrets::{Nonce, Witness};
use crate::config::GenerationSettings;
use crate::groups::safe_prime::generate_safe_prime_group;
use crate::primitives::encoding::{
    decode_challenge, decode_element, decode_exponent, encode_challenge, encode_element,
    encode_fixed, CHALLENGE_BYTES,
};
use crate::primitives::field::{mod_mul, mod_pow, mod_pow_secret, response};
use crate::primitives::rng::sample_range;
use crate::{Error, GroupParameters, Result, Transcript};

/// Nonces drawn before giving up on finding one with a non-identity commitment.
const MAX_NONCE_ATTEMPTS: u32 = 64;

/// A Schnorr key pair over a safe-prime group.
///
/// `x` stays with the prover; `y = g^x mod p` is public. Recovering `x` from `y` is the
/// discrete-log problem.
#[derive(Clone, Debug)]
pub struct KeyPair {
    witness: Witness,
    public: BigUint,
}

impl KeyPair {
    /// Samples `x` uniformly from `[2, q)` and computes `y = g^x mod p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if the group is too small to sample from.
    pub fn generate<R: CryptoRngCore + ?Sized>(
        params: &GroupParameters,
        rng: &mut R,
    ) -> Result<Self> {
        let x = sample_range(rng, &BigUint::from(2u32), params.q())?;
        Self::from_secret(&x, params)
    }

    /// Builds a key pair from a caller-supplied secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `x` lies outside `[1, q)`.
    pub fn from_secret(x: &BigUint, params: &GroupParameters) -> Result<Self> {
        if x == &BigUint::from(0u32) || x >= params.q() {
            return Err(Error::InvalidParams(
                "private key must lie in [1, q)".to_string(),
            ));
        }
        let public = mod_pow_secret(params.g(), x, params.p())?;
        Ok(Self {
            witness: Witness::new(x),
            public,
        })
    }

    /// Returns the public key `y`.
    pub fn public(&self) -> &BigUint {
        &self.public
    }

    /// Returns the secret witness.
    pub fn witness(&self) -> &Witness {
        &self.witness
    }
}

/// A non-interactive Schnorr proof `(r, e, s)`.
///
/// `r` and `s` are encoded at the width of `p`; `e` always occupies 32 bytes.
/// The byte form is the positional concatenation `r || e || s` with no prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchnorrProof {
    r: Vec<u8>,
    e: [u8; CHALLENGE_BYTES],
    s: Vec<u8>,
}

impl SchnorrProof {
    /// Creates a proof from its encoded fields.
    pub fn new(r: Vec<u8>, e: [u8; CHALLENGE_BYTES], s: Vec<u8>) -> Self {
        Self { r, e, s }
    }

    /// Returns the encoded commitment `r`.
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// Returns the encoded challenge `e`.
    pub fn e(&self) -> &[u8; CHALLENGE_BYTES] {
        &self.e
    }

    /// Returns the encoded response `s`.
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Serializes the proof as `r || e || s`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.r.len() + CHALLENGE_BYTES + self.s.len());
        out.extend_from_slice(&self.r);
        out.extend_from_slice(&self.e);
        out.extend_from_slice(&self.s);
        out
    }

    /// Deserializes a proof produced over `params`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the length is not exactly `2w + 32` for width `w`.
    pub fn from_bytes(bytes: &[u8], params: &GroupParameters) -> Result<Self> {
        let width = params.byte_width();
        let expected = 2 * width + CHALLENGE_BYTES;
        if bytes.len() != expected {
            return Err(Error::Encoding(format!(
                "Schnorr proof must be {expected} bytes, got {}",
                bytes.len()
            )));
        }

        let (r, rest) = bytes.split_at(width);
        let (e, s) = rest.split_at(CHALLENGE_BYTES);
        let mut challenge = [0u8; CHALLENGE_BYTES];
        challenge.copy_from_slice(e);

        Ok(Self {
            r: r.to_vec(),
            e: challenge,
            s: s.to_vec(),
        })
    }

    /// Hex-encodes [`SchnorrProof::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses a hex-encoded proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for invalid hex or a wrong length.
    pub fn from_hex(encoded: &str, params: &GroupParameters) -> Result<Self> {
        let bytes = hex::decode(encoded).map_err(|e| Error::Encoding(e.to_string()))?;
        Self::from_bytes(&bytes, params)
    }
}

/// Prover for the Schnorr proof of knowledge.
pub struct SchnorrProver {
    params: GroupParameters,
    witness: Witness,
    public: BigUint,
}

impl SchnorrProver {
    /// Creates a prover from a key pair.
    pub fn new(params: GroupParameters, keypair: &KeyPair) -> Self {
        Self {
            params,
            witness: keypair.witness.clone(),
            public: keypair.public.clone(),
        }
    }

    /// Creates a prover from a raw secret and the public key it claims to match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `x` lies outside `[1, p-1)` or `y` outside `[1, p)`.
    pub fn with_public(params: GroupParameters, x: &BigUint, y: &BigUint) -> Result<Self> {
        let zero = BigUint::from(0u32);
        if x == &zero || x >= &params.order() {
            return Err(Error::InvalidParams(
                "secret exponent must lie in [1, p - 1)".to_string(),
            ));
        }
        if y == &zero || y >= params.p() {
            return Err(Error::InvalidParams(
                "public key must lie in [1, p)".to_string(),
            ));
        }
        Ok(Self {
            params,
            witness: Witness::new(x),
            public: y.clone(),
        })
    }

    /// Returns the public key being proven.
    pub fn public(&self) -> &BigUint {
        &self.public
    }

    /// Generates a non-interactive proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrimeGenerationTimeout`] if no usable nonce is found, which does not
    /// happen for valid parameters.
    pub fn prove<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<SchnorrProof> {
        self.prove_with_transcript(rng, Transcript::new())
    }

    /// Generates a proof over a caller-prepared transcript (for example one carrying context).
    ///
    /// # Errors
    ///
    /// See [`SchnorrProver::prove`].
    pub fn prove_with_transcript<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        transcript: Transcript,
    ) -> Result<SchnorrProof> {
        let (_, nonce) = self.commit(rng)?;
        self.prove_with_nonce(&nonce, transcript)
    }

    /// Completes a proof from an explicit nonce.
    ///
    /// # Security
    ///
    /// The nonce must be fresh and uniformly random. Two proofs sharing a nonce reveal `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a value cannot be encoded at the group width.
    pub fn prove_with_nonce(&self, nonce: &Nonce, transcript: Transcript) -> Result<SchnorrProof> {
        let p = self.params.p();
        let r = mod_pow_secret(self.params.g(), &nonce.k(), p)?;
        let e = challenge(transcript, &self.params, &self.public, &r);
        let s = self.respond(nonce, &e);

        Ok(SchnorrProof {
            r: encode_element(&r, p)?,
            e: encode_challenge(&e)?,
            s: encode_fixed(&s, self.params.byte_width())?,
        })
    }

    /// Interactive protocol: samples a nonce and returns the commitment `r = g^k mod p`.
    ///
    /// Nonces whose commitment is the identity are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrimeGenerationTimeout`] if every sampled nonce is rejected.
    pub fn commit<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<(BigUint, Nonce)> {
        let p = self.params.p();
        let low = BigUint::from(2u32);
        let high = p - 1u32;

        for _ in 0..MAX_NONCE_ATTEMPTS {
            let nonce = Nonce::new(&sample_range(rng, &low, &high)?);
            let r = mod_pow_secret(self.params.g(), &nonce.k(), p)?;
            if r != BigUint::from(1u32) {
                return Ok((r, nonce));
            }
        }

        Err(Error::PrimeGenerationTimeout {
            target: "nonce",
            bits: bit_len(p),
            attempts: MAX_NONCE_ATTEMPTS,
        })
    }

    /// Interactive protocol: computes the response `s = (k - e*x) mod (p-1)`.
    pub fn respond(&self, nonce: &Nonce, e: &BigUint) -> BigUint {
        response(&nonce.k(), e, &self.witness.secret(), &self.params.order())
    }
}

/// Verifier for the Schnorr proof of knowledge.
pub struct SchnorrVerifier {
    params: GroupParameters,
    public: BigUint,
}

impl SchnorrVerifier {
    /// Creates a verifier for the public key `y`.
    pub fn new(params: GroupParameters, public: BigUint) -> Self {
        Self { params, public }
    }

    /// Verifies a proof. Malformed proofs are rejected, never reported as errors.
    pub fn verify(&self, proof: &SchnorrProof) -> bool {
        self.verify_with_transcript(proof, Transcript::new())
    }

    /// Verifies a proof against a caller-prepared transcript.
    ///
    /// The transcript must match the one used during proof generation.
    pub fn verify_with_transcript(&self, proof: &SchnorrProof, transcript: Transcript) -> bool {
        match self.check_with_transcript(proof, transcript) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed Schnorr proof");
                false
            }
        }
    }

    /// Verifies a proof, distinguishing malformed input from cryptographic rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for fields of the wrong width or range, and
    /// [`Error::InvalidParams`] for a public key outside `[1, p)`.
    pub fn check(&self, proof: &SchnorrProof) -> Result<bool> {
        self.check_with_transcript(proof, Transcript::new())
    }

    /// [`SchnorrVerifier::check`] against a caller-prepared transcript.
    ///
    /// # Errors
    ///
    /// See [`SchnorrVerifier::check`].
    pub fn check_with_transcript(
        &self,
        proof: &SchnorrProof,
        transcript: Transcript,
    ) -> Result<bool> {
        let p = self.params.p();
        if self.public == BigUint::from(0u32) || &self.public >= p {
            return Err(Error::InvalidParams(
                "public key must lie in [1, p)".to_string(),
            ));
        }

        let r = decode_element(&proof.r, p)?;
        let e = decode_challenge(&proof.e)?;
        let s = decode_exponent(&proof.s, p)?;

        let expected_r = mod_mul(
            &mod_pow(self.params.g(), &s, p),
            &mod_pow(&self.public, &e, p),
            p,
        );
        if expected_r != r {
            tracing::debug!("Schnorr proof failed the algebraic check");
            return Ok(false);
        }

        let expected_e = challenge(transcript, &self.params, &self.public, &r);
        if expected_e != e {
            tracing::debug!("Schnorr proof challenge is not bound to its commitment");
            return Ok(false);
        }

        Ok(true)
    }
}

/// Derives `e = H(g, y, r) mod (p-1)`.
fn challenge(
    mut transcript: Transcript,
    params: &GroupParameters,
    y: &BigUint,
    r: &BigUint,
) -> BigUint {
    transcript.append_elements(&[params.g(), y, r]);
    transcript.challenge(&params.order())
}

fn bit_len(p: &BigUint) -> u32 {
    u32::try_from(p.bits()).unwrap_or(u32::MAX)
}

/// Generates a group of `bits` bits and a key pair over it.
///
/// # Errors
///
/// Propagates parameter generation errors.
pub fn setup<R: CryptoRngCore + ?Sized>(
    bits: u32,
    settings: &GenerationSettings,
    rng: &mut R,
) -> Result<(GroupParameters, KeyPair)> {
    let params = generate_safe_prime_group(bits, settings, rng)?;
    let keypair = KeyPair::generate(&params, rng)?;
    Ok((params, keypair))
}

/// Proves knowledge of `secret` for the public key `public`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for out-of-range inputs.
pub fn prove<R: CryptoRngCore + ?Sized>(
    secret: &BigUint,
    params: &GroupParameters,
    public: &BigUint,
    rng: &mut R,
) -> Result<SchnorrProof> {
    SchnorrProver::with_public(params.clone(), secret, public)?.prove(rng)
}

/// Verifies `proof` for the public key `public`.
pub fn verify(proof: &SchnorrProof, params: &GroupParameters, public: &BigUint) -> bool {
    SchnorrVerifier::new(params.clone(), public.clone()).verify(proof)
}
