//! Non-interactive Chaum-Pedersen proof of discrete-log equality.
//!
//! Proves that one secret `x` satisfies both `h1 = g1^x mod p` and `h2 = g2^x mod p`
//! without revealing it:
//! - commitments `r1 = g1^k`, `r2 = g2^k` for a fresh nonce `k`
//! - challenge `e = H(g1, h1, g2, h2, r1, r2) mod (p-1)`
//! - response `s = (k - e*x) mod (p-1)`
//!
//! The verifier recomputes `e` and accepts iff `r1 == g1^s * h1^e` and `r2 == g2^s * h2^e`.
//! If the exponents behind `h1` and `h2` differ, both equalities hold only with negligible
//! probability.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};

use super::secrets::{Nonce, Witness};
use crate::primitives::encoding::{
    byte_width, decode_element, decode_exponent, encode_element, encode_fixed,
};
use crate::primitives::field::{mod_mul, mod_pow, mod_pow_secret, response};
use crate::primitives::rng::sample_range;
use crate::{Error, Result, Transcript};

/// Nonces drawn before giving up on finding one with non-identity commitments.
const MAX_NONCE_ATTEMPTS: u32 = 64;

/// Public statement: two generator/value pairs over the modulus `p`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawChaumPedersenStatement")]
pub struct ChaumPedersenStatement {
    p: BigUint,
    g1: BigUint,
    h1: BigUint,
    g2: BigUint,
    h2: BigUint,
}

impl ChaumPedersenStatement {
    /// Creates a statement, checking that every value lives in the group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `p` is even or below 5, a generator lies outside
    /// `[2, p-2]`, or a public value lies outside `[1, p)`.
    pub fn new(g1: BigUint, h1: BigUint, g2: BigUint, h2: BigUint, p: BigUint) -> Result<Self> {
        check_modulus(&p)?;

        let two = BigUint::from(2u32);
        let upper = &p - 2u32;
        for (name, g) in [("g1", &g1), ("g2", &g2)] {
            if g < &two || g > &upper {
                return Err(Error::InvalidParams(format!(
                    "generator {name} must lie in [2, p - 2]"
                )));
            }
        }

        let zero = BigUint::from(0u32);
        for (name, h) in [("h1", &h1), ("h2", &h2)] {
            if h == &zero || h >= &p {
                return Err(Error::InvalidParams(format!(
                    "public value {name} must lie in [1, p)"
                )));
            }
        }

        Ok(Self { p, g1, h1, g2, h2 })
    }

    /// Computes `h1 = g1^x`, `h2 = g2^x` and builds the statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] for an out-of-range modulus, generator or secret.
    pub fn from_secret(g1: BigUint, g2: BigUint, x: &BigUint, p: BigUint) -> Result<Self> {
        check_modulus(&p)?;
        check_secret(x, &p)?;
        let h1 = mod_pow_secret(&g1, x, &p)?;
        let h2 = mod_pow_secret(&g2, x, &p)?;
        Self::new(g1, h1, g2, h2, p)
    }

    /// Returns the modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// Returns the first generator.
    pub fn g1(&self) -> &BigUint {
        &self.g1
    }

    /// Returns `h1 = g1^x`.
    pub fn h1(&self) -> &BigUint {
        &self.h1
    }

    /// Returns the second generator.
    pub fn g2(&self) -> &BigUint {
        &self.g2
    }

    /// Returns `h2 = g2^x`.
    pub fn h2(&self) -> &BigUint {
        &self.h2
    }

    fn order(&self) -> BigUint {
        &self.p - 1u32
    }

    fn width(&self) -> usize {
        byte_width(&self.p)
    }

    /// Derives `e = H(g1, h1, g2, h2, r1, r2) mod (p-1)`.
    fn challenge(&self, mut transcript: Transcript, r1: &BigUint, r2: &BigUint) -> BigUint {
        transcript.append_elements(&[&self.g1, &self.h1, &self.g2, &self.h2, r1, r2]);
        transcript.challenge(&self.order())
    }
}

#[derive(Deserialize)]
struct RawChaumPedersenStatement {
    p: BigUint,
    g1: BigUint,
    h1: BigUint,
    g2: BigUint,
    h2: BigUint,
}

impl TryFrom<RawChaumPedersenStatement> for ChaumPedersenStatement {
    type Error = Error;

    fn try_from(raw: RawChaumPedersenStatement) -> Result<Self> {
        Self::new(raw.g1, raw.h1, raw.g2, raw.h2, raw.p)
    }
}

fn check_modulus(p: &BigUint) -> Result<()> {
    if p < &BigUint::from(5u32) || !p.bit(0) {
        return Err(Error::InvalidParams(
            "modulus must be an odd prime of at least 5".to_string(),
        ));
    }
    Ok(())
}

fn check_secret(x: &BigUint, p: &BigUint) -> Result<()> {
    let order = p - 1u32;
    if x == &BigUint::from(0u32) || x >= &order {
        return Err(Error::InvalidParams(
            "secret exponent must lie in [1, p - 1)".to_string(),
        ));
    }
    Ok(())
}

/// A non-interactive Chaum-Pedersen proof `(r1, r2, s)`, each field at the width of `p`.
///
/// The byte form is the positional concatenation `r1 || r2 || s` with no prefixes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChaumPedersenProof {
    r1: Vec<u8>,
    r2: Vec<u8>,
    s: Vec<u8>,
}

impl ChaumPedersenProof {
    /// Creates a proof from its encoded fields.
    pub fn new(r1: Vec<u8>, r2: Vec<u8>, s: Vec<u8>) -> Self {
        Self { r1, r2, s }
    }

    /// Returns the encoded commitment `r1`.
    pub fn r1(&self) -> &[u8] {
        &self.r1
    }

    /// Returns the encoded commitment `r2`.
    pub fn r2(&self) -> &[u8] {
        &self.r2
    }

    /// Returns the encoded response `s`.
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Serializes the proof as `r1 || r2 || s`.
    pub fn to_bytes(&self) -> Vec<u8> {
        [self.r1.as_slice(), &self.r2, &self.s].concat()
    }

    /// Deserializes a proof over the modulus `p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the length is not exactly three field widths.
    pub fn from_bytes(bytes: &[u8], p: &BigUint) -> Result<Self> {
        let width = byte_width(p);
        if bytes.len() != 3 * width {
            return Err(Error::Encoding(format!(
                "Chaum-Pedersen proof must be {} bytes, got {}",
                3 * width,
                bytes.len()
            )));
        }

        let mut fields = bytes.chunks_exact(width).map(<[u8]>::to_vec);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(r1), Some(r2), Some(s)) => Ok(Self { r1, r2, s }),
            _ => unreachable!("length checked to be exactly three fields"),
        }
    }

    /// Hex-encodes [`ChaumPedersenProof::to_bytes`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Parses a hex-encoded proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for invalid hex or a wrong length.
    pub fn from_hex(encoded: &str, p: &BigUint) -> Result<Self> {
        let bytes = hex::decode(encoded).map_err(|e| Error::Encoding(e.to_string()))?;
        Self::from_bytes(&bytes, p)
    }
}

/// Prover for the Chaum-Pedersen equality proof.
///
/// The prover does not check that `x` is consistent with both public values; a proof built
/// from an inconsistent statement simply fails verification.
pub struct ChaumPedersenProver {
    statement: ChaumPedersenStatement,
    witness: Witness,
}

impl ChaumPedersenProver {
    /// Creates a prover for `statement` holding the secret `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] if `x` lies outside `[1, p-1)`.
    pub fn new(statement: ChaumPedersenStatement, x: &BigUint) -> Result<Self> {
        check_secret(x, statement.p())?;
        Ok(Self {
            statement,
            witness: Witness::new(x),
        })
    }

    /// Returns the public statement.
    pub fn statement(&self) -> &ChaumPedersenStatement {
        &self.statement
    }

    /// Generates a non-interactive proof.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrimeGenerationTimeout`] if no usable nonce is found.
    pub fn prove<R: CryptoRngCore + ?Sized>(&self, rng: &mut R) -> Result<ChaumPedersenProof> {
        self.prove_with_transcript(rng, Transcript::new())
    }

    /// Generates a proof over a caller-prepared transcript.
    ///
    /// # Errors
    ///
    /// See [`ChaumPedersenProver::prove`].
    pub fn prove_with_transcript<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        transcript: Transcript,
    ) -> Result<ChaumPedersenProof> {
        let p = self.statement.p();
        let low = BigUint::from(2u32);
        let high = p - 1u32;
        let one = BigUint::from(1u32);

        for _ in 0..MAX_NONCE_ATTEMPTS {
            let nonce = Nonce::new(&sample_range(rng, &low, &high)?);
            let (r1, r2) = self.commitments(&nonce)?;
            if r1 != one && r2 != one {
                return self.finish(&nonce, &r1, &r2, transcript);
            }
        }

        Err(Error::PrimeGenerationTimeout {
            target: "nonce",
            bits: u32::try_from(p.bits()).unwrap_or(u32::MAX),
            attempts: MAX_NONCE_ATTEMPTS,
        })
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
    pub fn prove_with_nonce(
        &self,
        nonce: &Nonce,
        transcript: Transcript,
    ) -> Result<ChaumPedersenProof> {
        let (r1, r2) = self.commitments(nonce)?;
        self.finish(nonce, &r1, &r2, transcript)
    }

    fn commitments(&self, nonce: &Nonce) -> Result<(BigUint, BigUint)> {
        let p = self.statement.p();
        let k = nonce.k();
        let r1 = mod_pow_secret(self.statement.g1(), &k, p)?;
        let r2 = mod_pow_secret(self.statement.g2(), &k, p)?;
        Ok((r1, r2))
    }

    fn finish(
        &self,
        nonce: &Nonce,
        r1: &BigUint,
        r2: &BigUint,
        transcript: Transcript,
    ) -> Result<ChaumPedersenProof> {
        let p = self.statement.p();
        let e = self.statement.challenge(transcript, r1, r2);
        let s = response(&nonce.k(), &e, &self.witness.secret(), &self.statement.order());

        Ok(ChaumPedersenProof {
            r1: encode_element(r1, p)?,
            r2: encode_element(r2, p)?,
            s: encode_fixed(&s, self.statement.width())?,
        })
    }
}

/// Verifier for the Chaum-Pedersen equality proof.
pub struct ChaumPedersenVerifier {
    statement: ChaumPedersenStatement,
}

impl ChaumPedersenVerifier {
    /// Creates a verifier for `statement`.
    pub fn new(statement: ChaumPedersenStatement) -> Self {
        Self { statement }
    }

    /// Verifies a proof. Malformed proofs are rejected, never reported as errors.
    pub fn verify(&self, proof: &ChaumPedersenProof) -> bool {
        self.verify_with_transcript(proof, Transcript::new())
    }

    /// Verifies a proof against a caller-prepared transcript.
    pub fn verify_with_transcript(
        &self,
        proof: &ChaumPedersenProof,
        transcript: Transcript,
    ) -> bool {
        match self.check_with_transcript(proof, transcript) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting malformed Chaum-Pedersen proof");
                false
            }
        }
    }

    /// Verifies a proof, distinguishing malformed input from cryptographic rejection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for fields of the wrong width or range.
    pub fn check(&self, proof: &ChaumPedersenProof) -> Result<bool> {
        self.check_with_transcript(proof, Transcript::new())
    }

    /// [`ChaumPedersenVerifier::check`] against a caller-prepared transcript.
    ///
    /// # Errors
    ///
    /// See [`ChaumPedersenVerifier::check`].
    pub fn check_with_transcript(
        &self,
        proof: &ChaumPedersenProof,
        transcript: Transcript,
    ) -> Result<bool> {
        let st = &self.statement;
        let p = st.p();

        let r1 = decode_element(&proof.r1, p)?;
        let r2 = decode_element(&proof.r2, p)?;
        let s = decode_exponent(&proof.s, p)?;

        let e = st.challenge(transcript, &r1, &r2);

        let v1 = mod_mul(&mod_pow(st.g1(), &s, p), &mod_pow(st.h1(), &e, p), p);
        let v2 = mod_mul(&mod_pow(st.g2(), &s, p), &mod_pow(st.h2(), &e, p), p);

        let valid = v1 == r1 && v2 == r2;
        if !valid {
            tracing::debug!("Chaum-Pedersen proof failed the equality checks");
        }
        Ok(valid)
    }
}

/// Proves that `h1 = g1^x` and `h2 = g2^x` share the exponent `x`.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] for out-of-range inputs.
pub fn prove<R: CryptoRngCore + ?Sized>(
    g1: &BigUint,
    h1: &BigUint,
    g2: &BigUint,
    h2: &BigUint,
    x: &BigUint,
    p: &BigUint,
    rng: &mut R,
) -> Result<ChaumPedersenProof> {
    let statement =
        ChaumPedersenStatement::new(g1.clone(), h1.clone(), g2.clone(), h2.clone(), p.clone())?;
    ChaumPedersenProver::new(statement, x)?.prove(rng)
}

/// Verifies a Chaum-Pedersen proof. Invalid statements and malformed proofs yield `false`.
pub fn verify(
    proof: &ChaumPedersenProof,
    g1: &BigUint,
    h1: &BigUint,
    g2: &BigUint,
    h2: &BigUint,
    p: &BigUint,
) -> bool {
    match ChaumPedersenStatement::new(g1.clone(), h1.clone(), g2.clone(), h2.clone(), p.clone()) {
        Ok(statement) => ChaumPedersenVerifier::new(statement).verify(proof),
        Err(e) => {
            tracing::debug!(error = %e, "rejecting proof for invalid statement");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::SecureRng;

    fn big(v: u32) -> BigUint {
        BigUint::from(v)
    }

    #[test]
    fn toy_group_vector() {
        // p = 23, g1 = 5, g2 = 7, x = 6: h1 = 8, h2 = 4.
        // k = 9: r1 = 11, r2 = 15, e = sha256("5" "8" "7" "4" "11" "15") mod 22 = 14,
        // s = (9 - 84) mod 22 = 13
        let statement =
            ChaumPedersenStatement::from_secret(big(5), big(7), &big(6), big(23)).unwrap();
        assert_eq!(statement.h1(), &big(8));
        assert_eq!(statement.h2(), &big(4));

        let prover = ChaumPedersenProver::new(statement.clone(), &big(6)).unwrap();
        let proof = prover
            .prove_with_nonce(&Nonce::new(&big(9)), Transcript::new())
            .unwrap();

        assert_eq!(proof.r1(), &[11]);
        assert_eq!(proof.r2(), &[15]);
        assert_eq!(proof.s(), &[13]);
        assert!(ChaumPedersenVerifier::new(statement).verify(&proof));
    }

    #[test]
    fn degenerate_modulus_is_an_error() {
        for p in [0u32, 1, 3, 4] {
            let result = ChaumPedersenStatement::from_secret(big(2), big(3), &big(1), big(p));
            assert!(matches!(result, Err(Error::InvalidParams(_))));
        }
    }

    #[test]
    fn deserialization_validates_statement() {
        let statement =
            ChaumPedersenStatement::from_secret(big(5), big(7), &big(6), big(23)).unwrap();
        let json = serde_json::to_string(&statement).unwrap();
        let decode = |json: &str| serde_json::from_str::<ChaumPedersenStatement>(json);
        assert_eq!(decode(&json).unwrap(), statement);

        assert!(decode(r#"{"p":[],"g1":[2],"h1":[1],"g2":[3],"h2":[1]}"#).is_err());
        assert!(decode(r#"{"p":[23],"g1":[1],"h1":[8],"g2":[7],"h2":[4]}"#).is_err());
        assert!(decode(r#"{"p":[23],"g1":[5],"h1":[0],"g2":[7],"h2":[4]}"#).is_err());
        assert!(decode(r#"{"p":[23],"g1":[5],"h1":[8],"g2":[7],"h2":[23]}"#).is_err());
    }

    #[test]
    fn prove_then_verify() {
        let mut rng = SecureRng::new();
        let (g1, g2, p) = (big(5), big(7), big(23));

        for x in 1..22u32 {
            let h1 = mod_pow(&g1, &big(x), &p);
            let h2 = mod_pow(&g2, &big(x), &p);
            let proof = prove(&g1, &h1, &g2, &h2, &big(x), &p, &mut rng).unwrap();
            assert!(verify(&proof, &g1, &h1, &g2, &h2, &p));
        }
    }

    #[test]
    fn inconsistent_secret_is_rejected() {
        let p = BigUint::parse_bytes(b"a6caf4a2820475daa9de24b44b7b4cb3", 16).unwrap();
        let (g1, g2) = (big(2), big(5));
        let x = BigUint::from(123_456_789u64);
        let h1 = mod_pow(&g1, &x, &p);
        let h2 = mod_pow(&g2, &(&x + 1u32), &p);

        let mut rng = StdRng::seed_from_u64(8);
        let proof = prove(&g1, &h1, &g2, &h2, &x, &p, &mut rng).unwrap();
        assert!(!verify(&proof, &g1, &h1, &g2, &h2, &p));
    }

    #[test]
    fn rejects_invalid_statements() {
        assert!(ChaumPedersenStatement::new(big(5), big(8), big(7), big(4), big(22)).is_err());
        assert!(ChaumPedersenStatement::new(big(1), big(8), big(7), big(4), big(23)).is_err());
        assert!(ChaumPedersenStatement::new(big(5), big(0), big(7), big(4), big(23)).is_err());
        assert!(ChaumPedersenStatement::new(big(5), big(8), big(7), big(23), big(23)).is_err());
        assert!(ChaumPedersenStatement::from_secret(big(5), big(7), &big(0), big(23)).is_err());
    }

    #[test]
    fn byte_codec_is_positional() {
        let statement =
            ChaumPedersenStatement::from_secret(big(5), big(7), &big(6), big(23)).unwrap();
        let proof = ChaumPedersenProver::new(statement, &big(6))
            .unwrap()
            .prove_with_nonce(&Nonce::new(&big(9)), Transcript::new())
            .unwrap();

        let p = big(23);
        assert_eq!(proof.to_bytes(), vec![11, 15, 13]);
        assert_eq!(ChaumPedersenProof::from_bytes(&proof.to_bytes(), &p).unwrap(), proof);
        assert_eq!(ChaumPedersenProof::from_hex(&proof.to_hex(), &p).unwrap(), proof);
        assert!(ChaumPedersenProof::from_bytes(&[11, 15], &p).is_err());
    }

    #[test]
    fn malformed_fields_are_encoding_errors() {
        let statement =
            ChaumPedersenStatement::from_secret(big(5), big(7), &big(6), big(23)).unwrap();
        let verifier = ChaumPedersenVerifier::new(statement);

        let out_of_range = ChaumPedersenProof::new(vec![200], vec![15], vec![13]);
        assert!(matches!(verifier.check(&out_of_range), Err(Error::Encoding(_))));
        assert!(!verifier.verify(&out_of_range));

        let wrong_width = ChaumPedersenProof::new(vec![0, 11], vec![15], vec![13]);
        assert!(matches!(verifier.check(&wrong_width), Err(Error::Encoding(_))));
    }
}
