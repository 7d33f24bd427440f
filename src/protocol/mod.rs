/// Chaum-Pedersen proof of discrete-log equality.
pub mod chaum_pedersen;
/// Pedersen commitments.
pub mod pedersen;
/// Schnorr proof of knowledge of a discrete logarithm.
pub mod schnorr;
/// Zeroizing holders for witnesses and nonces.
pub mod secrets;

pub use chaum_pedersen::{
    ChaumPedersenProof, ChaumPedersenProver, ChaumPedersenStatement, ChaumPedersenVerifier,
};
pub use pedersen::Commitment;
pub use schnorr::{KeyPair, SchnorrProof, SchnorrProver, SchnorrVerifier};
pub use secrets::{Nonce, Witness};
