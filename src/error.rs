//! Error types for the proof suite.

/// Main error types for the library.
///
/// A proof that fails verification is not an error: verifiers report rejection as `false`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Group parameters violate their invariants, or a secret/public value is out of range.
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    /// A bounded randomized search ran out of attempts.
    #[error("Gave up searching for {target} ({bits} bits) after {attempts} attempts")]
    PrimeGenerationTimeout {
        /// What was being searched for.
        target: &'static str,
        /// Size of the group being generated.
        bits: u32,
        /// Number of candidates tried.
        attempts: u32,
    },

    /// A byte buffer has the wrong width or decodes to an out-of-range value.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// The suite is disabled by configuration.
    #[error("Proof suite disabled: {0}")]
    Disabled(String),

    /// The suite is marked in-development and the disable mode is strict.
    #[error("Proof suite in development: {0}")]
    InDevelopment(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}
