//! Configured entry point for parameter generation.
//!
//! [`ProofSuite::init`] reads the [`SuiteConfig`] once. After that the suite only carries the
//! generation settings; nothing in the crate consults configuration again.

use rand_core::CryptoRngCore;

use crate::config::{DisableMode, GenerationSettings, Stability, SuiteConfig};
use crate::groups::safe_prime;
use crate::protocol::schnorr::{self, KeyPair};
use crate::{Error, GroupParameters, Result, SecureRng};

/// An initialized, gated proof suite.
#[derive(Clone, Debug)]
pub struct ProofSuite {
    settings: GenerationSettings,
    stability: Stability,
}

impl ProofSuite {
    /// Initializes the suite, applying the availability gate.
    ///
    /// # Errors
    ///
    /// - [`Error::Disabled`] if `enabled` is false, whatever the disable mode
    /// - [`Error::InDevelopment`] if the suite is `indev` and the disable mode is strict
    /// - [`Error::Config`] if the generation settings are invalid
    pub fn init(config: SuiteConfig) -> Result<Self> {
        config.validate()?;

        if !config.enabled {
            let reason = match config.disable_mode {
                DisableMode::Block => "blocked by configuration",
                DisableMode::Error | DisableMode::Warning => "disabled by configuration",
            };
            tracing::warn!(mode = ?config.disable_mode, "proof suite unavailable");
            return Err(Error::Disabled(reason.to_string()));
        }

        match config.stability {
            Stability::Indev if config.disable_mode.is_strict() => {
                return Err(Error::InDevelopment(
                    "set disable_mode = \"warning\" to use it anyway".to_string(),
                ));
            }
            Stability::Indev => {
                tracing::warn!("proof suite is in development; APIs and encodings may change");
            }
            Stability::Beta => {
                tracing::warn!("proof suite is in beta");
            }
            Stability::Stable => {}
        }

        tracing::info!(
            stability = ?config.stability,
            default_bits = config.generation.default_bits,
            "proof suite initialized"
        );

        Ok(Self {
            settings: config.generation,
            stability: config.stability,
        })
    }

    /// Loads configuration with [`SuiteConfig::from_env`] and initializes the suite.
    ///
    /// # Errors
    ///
    /// See [`SuiteConfig::from_env`] and [`ProofSuite::init`].
    pub fn from_env() -> Result<Self> {
        Self::init(SuiteConfig::from_env()?)
    }

    /// Returns the generation settings in effect.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Returns the configured stability level.
    pub fn stability(&self) -> Stability {
        self.stability
    }

    /// Generates a single-generator group, defaulting to the configured size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParams`] for an unsupported size and
    /// [`Error::PrimeGenerationTimeout`] when a search budget is exhausted.
    pub fn generate_group(&self, bits: Option<u32>) -> Result<GroupParameters> {
        self.generate_group_with_rng(bits, &mut SecureRng::new())
    }

    /// [`ProofSuite::generate_group`] with an explicit generator.
    ///
    /// # Errors
    ///
    /// See [`ProofSuite::generate_group`].
    pub fn generate_group_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        bits: Option<u32>,
        rng: &mut R,
    ) -> Result<GroupParameters> {
        safe_prime::generate_safe_prime_group(self.bits(bits), &self.settings, rng)
    }

    /// Generates a two-generator group for Pedersen commitments.
    ///
    /// # Errors
    ///
    /// See [`ProofSuite::generate_group`].
    pub fn generate_pedersen_group(&self, bits: Option<u32>) -> Result<GroupParameters> {
        self.generate_pedersen_group_with_rng(bits, &mut SecureRng::new())
    }

    /// [`ProofSuite::generate_pedersen_group`] with an explicit generator.
    ///
    /// # Errors
    ///
    /// See [`ProofSuite::generate_group`].
    pub fn generate_pedersen_group_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        bits: Option<u32>,
        rng: &mut R,
    ) -> Result<GroupParameters> {
        safe_prime::generate_pedersen_group(self.bits(bits), &self.settings, rng)
    }

    /// Generates a group and a Schnorr key pair over it.
    ///
    /// # Errors
    ///
    /// See [`ProofSuite::generate_group`].
    pub fn schnorr_setup(&self, bits: Option<u32>) -> Result<(GroupParameters, KeyPair)> {
        self.schnorr_setup_with_rng(bits, &mut SecureRng::new())
    }

    /// [`ProofSuite::schnorr_setup`] with an explicit generator.
    ///
    /// # Errors
    ///
    /// See [`ProofSuite::generate_group`].
    pub fn schnorr_setup_with_rng<R: CryptoRngCore + ?Sized>(
        &self,
        bits: Option<u32>,
        rng: &mut R,
    ) -> Result<(GroupParameters, KeyPair)> {
        schnorr::setup(self.bits(bits), &self.settings, rng)
    }

    fn bits(&self, bits: Option<u32>) -> u32 {
        bits.unwrap_or(self.settings.default_bits)
    }
}
