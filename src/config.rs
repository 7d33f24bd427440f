//! Suite configuration: availability gating and parameter-search budgets.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Smallest accepted group size in bits.
pub const MIN_GROUP_BITS: u32 = 16;

/// Largest accepted group size in bits.
pub const MAX_GROUP_BITS: u32 = 8192;

/// Release maturity of the proof suite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Production ready.
    #[default]
    Stable,
    /// Usable, with a warning.
    Beta,
    /// In development; refused under a strict [`DisableMode`].
    Indev,
}

/// How a disabled or in-development suite reacts at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisableMode {
    /// Refuse with an error.
    #[default]
    #[serde(alias = "raiseerror")]
    Error,
    /// Log a warning where proceeding is possible.
    #[serde(alias = "raisewarning")]
    Warning,
    /// Refuse and report the suite as blocked.
    Block,
}

impl DisableMode {
    /// Returns `true` for modes that refuse in-development builds.
    pub fn is_strict(self) -> bool {
        matches!(self, DisableMode::Error | DisableMode::Block)
    }
}

/// Budgets and sizes for randomized parameter generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Group size used when the caller does not pass one.
    pub default_bits: u32,
    /// Candidates drawn while searching for a safe prime.
    pub max_prime_attempts: u32,
    /// Candidates drawn while searching for each generator.
    pub max_generator_attempts: u32,
    /// Miller-Rabin rounds per primality test.
    pub primality_rounds: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_bits: 2048,
            max_prime_attempts: 1_000_000,
            max_generator_attempts: 1_000,
            primality_rounds: 40,
        }
    }
}

impl GenerationSettings {
    /// Checks that budgets are non-zero and the default size is supported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        check_bits(self.default_bits).map_err(|e| Error::Config(e.to_string()))?;

        if self.max_prime_attempts == 0 {
            return Err(Error::Config(
                "max_prime_attempts cannot be zero".to_string(),
            ));
        }
        if self.max_generator_attempts == 0 {
            return Err(Error::Config(
                "max_generator_attempts cannot be zero".to_string(),
            ));
        }
        if self.primality_rounds == 0 {
            return Err(Error::Config("primality_rounds cannot be zero".to_string()));
        }
        Ok(())
    }
}

/// Checks a requested group size against the supported range.
///
/// # Errors
///
/// Returns [`Error::InvalidParams`] if `bits` is outside `[MIN_GROUP_BITS, MAX_GROUP_BITS]`.
pub fn check_bits(bits: u32) -> Result<()> {
    if !(MIN_GROUP_BITS..=MAX_GROUP_BITS).contains(&bits) {
        return Err(Error::InvalidParams(format!(
            "group size must be between {MIN_GROUP_BITS} and {MAX_GROUP_BITS} bits, got {bits}"
        )));
    }
    Ok(())
}

/// Proof suite configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Whether the suite may be initialized at all.
    pub enabled: bool,
    /// Reaction to a disabled or in-development suite.
    pub disable_mode: DisableMode,
    /// Release maturity.
    pub stability: Stability,
    /// Parameter generation settings.
    pub generation: GenerationSettings,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            disable_mode: DisableMode::default(),
            stability: Stability::default(),
            generation: GenerationSettings::default(),
        }
    }
}

impl SuiteConfig {
    /// Loads configuration from `.env` file, TOML file, and environment variables.
    ///
    /// Configuration priority (highest to lowest):
    /// 1. Environment variables with `ZKP_` prefix, `__` separating nested keys
    /// 2. TOML configuration file (if exists)
    /// 3. `.env` file (if exists)
    /// 4. Built-in defaults
    ///
    /// The TOML file path can be set via `ZKP_CONFIG_PATH`. If not set, defaults to
    /// `./config/zkp.toml`. A missing file is skipped.
    ///
    /// # Environment Variable Examples
    /// ```bash
    /// ZKP_ENABLED=true
    /// ZKP_DISABLE_MODE=warning
    /// ZKP_STABILITY=beta
    /// ZKP_GENERATION__DEFAULT_BITS=3072
    /// ZKP_GENERATION__MAX_PRIME_ATTEMPTS=5000000
    /// ```
    ///
    /// # Errors
    /// Returns [`Error::Config`] if a source is malformed or contains invalid values.
    pub fn from_env() -> Result<Self> {
        use figment::providers::{Env, Format, Toml};
        use figment::Figment;

        // Attempt to load .env file (silently ignore if it doesn't exist)
        let _ = dotenvy::dotenv();

        let config_path =
            std::env::var("ZKP_CONFIG_PATH").unwrap_or_else(|_| "config/zkp.toml".to_string());

        let config: Self = Figment::new()
            .merge(Toml::file(&config_path))
            .merge(Env::prefixed("ZKP_").ignore(&["CONFIG_PATH"]).split("__"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.generation.validate()
    }
}
