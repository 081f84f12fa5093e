//! # compass-config
//!
//! Layered configuration loading for Compass using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COMPASS_*` prefix, `__` as separator)
//! 2. Project-level `.compass/config.toml`
//! 3. User-level `~/.config/compass/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COMPASS_MATCHING__THRESHOLD` -> `matching.threshold`,
//! `COMPASS_ENRICHMENT__API_KEY` -> `enrichment.api_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use compass_config::CompassConfig;
//!
//! let config = CompassConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.enrichment.is_configured() {
//!     println!("Enriching with {}", config.enrichment.provider);
//! }
//! ```

mod enrichment;
mod error;
mod matching;
mod scoring;
mod selector;

pub use enrichment::{EnrichmentConfig, EnrichmentProvider, MAX_BONUS_POINTS};
pub use error::ConfigError;
pub use matching::MatchingConfig;
pub use scoring::ScoringConfig;
pub use selector::SelectorConfig;

use compass_core::Catalog;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CompassConfig {
    #[serde(default)]
    pub selector: SelectorConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl CompassConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".compass/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("COMPASS_").split("__"))
    }

    /// Check value ranges and weight sums across every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selector.validate()?;
        self.scoring.validate()?;
        self.matching.validate()?;
        self.enrichment.validate()
    }

    /// [`Self::validate`] plus checks that need the loaded catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `scoring.fallback_trait` is
    /// not a catalog trait.
    pub fn validate_for(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        self.validate()?;
        if !catalog.is_known_trait(&self.scoring.fallback_trait) {
            return Err(ConfigError::InvalidValue {
                field: "scoring.fallback_trait".into(),
                reason: format!("'{}' is not a catalog trait", self.scoring.fallback_trait),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("compass").join("config.toml"))
    }

    /// Load `.env` walking up from `CARGO_MANIFEST_DIR`, else the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
