//! Optional LLM enrichment of ranked matches.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Largest score bonus, in points out of 100, an enriched match may receive.
pub const MAX_BONUS_POINTS: f64 = 3.0;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_top_k() -> usize {
    3
}

const fn default_bonus_points() -> f64 {
    MAX_BONUS_POINTS
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrichmentProvider {
    #[default]
    None,
    Gemini,
    #[serde(rename = "openai")]
    OpenAi,
}

impl EnrichmentProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for EnrichmentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct EnrichmentConfig {
    #[serde(default)]
    pub provider: EnrichmentProvider,

    #[serde(default)]
    pub api_key: String,

    /// Model name. Empty selects the provider default.
    #[serde(default)]
    pub model: String,

    /// API root. Empty selects the provider's public endpoint.
    #[serde(default)]
    pub base_url: String,

    /// Upper bound on the whole enrichment call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many of the top matches are sent for enrichment.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Bonus added to `overall` of enriched matches, in points out of 100.
    #[serde(default = "default_bonus_points")]
    pub bonus_points: f64,
}

impl fmt::Debug for EnrichmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("EnrichmentConfig")
            .field("provider", &self.provider)
            .field("api_key", &api_key)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("top_k", &self.top_k)
            .field("bonus_points", &self.bonus_points)
            .finish()
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            provider: EnrichmentProvider::None,
            api_key: String::new(),
            model: String::new(),
            base_url: String::new(),
            timeout_secs: default_timeout_secs(),
            top_k: default_top_k(),
            bonus_points: default_bonus_points(),
        }
    }
}

impl EnrichmentConfig {
    /// True when a provider is selected and it has credentials.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.provider != EnrichmentProvider::None && !self.api_key.is_empty()
    }

    /// Fail with [`ConfigError::NotConfigured`] unless [`Self::is_configured`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `enrichment` section.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: "enrichment".into(),
            })
        }
    }

    #[must_use]
    pub fn effective_model(&self) -> &str {
        if !self.model.is_empty() {
            return &self.model;
        }
        match self.provider {
            EnrichmentProvider::Gemini => GEMINI_MODEL,
            EnrichmentProvider::OpenAi => OPENAI_MODEL,
            EnrichmentProvider::None => "",
        }
    }

    #[must_use]
    pub fn effective_base_url(&self) -> &str {
        let url = if self.base_url.is_empty() {
            match self.provider {
                EnrichmentProvider::Gemini => GEMINI_BASE_URL,
                EnrichmentProvider::OpenAi => OPENAI_BASE_URL,
                EnrichmentProvider::None => "",
            }
        } else {
            &self.base_url
        };
        url.trim_end_matches('/')
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_BONUS_POINTS).contains(&self.bonus_points) {
            return Err(ConfigError::invalid(
                "enrichment.bonus_points",
                format!("{} is outside [0, {MAX_BONUS_POINTS}]", self.bonus_points),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "enrichment.timeout_secs",
                "must be at least 1 second",
            ));
        }
        Ok(())
    }
}
