//! Adaptive question selector tuning.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_initial_confidence() -> f64 {
    0.1
}

const fn default_confident_increment() -> f64 {
    0.3
}

const fn default_default_increment() -> f64 {
    0.2
}

const fn default_selection_bump() -> f64 {
    0.2
}

const fn default_confidence_cap() -> f64 {
    1.0
}

const fn default_count() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectorConfig {
    /// Evidence floor every trait starts from.
    #[serde(default = "default_initial_confidence")]
    pub initial_confidence: f64,

    /// Increment for a prior response rated above the confidence midpoint (3).
    #[serde(default = "default_confident_increment")]
    pub confident_increment: f64,

    /// Increment for every other prior response.
    #[serde(default = "default_default_increment")]
    pub default_increment: f64,

    /// Synthetic bump applied to a trait after a question targeting it is picked.
    #[serde(default = "default_selection_bump")]
    pub selection_bump: f64,

    #[serde(default = "default_confidence_cap")]
    pub confidence_cap: f64,

    /// Questions returned when the caller does not ask for a count.
    #[serde(default = "default_count")]
    pub default_count: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            initial_confidence: default_initial_confidence(),
            confident_increment: default_confident_increment(),
            default_increment: default_default_increment(),
            selection_bump: default_selection_bump(),
            confidence_cap: default_confidence_cap(),
            default_count: default_count(),
        }
    }
}

impl SelectorConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("selector.initial_confidence", self.initial_confidence),
            ("selector.confident_increment", self.confident_increment),
            ("selector.default_increment", self.default_increment),
            ("selector.selection_bump", self.selection_bump),
            ("selector.confidence_cap", self.confidence_cap),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
            }
        }
        if self.initial_confidence > self.confidence_cap {
            return Err(ConfigError::invalid(
                "selector.initial_confidence",
                "must not exceed selector.confidence_cap",
            ));
        }
        Ok(())
    }
}
