//! Stream matching weights, penalties, and admission threshold.

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::scoring::WEIGHT_SUM_TOLERANCE;

const fn default_trait_weight() -> f64 {
    0.7
}

const fn default_academic_weight() -> f64 {
    0.3
}

const fn default_trait_shortfall_penalty() -> f64 {
    0.7
}

const fn default_academic_shortfall_penalty() -> f64 {
    0.8
}

const fn default_neutral_score() -> f64 {
    0.5
}

const fn default_threshold() -> f64 {
    0.6
}

const fn default_limit() -> usize {
    5
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchingConfig {
    #[serde(default = "default_trait_weight")]
    pub trait_weight: f64,

    #[serde(default = "default_academic_weight")]
    pub academic_weight: f64,

    /// Multiplier applied to the ratio when a trait falls short of its requirement.
    #[serde(default = "default_trait_shortfall_penalty")]
    pub trait_shortfall_penalty: f64,

    /// Multiplier applied to the ratio when a subject falls short of its requirement.
    #[serde(default = "default_academic_shortfall_penalty")]
    pub academic_shortfall_penalty: f64,

    /// Sub-score used when no requirement could be evaluated.
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,

    /// Minimum `overall` a stream needs to be ranked.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Maximum number of matches returned.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            trait_weight: default_trait_weight(),
            academic_weight: default_academic_weight(),
            trait_shortfall_penalty: default_trait_shortfall_penalty(),
            academic_shortfall_penalty: default_academic_shortfall_penalty(),
            neutral_score: default_neutral_score(),
            threshold: default_threshold(),
            limit: default_limit(),
        }
    }
}

impl MatchingConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("matching.trait_weight", self.trait_weight),
            ("matching.academic_weight", self.academic_weight),
            ("matching.trait_shortfall_penalty", self.trait_shortfall_penalty),
            ("matching.academic_shortfall_penalty", self.academic_shortfall_penalty),
            ("matching.neutral_score", self.neutral_score),
            ("matching.threshold", self.threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
            }
        }

        let sum = self.trait_weight + self.academic_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::invalid(
                "matching",
                format!("trait and academic weights sum to {sum}, expected 1"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.limit, 5);
        assert!((config.threshold - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn unbalanced_weights_are_rejected() {
        let config = MatchingConfig {
            academic_weight: 0.5,
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
