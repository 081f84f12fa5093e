//! Trait scoring weights and bounds.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Tolerance when checking that blend weights sum to one.
pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

const fn default_base_weight() -> f64 {
    0.8
}

const fn default_time_weight() -> f64 {
    0.1
}

const fn default_confidence_weight() -> f64 {
    0.1
}

const fn default_time_reference_secs() -> f64 {
    30.0
}

const fn default_time_floor_secs() -> f64 {
    5.0
}

const fn default_confidence_level() -> u8 {
    3
}

const fn default_score_floor() -> f64 {
    0.2
}

const fn default_score_ceiling() -> f64 {
    0.9
}

const fn default_unmeasured_min() -> f64 {
    0.4
}

const fn default_unmeasured_max() -> f64 {
    0.6
}

fn default_fallback_trait() -> String {
    String::from("analytical_thinking")
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Weight of the normalised option rank.
    #[serde(default = "default_base_weight")]
    pub base_weight: f64,

    /// Weight of the response-time factor.
    #[serde(default = "default_time_weight")]
    pub time_weight: f64,

    /// Weight of the self-reported confidence factor.
    #[serde(default = "default_confidence_weight")]
    pub confidence_weight: f64,

    /// Response time that still earns the full time factor.
    #[serde(default = "default_time_reference_secs")]
    pub time_reference_secs: f64,

    /// Divisor floor for the time factor. Also the time substituted for
    /// non-positive response times.
    #[serde(default = "default_time_floor_secs")]
    pub time_floor_secs: f64,

    /// Confidence assumed when a response carries none (1-5 scale).
    #[serde(default = "default_confidence_level")]
    pub default_confidence_level: u8,

    #[serde(default = "default_score_floor")]
    pub score_floor: f64,

    #[serde(default = "default_score_ceiling")]
    pub score_ceiling: f64,

    /// Bounds of the deterministic default for traits with no observations.
    #[serde(default = "default_unmeasured_min")]
    pub unmeasured_min: f64,

    #[serde(default = "default_unmeasured_max")]
    pub unmeasured_max: f64,

    /// Trait credited when a response's question cannot be resolved any other way.
    #[serde(default = "default_fallback_trait")]
    pub fallback_trait: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_weight: default_base_weight(),
            time_weight: default_time_weight(),
            confidence_weight: default_confidence_weight(),
            time_reference_secs: default_time_reference_secs(),
            time_floor_secs: default_time_floor_secs(),
            default_confidence_level: default_confidence_level(),
            score_floor: default_score_floor(),
            score_ceiling: default_score_ceiling(),
            unmeasured_min: default_unmeasured_min(),
            unmeasured_max: default_unmeasured_max(),
            fallback_trait: default_fallback_trait(),
        }
    }
}

impl ScoringConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("scoring.base_weight", self.base_weight),
            ("scoring.time_weight", self.time_weight),
            ("scoring.confidence_weight", self.confidence_weight),
            ("scoring.score_floor", self.score_floor),
            ("scoring.score_ceiling", self.score_ceiling),
            ("scoring.unmeasured_min", self.unmeasured_min),
            ("scoring.unmeasured_max", self.unmeasured_max),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("{value} is outside [0, 1]")));
            }
        }

        let sum = self.base_weight + self.time_weight + self.confidence_weight;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::invalid(
                "scoring",
                format!("base, time and confidence weights sum to {sum}, expected 1"),
            ));
        }
        if self.score_floor > self.score_ceiling {
            return Err(ConfigError::invalid(
                "scoring.score_floor",
                "must not exceed scoring.score_ceiling",
            ));
        }
        if self.unmeasured_min > self.unmeasured_max {
            return Err(ConfigError::invalid(
                "scoring.unmeasured_min",
                "must not exceed scoring.unmeasured_max",
            ));
        }
        if self.time_floor_secs <= 0.0 || self.time_reference_secs <= 0.0 {
            return Err(ConfigError::invalid(
                "scoring.time_floor_secs",
                "time floor and reference must be positive",
            ));
        }
        if !(1..=5).contains(&self.default_confidence_level) {
            return Err(ConfigError::invalid(
                "scoring.default_confidence_level",
                format!("{} is outside 1-5", self.default_confidence_level),
            ));
        }
        if self.fallback_trait.is_empty() {
            return Err(ConfigError::invalid("scoring.fallback_trait", "must not be empty"));
        }
        Ok(())
    }
}
