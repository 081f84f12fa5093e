use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A candidate study/career path with trait and subject prerequisites.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Stream {
    /// Unique display name, e.g. `Computer Science & Engineering`.
    pub name: String,
    pub category: String,
    pub description: String,
    /// Trait name to minimum score in `[0, 1]`.
    #[serde(default)]
    pub required_traits: BTreeMap<String, f64>,
    /// Subject to minimum percentage in `[0, 100]`.
    ///
    /// The key [`WILDCARD_SUBJECT`](crate::entities::WILDCARD_SUBJECT) is
    /// matched against the mean of all provided subject scores.
    #[serde(default)]
    pub required_subjects: BTreeMap<String, f64>,
    #[serde(default)]
    pub career_paths: Vec<String>,
    #[serde(default)]
    pub salary: SalaryBand,
    /// Growth outlook label, e.g. `Excellent`.
    #[serde(default)]
    pub growth: String,
    #[serde(default)]
    pub details: StreamDetails,
}

/// Expected salary at each career stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SalaryBand {
    #[serde(default)]
    pub entry_level: String,
    #[serde(default)]
    pub mid_level: String,
    #[serde(default)]
    pub senior_level: String,
}

/// Auxiliary stream metadata. Not used for scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StreamDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default)]
    pub entrance_exams: Vec<String>,
    #[serde(default)]
    pub top_colleges: Vec<String>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub future_trends: Vec<String>,
    #[serde(default)]
    pub regional_opportunities: Vec<String>,
}
