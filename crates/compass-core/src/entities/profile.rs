use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::TraitScores;
use crate::enums::LearningStyle;

/// A scored association between a student profile and one catalog stream.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Match {
    /// Stream name; unique within the catalog.
    pub stream: String,
    pub category: String,
    /// Blended score in `[0, 1]`.
    pub overall: f64,
    pub personality_match: f64,
    pub academic_match: f64,
    /// Narrative from the enrichment collaborator. Absent on the base ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight: Option<StreamInsight>,
}

/// Free-text fields returned by the enrichment collaborator for one stream.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StreamInsight {
    #[serde(default)]
    pub fit_rationale: String,
    #[serde(default)]
    pub opportunities: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub next_steps: Vec<String>,
    /// Collaborator's own confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Preferred working modes, each a fixed combination of trait scores.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WorkPreferences {
    pub team_work: f64,
    pub independent_work: f64,
    pub creative_work: f64,
    pub structured_work: f64,
    pub helping_others: f64,
    pub leadership_roles: f64,
    pub technical_work: f64,
    pub research_work: f64,
}

/// A locally recovered input problem. None of these fail an assessment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recovery {
    /// Answer text matched no option, or the response time was not positive.
    MalformedResponse { question_id: String, reason: String },
    /// The question id is not in the catalog; traits came from explicit tags
    /// or the fallback trait.
    UnknownQuestion {
        question_id: String,
        resolved_traits: Vec<String>,
    },
    /// No responses were supplied; every trait received its unmeasured default.
    EmptyInput,
}

/// Everything derived from one assessment submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PersonalityProfile {
    #[schemars(with = "BTreeMap<String, f64>")]
    pub trait_scores: TraitScores,
    pub learning_style: LearningStyle,
    pub work_preferences: WorkPreferences,
    pub interests: Vec<String>,
    pub strengths: Vec<String>,
    pub areas_for_development: Vec<String>,
    pub recommended_streams: Vec<Match>,
    /// Confidence in the assessment itself, rounded to 2 decimals.
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recoveries: Vec<Recovery>,
}
