//! Enums for question kinds, learning styles, and response patterns.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for stable string forms.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// QuestionKind
// ---------------------------------------------------------------------------

/// Presentation kind of a catalog question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    Scenario,
}

impl QuestionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MultipleChoice => "multiple_choice",
            Self::Scenario => "scenario",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LearningStyle
// ---------------------------------------------------------------------------

/// Single-label learning style classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LearningStyle {
    LogicalMathematical,
    VisualCreative,
    SocialInterpersonal,
    KinestheticHandsOn,
    Multimodal,
}

impl LearningStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LogicalMathematical => "logical_mathematical",
            Self::VisualCreative => "visual_creative",
            Self::SocialInterpersonal => "social_interpersonal",
            Self::KinestheticHandsOn => "kinesthetic_hands_on",
            Self::Multimodal => "multimodal",
        }
    }

    /// Human-readable label shown to students.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LogicalMathematical => "Logical/Mathematical",
            Self::VisualCreative => "Visual/Creative",
            Self::SocialInterpersonal => "Social/Interpersonal",
            Self::KinestheticHandsOn => "Kinesthetic/Hands-on",
            Self::Multimodal => "Multimodal",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// ResponseStyle
// ---------------------------------------------------------------------------

/// Pace at which a student answers, derived from mean response time.
///
/// ```text
/// mean > 20s  → thoughtful
/// mean < 10s  → quick
/// otherwise   → balanced
/// no answers  → unknown
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResponseStyle {
    Thoughtful,
    Quick,
    Balanced,
    Unknown,
}

impl ResponseStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Thoughtful => "thoughtful",
            Self::Quick => "quick",
            Self::Balanced => "balanced",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfidenceTrend
// ---------------------------------------------------------------------------

/// Overall self-reported confidence across answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTrend {
    High,
    Moderate,
    Low,
}

impl ConfidenceTrend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ConfidenceTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PositionBias
// ---------------------------------------------------------------------------

/// Tendency to pick the same option position regardless of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PositionBias {
    None,
    FirstOption,
    LastOption,
}

impl PositionBias {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FirstOption => "first_option",
            Self::LastOption => "last_option",
        }
    }
}

impl fmt::Display for PositionBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
