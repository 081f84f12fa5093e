use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConfidenceTrend, PositionBias, ResponseStyle};

/// A single answered question within one assessment attempt.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Response {
    pub question_id: String,
    /// Selected option text. Should equal one of the question's options.
    pub answer: String,
    pub response_time_secs: f64,
    /// Self-reported confidence, 1 to 5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<u8>,
    /// Traits measured by a question that is not part of the catalog.
    ///
    /// Ignored when `question_id` resolves in the catalog.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<String>,
}

impl Response {
    /// Self-reported confidence when it is within the 1..=5 scale.
    #[must_use]
    pub fn valid_confidence(&self) -> Option<u8> {
        self.confidence_level.filter(|level| (1..=5).contains(level))
    }
}

/// Behavioural summary of an answer sequence.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ResponsePatterns {
    pub response_style: ResponseStyle,
    pub confidence_trend: ConfidenceTrend,
    pub mean_response_time_secs: f64,
    pub mean_confidence: f64,
    pub position_bias: PositionBias,
    pub total_responses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_scale_confidence_is_ignored() {
        let mut response = Response {
            question_id: "q".into(),
            answer: "a".into(),
            response_time_secs: 12.0,
            confidence_level: Some(7),
            traits: Vec::new(),
        };
        assert_eq!(response.valid_confidence(), None);

        response.confidence_level = Some(0);
        assert_eq!(response.valid_confidence(), None);

        response.confidence_level = Some(4);
        assert_eq!(response.valid_confidence(), Some(4));
    }

    #[test]
    fn traits_default_to_empty() {
        let response: Response = serde_json::from_str(
            r#"{"question_id":"q1","answer":"x","response_time_secs":9.5}"#,
        )
        .unwrap();
        assert!(response.traits.is_empty());
        assert!(response.confidence_level.is_none());
    }
}
