//! Prompt construction and provider output parsing.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use compass_core::entities::{Match, StreamInsight};

use crate::EnrichmentRequest;
use crate::error::EnrichError;

pub(crate) const SYSTEM_PROMPT: &str = "You are a career counsellor for senior secondary students. \
Answer with a single JSON object and nothing else.";

/// Render the user prompt for `top` matches.
#[must_use]
pub fn build_prompt(top: &[Match], request: &EnrichmentRequest) -> String {
    let mut prompt = String::from(
        "A student completed a psychometric assessment. Explain how well each \
         recommended stream fits them.\n\nTrait scores (0-1):\n",
    );
    for (name, score) in request.trait_scores.iter() {
        let _ = writeln!(prompt, "- {name}: {score:.2}");
    }

    prompt.push_str("\nAcademic marks (%):\n");
    if request.academics.is_empty() {
        prompt.push_str("- none provided\n");
    }
    for (subject, mark) in request.academics.iter() {
        let _ = writeln!(prompt, "- {subject}: {mark:.0}");
    }

    if let Some(patterns) = &request.patterns {
        let _ = write!(
            prompt,
            "\nAnswering style: {}, confidence {}, {} responses",
            patterns.response_style, patterns.confidence_trend, patterns.total_responses
        );
        prompt.push('\n');
    }

    prompt.push_str("\nRecommended streams:\n");
    for m in top {
        let _ = writeln!(
            prompt,
            "- {} ({}): overall {:.2}, personality {:.2}, academic {:.2}",
            m.stream, m.category, m.overall, m.personality_match, m.academic_match
        );
    }

    prompt.push_str(
        "\nRespond with a JSON object keyed by the exact stream names above. Each value \
         must have: \"fit_rationale\" (string), \"opportunities\" (array of strings), \
         \"challenges\" (array of strings), \"next_steps\" (array of strings), and \
         \"confidence\" (number between 0 and 1).",
    );
    prompt
}

/// Remove a surrounding Markdown code fence, with or without a language tag.
#[must_use]
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.find('\n').map_or(rest, |newline| &rest[newline + 1..]);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse provider text into per-stream insights.
///
/// Entries that do not have the insight shape are skipped; only a document
/// that is not a JSON object at all is an error.
///
/// # Errors
///
/// Returns [`EnrichError::Parse`] if the text is not a JSON object.
pub fn parse_insights(text: &str) -> Result<BTreeMap<String, StreamInsight>, EnrichError> {
    let body = strip_code_fences(text);
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(body).map_err(|e| EnrichError::Parse(e.to_string()))?;

    let mut insights = BTreeMap::new();
    for (stream, value) in raw {
        match serde_json::from_value::<StreamInsight>(value) {
            Ok(insight) => {
                insights.insert(stream, insight);
            }
            Err(error) => {
                tracing::warn!(stream = %stream, %error, "enrich: skipping malformed insight");
            }
        }
    }
    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_core::entities::{AcademicRecord, TraitScores};
    use pretty_assertions::assert_eq;

    fn sample_match() -> Match {
        Match {
            stream: "Physics".into(),
            category: "Pure Sciences".into(),
            overall: 0.81,
            personality_match: 0.9,
            academic_match: 0.6,
            insight: None,
        }
    }

    #[test]
    fn prompt_names_every_stream_and_trait() {
        let request = EnrichmentRequest {
            trait_scores: [("research_orientation", 0.88)].into_iter().collect::<TraitScores>(),
            academics: [("Physics", 91.0)].into_iter().collect::<AcademicRecord>(),
            patterns: None,
        };
        let prompt = build_prompt(&[sample_match()], &request);
        assert!(prompt.contains("- research_orientation: 0.88"));
        assert!(prompt.contains("- physics: 91"));
        assert!(prompt.contains("- Physics (Pure Sciences): overall 0.81"));
        assert!(prompt.contains("\"confidence\""));
    }

    #[test]
    fn prompt_marks_missing_academics() {
        let request = EnrichmentRequest::default();
        assert!(build_prompt(&[], &request).contains("none provided"));
    }

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {\"b\":2}  "), "{\"b\":2}");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let text = r#"```json
{
  "Physics": {"fit_rationale": "Loves experiments", "next_steps": ["Olympiad"], "confidence": 0.7},
  "Medicine": {"fit_rationale": "missing confidence"},
  "Agriculture": "not an object"
}
```"#;
        let insights = parse_insights(text).unwrap();
        assert_eq!(insights.len(), 1);
        let physics = &insights["Physics"];
        assert_eq!(physics.fit_rationale, "Loves experiments");
        assert_eq!(physics.next_steps, vec!["Olympiad"]);
        assert!(physics.opportunities.is_empty());
    }

    #[test]
    fn non_object_is_a_parse_error() {
        assert!(matches!(parse_insights("[1, 2, 3]"), Err(EnrichError::Parse(_))));
        assert!(matches!(parse_insights("Sorry, I can't help"), Err(EnrichError::Parse(_))));
    }
}
