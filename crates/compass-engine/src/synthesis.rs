//! Profile synthesis: learning style, work preferences, interests,
//! strengths, development areas, and assessment confidence.

use std::borrow::Cow;

use compass_core::entities::{AcademicRecord, Response, TraitScores, WorkPreferences};
use compass_core::enums::LearningStyle;

const LEARNING_STYLE_ABOVE: f64 = 0.7;
const INTEREST_ABOVE: f64 = 0.6;
const MAX_INTERESTS: usize = 5;
const STRENGTH_ABOVE: f64 = 0.6;
const MAX_STRENGTHS: usize = 3;
const GAP_BELOW: f64 = 0.4;
const MAX_GAPS: usize = 2;

/// Responses needed for full response-count adequacy.
const ADEQUATE_RESPONSES: f64 = 15.0;
const IDEAL_TIME_SECS: f64 = 15.0;
const TIME_TOLERANCE_SECS: f64 = 30.0;
const TIME_FACTOR_FLOOR: f64 = 0.3;

/// Trait-triggered interests, evaluated in order.
const TRAIT_INTERESTS: [(&str, &str); 5] = [
    ("technical_aptitude", "Technology and Innovation"),
    ("creativity", "Arts and Design"),
    ("helping_others", "Social Service and Healthcare"),
    ("entrepreneurial_spirit", "Business and Entrepreneurship"),
    ("research_orientation", "Research and Discovery"),
];

/// Subject-triggered interests: any listed subject being strong adds the label.
const SUBJECT_INTERESTS: [(&[&str], &str); 2] = [
    (&["mathematics", "physics"], "STEM Fields"),
    (&["english", "literature"], "Language and Communication"),
];

/// First-match-wins classification over analytical, creative, social, then
/// technical scores.
#[must_use]
pub fn learning_style(scores: &TraitScores) -> LearningStyle {
    let checks = [
        ("analytical_thinking", LearningStyle::LogicalMathematical),
        ("creativity", LearningStyle::VisualCreative),
        ("social_skills", LearningStyle::SocialInterpersonal),
        ("technical_aptitude", LearningStyle::KinestheticHandsOn),
    ];
    checks
        .into_iter()
        .find(|(name, _)| scores.get_or_zero(name) > LEARNING_STYLE_ABOVE)
        .map_or(LearningStyle::Multimodal, |(_, style)| style)
}

#[must_use]
pub fn work_preferences(scores: &TraitScores) -> WorkPreferences {
    let score = |name: &str| scores.get_or_zero(name);
    WorkPreferences {
        team_work: f64::midpoint(score("social_skills"), score("leadership")),
        independent_work: score("analytical_thinking"),
        creative_work: score("creativity"),
        structured_work: score("analytical_thinking"),
        helping_others: score("helping_others"),
        leadership_roles: score("leadership"),
        technical_work: score("technical_aptitude"),
        research_work: score("research_orientation"),
    }
}

/// Up to five interests: trait rules first, then strong-subject rules.
#[must_use]
pub fn interests(scores: &TraitScores, academics: &AcademicRecord) -> Vec<String> {
    let strong = academics.strong_subjects();
    TRAIT_INTERESTS
        .iter()
        .filter(|(name, _)| scores.get_or_zero(name) > INTEREST_ABOVE)
        .map(|(_, label)| *label)
        .chain(
            SUBJECT_INTERESTS
                .iter()
                .filter(|(subjects, _)| subjects.iter().any(|s| strong.contains(s)))
                .map(|(_, label)| *label),
        )
        .take(MAX_INTERESTS)
        .map(String::from)
        .collect()
}

/// Labels of the top three traits scoring above 0.6.
#[must_use]
pub fn strengths(scores: &TraitScores) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_STRENGTHS)
        .filter(|(_, score)| *score > STRENGTH_ABOVE)
        .map(|(name, _)| strength_label(name).into_owned())
        .collect()
}

/// Labels of the bottom two traits scoring below 0.4.
#[must_use]
pub fn areas_for_development(scores: &TraitScores) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = scores.iter().collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
        .into_iter()
        .take(MAX_GAPS)
        .filter(|(_, score)| *score < GAP_BELOW)
        .map(|(name, _)| development_label(name).into_owned())
        .collect()
}

fn strength_label(name: &str) -> Cow<'_, str> {
    match name {
        "analytical_thinking" => "Problem-solving and logical reasoning".into(),
        "creativity" => "Creative thinking and innovation".into(),
        "leadership" => "Leadership and team management".into(),
        "social_skills" => "Communication and interpersonal skills".into(),
        "technical_aptitude" => "Technical and digital skills".into(),
        "entrepreneurial_spirit" => "Business acumen and risk-taking".into(),
        "research_orientation" => "Research and analytical skills".into(),
        "helping_others" => "Empathy and service orientation".into(),
        other => humanize(other),
    }
}

fn development_label(name: &str) -> Cow<'_, str> {
    match name {
        "analytical_thinking" => "Logical reasoning and problem-solving".into(),
        "creativity" => "Creative thinking and innovation".into(),
        "leadership" => "Leadership and management skills".into(),
        "social_skills" => "Communication and teamwork".into(),
        "technical_aptitude" => "Technical and digital literacy".into(),
        "entrepreneurial_spirit" => "Business and entrepreneurial skills".into(),
        "research_orientation" => "Research and investigation skills".into(),
        "helping_others" => "Empathy and service orientation".into(),
        other => humanize(other),
    }
}

/// `custom_trait` -> `Custom trait`, for traits from external catalogs.
fn humanize(name: &str) -> Cow<'_, str> {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or(Cow::Borrowed(name), |first| {
        Cow::Owned(first.to_uppercase().chain(chars).collect())
    })
}

/// Confidence in the assessment itself, in `[0, 1]` rounded to 2 decimals.
///
/// Blends response-count adequacy (0.3), mean self-reported confidence (0.3),
/// time plausibility (0.2), and score distribution (0.2). No responses gives 0.
#[must_use]
pub fn confidence_score(responses: &[Response], scores: &TraitScores, default_level: u8) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = responses.len() as f64;

    let count_factor = (n / ADEQUATE_RESPONSES).min(1.0);

    let level_sum: f64 = responses
        .iter()
        .map(|r| f64::from(r.valid_confidence().unwrap_or(default_level)))
        .sum();
    let mean_confidence = level_sum / n / 5.0;

    let time_sum: f64 = responses
        .iter()
        .map(|r| {
            if r.response_time_secs.is_finite() {
                r.response_time_secs.max(0.0)
            } else {
                0.0
            }
        })
        .sum();
    let mean_time = time_sum / n;
    let time_factor = (1.0 - (mean_time - IDEAL_TIME_SECS).abs() / TIME_TOLERANCE_SECS)
        .clamp(TIME_FACTOR_FLOOR, 1.0);

    let distribution_factor = 1.0 - (scores.variance() * 2.0).min(0.5);

    let blended = count_factor * 0.3
        + mean_confidence * 0.3
        + time_factor * 0.2
        + distribution_factor * 0.2;
    (blended * 100.0).round() / 100.0
}
