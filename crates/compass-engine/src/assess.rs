//! One-shot assessment: scoring, synthesis, and matching in a single call.

use compass_config::CompassConfig;
use compass_core::Catalog;
use compass_core::entities::{AcademicRecord, PersonalityProfile, Response};

use crate::{matching, scoring, synthesis};

/// Build a complete [`PersonalityProfile`] from one submission.
///
/// Never fails: malformed responses, unknown questions, and empty input are
/// recovered and listed in `recoveries`.
#[must_use]
pub fn assess(
    responses: &[Response],
    academics: &AcademicRecord,
    catalog: &Catalog,
    config: &CompassConfig,
) -> PersonalityProfile {
    let report = scoring::score_traits_report(responses, catalog, &config.scoring);
    let scores = report.scores;

    let recommended_streams = matching::rank(&scores, academics, catalog, &config.matching);
    let confidence_score = synthesis::confidence_score(
        responses,
        &scores,
        config.scoring.default_confidence_level,
    );

    tracing::info!(
        responses = responses.len(),
        subjects = academics.len(),
        recoveries = report.recoveries.len(),
        matches = recommended_streams.len(),
        confidence = confidence_score,
        "assessment complete"
    );

    PersonalityProfile {
        learning_style: synthesis::learning_style(&scores),
        work_preferences: synthesis::work_preferences(&scores),
        interests: synthesis::interests(&scores, academics),
        strengths: synthesis::strengths(&scores),
        areas_for_development: synthesis::areas_for_development(&scores),
        recommended_streams,
        confidence_score,
        recoveries: report.recoveries,
        trait_scores: scores,
    }
}
