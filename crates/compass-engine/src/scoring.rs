//! Trait scoring from timed, optionally confidence-rated responses.
//!
//! Scoring is pure and total. Input problems never fail a call; each one is
//! recovered locally and reported as a [`Recovery`] on the [`ScoringReport`].

use compass_config::ScoringConfig;
use compass_core::Catalog;
use compass_core::entities::{REQUIRED_OPTION_COUNT, Recovery, Response, TraitScores};
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;
/// Resolution of the unmeasured default within its band.
const UNMEASURED_STEPS: u64 = 10_000;

/// Scores plus every input problem recovered while computing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringReport {
    pub scores: TraitScores,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recoveries: Vec<Recovery>,
}

/// Score every catalog trait from `responses`.
#[must_use]
pub fn score_traits(responses: &[Response], catalog: &Catalog, config: &ScoringConfig) -> TraitScores {
    score_traits_report(responses, catalog, config).scores
}

/// Score every catalog trait and report the recoveries made along the way.
///
/// The returned map lists traits in catalog order. Traits observed at least
/// once score within `[score_floor, score_ceiling]`; unobserved traits get
/// [`unmeasured_default`].
#[must_use]
pub fn score_traits_report(
    responses: &[Response],
    catalog: &Catalog,
    config: &ScoringConfig,
) -> ScoringReport {
    let mut totals: Vec<(f64, u32)> = vec![(0.0, 0); catalog.traits.len()];
    let mut recoveries = Vec::new();

    if responses.is_empty() {
        tracing::debug!("scoring: no responses, every trait unmeasured");
        recoveries.push(Recovery::EmptyInput);
    }

    for response in responses {
        let adjusted = adjusted_score(response, catalog, config, &mut recoveries);
        for name in resolve_traits(response, catalog, config, &mut recoveries) {
            match catalog.traits.iter().position(|t| t.name == name) {
                Some(index) => {
                    totals[index].0 += adjusted;
                    totals[index].1 += 1;
                }
                None => tracing::warn!(
                    trait_name = %name,
                    "scoring: resolved trait is not in the catalog; response ignored for it"
                ),
            }
        }
    }

    let scores = catalog
        .traits
        .iter()
        .zip(&totals)
        .map(|(def, (sum, count))| {
            let score = if *count == 0 {
                unmeasured_default(&def.name, config)
            } else {
                (sum / f64::from(*count)).clamp(config.score_floor, config.score_ceiling)
            };
            (def.name.clone(), score)
        })
        .collect();

    ScoringReport { scores, recoveries }
}

/// Weighted blend of option rank, response time, and self-reported confidence.
fn adjusted_score(
    response: &Response,
    catalog: &Catalog,
    config: &ScoringConfig,
    recoveries: &mut Vec<Recovery>,
) -> f64 {
    let (rank, option_count) = match catalog.question(&response.question_id) {
        Some(question) => {
            let rank = question.option_rank(&response.answer).unwrap_or_else(|| {
                tracing::debug!(
                    question_id = %response.question_id,
                    "scoring: answer matched no option, using rank 1"
                );
                recoveries.push(Recovery::MalformedResponse {
                    question_id: response.question_id.clone(),
                    reason: "answer matched no option".into(),
                });
                1
            });
            (rank, question.options.len())
        }
        None => (1, REQUIRED_OPTION_COUNT),
    };

    let time = if response.response_time_secs > 0.0 && response.response_time_secs.is_finite() {
        response.response_time_secs
    } else {
        tracing::debug!(
            question_id = %response.question_id,
            time = response.response_time_secs,
            "scoring: non-positive response time, using floor"
        );
        recoveries.push(Recovery::MalformedResponse {
            question_id: response.question_id.clone(),
            reason: format!("response time {} is not positive", response.response_time_secs),
        });
        config.time_floor_secs
    };

    #[allow(clippy::cast_precision_loss)]
    let base = rank as f64 / option_count as f64;
    let time_factor = (config.time_reference_secs / time.max(config.time_floor_secs)).min(1.0);
    let level = response
        .valid_confidence()
        .unwrap_or(config.default_confidence_level);
    let confidence_factor = f64::from(level) / 5.0;

    config.base_weight * base
        + config.time_weight * time_factor
        + config.confidence_weight * confidence_factor
}

/// Traits a response counts towards: the catalog question's traits, else the
/// response's own known trait tags, else the fallback trait.
fn resolve_traits(
    response: &Response,
    catalog: &Catalog,
    config: &ScoringConfig,
    recoveries: &mut Vec<Recovery>,
) -> Vec<String> {
    if let Some(question) = catalog.question(&response.question_id) {
        return question.traits_measured.clone();
    }

    let mut resolved: Vec<String> = Vec::new();
    for tag in &response.traits {
        if catalog.is_known_trait(tag) && !resolved.contains(tag) {
            resolved.push(tag.clone());
        }
    }
    if resolved.is_empty() {
        resolved.push(config.fallback_trait.clone());
    }

    tracing::debug!(
        question_id = %response.question_id,
        traits = ?resolved,
        "scoring: question not in catalog"
    );
    recoveries.push(Recovery::UnknownQuestion {
        question_id: response.question_id.clone(),
        resolved_traits: resolved.clone(),
    });
    resolved
}

/// Deterministic score in `[unmeasured_min, unmeasured_max]` for a trait with
/// no observations, derived from an FNV-1a hash of its name.
#[must_use]
pub fn unmeasured_default(trait_name: &str, config: &ScoringConfig) -> f64 {
    let hash = trait_name.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    #[allow(clippy::cast_precision_loss)]
    let fraction = (hash % (UNMEASURED_STEPS + 1)) as f64 / UNMEASURED_STEPS as f64;
    config.unmeasured_min + fraction * (config.unmeasured_max - config.unmeasured_min)
}
