//! Stream matching with partial credit for near-misses.
//!
//! A stream's personality sub-score averages, over its required traits, the
//! ratio of the student's score to the requirement: capped at 1 when met and
//! scaled by a shortfall penalty when not. The academic sub-score does the
//! same over required subjects, where the wildcard subject is compared with
//! the mean of every provided mark.

use compass_config::MatchingConfig;
use compass_core::Catalog;
use compass_core::entities::{AcademicRecord, Match, Stream, TraitScores, WILDCARD_SUBJECT};

/// Rank every catalog stream, keep those at or above `config.threshold`, and
/// return at most `config.limit` of them, best first.
///
/// Ties keep catalog order.
#[must_use]
pub fn rank(
    scores: &TraitScores,
    academics: &AcademicRecord,
    catalog: &Catalog,
    config: &MatchingConfig,
) -> Vec<Match> {
    let mut matches: Vec<Match> = catalog
        .streams
        .iter()
        .map(|stream| score_stream(stream, scores, academics, config))
        .filter(|m| m.overall >= config.threshold)
        .collect();

    matches.sort_by(|a, b| b.overall.total_cmp(&a.overall));
    matches.truncate(config.limit);

    tracing::debug!(
        admitted = matches.len(),
        threshold = config.threshold,
        "matching: ranked streams"
    );
    matches
}

/// Score one stream without applying the admission threshold.
#[must_use]
pub fn score_stream(
    stream: &Stream,
    scores: &TraitScores,
    academics: &AcademicRecord,
    config: &MatchingConfig,
) -> Match {
    let personality_match = mean_or(
        stream.required_traits.iter().filter_map(|(name, required)| {
            scores
                .get(name)
                .map(|score| credit(score, *required, config.trait_shortfall_penalty))
        }),
        config.neutral_score,
    );

    let academic_match = mean_or(
        stream.required_subjects.iter().filter_map(|(subject, required)| {
            subject_mark(academics, subject)
                .map(|mark| credit(mark, *required, config.academic_shortfall_penalty))
        }),
        config.neutral_score,
    );

    Match {
        stream: stream.name.clone(),
        category: stream.category.clone(),
        overall: config.trait_weight * personality_match
            + config.academic_weight * academic_match,
        personality_match,
        academic_match,
        insight: None,
    }
}

/// Partial credit for `actual` against `required`. A zero requirement is met.
fn credit(actual: f64, required: f64, shortfall_penalty: f64) -> f64 {
    if required <= 0.0 {
        return 1.0;
    }
    let ratio = actual / required;
    if actual >= required {
        ratio.min(1.0)
    } else {
        shortfall_penalty * ratio
    }
}

fn subject_mark(academics: &AcademicRecord, subject: &str) -> Option<f64> {
    if subject == WILDCARD_SUBJECT {
        academics.mean()
    } else {
        academics.get(subject)
    }
}

fn mean_or(values: impl Iterator<Item = f64>, neutral: f64) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        neutral
    } else {
        sum / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stream(traits: &[(&str, f64)], subjects: &[(&str, f64)]) -> Stream {
        let mut stream = Catalog::builtin().unwrap().streams[0].clone();
        stream.required_traits = traits.iter().map(|(n, v)| ((*n).to_string(), *v)).collect();
        stream.required_subjects = subjects
            .iter()
            .map(|(n, v)| ((*n).to_string(), *v))
            .collect::<BTreeMap<_, _>>();
        stream
    }

    #[test]
    fn met_requirements_give_full_credit() {
        let s = stream(&[("creativity", 0.6)], &[("mathematics", 70.0)]);
        let scores: TraitScores = [("creativity", 0.8)].into_iter().collect();
        let academics: AcademicRecord = [("Mathematics", 90.0)].into_iter().collect();
        let m = score_stream(&s, &scores, &academics, &MatchingConfig::default());
        assert!((m.personality_match - 1.0).abs() < 1e-12);
        assert!((m.academic_match - 1.0).abs() < 1e-12);
        assert!((m.overall - 1.0).abs() < 1e-12);
    }

    #[test]
    fn shortfalls_are_penalised_proportionally() {
        let s = stream(&[("creativity", 0.8)], &[("mathematics", 80.0)]);
        let scores: TraitScores = [("creativity", 0.4)].into_iter().collect();
        let academics: AcademicRecord = [("mathematics", 40.0)].into_iter().collect();
        let m = score_stream(&s, &scores, &academics, &MatchingConfig::default());
        assert!((m.personality_match - 0.35).abs() < 1e-12);
        assert!((m.academic_match - 0.4).abs() < 1e-12);
        assert!((m.overall - (0.7 * 0.35 + 0.3 * 0.4)).abs() < 1e-12);
    }

    #[test]
    fn absent_traits_and_subjects_are_skipped() {
        let s = stream(
            &[("creativity", 0.5), ("leadership", 0.9)],
            &[("mathematics", 50.0), ("biology", 90.0)],
        );
        let scores: TraitScores = [("creativity", 0.5)].into_iter().collect();
        let academics: AcademicRecord = [("mathematics", 50.0)].into_iter().collect();
        let m = score_stream(&s, &scores, &academics, &MatchingConfig::default());
        assert!((m.personality_match - 1.0).abs() < 1e-12);
        assert!((m.academic_match - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nothing_to_evaluate_is_neutral() {
        let s = stream(&[], &[("mathematics", 50.0)]);
        let m = score_stream(&s, &TraitScores::new(), &AcademicRecord::new(), &MatchingConfig::default());
        assert!((m.personality_match - 0.5).abs() < 1e-12);
        assert!((m.academic_match - 0.5).abs() < 1e-12);
    }

    #[test]
    fn wildcard_uses_mean_of_all_marks() {
        let s = stream(&[], &[(WILDCARD_SUBJECT, 80.0)]);
        let academics: AcademicRecord = [("history", 60.0), ("art", 80.0)].into_iter().collect();
        let m = score_stream(&s, &TraitScores::new(), &academics, &MatchingConfig::default());
        assert!((m.academic_match - 0.8 * (70.0 / 80.0)).abs() < 1e-12);
    }

    #[test]
    fn zero_requirement_counts_as_met() {
        let s = stream(&[], &[("portfolio", 0.0)]);
        let academics: AcademicRecord = [("portfolio", 0.0)].into_iter().collect();
        let m = score_stream(&s, &TraitScores::new(), &academics, &MatchingConfig::default());
        assert!((m.academic_match - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rank_respects_threshold_and_limit() {
        let catalog = Catalog::builtin().unwrap();
        let scores: TraitScores = catalog.trait_names().map(|n| (n, 0.9)).collect();
        let config = MatchingConfig {
            limit: 2,
            ..MatchingConfig::default()
        };
        let ranked = rank(&scores, &AcademicRecord::new(), &catalog, &config);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|m| m.overall >= config.threshold));
    }

    #[test]
    fn impossible_threshold_yields_empty_ranking() {
        let catalog = Catalog::builtin().unwrap();
        let config = MatchingConfig {
            threshold: 1.0,
            ..MatchingConfig::default()
        };
        let ranked = rank(&TraitScores::new(), &AcademicRecord::new(), &catalog, &config);
        assert!(ranked.is_empty());
    }
}
