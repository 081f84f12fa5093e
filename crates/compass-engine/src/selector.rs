//! Adaptive question selection and response pattern analysis.
//!
//! Every trait carries an evidence "confidence" that starts at a small floor
//! and grows with each prior response measuring it. Selection repeatedly takes
//! the least-evidenced trait off a min-priority queue, picks the first unused
//! bank question measuring it, and bumps the trait so the next pick moves on.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use compass_config::SelectorConfig;
use compass_core::Catalog;
use compass_core::entities::{Question, Response, ResponsePatterns};
use compass_core::enums::{ConfidenceTrend, PositionBias, ResponseStyle};

/// Self-reported confidence above this earns the larger increment.
const CONFIDENCE_MIDPOINT: u8 = 3;

const DEFAULT_MEAN_TIME_SECS: f64 = 15.0;
const DEFAULT_MEAN_CONFIDENCE: f64 = 3.0;
const THOUGHTFUL_ABOVE_SECS: f64 = 20.0;
const QUICK_BELOW_SECS: f64 = 10.0;
const HIGH_CONFIDENCE_ABOVE: f64 = 3.5;
const LOW_CONFIDENCE_BELOW: f64 = 2.5;
/// Share of answers at one end of the option list that counts as a bias.
const POSITION_BIAS_SHARE: f64 = 0.6;

/// Heap entry ordered so the lowest confidence, then the lowest catalog index,
/// is popped first from a max-heap.
#[derive(Debug, Clone, Copy)]
struct Pending {
    confidence: f64,
    index: usize,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .confidence
            .total_cmp(&self.confidence)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

/// Per-trait evidence accumulated from prior responses, in catalog trait order.
///
/// Responses whose question is not in the catalog are ignored.
#[must_use]
pub fn trait_confidence(
    prior: &[Response],
    catalog: &Catalog,
    config: &SelectorConfig,
) -> Vec<(String, f64)> {
    let mut confidence: Vec<(String, f64)> = catalog
        .trait_names()
        .map(|name| (name.to_string(), config.initial_confidence))
        .collect();

    for response in prior {
        let Some(question) = catalog.question(&response.question_id) else {
            continue;
        };
        let increment = if response
            .valid_confidence()
            .is_some_and(|level| level > CONFIDENCE_MIDPOINT)
        {
            config.confident_increment
        } else {
            config.default_increment
        };
        for measured in &question.traits_measured {
            if let Some((_, value)) = confidence.iter_mut().find(|(name, _)| name == measured) {
                *value = (*value + increment).min(config.confidence_cap);
            }
        }
    }

    confidence
}

/// Choose up to `count` unused questions, spreading coverage across traits.
///
/// Questions in `already_asked` and questions answered in `prior` are never
/// returned, and no question is returned twice.
#[must_use]
pub fn select_next<'a>(
    prior: &[Response],
    catalog: &'a Catalog,
    already_asked: &[String],
    count: usize,
    config: &SelectorConfig,
) -> Vec<&'a Question> {
    let mut used: HashSet<&str> = already_asked.iter().map(String::as_str).collect();
    used.extend(prior.iter().map(|r| r.question_id.as_str()));

    let confidence = trait_confidence(prior, catalog, config);
    let mut heap: BinaryHeap<Pending> = confidence
        .iter()
        .enumerate()
        .map(|(index, (_, confidence))| Pending {
            confidence: *confidence,
            index,
        })
        .collect();

    let mut selected: Vec<&'a Question> = Vec::with_capacity(count);
    let mut covered: HashSet<&'a str> = HashSet::new();

    while selected.len() < count {
        let picked = match heap.pop() {
            Some(pending) => {
                let target = confidence[pending.index].0.as_str();
                let next = catalog
                    .questions
                    .iter()
                    .find(|q| !used.contains(q.id.as_str()) && q.measures(target));
                if let Some(question) = next {
                    heap.push(Pending {
                        confidence: (pending.confidence + config.selection_bump)
                            .min(config.confidence_cap),
                        index: pending.index,
                    });
                    Some(question)
                } else {
                    tracing::debug!(trait_name = target, "selector: no unused question left for trait");
                    diverse_backfill(catalog, &used, &covered)
                }
            }
            None => diverse_backfill(catalog, &used, &covered),
        };

        let Some(question) = picked else {
            break;
        };
        used.insert(question.id.as_str());
        covered.extend(question.traits_measured.iter().map(String::as_str));
        selected.push(question);
    }

    selected
}

/// First unused question measuring a trait not yet covered by this batch,
/// else the first unused question in bank order.
fn diverse_backfill<'a>(
    catalog: &'a Catalog,
    used: &HashSet<&str>,
    covered: &HashSet<&str>,
) -> Option<&'a Question> {
    let mut unused = catalog
        .questions
        .iter()
        .filter(|q| !used.contains(q.id.as_str()));
    let first = unused.clone().next();
    unused
        .find(|q| q.traits_measured.iter().any(|t| !covered.contains(t.as_str())))
        .or(first)
}

/// Summarise answering behaviour across `responses`.
#[must_use]
pub fn analyze_patterns(responses: &[Response], catalog: &Catalog) -> ResponsePatterns {
    if responses.is_empty() {
        return ResponsePatterns {
            response_style: ResponseStyle::Unknown,
            confidence_trend: ConfidenceTrend::Moderate,
            mean_response_time_secs: DEFAULT_MEAN_TIME_SECS,
            mean_confidence: DEFAULT_MEAN_CONFIDENCE,
            position_bias: PositionBias::None,
            total_responses: 0,
        };
    }

    let times: Vec<f64> = responses
        .iter()
        .map(|r| r.response_time_secs)
        .filter(|t| t.is_finite() && *t > 0.0)
        .collect();
    let mean_time = mean(&times).unwrap_or(DEFAULT_MEAN_TIME_SECS);

    let levels: Vec<f64> = responses
        .iter()
        .filter_map(Response::valid_confidence)
        .map(f64::from)
        .collect();
    let mean_confidence = mean(&levels).unwrap_or(DEFAULT_MEAN_CONFIDENCE);

    let response_style = if mean_time > THOUGHTFUL_ABOVE_SECS {
        ResponseStyle::Thoughtful
    } else if mean_time < QUICK_BELOW_SECS {
        ResponseStyle::Quick
    } else {
        ResponseStyle::Balanced
    };

    let confidence_trend = if mean_confidence > HIGH_CONFIDENCE_ABOVE {
        ConfidenceTrend::High
    } else if mean_confidence < LOW_CONFIDENCE_BELOW {
        ConfidenceTrend::Low
    } else {
        ConfidenceTrend::Moderate
    };

    ResponsePatterns {
        response_style,
        confidence_trend,
        mean_response_time_secs: mean_time,
        mean_confidence,
        position_bias: position_bias(responses, catalog),
        total_responses: responses.len(),
    }
}

fn position_bias(responses: &[Response], catalog: &Catalog) -> PositionBias {
    let mut resolved = 0_usize;
    let mut first = 0_usize;
    let mut last = 0_usize;
    for response in responses {
        let Some(question) = catalog.question(&response.question_id) else {
            continue;
        };
        let Some(rank) = question.option_rank(&response.answer) else {
            continue;
        };
        resolved += 1;
        if rank == 1 {
            first += 1;
        } else if rank == question.options.len() {
            last += 1;
        }
    }

    if resolved == 0 {
        return PositionBias::None;
    }
    #[allow(clippy::cast_precision_loss)]
    let (cutoff, first, last) = (
        resolved as f64 * POSITION_BIAS_SHARE,
        first as f64,
        last as f64,
    );
    if first > cutoff {
        PositionBias::FirstOption
    } else if last > cutoff {
        PositionBias::LastOption
    } else {
        PositionBias::None
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    fn answered(catalog: &Catalog, id: &str, option: usize, secs: f64, level: Option<u8>) -> Response {
        let question = catalog.question(id).unwrap();
        Response {
            question_id: id.into(),
            answer: question.options[option].clone(),
            response_time_secs: secs,
            confidence_level: level,
            traits: Vec::new(),
        }
    }

    #[test]
    fn confidence_starts_at_floor() {
        let catalog = catalog();
        let confidence = trait_confidence(&[], &catalog, &SelectorConfig::default());
        assert_eq!(confidence.len(), 8);
        assert!(confidence.iter().all(|(_, c)| (*c - 0.1).abs() < 1e-12));
    }

    #[test]
    fn confident_answers_earn_larger_increment() {
        let catalog = catalog();
        let config = SelectorConfig::default();
        let sure = answered(&catalog, "analytical_1", 0, 12.0, Some(5));
        let unsure = answered(&catalog, "creativity_1", 0, 12.0, Some(3));
        let confidence = trait_confidence(&[sure, unsure], &catalog, &config);
        let lookup = |name: &str| confidence.iter().find(|(n, _)| n == name).unwrap().1;
        assert!((lookup("analytical_thinking") - 0.4).abs() < 1e-9);
        assert!((lookup("creativity") - 0.3).abs() < 1e-9);
    }

    #[test]
    fn confidence_is_capped() {
        let catalog = catalog();
        let config = SelectorConfig::default();
        let prior: Vec<Response> = (0..6)
            .map(|_| answered(&catalog, "analytical_1", 0, 12.0, Some(5)))
            .collect();
        let confidence = trait_confidence(&prior, &catalog, &config);
        assert!((confidence[0].1 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_history_targets_first_trait_first() {
        let catalog = catalog();
        let picked = select_next(&[], &catalog, &[], 1, &SelectorConfig::default());
        assert_eq!(picked.len(), 1);
        assert!(picked[0].measures("analytical_thinking"));
    }

    #[test]
    fn batch_spreads_across_traits() {
        let catalog = catalog();
        let picked = select_next(&[], &catalog, &[], 8, &SelectorConfig::default());
        let targeted = catalog
            .trait_names()
            .filter(|t| picked.iter().any(|q| q.measures(t)))
            .count();
        assert_eq!(targeted, 8);
    }

    #[test]
    fn zero_count_returns_nothing() {
        let catalog = catalog();
        assert!(select_next(&[], &catalog, &[], 0, &SelectorConfig::default()).is_empty());
    }

    #[test]
    fn empty_bank_returns_nothing() {
        let mut catalog = catalog();
        catalog.questions.clear();
        assert!(select_next(&[], &catalog, &[], 5, &SelectorConfig::default()).is_empty());
    }

    #[test]
    fn exhausted_trait_falls_back_to_other_questions() {
        let catalog = catalog();
        let asked: Vec<String> = catalog
            .questions
            .iter()
            .filter(|q| q.measures("analytical_thinking"))
            .map(|q| q.id.clone())
            .collect();
        let picked = select_next(&[], &catalog, &asked, 3, &SelectorConfig::default());
        assert_eq!(picked.len(), 3);
        assert!(picked.iter().all(|q| !asked.contains(&q.id)));
    }

    #[test]
    fn empty_patterns_are_unknown() {
        let patterns = analyze_patterns(&[], &catalog());
        assert_eq!(patterns.response_style, ResponseStyle::Unknown);
        assert_eq!(patterns.total_responses, 0);
        assert!((patterns.mean_response_time_secs - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn slow_confident_first_option_answers() {
        let catalog = catalog();
        let responses = vec![
            answered(&catalog, "analytical_1", 0, 25.0, Some(4)),
            answered(&catalog, "creativity_1", 0, 30.0, Some(5)),
            answered(&catalog, "leadership_1", 0, 22.0, Some(4)),
        ];
        let patterns = analyze_patterns(&responses, &catalog);
        assert_eq!(patterns.response_style, ResponseStyle::Thoughtful);
        assert_eq!(patterns.confidence_trend, ConfidenceTrend::High);
        assert_eq!(patterns.position_bias, PositionBias::FirstOption);
        assert_eq!(patterns.total_responses, 3);
    }

    #[test]
    fn quick_unsure_last_option_answers() {
        let catalog = catalog();
        let responses = vec![
            answered(&catalog, "analytical_1", 3, 4.0, Some(1)),
            answered(&catalog, "creativity_1", 3, 6.0, Some(2)),
        ];
        let patterns = analyze_patterns(&responses, &catalog);
        assert_eq!(patterns.response_style, ResponseStyle::Quick);
        assert_eq!(patterns.confidence_trend, ConfidenceTrend::Low);
        assert_eq!(patterns.position_bias, PositionBias::LastOption);
    }
}
