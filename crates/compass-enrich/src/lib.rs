//! # compass-enrich
//!
//! Optional narrative enrichment of a ranked stream list.
//!
//! The algorithmic ranking is always computed first and is the authoritative
//! result. [`enrich`] hands the top matches to an [`Enricher`] under a bounded
//! timeout and merges whatever comes back by exact stream name. Any failure,
//! timeout, or malformed payload leaves the ranking untouched and is reported
//! as [`EnrichmentStatus::Unenriched`].

mod error;
mod http;
pub mod prompt;
mod provider;

pub use error::EnrichError;
pub use provider::LlmEnricher;

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use compass_config::EnrichmentConfig;
use compass_core::entities::{AcademicRecord, Match, ResponsePatterns, StreamInsight, TraitScores};
use serde::{Deserialize, Serialize};

// ── Types ──────────────────────────────────────────────────────────

/// Student context sent alongside the top matches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentRequest {
    pub trait_scores: TraitScores,
    pub academics: AcademicRecord,
    pub patterns: Option<ResponsePatterns>,
}

/// Whether insights were merged into the ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnrichmentStatus {
    Enriched { provider: String, enriched: usize },
    Unenriched { reason: String },
}

/// The ranking after enrichment was attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRanking {
    pub matches: Vec<Match>,
    pub status: EnrichmentStatus,
}

impl EnrichedRanking {
    fn unenriched(matches: Vec<Match>, reason: impl Into<String>) -> Self {
        Self {
            matches,
            status: EnrichmentStatus::Unenriched {
                reason: reason.into(),
            },
        }
    }
}

// ── Enricher ───────────────────────────────────────────────────────

/// A source of per-stream narrative insights.
#[async_trait]
pub trait Enricher: Send + Sync {
    /// Short provider name for logs and status.
    fn name(&self) -> &str;

    /// `false` skips the call entirely.
    fn enabled(&self) -> bool {
        true
    }

    /// Insights keyed by stream name for some or all of `top`.
    async fn insights(
        &self,
        top: &[Match],
        request: &EnrichmentRequest,
    ) -> Result<BTreeMap<String, StreamInsight>, EnrichError>;
}

/// The disabled provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEnricher;

#[async_trait]
impl Enricher for NoopEnricher {
    fn name(&self) -> &str {
        "none"
    }

    fn enabled(&self) -> bool {
        false
    }

    async fn insights(
        &self,
        _top: &[Match],
        _request: &EnrichmentRequest,
    ) -> Result<BTreeMap<String, StreamInsight>, EnrichError> {
        Err(EnrichError::NotConfigured)
    }
}

/// Pick the enricher the configuration asks for, falling back to
/// [`NoopEnricher`] when it is not configured or cannot be built.
#[must_use]
pub fn from_config(config: &EnrichmentConfig) -> Box<dyn Enricher> {
    if !config.is_configured() {
        return Box::new(NoopEnricher);
    }
    match LlmEnricher::new(config.clone()) {
        Ok(enricher) => Box::new(enricher),
        Err(error) => {
            tracing::warn!(%error, "enrich: provider unavailable, enrichment disabled");
            Box::new(NoopEnricher)
        }
    }
}

// ── Orchestration ──────────────────────────────────────────────────

/// Attempt to enrich `base` and return the (possibly) enriched ranking.
///
/// Never fails. The top `config.top_k` matches are sent to `enricher` under a
/// `config.timeout_secs` bound; on any failure a copy of `base` is returned
/// unchanged. `base` is only borrowed, so dropping this future leaves the
/// caller's ranking intact.
pub async fn enrich(
    base: &[Match],
    enricher: &dyn Enricher,
    request: &EnrichmentRequest,
    config: &EnrichmentConfig,
) -> EnrichedRanking {
    if !enricher.enabled() {
        return EnrichedRanking::unenriched(base.to_vec(), "enrichment disabled");
    }
    if base.is_empty() || config.top_k == 0 {
        return EnrichedRanking::unenriched(base.to_vec(), "no matches to enrich");
    }

    let top = &base[..config.top_k.min(base.len())];
    let secs = config.timeout_secs;
    let outcome = match tokio::time::timeout(
        Duration::from_secs(secs),
        enricher.insights(top, request),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => Err(EnrichError::Timeout { secs }),
    };

    match outcome {
        Ok(insights) => merge(base.to_vec(), insights, enricher.name(), config.bonus_points),
        Err(error) => {
            tracing::warn!(provider = enricher.name(), %error, "enrich: falling back to base ranking");
            EnrichedRanking::unenriched(base.to_vec(), error.to_string())
        }
    }
}

/// Attach `insights` to matching streams of `base`, add the bonus, and
/// re-sort. Streams not already in `base` are ignored.
#[must_use]
pub fn merge(
    mut base: Vec<Match>,
    mut insights: BTreeMap<String, StreamInsight>,
    provider: &str,
    bonus_points: f64,
) -> EnrichedRanking {
    let bonus = bonus_points.clamp(0.0, compass_config::MAX_BONUS_POINTS) / 100.0;
    let mut enriched = 0_usize;

    for m in &mut base {
        let Some(insight) = insights.remove(&m.stream) else {
            continue;
        };
        if !(0.0..=1.0).contains(&insight.confidence) {
            tracing::warn!(
                stream = %m.stream,
                confidence = insight.confidence,
                "enrich: dropping insight with out-of-range confidence"
            );
            continue;
        }
        m.overall = (m.overall + bonus).min(1.0);
        m.insight = Some(insight);
        enriched += 1;
    }

    for stream in insights.keys() {
        tracing::debug!(stream = %stream, "enrich: ignoring insight for unranked stream");
    }

    if enriched == 0 {
        return EnrichedRanking::unenriched(base, "provider returned no usable insights");
    }

    base.sort_by(|a, b| b.overall.total_cmp(&a.overall));
    EnrichedRanking {
        matches: base,
        status: EnrichmentStatus::Enriched {
            provider: provider.to_string(),
            enriched,
        },
    }
}
