use anyhow::Context;
use compass_config::CompassConfig;
use compass_core::Catalog;
use compass_core::entities::{AcademicRecord, PersonalityProfile, Response};
use compass_enrich::{Enricher, EnrichmentRequest, EnrichmentStatus};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AssessArgs;
use crate::commands::shared::input::{read_academics, read_responses};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct AssessResponse {
    #[serde(flatten)]
    pub profile: PersonalityProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentStatus>,
}

/// Handle `compass assess`.
pub async fn handle(args: &AssessArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let responses = read_responses(&args.responses)?;
    let academics = read_academics(args.academics.as_deref())?;

    let mut config = ctx.config.clone();
    config.matching.limit = effective_limit(None, flags.limit, config.matching.limit);

    let enricher = require_enricher(args, &config)?;

    let response = run(
        &responses,
        &academics,
        &ctx.catalog,
        &config,
        enricher.as_deref(),
    )
    .await;
    output(&response, flags.format)
}

/// The enricher `--enrich` asks for; an unconfigured provider is an error.
pub fn require_enricher(
    args: &AssessArgs,
    config: &CompassConfig,
) -> anyhow::Result<Option<Box<dyn Enricher>>> {
    if !args.enrich {
        return Ok(None);
    }
    config.enrichment.require_configured().context(
        "--enrich needs a provider; set COMPASS_ENRICHMENT__PROVIDER and \
         COMPASS_ENRICHMENT__API_KEY",
    )?;
    Ok(Some(compass_enrich::from_config(&config.enrichment)))
}

/// Assess, then enrich the recommendations when an enricher is supplied.
pub async fn run(
    responses: &[Response],
    academics: &AcademicRecord,
    catalog: &Catalog,
    config: &CompassConfig,
    enricher: Option<&dyn Enricher>,
) -> AssessResponse {
    let mut profile = compass_engine::assess(responses, academics, catalog, config);

    let Some(enricher) = enricher else {
        return AssessResponse {
            profile,
            enrichment: None,
        };
    };

    let request = EnrichmentRequest {
        trait_scores: profile.trait_scores.clone(),
        academics: academics.clone(),
        patterns: Some(compass_engine::analyze_patterns(responses, catalog)),
    };
    let ranking = compass_enrich::enrich(
        &profile.recommended_streams,
        enricher,
        &request,
        &config.enrichment,
    )
    .await;
    profile.recommended_streams = ranking.matches;

    AssessResponse {
        profile,
        enrichment: Some(ranking.status),
    }
}
