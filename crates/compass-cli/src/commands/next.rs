use compass_core::Catalog;
use compass_core::entities::{Question, Response, ResponsePatterns};
use compass_config::SelectorConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::NextArgs;
use crate::commands::shared::input::read_responses;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
pub struct TraitConfidence {
    #[serde(rename = "trait")]
    pub name: String,
    pub confidence: f64,
}

#[derive(Debug, Serialize)]
pub struct NextResponse<'a> {
    pub questions: Vec<&'a Question>,
    pub trait_confidence: Vec<TraitConfidence>,
    pub patterns: ResponsePatterns,
}

/// Handle `compass next`.
pub fn handle(args: &NextArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let prior = match &args.responses {
        Some(path) => read_responses(path)?,
        None => Vec::new(),
    };
    let count = effective_limit(args.count, flags.limit, ctx.config.selector.default_count);

    let response = select(&prior, &args.asked, count, &ctx.catalog, &ctx.config.selector);
    tracing::debug!(
        prior = prior.len(),
        asked = args.asked.len(),
        selected = response.questions.len(),
        "next: selection made"
    );
    output(&response, flags.format)
}

pub fn select<'a>(
    prior: &[Response],
    asked: &[String],
    count: usize,
    catalog: &'a Catalog,
    config: &SelectorConfig,
) -> NextResponse<'a> {
    NextResponse {
        questions: compass_engine::select_next(prior, catalog, asked, count, config),
        trait_confidence: compass_engine::trait_confidence(prior, catalog, config)
            .into_iter()
            .map(|(name, confidence)| TraitConfidence { name, confidence })
            .collect(),
        patterns: compass_engine::analyze_patterns(prior, catalog),
    }
}
