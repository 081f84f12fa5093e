use anyhow::bail;
use compass_config::MatchingConfig;
use compass_core::Catalog;
use compass_core::entities::{AcademicRecord, Match, TraitScores};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RankArgs;
use crate::commands::shared::input::{read_academics, read_trait_scores};
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `compass rank`.
pub fn handle(args: &RankArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let scores = read_trait_scores(&args.traits)?;
    let academics = read_academics(args.academics.as_deref())?;

    let mut config = ctx.config.matching.clone();
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            bail!("--threshold {threshold} is outside [0, 1]");
        }
        config.threshold = threshold;
    }
    config.limit = effective_limit(None, flags.limit, config.limit);

    let matches = rank(&scores, &academics, &ctx.catalog, &config);
    output(&matches, flags.format)
}

pub fn rank(
    scores: &TraitScores,
    academics: &AcademicRecord,
    catalog: &Catalog,
    config: &MatchingConfig,
) -> Vec<Match> {
    for (name, _) in scores.iter() {
        if !catalog.is_known_trait(name) {
            tracing::warn!(trait_name = name, "rank: ignoring trait not in catalog");
        }
    }
    compass_engine::rank(scores, academics, catalog, config)
}
