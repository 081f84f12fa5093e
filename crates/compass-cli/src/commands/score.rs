use crate::cli::GlobalFlags;
use crate::cli::root_commands::ScoreArgs;
use crate::commands::shared::input::read_responses;
use crate::context::AppContext;
use crate::output::output;

/// Handle `compass score`.
pub fn handle(args: &ScoreArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let responses = read_responses(&args.responses)?;
    let report =
        compass_engine::score_traits_report(&responses, &ctx.catalog, &ctx.config.scoring);
    if !report.recoveries.is_empty() {
        tracing::info!(recoveries = report.recoveries.len(), "score: input recovered");
    }
    output(&report, flags.format)
}
