use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Catalog { action } => commands::catalog::handle(&action, ctx, flags),
        Commands::Next(args) => commands::next::handle(&args, ctx, flags),
        Commands::Score(args) => commands::score::handle(&args, ctx, flags),
        Commands::Rank(args) => commands::rank::handle(&args, ctx, flags),
        Commands::Assess(args) => commands::assess::handle(&args, ctx, flags).await,
    }
}
