use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::CatalogCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Inspect the loaded catalog.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Pick the next questions to ask.
    Next(NextArgs),
    /// Score traits from a set of responses.
    Score(ScoreArgs),
    /// Rank streams from a trait score map.
    Rank(RankArgs),
    /// Full assessment: scores, profile, and recommended streams.
    Assess(AssessArgs),
}

#[derive(Clone, Debug, Args)]
pub struct NextArgs {
    /// JSON array of responses so far (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub responses: Option<PathBuf>,
    /// Question ids already shown but not answered.
    #[arg(long, value_delimiter = ',', value_name = "ID,...")]
    pub asked: Vec<String>,
    /// Number of questions to select.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct ScoreArgs {
    /// JSON array of responses (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub responses: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct RankArgs {
    /// JSON object of trait name to score in [0, 1].
    #[arg(long, value_name = "FILE")]
    pub traits: PathBuf,
    /// JSON object of subject name to percentage.
    #[arg(long, value_name = "FILE")]
    pub academics: Option<PathBuf>,
    /// Minimum overall score to include.
    #[arg(long)]
    pub threshold: Option<f64>,
}

#[derive(Clone, Debug, Args)]
pub struct AssessArgs {
    /// JSON array of responses (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    pub responses: PathBuf,
    /// JSON object of subject name to percentage.
    #[arg(long, value_name = "FILE")]
    pub academics: Option<PathBuf>,
    /// Attach narrative insights from the configured provider.
    #[arg(long)]
    pub enrich: bool,
}
