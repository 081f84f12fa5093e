use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `compass` binary.
#[derive(Debug, Parser)]
#[command(
    name = "compass",
    version,
    about = "Compass - trait inference and study stream matching"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog document to use instead of the built-in one
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            catalog: self.catalog.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::subcommands::CatalogCommands;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "compass",
            "--format",
            "table",
            "--limit",
            "3",
            "--verbose",
            "catalog",
            "traits",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(3));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Catalog {
                action: CatalogCommands::Traits
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "compass",
            "score",
            "--responses",
            "answers.json",
            "--format",
            "raw",
            "--quiet",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Score(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["compass", "--format", "xml", "catalog", "traits"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_accepts_all_supported_values() {
        for value in ["json", "table", "raw"] {
            let cli = Cli::try_parse_from(["compass", "--format", value, "catalog", "streams"])
                .expect("cli should parse");
            assert!(matches!(cli.command, Commands::Catalog { .. }));
        }
    }

    #[test]
    fn next_parses_asked_list_and_count() {
        let cli = Cli::try_parse_from([
            "compass",
            "next",
            "--asked",
            "analytical_1,creativity_1",
            "--count",
            "2",
        ])
        .expect("cli should parse");

        let Commands::Next(args) = cli.command else {
            panic!("expected next command");
        };
        assert_eq!(args.asked, vec!["analytical_1", "creativity_1"]);
        assert_eq!(args.count, Some(2));
        assert!(args.responses.is_none());
    }

    #[test]
    fn rank_requires_traits_file() {
        assert!(Cli::try_parse_from(["compass", "rank"]).is_err());
        let cli = Cli::try_parse_from([
            "compass",
            "rank",
            "--traits",
            "scores.json",
            "--threshold",
            "0.4",
        ])
        .expect("cli should parse");
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank command");
        };
        assert_eq!(args.threshold, Some(0.4));
        assert!(args.academics.is_none());
    }

    #[test]
    fn catalog_stream_takes_a_name() {
        assert!(Cli::try_parse_from(["compass", "catalog", "stream"]).is_err());
        let cli = Cli::try_parse_from(["compass", "catalog", "stream", "Physics"])
            .expect("cli should parse");
        let Commands::Catalog {
            action: CatalogCommands::Stream { name },
        } = cli.command
        else {
            panic!("expected catalog stream command");
        };
        assert_eq!(name, "Physics");
    }

    #[test]
    fn assess_enrich_is_opt_in() {
        let cli = Cli::try_parse_from(["compass", "assess", "--responses", "a.json"])
            .expect("cli should parse");
        let Commands::Assess(args) = cli.command else {
            panic!("expected assess command");
        };
        assert!(!args.enrich);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["compass", "--catalog", "/tmp/catalog.json", "catalog", "traits"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.catalog.as_deref(), Some(Path::new("/tmp/catalog.json")));
    }
}
