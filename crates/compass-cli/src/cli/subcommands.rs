use clap::Subcommand;

/// Catalog listings.
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// List trait definitions.
    Traits,
    /// List the question bank.
    Questions,
    /// List streams and their requirements.
    Streams {
        /// Only streams in this category (case-insensitive).
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one stream with its requirements and details.
    Stream {
        /// Exact stream name.
        name: String,
    },
    /// List distinct stream categories.
    Categories,
}
