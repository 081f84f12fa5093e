use anyhow::Context;
use compass_config::CompassConfig;
use compass_core::Catalog;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub catalog: Catalog,
    pub config: CompassConfig,
}

impl AppContext {
    /// Load configuration and the catalog, then check them against each other.
    pub fn load(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config =
            CompassConfig::load_with_dotenv().context("failed to load compass configuration")?;

        let catalog = match &flags.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog {}", path.display()))?,
            None => Catalog::builtin().context("built-in catalog is invalid")?,
        };

        Self::new(catalog, config)
    }

    /// Validate `config` against `catalog`.
    pub fn new(catalog: Catalog, config: CompassConfig) -> anyhow::Result<Self> {
        config
            .validate_for(&catalog)
            .context("invalid compass configuration")?;

        tracing::debug!(
            traits = catalog.traits.len(),
            questions = catalog.questions.len(),
            streams = catalog.streams.len(),
            enrichment = %config.enrichment.provider,
            "context ready"
        );

        Ok(Self { catalog, config })
    }
}
