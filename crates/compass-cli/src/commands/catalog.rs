use anyhow::bail;
use compass_core::Catalog;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CatalogCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `compass catalog`.
pub fn handle(
    action: &CatalogCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = flags
        .limit
        .map_or(usize::MAX, |value| usize::try_from(value).unwrap_or(usize::MAX));
    let listing = list(action, &ctx.catalog, limit)?;
    output(&listing, flags.format)
}

/// The entries `action` asks for, at most `limit` of them.
pub fn list(action: &CatalogCommands, catalog: &Catalog, limit: usize) -> anyhow::Result<Value> {
    let value = match action {
        CatalogCommands::Traits => {
            serde_json::to_value(catalog.traits.iter().take(limit).collect::<Vec<_>>())?
        }
        CatalogCommands::Questions => {
            serde_json::to_value(catalog.questions.iter().take(limit).collect::<Vec<_>>())?
        }
        CatalogCommands::Streams { category } => {
            let streams = match category {
                Some(category) => {
                    let streams = catalog.streams_in_category(category);
                    if streams.is_empty() {
                        bail!(
                            "no streams in category '{category}' (known: {})",
                            catalog.categories().join(", ")
                        );
                    }
                    streams
                }
                None => catalog.streams.iter().collect(),
            };
            serde_json::to_value(streams.into_iter().take(limit).collect::<Vec<_>>())?
        }
        CatalogCommands::Stream { name } => serde_json::to_value(catalog.require_stream(name)?)?,
        CatalogCommands::Categories => serde_json::to_value(catalog.categories())?,
    };
    Ok(value)
}
