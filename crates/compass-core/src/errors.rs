//! Cross-cutting error types for Compass.
//!
//! Domain-specific errors (e.g. `ConfigError`, `EnrichError`) are defined in
//! their respective crates. The scoring engine itself is total and has no
//! error type; recovered conditions are reported as [`crate::entities::Recovery`].

use thiserror::Error;

/// Errors that can be raised by any Compass crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Catalog data failed an invariant check.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A catalog document could not be parsed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
