//! Enrichment error types.
//!
//! None of these escape [`crate::enrich`]; they become the `reason` of an
//! unenriched result.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// HTTP transport error, with the request URL removed.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Provider returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The provider returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Provider output could not be turned into insights.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider did not answer within the configured bound.
    #[error("enrichment timed out after {secs}s")]
    Timeout { secs: u64 },

    /// No provider or no API key is configured.
    #[error("enrichment provider is not configured")]
    NotConfigured,
}

impl From<reqwest::Error> for EnrichError {
    /// Drops the request URL so no provider endpoint reaches a reason or log line.
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.without_url())
    }
}
