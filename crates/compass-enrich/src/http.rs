//! Provider error handling shared by the Gemini and OpenAI clients.

use serde::Deserialize;

use crate::error::EnrichError;

/// Seconds to wait when a 429 names no delay.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
/// Longest provider message carried into an `Unenriched` reason.
const MAX_ERROR_MESSAGE_CHARS: usize = 300;

/// `{"error": {...}}`, the failure envelope both providers return.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    /// Gemini attaches `google.rpc.RetryInfo` here on quota errors.
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default, rename = "retryDelay")]
    retry_delay: Option<String>,
}

/// Pass a successful response through, or turn a failure into an
/// [`EnrichError`] carrying the provider's own message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, EnrichError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let header_delay = retry_after_header(&resp);
    let body = resp.text().await.unwrap_or_default();
    let envelope = serde_json::from_str::<ErrorEnvelope>(&body).unwrap_or_default();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = header_delay
            .or_else(|| body_retry_delay(&envelope.error))
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        tracing::warn!(retry_after_secs, "enrichment provider rate limited");
        return Err(EnrichError::RateLimited { retry_after_secs });
    }

    let message = envelope
        .error
        .message
        .unwrap_or_else(|| body.trim().to_string());
    Err(EnrichError::Api {
        status: status.as_u16(),
        message: truncate(&message),
    })
}

fn retry_after_header(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Whole seconds of the first `retryDelay` such as `"27s"` or `"1.5s"`.
fn body_retry_delay(error: &ErrorBody) -> Option<u64> {
    error
        .details
        .iter()
        .filter_map(|detail| detail.retry_delay.as_deref())
        .find_map(|delay| {
            let seconds = delay.trim().strip_suffix('s')?;
            let whole = seconds.split('.').next()?;
            whole.parse::<u64>().ok()
        })
}

fn truncate(message: &str) -> String {
    if message.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        return message.to_string();
    }
    let mut out: String = message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn mock_response(status: u16, retry_after: Option<&str>, body: String) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        if let Some(value) = retry_after {
            builder = builder.header("Retry-After", value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    async fn api_error(status: u16, body: &str) -> (u16, String) {
        match check_response(mock_response(status, None, body.to_string())).await {
            Err(EnrichError::Api { status, message }) => (status, message),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    async fn retry_after(header: Option<&str>, body: &str) -> u64 {
        match check_response(mock_response(429, header, body.to_string())).await {
            Err(EnrichError::RateLimited { retry_after_secs }) => retry_after_secs,
            other => panic!("expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn gemini_envelope_message_is_extracted() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            api_error(400, body).await,
            (400, "API key not valid. Please pass a valid API key.".to_string())
        );
    }

    #[tokio::test]
    async fn openai_envelope_message_is_extracted() {
        let body = r#"{"error":{"message":"The model `gpt-x` does not exist","type":"invalid_request_error","code":"model_not_found"}}"#;
        assert_eq!(
            api_error(404, body).await,
            (404, "The model `gpt-x` does not exist".to_string())
        );
    }

    #[tokio::test]
    async fn plain_body_is_kept_trimmed() {
        assert_eq!(
            api_error(503, "  overloaded\n").await,
            (503, "overloaded".to_string())
        );
    }

    #[tokio::test]
    async fn long_messages_are_truncated() {
        let (_, message) = api_error(500, &"x".repeat(1_000)).await;
        assert_eq!(message.chars().count(), MAX_ERROR_MESSAGE_CHARS + 1);
        assert!(message.ends_with('…'));
    }

    #[tokio::test]
    async fn rate_limit_prefers_the_header() {
        let body = r#"{"error":{"details":[{"retryDelay":"27s"}]}}"#;
        assert_eq!(retry_after(Some("5"), body).await, 5);
    }

    #[tokio::test]
    async fn rate_limit_reads_gemini_retry_delay() {
        let body = r#"{"error":{"code":429,"message":"Quota exceeded","details":[{"@type":"type.googleapis.com/google.rpc.QuotaFailure"},{"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"27.4s"}]}}"#;
        assert_eq!(retry_after(None, body).await, 27);
    }

    #[tokio::test]
    async fn rate_limit_falls_back_when_nothing_usable() {
        assert_eq!(retry_after(None, "").await, DEFAULT_RETRY_AFTER_SECS);
        assert_eq!(retry_after(Some("soon"), "{}").await, DEFAULT_RETRY_AFTER_SECS);
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(
            check_response(mock_response(200, None, "{}".to_string()))
                .await
                .is_ok()
        );
    }
}
