//! HTTP clients for the supported LLM providers.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use compass_config::{EnrichmentConfig, EnrichmentProvider};
use compass_core::entities::{Match, StreamInsight};
use serde::{Deserialize, Serialize};

use crate::error::EnrichError;
use crate::http::check_response;
use crate::prompt::{SYSTEM_PROMPT, build_prompt, parse_insights};
use crate::{Enricher, EnrichmentRequest};

const TEMPERATURE: f64 = 0.4;

// ── Gemini ─────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    response_mime_type: &'static str,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    fn into_text(self) -> Result<String, EnrichError> {
        self.candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<String>())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| EnrichError::Parse("gemini returned no candidate text".into()))
    }
}

// ── OpenAI-compatible ──────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, EnrichError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| EnrichError::Parse("chat completion returned no content".into()))
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Header Gemini reads the API key from.
const GEMINI_KEY_HEADER: &str = "x-goog-api-key";

/// Enricher backed by a hosted LLM.
pub struct LlmEnricher {
    http: reqwest::Client,
    config: EnrichmentConfig,
}

impl LlmEnricher {
    /// Build a client for the configured provider.
    ///
    /// # Errors
    ///
    /// Returns [`EnrichError::NotConfigured`] if no provider or API key is set,
    /// or [`EnrichError::Http`] if the HTTP client cannot be built.
    pub fn new(config: EnrichmentConfig) -> Result<Self, EnrichError> {
        config
            .require_configured()
            .map_err(|_| EnrichError::NotConfigured)?;
        let http = reqwest::Client::builder()
            .user_agent("compass/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    async fn gemini(&self, prompt: &str) -> Result<String, EnrichError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.effective_base_url(),
            urlencoding::encode(self.config.effective_model()),
        );
        let body = GeminiRequest {
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    text: SYSTEM_PROMPT,
                }],
            },
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                response_mime_type: "application/json",
            },
        };
        let resp = check_response(
            self.http
                .post(&url)
                .header(GEMINI_KEY_HEADER, &self.config.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        let data: GeminiResponse = resp.json().await?;
        data.into_text()
    }

    async fn openai(&self, prompt: &str) -> Result<String, EnrichError> {
        let url = format!("{}/chat/completions", self.config.effective_base_url());
        let body = ChatRequest {
            model: self.config.effective_model(),
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };
        let resp = check_response(
            self.http
                .post(&url)
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        let data: ChatResponse = resp.json().await?;
        data.into_text()
    }
}

#[async_trait]
impl Enricher for LlmEnricher {
    fn name(&self) -> &str {
        self.config.provider.as_str()
    }

    async fn insights(
        &self,
        top: &[Match],
        request: &EnrichmentRequest,
    ) -> Result<BTreeMap<String, StreamInsight>, EnrichError> {
        let prompt = build_prompt(top, request);
        let text = match self.config.provider {
            EnrichmentProvider::Gemini => self.gemini(&prompt).await?,
            EnrichmentProvider::OpenAi => self.openai(&prompt).await?,
            EnrichmentProvider::None => return Err(EnrichError::NotConfigured),
        };
        parse_insights(&text)
    }
}
