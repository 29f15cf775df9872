//! Gemini `generateContent` client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use journal_core::ports::{GenerationError, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Text generator backed by a single Gemini model.
pub struct GeminiTextGenerator {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiTextGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Backend(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(model = %config.model, "Gemini text generator configured");
        Ok(Self { http, config })
    }
}

#[async_trait]
impl TextGenerator for GeminiTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let started = Instant::now();
        let response = self
            .http
            .post(self.config.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(transport_error)?;

        if !status.is_success() {
            let err = error_from_response(status, &payload);
            tracing::error!(
                model = %self.config.model,
                status = status.as_u16(),
                error = %err,
                "Gemini request failed"
            );
            return Err(err);
        }

        let text = parse_generate_response(&payload)?;
        tracing::debug!(
            model = %self.config.model,
            duration_ms = started.elapsed().as_millis() as u64,
            prompt_chars = prompt.chars().count(),
            response_chars = text.chars().count(),
            "Gemini request completed"
        );
        Ok(text)
    }
}

/// Network-level failures never reached the API, so they are not classified.
/// The URL is dropped because it names the model.
fn transport_error(err: reqwest::Error) -> GenerationError {
    GenerationError::Backend(err.without_url().to_string())
}

/// Concatenate the text parts of the first candidate.
fn parse_generate_response(payload: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse = serde_json::from_str(payload)
        .map_err(|e| GenerationError::Backend(format!("unreadable response: {e}")))?;

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GenerationError::Backend("empty response from model".to_string()));
    }
    Ok(text)
}

fn error_from_response(status: StatusCode, payload: &str) -> GenerationError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return GenerationError::QuotaExceeded;
    }

    let message = serde_json::from_str::<ErrorEnvelope>(payload)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| format!("{status}: {payload}"));
    GenerationError::classify(&message)
}

/// Generator used when no API key is configured. Every call fails with
/// a credential error, so metadata falls back and enhancement reports it.
pub struct DisabledTextGenerator;

#[async_trait]
impl TextGenerator for DisabledTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::InvalidCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_model() {
        let config = GeminiConfig::new("key", "gemini-2.5-flash").with_base_url("http://localhost:9000/");

        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "hello" }],
            }],
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_parse_joins_parts_of_first_candidate() {
        let payload = r#"{
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "TITLE: Rain\n"}, {"text": "CATEGORY: Weather"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;

        let text = parse_generate_response(payload).unwrap();

        assert_eq!(text, "TITLE: Rain\nCATEGORY: Weather");
    }

    #[test]
    fn test_parse_blocked_prompt_is_backend_error() {
        let payload = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;

        let err = parse_generate_response(payload).unwrap_err();

        assert!(matches!(err, GenerationError::Backend(_)));
    }

    #[test]
    fn test_error_classification_from_api_payload() {
        let payload = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;

        assert_eq!(
            error_from_response(StatusCode::BAD_REQUEST, payload),
            GenerationError::InvalidCredential
        );
        assert_eq!(
            error_from_response(StatusCode::TOO_MANY_REQUESTS, "{}"),
            GenerationError::QuotaExceeded
        );
        assert_eq!(
            error_from_response(
                StatusCode::NOT_FOUND,
                r#"{"error": {"message": "models/gemini-0 is not found"}}"#
            ),
            GenerationError::ModelUnavailable
        );
    }

    #[test]
    fn test_error_without_envelope_keeps_body() {
        let err = error_from_response(StatusCode::BAD_GATEWAY, "upstream down");

        assert_eq!(
            err,
            GenerationError::Backend("502 Bad Gateway: upstream down".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_generic_error() {
        let config = GeminiConfig::new("key", "gemini-2.5-pro")
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5));
        let generator = GeminiTextGenerator::new(config).unwrap();

        let err = generator.generate("hello").await.unwrap_err();

        match err {
            GenerationError::Backend(message) => assert!(!message.contains("models/")),
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_disabled_generator_reports_credentials() {
        let err = DisabledTextGenerator.generate("anything").await.unwrap_err();

        assert_eq!(err, GenerationError::InvalidCredential);
    }
}
