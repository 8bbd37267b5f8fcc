//! HTTP Copy Generator - CopyGenerator backed by the generation endpoint.
//!
//! POSTs the `GenerationRequest` as JSON and expects either the six copy
//! sections or an `{ "error": "..." }` payload back.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpCopyGeneratorConfig::new("https://copy.example.com")
//!     .with_endpoint("/api/generate")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(60));
//!
//! let generator = HttpCopyGenerator::new(config)?;
//! ```
//!
//! # Status mapping
//!
//! | Status | Error |
//! |--------|-------|
//! | 429 | `QuotaExceeded` |
//! | 401, 403 | `AuthenticationFailed` |
//! | other 4xx | `Rejected` |
//! | 5xx | `Unavailable` |

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::copy::{CopySection, SectionMap};
use crate::ports::{CopyGenerator, CopyGeneratorError, GenerationRequest};

/// Default path of the generation endpoint.
pub const DEFAULT_ENDPOINT: &str = "/api/generate";

/// Configuration for the HTTP copy generator.
#[derive(Debug, Clone)]
pub struct HttpCopyGeneratorConfig {
    /// Base URL of the generation service.
    pub base_url: String,
    /// Path of the generate endpoint.
    pub endpoint: String,
    /// Optional bearer token.
    api_key: Option<Secret<String>>,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpCopyGeneratorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_key(mut self, api_key: Secret<String>) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// CopyGenerator that talks to the generation service over HTTP.
pub struct HttpCopyGenerator {
    config: HttpCopyGeneratorConfig,
    client: Client,
}

impl HttpCopyGenerator {
    pub fn new(config: HttpCopyGeneratorConfig) -> Result<Self, CopyGeneratorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            CopyGeneratorError::InvalidRequest(format!("failed to build HTTP client: {}", e))
        })?;

        Ok(Self { config, client })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.endpoint.trim_start_matches('/')
        )
    }

    async fn send_request(&self, request: &GenerationRequest) -> Result<Response, CopyGeneratorError> {
        let mut builder = self.client.post(self.generate_url()).json(request);
        if let Some(key) = self.config.api_key() {
            builder = builder.bearer_auth(key);
        }

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                CopyGeneratorError::Timeout {
                    timeout_secs: self.config.timeout.map(|t| t.as_secs()).unwrap_or_default(),
                }
            } else if e.is_connect() {
                CopyGeneratorError::network(format!("Connection failed: {}", e))
            } else {
                CopyGeneratorError::network(e.to_string())
            }
        })
    }
}

#[async_trait]
impl CopyGenerator for HttpCopyGenerator {
    #[tracing::instrument(skip_all, fields(industry = %request.industry))]
    async fn generate(&self, request: GenerationRequest) -> Result<SectionMap, CopyGeneratorError> {
        let response = self.send_request(&request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CopyGeneratorError::network(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "generation endpoint returned an error status");
            return Err(error_for_status(status.as_u16(), &body));
        }

        parse_sections(&body)
    }
}

/// Section fields as the endpoint sends them. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct SectionsBody {
    error: Option<String>,
    hook: Option<String>,
    problem: Option<String>,
    story: Option<String>,
    proof: Option<String>,
    offer: Option<String>,
    cta: Option<String>,
}

/// Parses a 2xx body into a complete `SectionMap`.
fn parse_sections(body: &str) -> Result<SectionMap, CopyGeneratorError> {
    let parsed: SectionsBody = serde_json::from_str(body)
        .map_err(|e| CopyGeneratorError::malformed(format!("Failed to parse response: {}", e)))?;

    if let Some(error) = parsed.error {
        return Err(CopyGeneratorError::rejected(error));
    }

    let content = [
        (CopySection::Hook, parsed.hook),
        (CopySection::Problem, parsed.problem),
        (CopySection::Story, parsed.story),
        (CopySection::Proof, parsed.proof),
        (CopySection::Offer, parsed.offer),
        (CopySection::Cta, parsed.cta),
    ]
    .into_iter()
    .filter_map(|(section, text)| text.map(|t| (section, t)))
    .fold(SectionMap::new(), |map, (section, text)| map.with(section, text));

    let missing = content.missing();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|s| s.as_str()).collect();
        return Err(CopyGeneratorError::malformed(format!(
            "missing sections: {}",
            names.join(", ")
        )));
    }
    Ok(content)
}

/// Maps a non-2xx status and its body to an error.
fn error_for_status(status: u16, body: &str) -> CopyGeneratorError {
    let message = error_message(body);
    match status {
        429 => CopyGeneratorError::quota_exceeded(message),
        401 | 403 => CopyGeneratorError::AuthenticationFailed,
        400..=499 => CopyGeneratorError::rejected(message),
        500..=599 => CopyGeneratorError::unavailable(format!("Server error {}: {}", status, message)),
        _ => CopyGeneratorError::network(format!("Unexpected status {}: {}", status, message)),
    }
}

/// The `error` field of a JSON error payload, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BODY: &str = r#"{
        "hook": "Tired of chaos?",
        "problem": "Mornings run you.",
        "story": "Then everything changed.",
        "proof": "1,200 parents in 6 weeks",
        "offer": "The Calm Mornings kit",
        "cta": "Start today",
        "model": "ignored"
    }"#;

    #[test]
    fn config_builder_works() {
        let config = HttpCopyGeneratorConfig::new("https://copy.example.com")
            .with_endpoint("/v2/generate")
            .with_api_key(Secret::new("key-123".to_string()))
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.endpoint, "/v2/generate");
        assert_eq!(config.api_key(), Some("key-123"));
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn default_config_has_no_timeout() {
        let config = HttpCopyGeneratorConfig::new("http://localhost:3000");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.timeout.is_none());
        assert!(config.api_key().is_none());
    }

    #[test]
    fn url_joins_without_double_slash() {
        let generator =
            HttpCopyGenerator::new(HttpCopyGeneratorConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(generator.generate_url(), "http://localhost:3000/api/generate");
    }

    #[test]
    fn parses_all_six_sections() {
        let content = parse_sections(FULL_BODY).unwrap();
        assert!(content.is_complete());
        assert_eq!(content.get(CopySection::Cta), "Start today");
    }

    #[test]
    fn error_payload_is_rejected() {
        let err = parse_sections(r#"{"error": "Industry is required"}"#).unwrap_err();
        assert_eq!(err, CopyGeneratorError::rejected("Industry is required"));
    }

    #[test]
    fn incomplete_sections_are_malformed() {
        let err = parse_sections(r#"{"hook": "Hi!", "cta": "   "}"#).unwrap_err();
        assert_eq!(
            err,
            CopyGeneratorError::malformed("missing sections: problem, story, proof, offer, cta")
        );
    }

    #[test]
    fn non_json_is_malformed() {
        let err = parse_sections("<html>").unwrap_err();
        assert!(matches!(err, CopyGeneratorError::MalformedResponse(_)));
    }

    #[test]
    fn status_429_is_quota_exceeded() {
        let err = error_for_status(429, r#"{"error": "Monthly limit reached"}"#);
        assert_eq!(err, CopyGeneratorError::quota_exceeded("Monthly limit reached"));
    }

    #[test]
    fn other_statuses_map_to_expected_errors() {
        assert_eq!(error_for_status(401, ""), CopyGeneratorError::AuthenticationFailed);
        assert_eq!(
            error_for_status(422, "bad input"),
            CopyGeneratorError::rejected("bad input")
        );
        assert!(error_for_status(503, "").is_retryable());
    }
}
