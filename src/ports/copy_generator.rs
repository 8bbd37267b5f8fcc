//! CopyGenerator Port - Interface to the copy-generation collaborator.
//!
//! The collaborator receives the campaign brief plus the selected council and
//! answers with the six copy sections, or with an error payload. Quota
//! rejections are a distinct error so the caller can show an upgrade prompt
//! instead of a generic failure.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::copy::SectionMap;
use crate::domain::council::{CouncilMemberId, CouncilSelection};
use crate::domain::workflow::{BriefField, CampaignBrief};

/// Port for the external copy-generation service.
#[async_trait]
pub trait CopyGenerator: Send + Sync {
    /// Generates one full piece of copy.
    ///
    /// Implementations must return a complete `SectionMap` or an error; a
    /// response missing any section is `MalformedResponse`.
    async fn generate(&self, request: GenerationRequest) -> Result<SectionMap, CopyGeneratorError>;
}

/// Wire request sent to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub industry: String,
    pub target_audience: String,
    pub pain_point: String,
    pub desired_outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_personality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<String>,
    pub council_selection: Vec<CouncilMemberId>,
}

impl GenerationRequest {
    /// Builds the request from the session's brief and council.
    ///
    /// The brief's niche is sent as `industry` and its tone as
    /// `brandPersonality`. Business model and competitor notes are passed
    /// through when present.
    pub fn from_brief(brief: &CampaignBrief, council: &CouncilSelection) -> Self {
        let mut request = Self {
            industry: brief.get(BriefField::Niche).trim().to_string(),
            target_audience: brief.get(BriefField::TargetAudience).trim().to_string(),
            pain_point: brief.get(BriefField::PainPoint).trim().to_string(),
            desired_outcome: brief.get(BriefField::DesiredOutcome).trim().to_string(),
            business_model: None,
            price_point: brief.optional(BriefField::PricePoint),
            brand_personality: brief.optional(BriefField::Tone),
            competitor_analysis: None,
            council_selection: council.members().to_vec(),
        };
        if let Some(model) = &brief.business_model {
            request = request.with_business_model(model.as_str());
        }
        if let Some(notes) = &brief.competitor_analysis {
            request = request.with_competitor_analysis(notes.as_str());
        }
        request
    }

    /// Sets the business model hint.
    pub fn with_business_model(mut self, model: impl Into<String>) -> Self {
        self.business_model = Some(model.into());
        self
    }

    /// Sets the competitor analysis notes.
    pub fn with_competitor_analysis(mut self, notes: impl Into<String>) -> Self {
        self.competitor_analysis = Some(notes.into());
        self
    }
}

/// Copy generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyGeneratorError {
    /// The collaborator refused because the account's quota is spent (HTTP 429).
    #[error("generation quota exceeded: {message}")]
    QuotaExceeded {
        /// Message from the collaborator.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Collaborator is unavailable (5xx).
    #[error("generator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered with an `{error}` payload or a 4xx status.
    #[error("generation rejected: {0}")]
    Rejected(String),

    /// The response could not be parsed or lacked sections.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid request or client configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },
}

impl CopyGeneratorError {
    pub fn quota_exceeded(message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Returns true if a plain retry may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CopyGeneratorError::Unavailable { .. }
                | CopyGeneratorError::Network(_)
                | CopyGeneratorError::Timeout { .. }
        )
    }

    /// Returns true if the failure is a quota rejection.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, CopyGeneratorError::QuotaExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief() -> CampaignBrief {
        let mut brief = CampaignBrief::default();
        brief.set(BriefField::Niche, " fitness ");
        brief.set(BriefField::Tone, "bold");
        brief.set(BriefField::TargetAudience, "busy parents");
        brief.set(BriefField::PainPoint, "no time");
        brief
    }

    #[test]
    fn request_maps_niche_and_tone() {
        let mut council = CouncilSelection::default();
        council.toggle(CouncilMemberId::new("closer").unwrap());

        let request = GenerationRequest::from_brief(&brief(), &council);

        assert_eq!(request.industry, "fitness");
        assert_eq!(request.brand_personality.as_deref(), Some("bold"));
        assert_eq!(request.price_point, None);
        assert_eq!(request.council_selection.len(), 1);
    }

    #[test]
    fn request_serializes_camel_case_and_skips_absent_optionals() {
        let request = GenerationRequest::from_brief(&brief(), &CouncilSelection::default())
            .with_business_model("coaching");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["targetAudience"], "busy parents");
        assert_eq!(json["businessModel"], "coaching");
        assert_eq!(json["councilSelection"], serde_json::json!([]));
        assert!(json.get("pricePoint").is_none());
        assert!(json.get("competitorAnalysis").is_none());
    }

    #[test]
    fn request_carries_brief_notes() {
        let mut brief = brief();
        brief.set_business_model(Some("coaching".to_string()));
        brief.set_competitor_analysis(Some("rivals sell on price".to_string()));

        let request = GenerationRequest::from_brief(&brief, &CouncilSelection::default());

        assert_eq!(request.business_model.as_deref(), Some("coaching"));
        assert_eq!(request.competitor_analysis.as_deref(), Some("rivals sell on price"));
    }

    #[test]
    fn retryable_classification() {
        assert!(CopyGeneratorError::unavailable("down").is_retryable());
        assert!(CopyGeneratorError::network("reset").is_retryable());
        assert!(CopyGeneratorError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!CopyGeneratorError::quota_exceeded("spent").is_retryable());
        assert!(!CopyGeneratorError::AuthenticationFailed.is_retryable());
        assert!(!CopyGeneratorError::malformed("no cta").is_retryable());
        assert!(!CopyGeneratorError::rejected("bad input").is_retryable());
    }

    #[test]
    fn error_displays_correctly() {
        let err = CopyGeneratorError::quota_exceeded("monthly limit reached");
        assert_eq!(err.to_string(), "generation quota exceeded: monthly limit reached");
        assert!(err.is_quota_exceeded());
    }
}
