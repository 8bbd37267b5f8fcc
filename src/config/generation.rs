//! Copy generation collaborator configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where and how to reach the generation service
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the generation service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the generate endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token sent with each request
    pub api_key: Option<Secret<String>>,

    /// Per-request timeout in seconds. Unset waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Serve canned copy instead of calling the service
    #[serde(default)]
    pub offline: bool,
}

impl GenerationConfig {
    /// Get timeout as Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GENERATION__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == Some(0) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            api_key: None,
            timeout_secs: None,
            offline: false,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_endpoint() -> String {
    "/api/generate".to_string()
}
