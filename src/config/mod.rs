//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `COUNCIL_COPY` prefix
//! and nested values are separated by double underscores. Every section has
//! defaults, so an empty environment yields a working local setup.
//!
//! # Example
//!
//! ```no_run
//! use council_copy::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Generating against {}", config.generation.base_url);
//! ```

mod error;
mod generation;
mod telemetry;
mod usage;
mod workflow;

pub use error::{ConfigError, ValidationError};
pub use generation::GenerationConfig;
pub use telemetry::TelemetryConfig;
pub use usage::UsageConfig;
pub use workflow::WorkflowConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation collaborator (URL, key, timeout)
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Session settings (council size)
    #[serde(default)]
    pub workflow: WorkflowConfig,

    /// Local usage tracking (default tier, reset window)
    #[serde(default)]
    pub usage: UsageConfig,

    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `COUNCIL_COPY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `COUNCIL_COPY__GENERATION__BASE_URL=https://...` -> `generation.base_url`
    /// - `COUNCIL_COPY__WORKFLOW__MAX_COUNCIL_SELECTIONS=5` -> `workflow.max_council_selections`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("COUNCIL_COPY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid value found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.generation.validate()?;
        self.workflow.validate()?;
        self.usage.validate()?;
        Ok(())
    }
}
