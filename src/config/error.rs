//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Generation base URL must use http or https")]
    InvalidBaseUrl,

    #[error("Invalid generation timeout")]
    InvalidTimeout,

    #[error("Council must allow at least one selection")]
    InvalidMaxSelections,

    #[error("Usage reset window must be at least one day")]
    InvalidResetWindow,
}
