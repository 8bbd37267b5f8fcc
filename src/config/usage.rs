//! Usage tracking configuration

use serde::Deserialize;

use crate::domain::membership::SubscriptionTier;

use super::error::ValidationError;

/// Settings for the local usage tracker
#[derive(Debug, Clone, Deserialize)]
pub struct UsageConfig {
    /// Tier given to users the tracker has not seen
    #[serde(default)]
    pub default_tier: SubscriptionTier,

    /// Length of a quota window in days
    #[serde(default = "default_reset_window_days")]
    pub reset_window_days: u32,
}

impl UsageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reset_window_days == 0 {
            return Err(ValidationError::InvalidResetWindow);
        }
        Ok(())
    }
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            default_tier: SubscriptionTier::default(),
            reset_window_days: default_reset_window_days(),
        }
    }
}

fn default_reset_window_days() -> u32 {
    30
}
