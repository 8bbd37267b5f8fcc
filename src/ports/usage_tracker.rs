//! UsageTracker port - Interface to the account service's generation counter.
//!
//! The core only reads snapshots and reports "one generation consumed". It
//! never writes counters directly.

use async_trait::async_trait;

use crate::domain::foundation::UserId;
use crate::domain::membership::TierUsage;

/// Port for reading and reporting generation usage.
#[async_trait]
pub trait UsageTracker: Send + Sync {
    /// Current usage snapshot for a user.
    async fn current_usage(&self, user_id: &UserId) -> Result<TierUsage, UsageTrackerError>;

    /// Reports that one generation was consumed.
    ///
    /// No transactional guarantee: callers treat failure as non-fatal.
    async fn record_generation(&self, user_id: &UserId) -> Result<(), UsageTrackerError>;
}

/// Errors from usage tracking operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsageTrackerError {
    /// Account service is unavailable.
    #[error("usage service unavailable: {0}")]
    Unavailable(String),

    /// The snapshot returned by the service is not usable.
    #[error("invalid usage snapshot: {0}")]
    InvalidSnapshot(String),
}

impl UsageTrackerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, UsageTrackerError::Unavailable(_))
    }
}
