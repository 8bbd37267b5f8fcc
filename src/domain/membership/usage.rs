//! Usage snapshot owned by the external account service.
//!
//! The core only ever reads these; consumption is reported to the
//! account service, which hands back a fresh snapshot on the next read.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::Timestamp;

use super::{QuotaStatus, SubscriptionTier, TierLimits};

/// Wire sentinel the account service uses for "no limit".
pub const UNLIMITED_SENTINEL: i64 = -1;

/// Generation allowance for a reset window.
///
/// Serialized as a bare integer where `-1` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UsageLimit {
    Limited(u32),
    Unlimited,
}

impl UsageLimit {
    /// Interprets a raw wire value.
    ///
    /// `-1` is unlimited; any other negative value is clamped to zero.
    pub fn from_sentinel(raw: i64) -> Self {
        if raw == UNLIMITED_SENTINEL {
            UsageLimit::Unlimited
        } else {
            UsageLimit::Limited(clamp_count(raw))
        }
    }

    /// Returns the wire representation.
    pub fn as_sentinel(&self) -> i64 {
        match self {
            UsageLimit::Limited(max) => i64::from(*max),
            UsageLimit::Unlimited => UNLIMITED_SENTINEL,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, UsageLimit::Unlimited)
    }
}

impl From<i64> for UsageLimit {
    fn from(raw: i64) -> Self {
        Self::from_sentinel(raw)
    }
}

impl From<UsageLimit> for i64 {
    fn from(limit: UsageLimit) -> Self {
        limit.as_sentinel()
    }
}

/// Clamps a raw counter into the `u32` range.
pub(crate) fn clamp_count(raw: i64) -> u32 {
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(clamp_count(i64::deserialize(deserializer)?))
}

/// Snapshot of a user's generation usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierUsage {
    pub tier: SubscriptionTier,
    #[serde(deserialize_with = "deserialize_count")]
    pub used: u32,
    pub limit: UsageLimit,
    /// When the counter resets. Strictly in the future while the window is active.
    pub reset_at: Timestamp,
}

impl TierUsage {
    pub fn new(tier: SubscriptionTier, used: u32, limit: UsageLimit, reset_at: Timestamp) -> Self {
        Self {
            tier,
            used,
            limit,
            reset_at,
        }
    }

    /// Creates an unused snapshot with the tier's default allowance.
    pub fn fresh(tier: SubscriptionTier, now: Timestamp, window_days: u32) -> Self {
        Self::new(
            tier,
            0,
            TierLimits::for_tier(tier).monthly_generations,
            now.add_days(i64::from(window_days)),
        )
    }

    /// Returns true once `now` has reached the reset point.
    pub fn window_elapsed(&self, now: Timestamp) -> bool {
        !now.is_before(&self.reset_at)
    }

    /// Evaluates this snapshot with the quota functions.
    pub fn quota_status(&self) -> QuotaStatus {
        QuotaStatus::from_usage(self)
    }
}
