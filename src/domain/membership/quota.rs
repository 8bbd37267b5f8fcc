//! Quota arithmetic over a usage snapshot.
//!
//! Pure functions only. Inputs are already clamped to non-negative counts
//! by the time they reach here, so nothing in this module can fail.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;

use super::{SubscriptionTier, TierUsage, UsageLimit};

/// Usage percentage at which the UI starts warning.
pub const NEAR_LIMIT_PERCENT: f64 = 80.0;

/// Percentage of the allowance consumed, in `0.0..=100.0`.
///
/// Unlimited allowances always report zero. A zero allowance reports 100.
pub fn usage_percent(used: u32, limit: UsageLimit) -> f64 {
    match limit {
        UsageLimit::Unlimited => 0.0,
        UsageLimit::Limited(0) => 100.0,
        UsageLimit::Limited(max) => (f64::from(used) / f64::from(max) * 100.0).min(100.0),
    }
}

pub fn is_at_limit(used: u32, limit: UsageLimit) -> bool {
    match limit {
        UsageLimit::Unlimited => false,
        UsageLimit::Limited(max) => used >= max,
    }
}

pub fn is_near_limit(used: u32, limit: UsageLimit) -> bool {
    !is_at_limit(used, limit) && usage_percent(used, limit) >= NEAR_LIMIT_PERCENT
}

pub fn remaining(used: u32, limit: UsageLimit) -> Remaining {
    match limit {
        UsageLimit::Unlimited => Remaining::Unlimited,
        UsageLimit::Limited(max) => Remaining::Finite(max.saturating_sub(used)),
    }
}

/// Generations left in the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remaining {
    Finite(u32),
    Unlimited,
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Finite(n) => write!(f, "{}", n),
            Remaining::Unlimited => write!(f, "∞"),
        }
    }
}

/// Everything the UI shows about a user's quota, computed in one go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaStatus {
    pub tier: SubscriptionTier,
    pub used: u32,
    pub limit: UsageLimit,
    pub percent: f64,
    pub at_limit: bool,
    pub near_limit: bool,
    pub remaining: Remaining,
    pub reset_at: Timestamp,
}

impl QuotaStatus {
    pub fn from_usage(usage: &TierUsage) -> Self {
        Self {
            tier: usage.tier,
            used: usage.used,
            limit: usage.limit,
            percent: usage_percent(usage.used, usage.limit),
            at_limit: is_at_limit(usage.used, usage.limit),
            near_limit: is_near_limit(usage.used, usage.limit),
            remaining: remaining(usage.used, usage.limit),
            reset_at: usage.reset_at,
        }
    }

    /// Tier-specific upgrade prompt shown when the quota is exhausted.
    ///
    /// Returns `None` for the top tier, which has nowhere to upgrade to.
    pub fn upgrade_message(&self) -> Option<String> {
        let target = self.tier.upgrade_target()?;
        let limit = match self.limit {
            UsageLimit::Limited(max) => max.to_string(),
            UsageLimit::Unlimited => "unlimited".to_string(),
        };
        Some(format!(
            "You've used all {} generations included in {}. Upgrade to {} to keep generating.",
            limit,
            self.tier.display_name(),
            target.display_name()
        ))
    }
}
