//! Tier-based quota configuration.
//!
//! Defines the generation quota and export tools available for each tier.

use super::{SubscriptionTier, UsageLimit};
use serde::{Deserialize, Serialize};

/// Limits for a subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: SubscriptionTier,
    /// Generations allowed per reset window.
    pub monthly_generations: UsageLimit,
    /// Whether hook-only CSV export is enabled.
    pub hook_csv_export: bool,
}

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// | Tier | Generations / window | Hook CSV |
    /// |------|----------------------|----------|
    /// | Free | 3 | No |
    /// | Starter | 25 | Yes |
    /// | Pro | 100 | Yes |
    /// | Vault | Unlimited | Yes |
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                tier,
                monthly_generations: UsageLimit::Limited(3),
                hook_csv_export: false,
            },
            SubscriptionTier::Starter => Self {
                tier,
                monthly_generations: UsageLimit::Limited(25),
                hook_csv_export: true,
            },
            SubscriptionTier::Pro => Self {
                tier,
                monthly_generations: UsageLimit::Limited(100),
                hook_csv_export: true,
            },
            SubscriptionTier::Vault => Self {
                tier,
                monthly_generations: UsageLimit::Unlimited,
                hook_csv_export: true,
            },
        }
    }
}
