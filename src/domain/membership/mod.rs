//! Membership domain module.
//!
//! Subscription tiers and the quota arithmetic consulted before every
//! generation request.
//!
//! # Module Structure
//!
//! - `tier` - SubscriptionTier levels
//! - `tier_limits` - Generation allowance and export tools per tier
//! - `usage` - TierUsage snapshot read from the account service
//! - `quota` - Pure percent / at-limit / near-limit / remaining functions

mod quota;
mod tier;
mod tier_limits;
mod usage;

pub use quota::{
    is_at_limit, is_near_limit, remaining, usage_percent, QuotaStatus, Remaining,
    NEAR_LIMIT_PERCENT,
};
pub use tier::SubscriptionTier;
pub use tier_limits::TierLimits;
pub use usage::{TierUsage, UsageLimit, UNLIMITED_SENTINEL};
