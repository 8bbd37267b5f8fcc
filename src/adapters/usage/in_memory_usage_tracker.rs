//! In-memory usage tracker implementation.
//!
//! Stands in for the account service during development, tests and the
//! offline CLI. Users are seeded lazily with their tier's allowance.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::membership::{SubscriptionTier, TierUsage, UsageLimit};
use crate::ports::{UsageTracker, UsageTrackerError};

/// Default length of a usage window.
pub const DEFAULT_RESET_WINDOW_DAYS: u32 = 30;

/// In-memory implementation of the UsageTracker port.
///
/// Thread-safe via internal `Mutex`. Does not persist data across restarts.
/// A read at or after `reset_at` starts a new window.
pub struct InMemoryUsageTracker {
    usage: Mutex<HashMap<UserId, TierUsage>>,
    default_tier: SubscriptionTier,
    window_days: u32,
    unavailable: AtomicBool,
}

impl InMemoryUsageTracker {
    /// Creates a tracker that seeds unknown users at `default_tier`.
    pub fn new(default_tier: SubscriptionTier, window_days: u32) -> Self {
        Self {
            usage: Mutex::new(HashMap::new()),
            default_tier,
            window_days: window_days.max(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Seeds a user with an explicit snapshot.
    pub fn with_usage(self, user_id: UserId, usage: TierUsage) -> Self {
        self.usage.lock().unwrap().insert(user_id, usage);
        self
    }

    /// Puts a user on a tier with a fresh window.
    pub fn set_tier(&self, user_id: &UserId, tier: SubscriptionTier) {
        let fresh = TierUsage::fresh(tier, Timestamp::now(), self.window_days);
        self.usage.lock().unwrap().insert(user_id.clone(), fresh);
    }

    /// Makes every call fail with `Unavailable` until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Generations consumed in the current window, without rolling it.
    pub fn used(&self, user_id: &UserId) -> u32 {
        self.usage
            .lock()
            .unwrap()
            .get(user_id)
            .map(|u| u.used)
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), UsageTrackerError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(UsageTrackerError::unavailable("in-memory tracker switched off"));
        }
        Ok(())
    }

    /// Applies `f` to the user's current-window snapshot, seeding it if absent.
    fn with_current<T>(&self, user_id: &UserId, f: impl FnOnce(&mut TierUsage) -> T) -> T {
        let now = Timestamp::now();
        let mut usage = self.usage.lock().unwrap();
        let entry = usage
            .entry(user_id.clone())
            .or_insert_with(|| TierUsage::fresh(self.default_tier, now, self.window_days));

        if entry.window_elapsed(now) {
            while entry.window_elapsed(now) {
                entry.reset_at = entry.reset_at.add_days(i64::from(self.window_days));
            }
            entry.used = 0;
            tracing::debug!(user_id = %user_id, "usage window rolled over");
        }
        f(entry)
    }
}

impl Default for InMemoryUsageTracker {
    fn default() -> Self {
        Self::new(SubscriptionTier::Free, DEFAULT_RESET_WINDOW_DAYS)
    }
}

#[async_trait]
impl UsageTracker for InMemoryUsageTracker {
    async fn current_usage(&self, user_id: &UserId) -> Result<TierUsage, UsageTrackerError> {
        self.check_available()?;
        Ok(self.with_current(user_id, |usage| usage.clone()))
    }

    async fn record_generation(&self, user_id: &UserId) -> Result<(), UsageTrackerError> {
        self.check_available()?;
        self.with_current(user_id, |usage| {
            usage.used = match usage.limit {
                UsageLimit::Limited(max) => usage.used.saturating_add(1).min(max),
                UsageLimit::Unlimited => usage.used.saturating_add(1),
            };
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[tokio::test]
    async fn unknown_user_is_seeded_with_default_tier() {
        let tracker = InMemoryUsageTracker::new(SubscriptionTier::Starter, 30);

        let usage = tracker.current_usage(&user()).await.unwrap();

        assert_eq!(usage.tier, SubscriptionTier::Starter);
        assert_eq!(usage.used, 0);
        assert_eq!(usage.limit, UsageLimit::Limited(25));
        assert!(usage.reset_at.is_after(&Timestamp::now()));
    }

    #[tokio::test]
    async fn record_generation_increments_used() {
        let tracker = InMemoryUsageTracker::default();
        tracker.record_generation(&user()).await.unwrap();
        tracker.record_generation(&user()).await.unwrap();

        assert_eq!(tracker.current_usage(&user()).await.unwrap().used, 2);
    }

    #[tokio::test]
    async fn used_never_exceeds_a_finite_limit() {
        let tracker = InMemoryUsageTracker::default();
        for _ in 0..5 {
            tracker.record_generation(&user()).await.unwrap();
        }
        let usage = tracker.current_usage(&user()).await.unwrap();
        assert_eq!(usage.used, 3);
        assert!(usage.quota_status().at_limit);
    }

    #[tokio::test]
    async fn elapsed_window_rolls_over_on_read() {
        let expired = TierUsage::new(
            SubscriptionTier::Pro,
            100,
            UsageLimit::Limited(100),
            Timestamp::now().minus_days(45),
        );
        let tracker = InMemoryUsageTracker::default().with_usage(user(), expired);

        let usage = tracker.current_usage(&user()).await.unwrap();

        assert_eq!(usage.used, 0);
        assert_eq!(usage.tier, SubscriptionTier::Pro);
        assert!(usage.reset_at.is_after(&Timestamp::now()));
    }

    #[tokio::test]
    async fn set_tier_starts_fresh_window() {
        let tracker = InMemoryUsageTracker::default();
        tracker.record_generation(&user()).await.unwrap();

        tracker.set_tier(&user(), SubscriptionTier::Vault);

        let usage = tracker.current_usage(&user()).await.unwrap();
        assert_eq!(usage.used, 0);
        assert!(usage.limit.is_unlimited());
    }

    #[tokio::test]
    async fn unavailable_tracker_fails_calls() {
        let tracker = InMemoryUsageTracker::default();
        tracker.set_unavailable(true);

        assert!(tracker.current_usage(&user()).await.is_err());
        assert!(tracker.record_generation(&user()).await.is_err());
        assert_eq!(tracker.used(&user()), 0);
    }
}
