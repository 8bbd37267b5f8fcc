//! Subscription tier definitions.
//!
//! Represents the subscription levels that control generation quotas.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Subscription tier.
///
/// Determines the monthly generation quota and which export tools are
/// available. Adding a tier is a compile-time-checked change: every match
/// over this enum is exhaustive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Evaluation tier with a handful of generations.
    #[default]
    Free,
    /// Entry paid tier.
    Starter,
    /// Professional tier.
    Pro,
    /// Top tier with unlimited generations.
    Vault,
}

impl SubscriptionTier {
    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Starter => "Starter",
            SubscriptionTier::Pro => "Pro",
            SubscriptionTier::Vault => "Vault",
        }
    }

    /// Returns the numeric rank of this tier for comparison.
    ///
    /// Higher rank = more generations.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionTier::Free => 0,
            SubscriptionTier::Starter => 1,
            SubscriptionTier::Pro => 2,
            SubscriptionTier::Vault => 3,
        }
    }

    /// Returns the tier a user on this tier would upgrade to, if any.
    pub fn upgrade_target(&self) -> Option<SubscriptionTier> {
        match self {
            SubscriptionTier::Free => Some(SubscriptionTier::Starter),
            SubscriptionTier::Starter => Some(SubscriptionTier::Pro),
            SubscriptionTier::Pro => Some(SubscriptionTier::Vault),
            SubscriptionTier::Vault => None,
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for SubscriptionTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(SubscriptionTier::Free),
            "starter" => Ok(SubscriptionTier::Starter),
            "pro" => Ok(SubscriptionTier::Pro),
            "vault" => Ok(SubscriptionTier::Vault),
            other => Err(ValidationError::invalid_format(
                "tier",
                format!("unknown tier '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_free_tier_is_unpaid() {
        assert!(!SubscriptionTier::Free.is_paid());
        assert!(SubscriptionTier::Starter.is_paid());
        assert!(SubscriptionTier::Pro.is_paid());
        assert!(SubscriptionTier::Vault.is_paid());
    }

    #[test]
    fn ranks_increase_along_upgrade_path() {
        let mut tier = SubscriptionTier::Free;
        while let Some(next) = tier.upgrade_target() {
            assert!(next.rank() > tier.rank());
            tier = next;
        }
        assert_eq!(tier, SubscriptionTier::Vault);
    }

    #[test]
    fn tier_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionTier::Starter).unwrap();
        assert_eq!(json, "\"starter\"");
    }

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!(" Pro ".parse::<SubscriptionTier>(), Ok(SubscriptionTier::Pro));
        assert!("gold".parse::<SubscriptionTier>().is_err());
    }

    #[test]
    fn tier_deserializes_from_lowercase() {
        let tier: SubscriptionTier = serde_json::from_str("\"vault\"").unwrap();
        assert_eq!(tier, SubscriptionTier::Vault);
    }
}
