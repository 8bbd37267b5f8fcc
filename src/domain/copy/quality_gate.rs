//! Deterministic quality gate over generated copy.
//!
//! Rules run in a fixed order and the warning strings are part of the
//! contract with the UI, so they must not be reworded. A non-empty result
//! blocks the download but never copy-to-clipboard or preview.

use serde::{Deserialize, Serialize};

use super::{CopySection, SectionMap};

const STORY_KEYWORDS: [&str; 3] = ["transform", "change", "result"];
const CTA_KEYWORDS: [&str; 3] = ["now", "today", "limited"];

/// A single quality rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRule {
    HookUrgency,
    ProofAnchor,
    StoryContrast,
    CtaScarcity,
}

impl QualityRule {
    /// Evaluation order.
    pub const ALL: [QualityRule; 4] = [
        QualityRule::HookUrgency,
        QualityRule::ProofAnchor,
        QualityRule::StoryContrast,
        QualityRule::CtaScarcity,
    ];

    /// The section this rule inspects.
    pub fn section(&self) -> CopySection {
        match self {
            QualityRule::HookUrgency => CopySection::Hook,
            QualityRule::ProofAnchor => CopySection::Proof,
            QualityRule::StoryContrast => CopySection::Story,
            QualityRule::CtaScarcity => CopySection::Cta,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            QualityRule::HookUrgency => "Hook lacks urgency - missing question or exclamation.",
            QualityRule::ProofAnchor => "Numbers in proof lack anchor (e.g. timeframe or volume).",
            QualityRule::StoryContrast => "No emotional contrast in story.",
            QualityRule::CtaScarcity => "Missing scarcity in CTA.",
        }
    }

    pub fn passes(&self, content: &SectionMap) -> bool {
        let text = content.get(self.section());
        match self {
            QualityRule::HookUrgency => text.contains('?') || text.contains('!'),
            QualityRule::ProofAnchor => text.chars().any(|c| c.is_ascii_digit()),
            QualityRule::StoryContrast => contains_any_ignore_case(text, &STORY_KEYWORDS),
            QualityRule::CtaScarcity => contains_any_ignore_case(text, &CTA_KEYWORDS),
        }
    }
}

fn contains_any_ignore_case(text: &str, needles: &[&str]) -> bool {
    let lower = text.to_lowercase();
    needles.iter().any(|needle| lower.contains(needle))
}

/// Rules the content fails, in evaluation order.
pub fn failed_rules(content: &SectionMap) -> Vec<QualityRule> {
    QualityRule::ALL
        .into_iter()
        .filter(|rule| !rule.passes(content))
        .collect()
}

/// Warning strings for the content. Empty means the gate passes.
pub fn validate(content: &SectionMap) -> Vec<String> {
    failed_rules(content)
        .into_iter()
        .map(|rule| rule.message().to_string())
        .collect()
}
