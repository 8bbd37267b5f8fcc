//! Generated copy sections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the six fixed sections of a piece of sales copy.
///
/// Declaration order is the export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopySection {
    Hook,
    Problem,
    Story,
    Proof,
    Offer,
    Cta,
}

impl CopySection {
    pub const ALL: [CopySection; 6] = [
        CopySection::Hook,
        CopySection::Problem,
        CopySection::Story,
        CopySection::Proof,
        CopySection::Offer,
        CopySection::Cta,
    ];

    /// Wire key of the section.
    pub fn as_str(&self) -> &'static str {
        match self {
            CopySection::Hook => "hook",
            CopySection::Problem => "problem",
            CopySection::Story => "story",
            CopySection::Proof => "proof",
            CopySection::Offer => "offer",
            CopySection::Cta => "cta",
        }
    }

    /// Upper-cased name used as the export heading.
    pub fn heading(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for CopySection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopySection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopySection::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ValidationError::invalid_format("section", format!("unknown section '{}'", s))
            })
    }
}

/// Generated text keyed by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(BTreeMap<CopySection, String>);

impl SectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, section: CopySection, text: impl Into<String>) -> Self {
        self.set(section, text);
        self
    }

    pub fn set(&mut self, section: CopySection, text: impl Into<String>) {
        self.0.insert(section, text.into());
    }

    /// Text of a section, or `""` when absent.
    pub fn get(&self, section: CopySection) -> &str {
        self.0.get(&section).map(String::as_str).unwrap_or("")
    }

    /// Sections that are absent or blank, in export order.
    pub fn missing(&self) -> Vec<CopySection> {
        CopySection::ALL
            .into_iter()
            .filter(|s| self.get(*s).trim().is_empty())
            .collect()
    }

    /// True when all six sections carry text.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Sections present, in export order.
    pub fn iter(&self) -> impl Iterator<Item = (CopySection, &str)> {
        self.0.iter().map(|(s, t)| (*s, t.as_str()))
    }
}
