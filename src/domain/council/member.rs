//! Council member catalog entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Identifier of an advisory persona.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CouncilMemberId(String);

impl CouncilMemberId {
    /// Creates a new id, returning error if blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("council_member_id"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouncilMemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An advisory persona the user can seat on their council.
///
/// Immutable once constructed; expertise tags are never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouncilMember {
    id: CouncilMemberId,
    name: String,
    title: String,
    expertise_tags: Vec<String>,
    sample_line: String,
}

impl CouncilMember {
    pub fn new(
        id: CouncilMemberId,
        name: impl Into<String>,
        title: impl Into<String>,
        expertise_tags: Vec<String>,
        sample_line: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if expertise_tags.iter().all(|tag| tag.trim().is_empty()) {
            return Err(ValidationError::empty_field("expertise_tags"));
        }
        Ok(Self {
            id,
            name,
            title: title.into(),
            expertise_tags,
            sample_line: sample_line.into(),
        })
    }

    pub fn id(&self) -> &CouncilMemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn expertise_tags(&self) -> &[String] {
        &self.expertise_tags
    }

    pub fn sample_line(&self) -> &str {
        &self.sample_line
    }

    /// Returns true if any expertise tag matches, ignoring case.
    pub fn has_expertise(&self, tag: &str) -> bool {
        self.expertise_tags
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}
