//! Bounded council selection.
//!
//! Selecting past capacity is not an error: the toggle is ignored and the
//! selection is left as it was, the same way the UI greys out extra cards.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::CouncilMemberId;

/// Default number of seats on a council.
pub const DEFAULT_MAX_SELECTIONS: usize = 3;

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionChange {
    Added,
    Removed,
    Ignored(SelectionIgnored),
}

/// Why a toggle left the selection unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionIgnored {
    AtCapacity,
    UnknownMember,
}

/// Set of selected council members, at most `max_selections` large.
///
/// Keeps insertion order so the generation request lists members the way
/// the user picked them. Deserialization goes through the same checks as
/// `new` and `toggle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectionRecord")]
pub struct CouncilSelection {
    members: Vec<CouncilMemberId>,
    max_selections: usize,
}

/// Unchecked wire shape of a selection.
#[derive(Deserialize)]
struct SelectionRecord {
    members: Vec<CouncilMemberId>,
    max_selections: usize,
}

impl TryFrom<SelectionRecord> for CouncilSelection {
    type Error = ValidationError;

    fn try_from(record: SelectionRecord) -> Result<Self, Self::Error> {
        let mut selection = Self::new(record.max_selections)?;
        if record.members.len() > selection.max_selections {
            return Err(ValidationError::out_of_range(
                "members",
                0,
                selection.max_selections as i64,
                record.members.len() as i64,
            ));
        }
        for id in record.members {
            if selection.contains(&id) {
                return Err(ValidationError::invalid_format(
                    "members",
                    format!("duplicate member '{}'", id.as_str()),
                ));
            }
            selection.members.push(id);
        }
        Ok(selection)
    }
}

impl CouncilSelection {
    /// Creates an empty selection with room for `max_selections` members.
    pub fn new(max_selections: usize) -> Result<Self, ValidationError> {
        if max_selections == 0 {
            return Err(ValidationError::out_of_range(
                "max_selections",
                1,
                i64::MAX,
                0,
            ));
        }
        Ok(Self {
            members: Vec::new(),
            max_selections,
        })
    }

    /// Adds the member if absent and there is room, removes it if present.
    pub fn toggle(&mut self, id: CouncilMemberId) -> SelectionChange {
        if let Some(pos) = self.members.iter().position(|m| *m == id) {
            self.members.remove(pos);
            return SelectionChange::Removed;
        }
        if self.is_full() {
            return SelectionChange::Ignored(SelectionIgnored::AtCapacity);
        }
        self.members.push(id);
        SelectionChange::Added
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn contains(&self, id: &CouncilMemberId) -> bool {
        self.members.contains(id)
    }

    pub fn members(&self) -> &[CouncilMemberId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_selections
    }

    pub fn max_selections(&self) -> usize {
        self.max_selections
    }
}

impl Default for CouncilSelection {
    fn default() -> Self {
        Self {
            members: Vec::new(),
            max_selections: DEFAULT_MAX_SELECTIONS,
        }
    }
}
