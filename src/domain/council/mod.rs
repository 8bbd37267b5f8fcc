//! Council domain module.
//!
//! The persona catalog and the bounded set of personas a user seats on
//! their council before generating copy.

mod catalog;
mod member;
mod selection;

pub use catalog::CouncilCatalog;
pub use member::{CouncilMember, CouncilMemberId};
pub use selection::{CouncilSelection, SelectionChange, SelectionIgnored, DEFAULT_MAX_SELECTIONS};
