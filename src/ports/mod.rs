//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CopyGenerator` - The copy-generation collaborator
//! - `UsageTracker` - The account service's generation counter

mod copy_generator;
mod usage_tracker;

pub use copy_generator::{CopyGenerator, CopyGeneratorError, GenerationRequest};
pub use usage_tracker::{UsageTracker, UsageTrackerError};
