//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `generation` - Copy generation (HTTP, mock)
//! - `usage` - Usage tracking (in-memory)

pub mod generation;
pub mod usage;

pub use generation::{HttpCopyGenerator, HttpCopyGeneratorConfig, MockCopyGenerator};
pub use usage::InMemoryUsageTracker;
