//! Usage tracking adapters.

mod in_memory_usage_tracker;

pub use in_memory_usage_tracker::{InMemoryUsageTracker, DEFAULT_RESET_WINDOW_DAYS};
