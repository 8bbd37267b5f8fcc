//! Application layer - Orchestration over the domain and ports.
//!
//! - `GenerationEngine` - Single-flight calls to the copy generator
//! - `WorkflowController` - Drives one session from Welcome to Export

mod generation_engine;
mod workflow_controller;

pub use generation_engine::{GenerationEngine, GenerationError};
pub use workflow_controller::{WorkflowController, WorkflowError};
