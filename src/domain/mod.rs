//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, state machine trait, errors)
//! - `membership` - Subscription tiers and quota evaluation
//! - `council` - Persona catalog and bounded council selection
//! - `copy` - Copy sections, the quality gate and export rendering
//! - `guidance` - The confirm/skip check subflow
//! - `workflow` - The session aggregate and its step machine

pub mod copy;
pub mod council;
pub mod foundation;
pub mod guidance;
pub mod membership;
pub mod workflow;
