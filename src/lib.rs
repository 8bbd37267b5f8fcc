//! Council Copy - staged sales-copy generation.
//!
//! Walks a user from picking an advisory council, through the campaign
//! brief and an AI generation call, to a quality-gated export. Quotas are
//! enforced per subscription tier before each generation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
