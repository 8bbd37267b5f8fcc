//! Guidance domain module.
//!
//! The four-step confirm/skip subflow that gates "Next Best Actions".

mod check;

pub use check::{CheckOutcome, GuidanceCheck, GuidanceCheckKind, GuidanceProgress, GuidanceStep};
