//! Workflow domain module.
//!
//! The session aggregate that walks a user from council selection through
//! generation, review and export.
//!
//! - `step` - WorkflowStep ordering
//! - `brief` - Campaign brief form fields
//! - `session` - WorkflowSession aggregate and its guards
//! - `transition` - Navigation outcomes
//! - `events` - Domain events recorded by the session

mod brief;
mod errors;
mod events;
mod session;
mod step;
mod transition;

pub use brief::{BriefField, CampaignBrief};
pub use errors::SessionError;
pub use events::WorkflowEvent;
pub use session::{HardExport, WorkflowSession};
pub use step::WorkflowStep;
pub use transition::{Transition, TransitionBlocked};
