//! Copy domain module.
//!
//! - `section` - The six fixed copy sections and the map holding their text
//! - `quality_gate` - Rule-based warnings that gate the download
//! - `export` - Plain text and hook CSV renderers

mod export;
pub mod quality_gate;
mod section;

pub use export::{
    hooks_csv, plain_text, ExportArtifact, ExportFormat, HookIdea, HOOK_CSV_HEADER,
};
pub use quality_gate::QualityRule;
pub use section::{CopySection, SectionMap};
