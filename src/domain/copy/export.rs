//! Export renderers.
//!
//! Plain text for the full piece of copy, CSV for hook-only tools.

use serde::{Deserialize, Serialize};

use super::{CopySection, SectionMap};

/// Literal header row of the hook CSV.
pub const HOOK_CSV_HEADER: &str = "Hook,Category";

/// Kind of artifact produced by an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    PlainText,
    HookCsv,
}

impl ExportFormat {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::HookCsv => "csv",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::PlainText => "text/plain; charset=utf-8",
            ExportFormat::HookCsv => "text/csv; charset=utf-8",
        }
    }
}

/// A rendered export ready to hand to the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub content: String,
}

impl ExportArtifact {
    pub fn new(format: ExportFormat, stem: &str, content: String) -> Self {
        Self {
            format,
            file_name: format!("{}.{}", stem, format.file_extension()),
            content,
        }
    }
}

/// A single hook line as produced by the hook generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookIdea {
    pub text: String,
    pub category: String,
}

impl HookIdea {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }
}

/// All six sections in fixed order, each under its upper-cased name.
///
/// Absent sections render with an empty body so the layout is stable.
pub fn plain_text(content: &SectionMap) -> String {
    CopySection::ALL
        .iter()
        .map(|section| format!("{}:\n{}", section.heading(), content.get(*section)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Hook ideas as CSV with a header row.
pub fn hooks_csv(hooks: &[HookIdea]) -> String {
    let mut out = String::from(HOOK_CSV_HEADER);
    out.push('\n');
    for hook in hooks {
        out.push_str(&csv_field(&hook.text));
        out.push(',');
        out.push_str(&csv_field(&hook.category));
        out.push('\n');
    }
    out
}

// Quote when the field holds a delimiter, quote or line break; double inner quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_uses_fixed_order_and_headings() {
        let content = SectionMap::new()
            .with(CopySection::Cta, "Buy now")
            .with(CopySection::Hook, "Tired?")
            .with(CopySection::Problem, "p")
            .with(CopySection::Story, "s")
            .with(CopySection::Proof, "3 days")
            .with(CopySection::Offer, "o");

        assert_eq!(
            plain_text(&content),
            "HOOK:\nTired?\n\nPROBLEM:\np\n\nSTORY:\ns\n\nPROOF:\n3 days\n\nOFFER:\no\n\nCTA:\nBuy now"
        );
    }

    #[test]
    fn plain_text_keeps_headings_for_missing_sections() {
        let text = plain_text(&SectionMap::new());
        for section in CopySection::ALL {
            assert!(text.contains(&format!("{}:", section.heading())));
        }
    }

    #[test]
    fn hooks_csv_has_literal_header() {
        let csv = hooks_csv(&[]);
        assert_eq!(csv, "Hook,Category\n");
    }

    #[test]
    fn hooks_csv_quotes_awkward_fields() {
        let csv = hooks_csv(&[
            HookIdea::new("Plain hook", "curiosity"),
            HookIdea::new("Wait, \"what\"?", "shock"),
        ]);
        assert_eq!(
            csv,
            "Hook,Category\nPlain hook,curiosity\n\"Wait, \"\"what\"\"?\",shock\n"
        );
    }

    #[test]
    fn artifact_file_name_matches_format() {
        let artifact = ExportArtifact::new(ExportFormat::HookCsv, "hooks", String::new());
        assert_eq!(artifact.file_name, "hooks.csv");
        assert_eq!(artifact.format.mime_type(), "text/csv; charset=utf-8");
    }
}
