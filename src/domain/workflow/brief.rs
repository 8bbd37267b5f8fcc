//! Campaign brief collected before generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Fixed keys of the campaign brief form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BriefField {
    Niche,
    Tone,
    TargetAudience,
    PainPoint,
    DesiredOutcome,
    PricePoint,
}

impl BriefField {
    pub const ALL: [BriefField; 6] = [
        BriefField::Niche,
        BriefField::Tone,
        BriefField::TargetAudience,
        BriefField::PainPoint,
        BriefField::DesiredOutcome,
        BriefField::PricePoint,
    ];

    /// Fields that must be filled before generation.
    pub const REQUIRED: [BriefField; 4] = [
        BriefField::Niche,
        BriefField::Tone,
        BriefField::TargetAudience,
        BriefField::PainPoint,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BriefField::Niche => "niche",
            BriefField::Tone => "tone",
            BriefField::TargetAudience => "targetAudience",
            BriefField::PainPoint => "painPoint",
            BriefField::DesiredOutcome => "desiredOutcome",
            BriefField::PricePoint => "pricePoint",
        }
    }
}

impl fmt::Display for BriefField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BriefField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BriefField::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("field", format!("unknown field '{}'", s)))
    }
}

/// Campaign parameters typed in by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignBrief {
    pub niche: String,
    pub tone: String,
    pub target_audience: String,
    pub pain_point: String,
    pub desired_outcome: String,
    pub price_point: String,
    /// Free-form business model hint. Not one of the form fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    /// Notes on competitors. Not one of the form fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competitor_analysis: Option<String>,
}

impl CampaignBrief {
    pub fn get(&self, field: BriefField) -> &str {
        match field {
            BriefField::Niche => &self.niche,
            BriefField::Tone => &self.tone,
            BriefField::TargetAudience => &self.target_audience,
            BriefField::PainPoint => &self.pain_point,
            BriefField::DesiredOutcome => &self.desired_outcome,
            BriefField::PricePoint => &self.price_point,
        }
    }

    pub fn set(&mut self, field: BriefField, value: impl Into<String>) {
        let value = value.into();
        match field {
            BriefField::Niche => self.niche = value,
            BriefField::Tone => self.tone = value,
            BriefField::TargetAudience => self.target_audience = value,
            BriefField::PainPoint => self.pain_point = value,
            BriefField::DesiredOutcome => self.desired_outcome = value,
            BriefField::PricePoint => self.price_point = value,
        }
    }

    /// Required fields that are blank, in form order.
    pub fn missing_required(&self) -> Vec<BriefField> {
        BriefField::REQUIRED
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    pub fn is_ready(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Value of an optional field, `None` when blank.
    pub fn optional(&self, field: BriefField) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn set_business_model(&mut self, model: Option<String>) {
        self.business_model = non_blank(model);
    }

    pub fn set_competitor_analysis(&mut self, notes: Option<String>) {
        self.competitor_analysis = non_blank(notes);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
