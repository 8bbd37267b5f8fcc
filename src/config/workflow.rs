//! Workflow session configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Settings applied to every new session
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Council seats available to the user
    #[serde(default = "default_max_council_selections")]
    pub max_council_selections: usize,
}

impl WorkflowConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_council_selections == 0 {
            return Err(ValidationError::InvalidMaxSelections);
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_council_selections: default_max_council_selections(),
        }
    }
}

fn default_max_council_selections() -> usize {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_defaults() {
        assert_eq!(WorkflowConfig::default().max_council_selections, 3);
    }

    #[test]
    fn test_zero_selections_rejected() {
        let config = WorkflowConfig {
            max_council_selections: 0,
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxSelections));
    }
}
