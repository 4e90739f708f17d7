// Advisor flow contracts - free-text analysis and saving plan suggestions

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, Violations};

/// Input for free-text analysis ("Bachat Pal" assistant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUserTextInput {
    /// The user's message
    pub text: String,
}

impl AnalyzeUserTextInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::single("text", "must be a non-empty string"));
        }
        Ok(())
    }
}

/// Output of free-text analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeUserTextOutput {
    pub analysis: String,
}

/// Input for saving plan suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSavingPlanSuggestionsInput {
    /// Description of the user's current financial situation
    pub financial_situation: String,
    /// Description of the user's saving goals
    pub goals: String,
}

impl GenerateSavingPlanSuggestionsInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut out = Violations::new();
        if self.financial_situation.trim().is_empty() {
            out.push("financialSituation", "must be a non-empty string");
        }
        if self.goals.trim().is_empty() {
            out.push("goals", "must be a non-empty string");
        }
        out.into_result()
    }
}

/// Output of saving plan suggestions, in model order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSavingPlanSuggestionsOutput {
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_rejected() {
        let input = AnalyzeUserTextInput {
            text: "   ".to_string(),
        };
        let err = input.validate().unwrap_err();
        assert!(err.names_field("text"));
    }

    #[test]
    fn test_empty_situation_and_goals_both_reported() {
        let input = GenerateSavingPlanSuggestionsInput {
            financial_situation: "".to_string(),
            goals: "".to_string(),
        };
        let err = input.validate().unwrap_err();
        assert!(err.names_field("financialSituation"));
        assert!(err.names_field("goals"));
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn test_valid_plan_input_passes() {
        let input = GenerateSavingPlanSuggestionsInput {
            financial_situation: "Earning 80,000 PKR per month, renting".to_string(),
            goals: "Save for a motorbike within a year".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
