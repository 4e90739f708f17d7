// Flow error taxonomy
// Every stage fails fast and surfaces the first error; callers branch on kind.

use std::fmt;

/// A single field that broke a validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    /// Dotted path to the field, e.g. "budgetItems[2].category"
    pub field: String,
    /// The rule that was broken, e.g. "must be a non-empty string"
    pub rule: String,
}

/// Input or model output failed its schema.
/// Carries every violated field, not just the first one found.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Shorthand for a single-field failure.
    pub fn single(field: &str, rule: &str) -> Self {
        Self {
            violations: vec![FieldViolation {
                field: field.to_string(),
                rule: rule.to_string(),
            }],
        }
    }

    /// Whether the given field path appears among the violations.
    pub fn names_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed:")?;
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, " {} {}", v.field, v.rule)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Collector used while walking a value, so one pass reports every problem.
#[derive(Debug, Default)]
pub struct Violations {
    items: Vec<FieldViolation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, rule: impl Into<String>) {
        self.items.push(FieldViolation {
            field: field.into(),
            rule: rule.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.items))
        }
    }
}

/// Error type for flow invocations.
#[derive(Debug)]
pub enum FlowError {
    /// Input or model output failed schema validation
    Validation(ValidationError),
    /// Network or provider unavailability; caller may retry with backoff
    Transport(String),
    /// Model refused or produced content that cannot satisfy the contract
    Generation(String),
    /// Missing or invalid credentials
    Configuration(String),
}

impl FlowError {
    /// Stable kind label used in logs and error mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowError::Validation(_) => "validation",
            FlowError::Transport(_) => "transport",
            FlowError::Generation(_) => "generation",
            FlowError::Configuration(_) => "configuration",
        }
    }
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Validation(e) => write!(f, "{}", e),
            FlowError::Transport(msg) => write!(f, "transport error: {}", msg),
            FlowError::Generation(msg) => write!(f, "generation error: {}", msg),
            FlowError::Configuration(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for FlowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FlowError::Validation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for FlowError {
    fn from(e: ValidationError) -> Self {
        FlowError::Validation(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_field() {
        let mut v = Violations::new();
        v.push("financialSituation", "must be a non-empty string");
        v.push("goals", "must be a non-empty string");
        let err = v.into_result().unwrap_err();
        assert_eq!(err.violations.len(), 2);
        assert!(err.names_field("financialSituation"));
        assert!(err.names_field("goals"));
    }

    #[test]
    fn test_empty_collector_is_ok() {
        assert!(Violations::new().into_result().is_ok());
    }

    #[test]
    fn test_flow_error_kind_labels() {
        let err = FlowError::from(ValidationError::single("text", "is required"));
        assert_eq!(err.kind(), "validation");
        assert_eq!(FlowError::Transport("timeout".into()).kind(), "transport");
    }
}
