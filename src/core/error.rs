use thiserror::Error;

/// Errors that can occur while normalizing an order or quote.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    /// The inbound payload is missing required fields. Carries the
    /// joined [`ValidationError`] messages.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl LedgerError {
    /// Collapse a non-empty list of validation errors into one
    /// `Validation` value, naming every failed field.
    pub fn from_validation_errors(errors: &[ValidationError]) -> Self {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Self::Validation(msg)
    }
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "customer.name").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for the common "field is required" case.
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "is required")
    }
}
