use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreditSimError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CreditSimError {
    fn from(e: serde_json::Error) -> Self {
        CreditSimError::SerializationError(e.to_string())
    }
}

impl CreditSimError {
    /// Shorthand for an out-of-range or malformed field.
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        CreditSimError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
