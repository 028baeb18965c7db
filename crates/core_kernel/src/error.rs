//! Errors raised by kernel value checks

use thiserror::Error;

/// A value failed a precondition before reaching any store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid value: {0}")]
    Validation(String),

    /// Ids and tree ids are never negative
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: i64 },
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    /// Name of the offending field, when the error concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            CoreError::Negative { field, .. } => Some(field),
            CoreError::Validation(_) => None,
        }
    }

    pub fn require_not_negative(field: &str, value: i64) -> Result<(), CoreError> {
        if value < 0 {
            return Err(CoreError::Negative {
                field: field.to_string(),
                value,
            });
        }
        Ok(())
    }
}
