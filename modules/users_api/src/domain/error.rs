use chrono::NaiveDate;
use thiserror::Error;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User with id {id} not found")]
    UserNotFound { id: i64 },

    #[error("The new value of '{field}' must not be blank")]
    BlankValueNotAllowed { field: &'static str },

    #[error("User must be at least {minimum_age} years old")]
    AgeBelowMinimum { minimum_age: u32 },

    #[error("The 'start' date {start} must not be after the 'end' date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Input data is not valid: {}", summarize(.violations))]
    InvalidInput { violations: Vec<FieldViolation> },

    #[error("Database error: {message}")]
    Database { message: String },
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn user_not_found(id: i64) -> Self {
        Self::UserNotFound { id }
    }

    pub fn blank_value(field: &'static str) -> Self {
        Self::BlankValueNotAllowed { field }
    }

    pub fn age_below_minimum(minimum_age: u32) -> Self {
        Self::AgeBelowMinimum { minimum_age }
    }

    pub fn invalid_range(start: NaiveDate, end: NaiveDate) -> Self {
        Self::InvalidRange { start, end }
    }

    pub fn invalid_input(violations: Vec<FieldViolation>) -> Self {
        Self::InvalidInput { violations }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// True for deterministic input failures the caller can fix.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::BlankValueNotAllowed { .. }
                | Self::AgeBelowMinimum { .. }
                | Self::InvalidRange { .. }
                | Self::InvalidInput { .. }
        )
    }
}
