//! Domain-specific error types and error handling.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed request input
    #[error("Bad request: {field} {reason}")]
    BadRequest { field: String, reason: String },

    /// Token store could not be read, parsed or written
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// SMS provider call failed or answered with something unparseable
    #[error("Dispatch error: {message}")]
    Dispatch { message: String },

    /// Invalid or incomplete configuration
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl DomainError {
    /// Shorthand for a missing required input
    pub fn missing(field: impl Into<String>) -> Self {
        DomainError::BadRequest {
            field: field.into(),
            reason: "is required".to_string(),
        }
    }

    /// Shorthand for a malformed input
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::BadRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        DomainError::Storage {
            message: message.into(),
        }
    }

    pub fn dispatch(message: impl Into<String>) -> Self {
        DomainError::Dispatch {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::BadRequest { .. } => "bad_request",
            DomainError::Storage { .. } => "storage_error",
            DomainError::Dispatch { .. } => "dispatch_error",
            DomainError::Config { .. } => "config_error",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
