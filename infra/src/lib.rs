//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer of the OTP SMS service. It
//! provides the concrete implementations behind the seams declared in
//! `otp_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Storage**: `FileTokenStore`, an in-memory token map snapshotted to a JSON file
//! - **SMS**: the Telnyx messaging client and a mock dispatcher
//! - **Config**: layered configuration loading (file, environment, `.env`)

// Re-export core types for convenience
pub use otp_core::errors::*;

/// Configuration loading
pub mod settings;

/// Token persistence
pub mod storage;

/// SMS service module - External SMS providers
pub mod sms;

pub use settings::{load_config, load_config_from};
pub use sms::{create_sms_service, MockOutcome, MockSmsService, TelnyxConfig, TelnyxSmsService};
pub use storage::FileTokenStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// JSON encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Token store error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(err: config::ConfigError) -> Self {
        InfrastructureError::Config(err.to_string())
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Serialization(_)
            | InfrastructureError::Storage(_) => DomainError::Storage {
                message: err.to_string(),
            },
            InfrastructureError::Http(_) | InfrastructureError::Sms(_) => DomainError::Dispatch {
                message: err.to_string(),
            },
            InfrastructureError::Config(message) => DomainError::Config { message },
        }
    }
}
