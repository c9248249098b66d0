//! Shared utilities and common types for the OTP SMS service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response structures
//! - Phone number utilities

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, RedirectConfig, ResponseMode, ServerConfig, SmsConfig, SmsProvider,
    StoreConfig,
};
pub use types::{ErrorResponse, HealthResponse, TokenCheckResponse, TokenSentResponse};
pub use utils::phone;
