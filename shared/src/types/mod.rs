//! Common type definitions shared across the service

pub mod response;

pub use response::{ErrorResponse, HealthResponse, TokenCheckResponse, TokenSentResponse};
