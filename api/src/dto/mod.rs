//! Request and response types of the HTTP API

pub mod otp;

pub use otp::{CheckTokenQuery, GetTokenQuery};
pub use otp_shared::types::{ErrorResponse, HealthResponse, TokenCheckResponse, TokenSentResponse};
