//! # OTP Core
//!
//! Core business logic and domain layer for the OTP SMS service.
//! This crate contains the token entity, the issue/verify lifecycle,
//! the store and dispatcher interfaces, and the error taxonomy.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
