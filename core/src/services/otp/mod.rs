//! One-time token service
//!
//! This module provides the token lifecycle:
//! - Token issuance and SMS dispatch
//! - Single-use verification
//! - Rollback of tokens whose SMS was not accepted

mod config;
mod service;
mod traits;
mod types;


pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::SmsDispatcherTrait;
pub use types::{DeliveryStatus, IssueOutcome};
