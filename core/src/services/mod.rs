//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod otp;

// Re-export commonly used types
pub use cleanup::TokenSweeper;
pub use otp::{DeliveryStatus, IssueOutcome, OtpService, OtpServiceConfig, SmsDispatcherTrait};
