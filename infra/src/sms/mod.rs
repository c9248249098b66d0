//! SMS Service Module
//!
//! This module provides the SMS dispatchers used to deliver one-time tokens.
//!
//! ## Features
//!
//! - **Telnyx Support**: Production SMS via the Telnyx messaging API
//! - **Mock Implementation**: Console output for development
//! - **Security**: Phone number masking in logs

use std::sync::Arc;

use otp_core::services::SmsDispatcherTrait;
use otp_shared::config::{SmsConfig, SmsProvider};

pub mod mock_sms;
pub mod telnyx;

// Re-export commonly used types
pub use mock_sms::{MockOutcome, MockSmsService};
pub use telnyx::{TelnyxConfig, TelnyxSmsService};

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// Returns the SMS dispatcher for the provider named in the configuration.
/// A misconfigured provider is an error; there is no silent fallback to the
/// mock.
pub fn create_sms_service(
    config: &SmsConfig,
) -> Result<Arc<dyn SmsDispatcherTrait>, InfrastructureError> {
    match config.provider {
        SmsProvider::Mock => {
            tracing::warn!("Using mock SMS service; no message will be delivered");
            Ok(Arc::new(MockSmsService::new()))
        }
        SmsProvider::Telnyx => {
            let service = TelnyxSmsService::new(TelnyxConfig::from_sms_config(config))?;
            Ok(Arc::new(service))
        }
    }
}
