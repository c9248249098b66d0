//! Mock SMS Service Implementation
//!
//! A mock implementation of the SMS dispatcher for development and testing.
//! This implementation logs SMS messages instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use otp_core::errors::DomainError;
use otp_core::services::SmsDispatcherTrait;
use otp_shared::utils::phone::{is_valid_international_phone, mask_phone_number};

use crate::InfrastructureError;

/// What the mock reports for every message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MockOutcome {
    /// The message is accepted, like a `queued` status
    #[default]
    Queued,
    /// The provider answers but does not queue the message
    Rejected,
    /// The call fails as a transport error would
    Fail,
}

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages to console
/// - Validates phone numbers
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockSmsService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Answer given to every message
    outcome: MockOutcome,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockSmsService {
    /// Create a new mock SMS service
    pub fn new() -> Self {
        Self::with_options(true, MockOutcome::Queued)
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, outcome: MockOutcome) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outcome,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Log one message and answer with the configured outcome
    pub async fn send_sms(
        &self,
        destination_number: &str,
        origin_identity: &str,
        message: &str,
    ) -> Result<bool, InfrastructureError> {
        let masked_phone = mask_phone_number(destination_number);

        if !is_valid_international_phone(destination_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.outcome == MockOutcome::Fail {
            warn!(phone = %masked_phone, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", masked_phone);
            println!("From: {}", origin_identity);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        let queued = self.outcome == MockOutcome::Queued;
        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_length = message.len(),
            queued = queued,
            "SMS handled (mock)"
        );

        Ok(queued)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsDispatcherTrait for MockSmsService {
    async fn send(
        &self,
        destination_number: &str,
        origin_identity: &str,
        message: &str,
    ) -> Result<bool, DomainError> {
        self.send_sms(destination_number, origin_identity, message)
            .await
            .map_err(DomainError::from)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
