//! Traits for SMS provider integration

use async_trait::async_trait;

use crate::errors::DomainError;

/// Trait for SMS dispatch integration
#[async_trait]
pub trait SmsDispatcherTrait: Send + Sync {
    /// Send `message` to `destination_number`
    ///
    /// `origin_identity` is used as the alphanumeric sender for destinations
    /// outside the North American numbering plan.
    ///
    /// # Returns
    /// * `Ok(true)` - The provider queued the message
    /// * `Ok(false)` - The provider answered with any other status
    /// * `Err(DomainError::Dispatch)` - Transport failure or unreadable answer
    async fn send(
        &self,
        destination_number: &str,
        origin_identity: &str,
        message: &str,
    ) -> Result<bool, DomainError>;

    /// Name of the provider, for logs
    fn provider_name(&self) -> &str;
}
