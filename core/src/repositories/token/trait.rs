//! Token store trait defining the interface for one-time token persistence.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::entities::token::TokenRecord;
use crate::errors::DomainError;

/// Store of issued one-time tokens
///
/// Implementations serialize every read-modify-write so concurrent requests
/// cannot lose each other's updates. A mutation is only reported as done
/// once it has been persisted.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Issue a new token for `destination_number`
    ///
    /// # Returns
    /// * `Ok(TokenRecord)` - The persisted record, with a token not previously live
    /// * `Err(DomainError::Storage)` - The store could not be persisted
    async fn issue(&self, destination_number: &str) -> Result<TokenRecord, DomainError>;

    /// Consume `token`
    ///
    /// # Returns
    /// * `Ok(true)` - Token was live; it is now deleted
    /// * `Ok(false)` - Token unknown, already used or expired
    /// * `Err(DomainError::Storage)` - The deletion could not be persisted
    async fn verify(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete `token` without it counting as a verification
    ///
    /// # Returns
    /// * `Ok(true)` if the token existed
    async fn revoke(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete every token older than `max_age`, returning how many were removed
    async fn purge_expired(&self, max_age: Duration) -> Result<usize, DomainError>;

    /// Number of live tokens
    async fn len(&self) -> Result<usize, DomainError>;
}
