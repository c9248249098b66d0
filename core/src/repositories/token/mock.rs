//! In-memory implementation of TokenStore for testing

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::domain::entities::token::{OsRngTokenGenerator, TokenRecord};
use crate::domain::entities::token_map::TokenMap;
use crate::errors::DomainError;

use super::r#trait::TokenStore;

/// Token store without persistence
pub struct InMemoryTokenStore {
    tokens: Mutex<TokenMap>,
    token_length: usize,
    ttl: Option<Duration>,
    fail_writes: AtomicBool,
}

impl InMemoryTokenStore {
    pub fn new(token_length: usize) -> Self {
        Self {
            tokens: Mutex::new(TokenMap::new()),
            token_length,
            ttl: None,
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Make every mutating call fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Put a record in directly, bypassing generation
    pub async fn seed(&self, record: TokenRecord) {
        self.tokens.lock().await.insert(record);
    }

    pub async fn contains(&self, token: &str) -> bool {
        self.tokens.lock().await.contains(token)
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::storage("simulated write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn issue(&self, destination_number: &str) -> Result<TokenRecord, DomainError> {
        self.check_writable()?;
        let mut tokens = self.tokens.lock().await;
        tokens.issue(
            destination_number,
            &OsRngTokenGenerator,
            self.token_length,
            Utc::now(),
        )
    }

    async fn verify(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        if !tokens.contains(token) {
            return Ok(false);
        }
        self.check_writable()?;
        Ok(tokens.consume(token, self.ttl, Utc::now()).is_valid())
    }

    async fn revoke(&self, token: &str) -> Result<bool, DomainError> {
        self.check_writable()?;
        Ok(self.tokens.lock().await.remove(token).is_some())
    }

    async fn purge_expired(&self, max_age: Duration) -> Result<usize, DomainError> {
        self.check_writable()?;
        Ok(self
            .tokens
            .lock()
            .await
            .purge_older_than(max_age, Utc::now())
            .len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.tokens.lock().await.len())
    }
}
