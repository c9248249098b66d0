//! Expired token sweeper
//!
//! When tokens have a TTL, this service periodically purges those past it so
//! the store does not grow with tokens nobody will ever submit.

use chrono::Duration;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::TokenStore;

/// Service for removing expired tokens from a store
pub struct TokenSweeper<S: TokenStore + 'static> {
    store: Arc<S>,
    max_age: Duration,
    interval: std::time::Duration,
}

impl<S: TokenStore + 'static> TokenSweeper<S> {
    /// Create a new sweeper
    pub fn new(store: Arc<S>, max_age: Duration, interval: std::time::Duration) -> Self {
        Self {
            store,
            max_age,
            interval,
        }
    }

    /// Run a single sweep, returning how many tokens were removed
    pub async fn run_once(&self) -> Result<usize, DomainError> {
        let removed = self.store.purge_expired(self.max_age).await?;
        if removed > 0 {
            info!(removed = removed, event = "tokens_purged", "Purged expired tokens");
        }
        Ok(removed)
    }

    /// Start the sweeper as a background task
    ///
    /// This spawns a tokio task that sweeps at regular intervals until aborted.
    pub fn start_background_task(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Token sweeper started - will run every {} seconds",
                self.interval.as_secs()
            );

            let mut interval_timer = tokio::time::interval(self.interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_once().await {
                    error!("Token sweep failed: {}", e);
                }
            }
        })
    }
}
