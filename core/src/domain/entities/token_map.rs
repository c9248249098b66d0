//! In-memory token table shared by every store implementation.
//!
//! `TokenMap` holds the mutation rules (issue, consume, revoke, purge); the
//! stores wrap it in a lock and decide how the result is persisted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::token::{TokenGenerator, TokenRecord};
use crate::errors::{DomainError, DomainResult};

/// Draws per issue before giving up on finding an unused token
pub const MAX_GENERATION_ATTEMPTS: usize = 16;

/// Outcome of looking a token up for consumption
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    /// Token existed and was removed
    Consumed(TokenRecord),
    /// Token existed but was past its TTL; it was removed
    Expired(TokenRecord),
    /// Token was never issued or already consumed
    Missing,
}

impl TokenLookup {
    /// Only a consumed token counts as valid
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenLookup::Consumed(_))
    }

    /// Whether the lookup changed the map
    pub fn mutated(&self) -> bool {
        !matches!(self, TokenLookup::Missing)
    }
}

/// Token string to record mapping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenMap {
    records: BTreeMap<String, TokenRecord>,
}

impl TokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.records.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<&TokenRecord> {
        self.records.get(token)
    }

    /// Put a record back, keyed by its token
    pub fn insert(&mut self, record: TokenRecord) -> Option<TokenRecord> {
        self.records.insert(record.token.clone(), record)
    }

    /// Issue a fresh token for `destination_number`
    ///
    /// Draws from `generator` until a token not already present comes up.
    pub fn issue(
        &mut self,
        destination_number: &str,
        generator: &dyn TokenGenerator,
        length: usize,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenRecord> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let token = generator.generate(length);
            if self.records.contains_key(&token) {
                tracing::warn!(
                    attempt = attempt,
                    event = "token_collision",
                    "Generated token already in use, drawing again"
                );
                continue;
            }

            let record = TokenRecord::new(token, destination_number.to_string(), now);
            self.records.insert(record.token.clone(), record.clone());
            return Ok(record);
        }

        Err(DomainError::Storage {
            message: format!(
                "could not draw an unused token after {} attempts",
                MAX_GENERATION_ATTEMPTS
            ),
        })
    }

    /// Remove `token` if present, reporting whether it was still within `ttl`
    pub fn consume(
        &mut self,
        token: &str,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> TokenLookup {
        match self.records.remove(token) {
            None => TokenLookup::Missing,
            Some(record) => match ttl {
                Some(max_age) if record.is_older_than(max_age, now) => TokenLookup::Expired(record),
                _ => TokenLookup::Consumed(record),
            },
        }
    }

    pub fn remove(&mut self, token: &str) -> Option<TokenRecord> {
        self.records.remove(token)
    }

    /// Remove every record older than `max_age`, returning the removed records
    pub fn purge_older_than(&mut self, max_age: Duration, now: DateTime<Utc>) -> Vec<TokenRecord> {
        let expired: Vec<String> = self
            .records
            .values()
            .filter(|record| record.is_older_than(max_age, now))
            .map(|record| record.token.clone())
            .collect();

        expired
            .iter()
            .filter_map(|token| self.records.remove(token))
            .collect()
    }

    /// Check that every key matches the token stored in its record
    pub fn check_consistency(&self) -> Result<(), String> {
        match self.records.iter().find(|(key, record)| **key != record.token) {
            Some((key, _)) => Err(format!("record under key {} carries a different token", key)),
            None => Ok(()),
        }
    }
}
