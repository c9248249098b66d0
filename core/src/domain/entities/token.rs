//! One-time token entity and token generation.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use otp_shared::config::store::MAX_TOKEN_BYTES;

/// Default number of random bytes per token (8 hex characters)
pub const DEFAULT_TOKEN_BYTES: usize = 4;

/// A token issued to a destination number
///
/// The serialized field names match the snapshot file layout:
/// `{ "dest_number": ..., "last_updated": ..., "token": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    /// Phone number the token was sent to (E.164)
    #[serde(rename = "dest_number")]
    pub destination_number: String,

    /// When the token was issued
    #[serde(rename = "last_updated")]
    pub issued_at: DateTime<Utc>,

    /// The token itself, uppercase hexadecimal
    pub token: String,
}

impl TokenRecord {
    /// Creates a record issued at `issued_at`
    pub fn new(token: String, destination_number: String, issued_at: DateTime<Utc>) -> Self {
        Self {
            destination_number,
            issued_at,
            token,
        }
    }

    /// Age of the record at `now`
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// Whether the record is older than `max_age` at `now`
    pub fn is_older_than(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        self.age_at(now) > max_age
    }
}

/// Source of token strings
///
/// The production implementation draws from the OS CSPRNG; tests plug in
/// deterministic sequences to exercise collisions.
pub trait TokenGenerator: Send + Sync {
    /// Produce an uppercase hexadecimal string of exactly `length` characters
    fn generate(&self, length: usize) -> String;
}

/// Token generator backed by the operating system's CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngTokenGenerator;

impl TokenGenerator for OsRngTokenGenerator {
    fn generate(&self, length: usize) -> String {
        let mut bytes = vec![0u8; length.div_ceil(2)];
        OsRng.fill_bytes(&mut bytes);

        let mut token = hex::encode_upper(bytes);
        token.truncate(length);
        token
    }
}

/// Check that `token` has `length` characters, all uppercase hex digits
pub fn is_valid_token_format(token: &str, length: usize) -> bool {
    token.len() == length && is_upper_hex(token)
}

/// Whether `token` could have been issued under any allowed token length
///
/// Does not depend on the current length setting, so tokens issued before
/// `store.token_bytes` changed can still be checked.
pub fn is_issuable_token(token: &str) -> bool {
    !token.is_empty() && token.len() <= MAX_TOKEN_BYTES * 2 && is_upper_hex(token)
}

fn is_upper_hex(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
}
