//! Token store configuration module

use serde::{Deserialize, Serialize};

/// Upper bound on random bytes per token
pub const MAX_TOKEN_BYTES: usize = 32;

/// Token store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the JSON snapshot file
    pub path: String,

    /// Create an empty store when the snapshot file does not exist.
    /// Off by default: a missing file is reported instead of masking data loss.
    pub create_if_missing: bool,

    /// Random bytes per token; the token has twice as many hex characters
    pub token_bytes: usize,

    /// Maximum token age in seconds (unset = tokens never expire)
    pub token_ttl_secs: Option<u64>,

    /// How often expired tokens are swept, when a TTL is set
    pub sweep_interval_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: String::from("demo-tokens.json"),
            create_if_missing: false,
            token_bytes: 4,
            token_ttl_secs: None,
            sweep_interval_secs: 60,
        }
    }
}

impl StoreConfig {
    /// Number of hex characters in an issued token
    pub fn token_length(&self) -> usize {
        self.token_bytes * 2
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.token_bytes == 0 || self.token_bytes > MAX_TOKEN_BYTES {
            return Err(format!(
                "store.token_bytes must be between 1 and {}",
                MAX_TOKEN_BYTES
            ));
        }
        if self.path.trim().is_empty() {
            return Err("store.path must not be empty".to_string());
        }
        if self.token_ttl_secs.is_some() && self.sweep_interval_secs == 0 {
            return Err("store.sweep_interval_secs must be positive".to_string());
        }
        Ok(())
    }
}
