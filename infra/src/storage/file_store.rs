//! JSON file backed token store
//!
//! The file is read once when the store is opened. From then on the in-memory
//! map is authoritative and every mutation is followed, under the same lock,
//! by a full snapshot write: the JSON goes to a sibling `.tmp` file which is
//! renamed over the target. A mutation whose snapshot cannot be written is
//! undone in memory and reported as a storage error.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use otp_core::domain::entities::{
    OsRngTokenGenerator, TokenGenerator, TokenLookup, TokenMap, TokenRecord,
};
use otp_core::errors::DomainError;
use otp_core::repositories::TokenStore;
use otp_shared::config::StoreConfig;
use otp_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Token store persisted as a single JSON object keyed by token
pub struct FileTokenStore {
    path: PathBuf,
    tokens: Mutex<TokenMap>,
    generator: Box<dyn TokenGenerator>,
    token_length: usize,
    ttl: Option<Duration>,
}

impl FileTokenStore {
    /// Open the store described by `config`
    ///
    /// # Errors
    /// * `InfrastructureError::Storage` - the file is malformed, unreadable,
    ///   or missing while `create_if_missing` is off
    /// * `InfrastructureError::Config` - the TTL is out of range
    pub async fn open(config: &StoreConfig) -> Result<Self, InfrastructureError> {
        let path = PathBuf::from(&config.path);
        let ttl = config.token_ttl_secs.map(ttl_from_secs).transpose()?;
        let tokens = load_snapshot(&path, config.create_if_missing).await?;

        info!(
            path = %path.display(),
            tokens = tokens.len(),
            event = "token_store_opened",
            "Token store opened"
        );

        Ok(Self {
            path,
            tokens: Mutex::new(tokens),
            generator: Box::new(OsRngTokenGenerator),
            token_length: config.token_length(),
            ttl,
        })
    }

    /// Replace the token generator
    pub fn with_generator(mut self, generator: Box<dyn TokenGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum token age, if tokens expire
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn token_length(&self) -> usize {
        self.token_length
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn issue(&self, destination_number: &str) -> Result<TokenRecord, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let record = tokens.issue(
            destination_number,
            self.generator.as_ref(),
            self.token_length,
            Utc::now(),
        )?;

        if let Err(e) = write_snapshot(&self.path, &tokens).await {
            tokens.remove(&record.token);
            error!(error = %e, event = "token_store_write_failed", "Failed to persist issued token");
            return Err(e.into());
        }

        debug!(
            phone = %mask_phone_number(destination_number),
            tokens = tokens.len(),
            event = "token_stored",
            "Token persisted"
        );
        Ok(record)
    }

    async fn verify(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let lookup = tokens.consume(token, self.ttl, Utc::now());

        if lookup.mutated() {
            if let Err(e) = write_snapshot(&self.path, &tokens).await {
                if let TokenLookup::Consumed(record) | TokenLookup::Expired(record) = lookup {
                    tokens.insert(record);
                }
                error!(error = %e, event = "token_store_write_failed", "Failed to persist consumed token");
                return Err(e.into());
            }
        }

        if let TokenLookup::Expired(record) = &lookup {
            info!(
                phone = %mask_phone_number(&record.destination_number),
                event = "token_expired",
                "Expired token submitted"
            );
        }

        Ok(lookup.is_valid())
    }

    async fn revoke(&self, token: &str) -> Result<bool, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let Some(record) = tokens.remove(token) else {
            return Ok(false);
        };

        if let Err(e) = write_snapshot(&self.path, &tokens).await {
            tokens.insert(record);
            error!(error = %e, event = "token_store_write_failed", "Failed to persist revocation");
            return Err(e.into());
        }

        Ok(true)
    }

    async fn purge_expired(&self, max_age: Duration) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.lock().await;
        let removed = tokens.purge_older_than(max_age, Utc::now());
        if removed.is_empty() {
            return Ok(0);
        }

        if let Err(e) = write_snapshot(&self.path, &tokens).await {
            for record in removed {
                tokens.insert(record);
            }
            error!(error = %e, event = "token_store_write_failed", "Failed to persist purge");
            return Err(e.into());
        }

        Ok(removed.len())
    }

    async fn len(&self) -> Result<usize, DomainError> {
        Ok(self.tokens.lock().await.len())
    }
}

fn ttl_from_secs(secs: u64) -> Result<Duration, InfrastructureError> {
    Duration::from_std(std::time::Duration::from_secs(secs))
        .map_err(|_| InfrastructureError::Config(format!("store.token_ttl_secs {} is out of range", secs)))
}

/// Read the snapshot at `path`
async fn load_snapshot(path: &Path, create_if_missing: bool) -> Result<TokenMap, InfrastructureError> {
    match fs::read_to_string(path).await {
        Ok(content) => {
            let tokens: TokenMap = serde_json::from_str(&content).map_err(|e| {
                InfrastructureError::Storage(format!(
                    "token store {} is malformed: {}",
                    path.display(),
                    e
                ))
            })?;
            tokens.check_consistency().map_err(|reason| {
                InfrastructureError::Storage(format!(
                    "token store {} is inconsistent: {}",
                    path.display(),
                    reason
                ))
            })?;
            Ok(tokens)
        }
        Err(e) if e.kind() == ErrorKind::NotFound && create_if_missing => {
            warn!(
                path = %path.display(),
                event = "token_store_created",
                "Token store file not found, starting empty"
            );
            let tokens = TokenMap::new();
            write_snapshot(path, &tokens).await?;
            Ok(tokens)
        }
        Err(e) => Err(InfrastructureError::Storage(format!(
            "cannot read token store {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Atomically replace the file at `path` with the JSON encoding of `tokens`
async fn write_snapshot(path: &Path, tokens: &TokenMap) -> Result<(), InfrastructureError> {
    let contents = serde_json::to_vec_pretty(tokens)?;
    let temp_path = temp_path_for(path);

    let result = async {
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(&contents).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, path).await
    }
    .await;

    if let Err(e) = result {
        // Best effort; the target file is untouched either way
        let _ = fs::remove_file(&temp_path).await;
        return Err(InfrastructureError::Storage(format!(
            "cannot write token store {}: {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
