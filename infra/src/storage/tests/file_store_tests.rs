//! Unit tests for the JSON file token store

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, Utc};
use otp_core::domain::entities::{TokenGenerator, TokenMap, TokenRecord};
use otp_core::errors::DomainError;
use otp_core::repositories::TokenStore;
use otp_shared::config::StoreConfig;
use tempfile::TempDir;

use crate::storage::FileTokenStore;
use crate::InfrastructureError;

/// Hands out a fixed sequence of tokens, repeating the last one
struct SequenceGenerator {
    tokens: Vec<&'static str>,
    next: AtomicUsize,
}

impl SequenceGenerator {
    fn new(tokens: Vec<&'static str>) -> Self {
        Self {
            tokens,
            next: AtomicUsize::new(0),
        }
    }
}

impl TokenGenerator for SequenceGenerator {
    fn generate(&self, _length: usize) -> String {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.tokens[index.min(self.tokens.len() - 1)].to_string()
    }
}

/// Config for a store file that may not exist yet
fn store_config(dir: &TempDir) -> StoreConfig {
    StoreConfig {
        path: dir.path().join("tokens.json").to_string_lossy().into_owned(),
        create_if_missing: true,
        ..Default::default()
    }
}

fn read_snapshot(path: &Path) -> TokenMap {
    let content = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn write_raw(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_open_creates_missing_file() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);

    let store = FileTokenStore::open(&config).await.unwrap();

    assert!(store.path().exists());
    assert!(read_snapshot(store.path()).is_empty());
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_open_missing_file_fails_by_default() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("tokens.json").to_string_lossy().into_owned(),
        ..Default::default()
    };

    let result = FileTokenStore::open(&config).await;

    assert!(matches!(result, Err(InfrastructureError::Storage(_))));
    assert!(!Path::new(&config.path).exists());
}

#[tokio::test]
async fn test_open_existing_file_by_default() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        path: dir.path().join("tokens.json").to_string_lossy().into_owned(),
        ..Default::default()
    };
    write_raw(Path::new(&config.path), "{}");

    let store = FileTokenStore::open(&config).await.unwrap();
    assert_eq!(store.len().await.unwrap(), 0);
}

#[tokio::test]
async fn test_open_corrupt_file_fails_and_leaves_it_untouched() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    write_raw(Path::new(&config.path), "{ not json");

    let result = FileTokenStore::open(&config).await;

    assert!(matches!(result, Err(InfrastructureError::Storage(_))));
    assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "{ not json");
}

#[tokio::test]
async fn test_open_rejects_mismatched_keys() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    write_raw(
        Path::new(&config.path),
        r#"{"AAAA0001": {"dest_number": "+15551234567", "last_updated": "2024-01-01T00:00:00Z", "token": "BBBB0002"}}"#,
    );

    let result = FileTokenStore::open(&config).await;
    assert!(matches!(result, Err(InfrastructureError::Storage(_))));
}

#[tokio::test]
async fn test_issue_persists_record_layout() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();

    let record = store.issue("+15551234567").await.unwrap();

    assert_eq!(record.token.len(), 8);
    assert!(record
        .token
        .chars()
        .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    let entry = &raw[&record.token];
    assert_eq!(entry["dest_number"], "+15551234567");
    assert_eq!(entry["token"], record.token.as_str());
    assert!(entry["last_updated"].is_string());
}

#[tokio::test]
async fn test_verify_is_single_use() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();
    let record = store.issue("+15551234567").await.unwrap();

    assert!(store.verify(&record.token).await.unwrap());
    assert!(!read_snapshot(store.path()).contains(&record.token));
    assert!(!store.verify(&record.token).await.unwrap());
}

#[tokio::test]
async fn test_verify_unknown_token_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();
    store.issue("+15551234567").await.unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    assert!(!store.verify("00000000").await.unwrap());

    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_tokens_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);

    let record = {
        let store = FileTokenStore::open(&config).await.unwrap();
        store.issue("+442071234567").await.unwrap()
    };

    let reopened = FileTokenStore::open(&config).await.unwrap();
    assert_eq!(reopened.len().await.unwrap(), 1);
    assert!(reopened.verify(&record.token).await.unwrap());
}

#[tokio::test]
async fn test_write_failure_rolls_back_and_leaves_no_partial_file() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    // A directory in the way of the temporary file makes every write fail
    let blocker = dir.path().join("tokens.json.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let result = store.issue("+15551234567").await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(store.len().await.unwrap(), 0);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    assert!(blocker.is_dir());
}

#[tokio::test]
async fn test_verify_write_failure_keeps_token() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();
    let record = store.issue("+15551234567").await.unwrap();

    let blocker = dir.path().join("tokens.json.tmp");
    std::fs::create_dir(&blocker).unwrap();
    assert!(matches!(
        store.verify(&record.token).await,
        Err(DomainError::Storage { .. })
    ));

    std::fs::remove_dir(&blocker).unwrap();
    assert!(store.verify(&record.token).await.unwrap());
}

#[tokio::test]
async fn test_collision_draws_again() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir))
        .await
        .unwrap()
        .with_generator(Box::new(SequenceGenerator::new(vec![
            "AAAAAAAA", "AAAAAAAA", "BBBBBBBB",
        ])));

    let first = store.issue("+15551234567").await.unwrap();
    let second = store.issue("+15557654321").await.unwrap();

    assert_eq!(first.token, "AAAAAAAA");
    assert_eq!(second.token, "BBBBBBBB");
    assert_eq!(read_snapshot(store.path()).len(), 2);
}

#[tokio::test]
async fn test_exhausted_generator_is_storage_error() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir))
        .await
        .unwrap()
        .with_generator(Box::new(SequenceGenerator::new(vec!["AAAAAAAA"])));

    store.issue("+15551234567").await.unwrap();
    let result = store.issue("+15551234567").await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(store.len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_revoke() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::open(&store_config(&dir)).await.unwrap();
    let record = store.issue("+15551234567").await.unwrap();

    assert!(store.revoke(&record.token).await.unwrap());
    assert!(!store.revoke(&record.token).await.unwrap());
    assert!(read_snapshot(store.path()).is_empty());
    assert!(!store.verify(&record.token).await.unwrap());
}

#[tokio::test]
async fn test_concurrent_issues_are_all_persisted() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let store = Arc::new(FileTokenStore::open(&config).await.unwrap());

    let handles: Vec<_> = (0..25)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.issue(&format!("+1555000{:04}", i)).await })
        })
        .collect();

    let mut issued = Vec::new();
    for handle in handles {
        issued.push(handle.await.unwrap().unwrap().token);
    }

    let snapshot = read_snapshot(Path::new(&config.path));
    assert_eq!(snapshot.len(), 25);
    assert!(issued.iter().all(|token| snapshot.contains(token)));
}

fn seed_file(config: &StoreConfig, records: &[TokenRecord]) {
    let mut tokens = TokenMap::new();
    for record in records {
        tokens.insert(record.clone());
    }
    write_raw(
        Path::new(&config.path),
        &serde_json::to_string(&tokens).unwrap(),
    );
}

#[tokio::test]
async fn test_expired_token_verifies_false_and_is_removed() {
    let dir = TempDir::new().unwrap();
    let config = StoreConfig {
        token_ttl_secs: Some(60),
        ..store_config(&dir)
    };
    let old = TokenRecord::new(
        "AAAA0001".into(),
        "+15551234567".into(),
        Utc::now() - Duration::hours(1),
    );
    seed_file(&config, &[old]);

    let store = FileTokenStore::open(&config).await.unwrap();

    assert!(!store.verify("AAAA0001").await.unwrap());
    assert!(read_snapshot(store.path()).is_empty());
}

#[tokio::test]
async fn test_purge_expired() {
    let dir = TempDir::new().unwrap();
    let config = store_config(&dir);
    let now = Utc::now();
    seed_file(
        &config,
        &[
            TokenRecord::new("AAAA0001".into(), "+15551234567".into(), now - Duration::hours(2)),
            TokenRecord::new("AAAA0002".into(), "+15551234567".into(), now),
        ],
    );

    let store = FileTokenStore::open(&config).await.unwrap();

    assert_eq!(store.purge_expired(Duration::minutes(10)).await.unwrap(), 1);
    assert_eq!(store.purge_expired(Duration::minutes(10)).await.unwrap(), 0);

    let snapshot = read_snapshot(store.path());
    assert!(!snapshot.contains("AAAA0001"));
    assert!(snapshot.contains("AAAA0002"));
}
