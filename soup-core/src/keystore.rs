//! API credential persistence.
//!
//! A single bearer token survives across runs. The store is injected as a
//! capability so the orchestrator and tests never touch the filesystem
//! directly.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::fs;

/// Errors from credential store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Read/write access to the single stored API key.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Read the stored key, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    /// Persist the key, replacing any previous value.
    async fn save(&self, api_key: &str) -> Result<(), StoreError>;
}

/// Current key file version.
const KEY_FILE_VERSION: u32 = 1;

/// On-disk representation of the stored credential.
#[derive(Debug, Serialize, Deserialize)]
struct KeyFile {
    version: u32,
    api_key: String,
}

/// Key store backed by a single JSON file.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl KeyStore for FileKeyStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: KeyFile = serde_json::from_str(&content)?;
        if file.version != KEY_FILE_VERSION {
            return Err(StoreError::VersionMismatch {
                expected: KEY_FILE_VERSION,
                found: file.version,
            });
        }

        if file.api_key.is_empty() {
            return Ok(None);
        }
        Ok(Some(file.api_key))
    }

    async fn save(&self, api_key: &str) -> Result<(), StoreError> {
        let file = KeyFile {
            version: KEY_FILE_VERSION,
            api_key: api_key.to_string(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// In-process key store for tests and unsaved state.
#[derive(Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a key.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            key: Mutex::new(Some(api_key.into())),
        }
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.key.lock().expect("key store lock poisoned").clone())
    }

    async fn save(&self, api_key: &str) -> Result<(), StoreError> {
        *self.key.lock().expect("key store lock poisoned") = Some(api_key.to_string());
        Ok(())
    }
}
