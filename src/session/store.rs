//! Durable credential storage
//!
//! The file store is a small JSON key/value document, the counterpart of
//! browser local storage. The credential is kept under [`CREDENTIAL_KEY`];
//! other keys in the same file are preserved untouched.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::debug;

use super::Credential;
use crate::errors::{ClientError, Result};

/// Fixed storage key for the credential
pub const CREDENTIAL_KEY: &str = "token";

pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>>;
    fn save(&self, credential: &Credential) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// JSON-file backed store
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whole document; values under other keys may be any JSON.
    fn read_entries(&self) -> Result<Map<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                ClientError::storage(format!(
                    "corrupt session storage {}: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::storage(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        let entries = self.read_entries()?;
        // 非字符串的 token 视为未登录
        Ok(entries
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .and_then(Credential::new))
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        let mut entries = self.read_entries()?;
        entries.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(credential.expose().to_string()),
        );
        self.write_entries(&entries)?;
        debug!("Credential stored in {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(CREDENTIAL_KEY).is_some() {
            self.write_entries(&entries)?;
            debug!("Credential removed from {}", self.path.display());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

/// In-process store, nothing survives the process
#[derive(Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, credential: &Credential) -> Result<()> {
        *self.slot.lock() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
