//! Durable storage for the access token.
//!
//! The token survives restarts in a small JSON key-value file (the same shape a browser's
//! local storage would have), under the fixed key [`ACCESS_KEY`]. A file that does not parse
//! is treated as empty and replaced on the next save.

use crate::model::AccessToken;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

pub const ACCESS_KEY: &str = "access";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage is not a JSON object: {0}")]
    Format(String),

    #[error("Token storage lock poisoned")]
    Poisoned,
}

pub trait TokenStore: Send + Sync {
    /// The stored token, `None` when nothing was saved.
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError>;
    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError>;
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// JSON file store. Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Map<String, Value>, TokenStoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(Value::Object(entries)) => Ok(entries),
            Ok(other) => Err(TokenStoreError::Format(format!("found {other}"))),
            Err(e) => Err(TokenStoreError::Format(e.to_string())),
        }
    }

    /// Like `read`, but an unreadable file counts as empty.
    fn entries(&self) -> Result<Map<String, Value>, TokenStoreError> {
        match self.read() {
            Err(TokenStoreError::Format(reason)) => {
                warn!(path = %self.path.display(), %reason, "Ignoring malformed token storage");
                Ok(Map::new())
            }
            other => other,
        }
    }

    /// Sibling file the new contents are written to before replacing the store.
    fn staging_path(&self) -> PathBuf {
        let mut staging = OsString::from(self.path.as_os_str());
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| TokenStoreError::Format(e.to_string()))?;
        // The store is replaced in one step; a crash leaves either the old or the new file.
        let staging = self.staging_path();
        std::fs::write(&staging, json)?;
        std::fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        let entries = self.entries()?;
        let token = entries
            .get(ACCESS_KEY)
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(AccessToken::new);
        debug!(path = %self.path.display(), found = token.is_some(), "Loaded token");
        Ok(token)
    }

    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        let mut entries = self.entries()?;
        entries.insert(ACCESS_KEY.to_string(), Value::from(token.expose()));
        self.write(&entries)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut entries = self.entries()?;
        if entries.remove(ACCESS_KEY).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<AccessToken>, TokenStoreError> {
        let slot = self.slot.lock().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(slot.as_deref().map(AccessToken::new))
    }

    fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.lock().map_err(|_| TokenStoreError::Poisoned)?;
        *slot = Some(token.expose().to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slot = self.slot.lock().map_err(|_| TokenStoreError::Poisoned)?;
        *slot = None;
        Ok(())
    }
}
