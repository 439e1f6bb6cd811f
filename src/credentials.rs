use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientError;
use crate::models::KeyStatus;

/// Literal every syntactically valid API key starts with
pub const KEY_PREFIX: &str = "sk-";

pub fn is_valid_key_format(key: &str) -> bool {
    key.trim().starts_with(KEY_PREFIX)
}

/// Indicator for a key that is present in storage
pub fn status_for(stored: &str) -> KeyStatus {
    if stored.is_empty() {
        KeyStatus::Absent
    } else {
        KeyStatus::Saved
    }
}

/// Durable storage for the user's API key
pub trait CredentialStore: Send + Sync {
    /// Last saved key, or an empty string
    fn load(&self) -> String;

    /// Persist a key; empty keys are ignored
    fn save(&self, key: &str) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(rename = "openai_api_key", default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
}

/// JSON file holding one `openai_api_key` entry
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

    fn read(&self) -> StoredCredentials {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoredCredentials::default(),
            Err(e) => {
                tracing::warn!("Could not read credentials from {}: {}", self.path.display(), e);
                return StoredCredentials::default();
            }
        };
        serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed credentials file {}: {}", self.path.display(), e);
            StoredCredentials::default()
        })
    }

    /// Write through a temp file + rename so readers never see a partial file
    fn write(&self, creds: &StoredCredentials) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        let data =
            serde_json::to_string_pretty(creds).map_err(|e| ClientError::Storage(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, data).map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| ClientError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> String {
        self.read().api_key.unwrap_or_default()
    }

    fn save(&self, key: &str) -> Result<(), ClientError> {
        if key.is_empty() {
            return Ok(());
        }
        self.write(&StoredCredentials {
            api_key: Some(key.to_string()),
        })?;
        tracing::debug!("API key saved to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }
}

/// In-memory store for ephemeral sessions and tests
#[derive(Default)]
pub struct MemoryCredentialStore {
    key: Mutex<String>,
}

impl MemoryCredentialStore {
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(key.to_string()),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, String> {
        self.key.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> String {
        self.slot().clone()
    }

    fn save(&self, key: &str) -> Result<(), ClientError> {
        if !key.is_empty() {
            *self.slot() = key.to_string();
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        self.slot().clear();
        Ok(())
    }
}
