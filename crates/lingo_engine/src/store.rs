//! Key-value persistence of the chat history.
//!
//! The whole message list is stored as one JSON array under a single key and
//! rewritten after every mutation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

/// Persisted form of one chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub text: String,
    #[serde(default)]
    pub detected_language: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default, rename = "showSummarize")]
    pub eligible_for_summary: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("stored messages are not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error("store lock poisoned")]
    Poisoned,
}

pub trait MessageStore: Send + Sync {
    /// Loads the stored list; an absent entry is an empty list.
    fn load(&self) -> Result<Vec<StoredMessage>, StoreError>;
    fn save(&self, messages: &[StoredMessage]) -> Result<(), StoreError>;
    /// Removes the entry entirely.
    fn clear(&self) -> Result<(), StoreError>;
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

fn decode(content: &str) -> Result<Vec<StoredMessage>, StoreError> {
    // A stored `null` is treated like a missing entry.
    let messages: Option<Vec<StoredMessage>> = serde_json::from_str(content)?;
    Ok(messages.unwrap_or_default())
}

/// Stores each key as `{dir}/{key}.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    writer: AtomicFileWriter,
    filename: String,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf, key: &str) -> Result<Self, StoreError> {
        validate_key(key)?;
        Ok(Self {
            writer: AtomicFileWriter::new(dir),
            filename: format!("{key}.json"),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(&self.filename)
    }
}

impl MessageStore for JsonFileStore {
    fn load(&self) -> Result<Vec<StoredMessage>, StoreError> {
        match self.writer.read(&self.filename)? {
            Some(content) => decode(&content),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, messages: &[StoredMessage]) -> Result<(), StoreError> {
        let content = serde_json::to_string(messages)?;
        self.writer.write(&self.filename, &content)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.writer.remove(&self.filename)?;
        Ok(())
    }
}

/// In-process store holding serialized entries, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    key: String,
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new(key: &str) -> Result<Self, StoreError> {
        validate_key(key)?;
        Ok(Self {
            key: key.to_string(),
            entries: Mutex::new(HashMap::new()),
        })
    }

    /// Raw serialized entry, if present.
    pub fn raw(&self) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(&self.key).cloned())
    }
}

impl MessageStore for MemoryStore {
    fn load(&self) -> Result<Vec<StoredMessage>, StoreError> {
        match self.raw() {
            Some(content) => decode(&content),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, messages: &[StoredMessage]) -> Result<(), StoreError> {
        let content = serde_json::to_string(messages)?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(self.key.clone(), content);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(&self.key);
        Ok(())
    }
}
