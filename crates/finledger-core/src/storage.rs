//! Key-value persistence substrate for the ledger
//!
//! The ledger occupies one named slot holding the JSON-serialized full
//! collection. The slot abstraction keeps the store testable without
//! touching the filesystem.

use crate::error::{CoreError, CoreResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

/// Named key-value slot storage
pub trait StateStore: Send + Sync {
    /// Read the payload stored under a slot, if any
    fn read(&self, slot: &str) -> CoreResult<Option<String>>;

    /// Replace the payload stored under a slot
    fn write(&self, slot: &str, payload: &str) -> CoreResult<()>;
}

/// File-backed store: one JSON object file mapping slot names to payloads
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_map(&self) -> CoreResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(CoreError::Serialization {
                message: format!("State file {} is not a JSON object", self.path.display()),
            }),
        }
    }
}

impl StateStore for FileStore {
    fn read(&self, slot: &str) -> CoreResult<Option<String>> {
        let map = self.read_map()?;
        match map.get(slot) {
            Some(Value::String(payload)) => Ok(Some(payload.clone())),
            Some(_) => Err(CoreError::Serialization {
                message: format!("Slot '{}' does not hold a string payload", slot),
            }),
            None => Ok(None),
        }
    }

    fn write(&self, slot: &str, payload: &str) -> CoreResult<()> {
        // Preserve other slots; a corrupt file is replaced wholesale
        let mut map = self.read_map().unwrap_or_default();
        map.insert(slot.to_string(), Value::String(payload.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let serialized = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw payload
    pub fn with_slot(slot: &str, payload: &str) -> Self {
        let store = Self::new();
        store
            .slots
            .write()
            .expect("lock poisoned")
            .insert(slot.to_string(), payload.to_string());
        store
    }
}

impl StateStore for MemoryStore {
    fn read(&self, slot: &str) -> CoreResult<Option<String>> {
        Ok(self
            .slots
            .read()
            .map_err(|_| CoreError::Storage {
                message: "Lock poisoned".to_string(),
            })?
            .get(slot)
            .cloned())
    }

    fn write(&self, slot: &str, payload: &str) -> CoreResult<()> {
        self.slots
            .write()
            .map_err(|_| CoreError::Storage {
                message: "Lock poisoned".to_string(),
            })?
            .insert(slot.to_string(), payload.to_string());
        Ok(())
    }
}
