//! The opaque user identifier, persisted across runs behind an explicit
//! key-value port instead of ambient global state.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

pub const UID_KEY: &str = "user-uid";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Settings file in the user's config directory, one flat JSON object.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config_dir() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("daneo").join("settings.json")))
    }

    fn read_all(&self) -> io::Result<HashMap<String, String>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e),
        }
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, bytes)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Settings operations over the identifier: read, save, clear, generate.
pub struct UserIdentity<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserIdentity<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn current(&self) -> io::Result<Option<String>> {
        self.store.get(UID_KEY)
    }

    /// Saves a trimmed, non-empty identifier and returns it.
    pub fn save(&self, uid: &str) -> io::Result<String> {
        let trimmed = uid.trim();
        if trimmed.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "uid must not be empty",
            ));
        }
        self.store.set(UID_KEY, trimmed)?;
        Ok(trimmed.to_string())
    }

    pub fn clear(&self) -> io::Result<()> {
        self.store.remove(UID_KEY)
    }

    pub fn generate() -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
