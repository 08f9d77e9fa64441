//! String key/value storage for values that outlive a run (the best score).
//!
//! [`JsonFileStore`] keeps every key in one JSON object under `~/.skyward/`,
//! loading it once and rewriting the whole file on each `set`.

use crate::constants::{STORAGE_DIR_NAME, STORAGE_FILE_NAME};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Minimal local-storage style interface.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Get the ~/.skyward/ directory path, creating it if needed.
pub fn storage_dir() -> io::Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine home directory",
        )
    })?;
    let dir = home_dir.join(STORAGE_DIR_NAME);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// In-process store, used by tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total `set` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// JSON object file store.
///
/// Values written by this store are strings. Keys holding other JSON values
/// are kept as they are and written back untouched.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the default store at `~/.skyward/storage.json`.
    pub fn open_default() -> io::Result<Self> {
        Ok(Self::open(storage_dir()?.join(STORAGE_FILE_NAME)))
    }

    /// Open a store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<Value>(&json) {
                Ok(Value::Object(entries)) => entries,
                Ok(_) => {
                    log::warn!("Ignoring store {}: not a JSON object", path.display());
                    Map::new()
                }
                Err(e) => {
                    log::warn!("Ignoring malformed store {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

impl KeyValueStore for JsonFileStore {
    /// Strings come back as stored, numbers in their JSON spelling.
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .insert(key.to_string(), Value::String(value.to_string()));
        self.flush()
    }
}
