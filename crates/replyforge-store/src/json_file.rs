//! JSON-file-backed key-value store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use replyforge_protocols::KeyValueStore;
use replyforge_protocols::error::StoreError;

/// Stores every record in one JSON object on disk.
///
/// The whole file is loaded into memory on open and rewritten on every
/// `set`. A write that fails leaves both the file and the in-memory view
/// unchanged.
pub struct JsonFileStore {
    path: PathBuf,
    cache: RwLock<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating parent directories as needed.
    /// A missing file is an empty store.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).await?;
                info!("Created store directory: {:?}", parent);
            }
        }

        let cache = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            Self::parse(&content)?
        } else {
            Map::new()
        };

        debug!("Opened store {:?} with {} records", path, cache.len());
        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(content: &str) -> Result<Map<String, Value>, StoreError> {
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => Ok(map),
            other => Err(StoreError::Corrupt(format!(
                "expected an object, found {}",
                type_name(&other)
            ))),
        }
    }

    /// Sibling of the store file that each save is staged in.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `records` to a staging file and rename it over the store file,
    /// so the store file always holds a complete snapshot.
    async fn persist(&self, records: &Map<String, Value>) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(records)?;
        let staging = self.staging_path();

        if let Err(e) = fs::write(&staging, content).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }

        debug!("Saved store to {:?}", self.path);
        Ok(())
    }

    /// Apply `entries` to a copy of the records, persist it, and only then
    /// make it visible to readers.
    async fn commit(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        let mut cache = self.cache.write().await;
        let mut updated = cache.clone();
        for (key, value) in entries {
            updated.insert(key, value);
        }
        self.persist(&updated).await?;
        *cache = updated;
        Ok(())
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.commit(vec![(key.to_string(), value)]).await
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        self.commit(entries).await
    }
}

#[cfg(test)]
#[path = "json_file_tests.rs"]
mod tests;
