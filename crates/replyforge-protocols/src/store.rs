//! Flat persisted key-value store protocol.
//!
//! Records are read and written whole; there is no field-level locking and
//! no transaction across keys.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;

/// Keys of the persisted records.
pub mod keys {
    pub const API_KEY: &str = "groqApiKey";
    pub const USER_PROFILE: &str = "userProfile";
    pub const STYLE_PREFERENCES: &str = "stylePreferences";
    pub const USAGE_STATS: &str = "usageStats";
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Read several keys; absent keys are omitted from the result.
    async fn get_many(&self, keys: &[&str]) -> Result<HashMap<String, Value>, StoreError> {
        let mut found = HashMap::new();
        for key in keys {
            if let Some(value) = self.get(key).await? {
                found.insert((*key).to_string(), value);
            }
        }
        Ok(found)
    }

    async fn set_many(&self, entries: Vec<(String, Value)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(&key, value).await?;
        }
        Ok(())
    }
}
