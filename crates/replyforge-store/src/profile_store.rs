//! Typed access to the persisted records.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use replyforge_config::LoadedConfig;
use replyforge_protocols::error::{PipelineError, StoreError};
use replyforge_protocols::store::keys;
use replyforge_protocols::{
    DEFAULT_STYLE_LABEL, KeyValueStore, Preferences, StyleProfile, UsageStats, UserProfileBundle,
};

/// Reads and writes the credential, style profile, preferences and usage
/// statistics over any [`KeyValueStore`].
#[derive(Clone)]
pub struct ProfileStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(credential(self.store.get(keys::API_KEY).await?))
    }

    pub async fn user_profile(&self) -> Result<StyleProfile, StoreError> {
        self.read_record(keys::USER_PROFILE).await
    }

    pub async fn set_user_profile(&self, profile: &StyleProfile) -> Result<(), StoreError> {
        self.write_record(keys::USER_PROFILE, profile).await
    }

    pub async fn preferences(&self) -> Result<Preferences, StoreError> {
        self.read_record(keys::STYLE_PREFERENCES).await
    }

    pub async fn set_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        self.write_record(keys::STYLE_PREFERENCES, preferences).await
    }

    /// Everything one generation request needs.
    ///
    /// Missing profile and preferences fall back to their defaults; a
    /// missing credential is [`PipelineError::MissingCredential`].
    pub async fn load_bundle(&self) -> Result<UserProfileBundle, PipelineError> {
        let mut records = self
            .store
            .get_many(&[keys::API_KEY, keys::USER_PROFILE, keys::STYLE_PREFERENCES])
            .await?;

        let api_key =
            credential(records.remove(keys::API_KEY)).ok_or(PipelineError::MissingCredential)?;
        let profile = decode_record(keys::USER_PROFILE, records.remove(keys::USER_PROFILE));
        let preferences =
            decode_record(keys::STYLE_PREFERENCES, records.remove(keys::STYLE_PREFERENCES));

        Ok(UserProfileBundle {
            profile,
            preferences,
            api_key,
        })
    }

    /// Persist a freshly loaded configuration: the credential and a
    /// profile built from the bio. Replaces any analysed profile.
    pub async fn apply_loaded_config(&self, config: &LoadedConfig) -> Result<(), StoreError> {
        let profile = StyleProfile::new(config.bio.clone(), DEFAULT_STYLE_LABEL);
        self.store
            .set_many(vec![
                (keys::API_KEY.to_string(), json!(config.api_key)),
                (keys::USER_PROFILE.to_string(), serde_json::to_value(&profile)?),
            ])
            .await?;
        debug!("Credential and profile stored");
        Ok(())
    }

    /// Current usage statistics, refreshed against the wall clock.
    pub async fn usage_stats(&self) -> Result<UsageStats, StoreError> {
        self.usage_stats_at(now_ms()).await
    }

    /// Count one successful reply.
    pub async fn record_reply(&self) -> Result<UsageStats, StoreError> {
        self.record_reply_at(now_ms()).await
    }

    pub async fn usage_stats_at(&self, now_ms: i64) -> Result<UsageStats, StoreError> {
        let mut stats = match self.store.get(keys::USAGE_STATS).await? {
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Discarding unreadable usage statistics: {}", e);
                UsageStats::new(now_ms)
            }),
            None => UsageStats::new(now_ms),
        };

        if stats.refresh(now_ms) {
            debug!("Usage statistics hour rolled over");
            self.write_record(keys::USAGE_STATS, &stats).await?;
        }
        Ok(stats)
    }

    pub async fn record_reply_at(&self, now_ms: i64) -> Result<UsageStats, StoreError> {
        let mut stats = self.usage_stats_at(now_ms).await?;
        stats.record_reply(now_ms);
        self.write_record(keys::USAGE_STATS, &stats).await?;
        Ok(stats)
    }

    async fn read_record<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        Ok(decode_record(key, self.store.get(key).await?))
    }

    async fn write_record<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        self.store.set(key, serde_json::to_value(record)?).await
    }
}

/// A non-empty string credential.
fn credential(value: Option<Value>) -> Option<String> {
    value
        .and_then(|value| value.as_str().map(str::to_string))
        .filter(|key| !key.is_empty())
}

/// Decode a stored record; absent, null or unreadable records read as the
/// default.
fn decode_record<T>(key: &str, value: Option<Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        Some(Value::Null) | None => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Record {} is unreadable, using defaults: {}", key, e);
            T::default()
        }),
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
#[path = "profile_store_tests.rs"]
mod tests;
