//! Settings schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub limits: LimitSettings,

    #[serde(default)]
    pub observer: ObserverSettings,

    #[serde(default)]
    pub notifications: NotificationSettings,

    #[serde(default)]
    pub paths: PathSettings,
}

/// Remote chat-completion endpoint and sampling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            top_p: default_top_p(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "llama-3.1-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    150
}

fn default_top_p() -> f32 {
    0.9
}

/// Page-side generation quota.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitSettings {
    #[serde(default = "default_max_replies_per_hour")]
    pub max_replies_per_hour: u32,

    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_replies_per_hour: default_max_replies_per_hour(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_max_replies_per_hour() -> u32 {
    20
}

fn default_window_secs() -> u64 {
    3600
}

/// Trigger detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObserverSettings {
    /// Delay before looking for the compose surface after a trigger.
    #[serde(default = "default_surface_delay_ms")]
    pub surface_delay_ms: u64,

    #[serde(default = "default_max_ancestor_depth")]
    pub max_ancestor_depth: usize,
}

impl Default for ObserverSettings {
    fn default() -> Self {
        Self {
            surface_delay_ms: default_surface_delay_ms(),
            max_ancestor_depth: default_max_ancestor_depth(),
        }
    }
}

fn default_surface_delay_ms() -> u64 {
    500
}

fn default_max_ancestor_depth() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_dismiss_ms")]
    pub dismiss_ms: u64,

    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            dismiss_ms: default_dismiss_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}

fn default_dismiss_ms() -> u64 {
    4000
}

fn default_fade_ms() -> u64 {
    300
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Directory holding the credential and bio files.
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    /// JSON file backing the key-value store.
    #[serde(default = "default_store_file")]
    pub store_file: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            store_file: default_store_file(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_store_file() -> PathBuf {
    PathBuf::from("~/.replyforge/store.json")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
