//! Style profile and reply preferences.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bio assumed when the store holds no profile at all.
pub const DEFAULT_PROFILE_BIO: &str = "Professional communicator";

/// Style label written by the configuration loader and assumed by default.
pub const DEFAULT_STYLE_LABEL: &str = "balanced";

/// Persisted description of the user's voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleProfile {
    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub style: String,

    /// Mean character count of analysed posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_phrases: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

impl StyleProfile {
    pub fn new(bio: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            bio: bio.into(),
            style: style.into(),
            avg_length: None,
            common_phrases: None,
            tone: None,
        }
    }
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_BIO, DEFAULT_STYLE_LABEL)
    }
}

/// Reply tone. Unknown keys read as [`Tone::Balanced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tone {
    Agree,
    Witty,
    Inquisitive,
    #[default]
    Balanced,
}

impl Tone {
    pub const ALL: [Tone; 4] = [Tone::Agree, Tone::Witty, Tone::Inquisitive, Tone::Balanced];

    pub fn key(self) -> &'static str {
        match self {
            Tone::Agree => "agree",
            Tone::Witty => "witty",
            Tone::Inquisitive => "inquisitive",
            Tone::Balanced => "balanced",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "agree" => Tone::Agree,
            "witty" => Tone::Witty,
            "inquisitive" => Tone::Inquisitive,
            _ => Tone::Balanced,
        }
    }
}

impl From<String> for Tone {
    fn from(key: String) -> Self {
        Tone::from_key(&key)
    }
}

impl From<Tone> for String {
    fn from(tone: Tone) -> Self {
        tone.key().to_string()
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Target reply length. Unknown keys read as [`ReplyLength::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplyLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ReplyLength {
    pub const ALL: [ReplyLength; 3] = [ReplyLength::Short, ReplyLength::Medium, ReplyLength::Long];

    pub fn key(self) -> &'static str {
        match self {
            ReplyLength::Short => "short",
            ReplyLength::Medium => "medium",
            ReplyLength::Long => "long",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "short" => ReplyLength::Short,
            "long" => ReplyLength::Long,
            _ => ReplyLength::Medium,
        }
    }
}

impl From<String> for ReplyLength {
    fn from(key: String) -> Self {
        ReplyLength::from_key(&key)
    }
}

impl From<ReplyLength> for String {
    fn from(length: ReplyLength) -> Self {
        length.key().to_string()
    }
}

impl fmt::Display for ReplyLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// User-editable reply preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub length: ReplyLength,
}

impl Preferences {
    pub fn new(tone: Tone, length: ReplyLength) -> Self {
        Self { tone, length }
    }
}

/// Everything the orchestrator needs about the user for one request.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileBundle {
    pub profile: StyleProfile,
    pub preferences: Preferences,
    pub api_key: String,
}

impl fmt::Debug for UserProfileBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserProfileBundle")
            .field("profile", &self.profile)
            .field("preferences", &self.preferences)
            .field("api_key", &"<redacted>")
            .finish()
    }
}
