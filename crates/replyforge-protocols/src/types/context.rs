//! Conversational context captured from the host page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source text used when no post could be read.
pub const DEFAULT_SOURCE_TEXT: &str = "a tweet";

/// Author label used when no identity block could be read.
pub const DEFAULT_AUTHOR: &str = "someone";

/// Context of the post being replied to.
///
/// Built fresh for every pipeline run and never persisted. The wire names
/// are the ones the message protocol uses. On input only `tweetText` and
/// `author` are required: a missing `threadContext` mirrors `tweetText` and
/// a missing `timestamp` is the time of decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireContext")]
pub struct ConversationContext {
    /// Visible body text of the post.
    #[serde(rename = "tweetText")]
    pub source_text: String,

    /// Best-effort display name of the post's author.
    #[serde(rename = "author")]
    pub author_label: String,

    /// Surrounding thread. Mirrors `source_text` for single-post context.
    #[serde(rename = "threadContext")]
    pub thread_text: String,

    #[serde(rename = "timestamp")]
    pub captured_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct WireContext {
    #[serde(rename = "tweetText")]
    source_text: String,
    #[serde(rename = "author")]
    author_label: String,
    #[serde(rename = "threadContext", default)]
    thread_text: Option<String>,
    #[serde(rename = "timestamp", default)]
    captured_at: Option<DateTime<Utc>>,
}

impl From<WireContext> for ConversationContext {
    fn from(wire: WireContext) -> Self {
        Self {
            thread_text: wire.thread_text.unwrap_or_else(|| wire.source_text.clone()),
            source_text: wire.source_text,
            author_label: wire.author_label,
            captured_at: wire.captured_at.unwrap_or_else(Utc::now),
        }
    }
}

impl ConversationContext {
    /// Single-post context; the thread text mirrors the source text.
    pub fn new(source_text: impl Into<String>, author_label: impl Into<String>) -> Self {
        let source_text = source_text.into();
        Self {
            thread_text: source_text.clone(),
            source_text,
            author_label: author_label.into(),
            captured_at: Utc::now(),
        }
    }

    /// Safe defaults used whenever extraction cannot read the page.
    pub fn fallback() -> Self {
        Self::new(DEFAULT_SOURCE_TEXT, DEFAULT_AUTHOR)
    }

    pub fn with_thread_text(mut self, thread_text: impl Into<String>) -> Self {
        self.thread_text = thread_text.into();
        self
    }
}
