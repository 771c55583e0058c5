//! Cross-context message protocol.
//!
//! Messages cross the boundary between the page-side agent and the
//! privileged orchestrator as JSON values; neither side shares memory with
//! the other. Every request that names a known action receives exactly one
//! [`ResponseMessage`].

use serde::{Deserialize, Serialize};

use crate::types::{ConversationContext, StyleProfile, UserProfileBundle};

pub const ACTION_GENERATE_REPLY: &str = "generateReply";
pub const ACTION_RELOAD_CONFIG: &str = "reloadConfig";
pub const ACTION_ANALYZE_PROFILE: &str = "analyzeProfile";

/// Request sent to the privileged context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RequestMessage {
    GenerateReply {
        context: ConversationContext,
        #[serde(rename = "userProfile")]
        user_profile: UserProfileBundle,
    },
    ReloadConfig {},
    AnalyzeProfile {
        #[serde(default)]
        tweets: Vec<String>,
        #[serde(default)]
        bio: Option<String>,
    },
}

impl RequestMessage {
    pub fn action(&self) -> &'static str {
        match self {
            Self::GenerateReply { .. } => ACTION_GENERATE_REPLY,
            Self::ReloadConfig {} => ACTION_RELOAD_CONFIG,
            Self::AnalyzeProfile { .. } => ACTION_ANALYZE_PROFILE,
        }
    }

    /// Whether `action` names a request kind this protocol knows.
    pub fn is_known_action(action: &str) -> bool {
        matches!(
            action,
            ACTION_GENERATE_REPLY | ACTION_RELOAD_CONFIG | ACTION_ANALYZE_PROFILE
        )
    }
}

/// Response from the privileged context.
///
/// A flat record: `{reply}` or `{error}` for generation, `{success}` for
/// configuration reloads, `{success, profile}` for profile analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<StyleProfile>,
}

impl ResponseMessage {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            reply: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn success(success: bool) -> Self {
        Self {
            success: Some(success),
            ..Default::default()
        }
    }

    pub fn analyzed(profile: StyleProfile) -> Self {
        Self {
            success: Some(true),
            profile: Some(profile),
            ..Default::default()
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
