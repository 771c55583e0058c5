//! Request handling on the privileged side.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, error, info, warn};

use replyforge_config::{ConfigLoader, LoadedConfig};
use replyforge_protocols::{
    CompletionBackend, ConversationContext, RequestMessage, ResponseMessage, UserProfileBundle,
};
use replyforge_store::{ProfileStore, analyze_profile};

use crate::error::SetupError;
use crate::prompt::build_chat_request;
use crate::toxicity::{REFUSAL_MESSAGE, ToxicityGate, Verdict};

/// Sent when a handler fails without producing a response of its own.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error while handling the request";

/// Handles requests from the page-side agent.
pub struct Orchestrator {
    backend: Arc<dyn CompletionBackend>,
    gate: ToxicityGate,
    config: Arc<ConfigLoader>,
    profiles: ProfileStore,
}

impl Orchestrator {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        gate: ToxicityGate,
        config: Arc<ConfigLoader>,
        profiles: ProfileStore,
    ) -> Self {
        Self {
            backend,
            gate,
            config,
            profiles,
        }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    /// Load the local configuration and persist it.
    ///
    /// Called once at startup. On failure generation stays unavailable
    /// until a successful reload.
    pub async fn initialize(&self) -> Result<LoadedConfig, SetupError> {
        let loaded = self.config.load().await?;
        self.profiles.apply_loaded_config(&loaded).await?;
        info!("Generation enabled");
        Ok(loaded)
    }

    async fn reload(&self) -> Result<LoadedConfig, SetupError> {
        let loaded = self.config.reload().await?;
        self.profiles.apply_loaded_config(&loaded).await?;
        Ok(loaded)
    }

    /// Handle one decoded request.
    pub async fn handle(&self, request: RequestMessage) -> ResponseMessage {
        debug!("Handling {}", request.action());
        match request {
            RequestMessage::GenerateReply {
                context,
                user_profile,
            } => self.generate_reply(&context, &user_profile).await,
            RequestMessage::ReloadConfig {} => match self.reload().await {
                Ok(_) => {
                    info!("Configuration reloaded");
                    ResponseMessage::success(true)
                }
                Err(e) => {
                    error!("Configuration reload failed: {}", e);
                    ResponseMessage::success(false)
                }
            },
            RequestMessage::AnalyzeProfile { tweets, bio } => {
                let profile = analyze_profile(&tweets, bio.as_deref());
                match self.profiles.set_user_profile(&profile).await {
                    Ok(()) => {
                        info!(posts = tweets.len(), tone = ?profile.tone, "Profile analysed");
                        ResponseMessage::analyzed(profile)
                    }
                    Err(e) => {
                        error!("Failed to store analysed profile: {}", e);
                        ResponseMessage::error(e.to_string())
                    }
                }
            }
        }
    }

    async fn generate_reply(
        &self,
        context: &ConversationContext,
        bundle: &UserProfileBundle,
    ) -> ResponseMessage {
        let request = build_chat_request(context, &bundle.profile, &bundle.preferences);

        match self.backend.complete(request, &bundle.api_key).await {
            Ok(reply) => match self.gate.classify(&reply) {
                Verdict::Allowed => {
                    debug!("Reply generated ({} chars)", reply.chars().count());
                    ResponseMessage::reply(reply)
                }
                Verdict::Blocked => {
                    warn!("Generated reply blocked by toxicity gate");
                    ResponseMessage::error(REFUSAL_MESSAGE)
                }
            },
            Err(e) => {
                error!(backend = self.backend.id(), "Generation failed: {}", e);
                ResponseMessage::error(e.to_string())
            }
        }
    }

    /// Handle one raw message.
    ///
    /// Returns `None` for an unknown action: such messages get no response.
    pub async fn dispatch(&self, payload: Value) -> Option<Value> {
        let action = payload
            .get("action")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if !RequestMessage::is_known_action(action) {
            warn!("Ignoring message with unknown action {:?}", action);
            return None;
        }

        let response = match serde_json::from_value::<RequestMessage>(payload) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!("Malformed request: {}", e);
                ResponseMessage::error(format!("Malformed request: {}", e))
            }
        };

        Some(
            serde_json::to_value(&response)
                .unwrap_or_else(|_| json!({ "error": INTERNAL_ERROR_MESSAGE })),
        )
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
