//! Request client for the privileged context.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use replyforge_protocols::{
    ConversationContext, MessageChannel, PipelineError, RequestMessage, ResponseMessage,
    StyleProfile, UserProfileBundle,
};

/// Sends one request per call and interprets its single response.
///
/// Transport failures, an explicit `error` field and a response without the
/// expected field (or with an empty reply) all come back as a
/// [`PipelineError`]. No retries.
#[derive(Clone)]
pub struct ReplyRequestClient {
    channel: Arc<dyn MessageChannel>,
}

impl ReplyRequestClient {
    pub fn new(channel: Arc<dyn MessageChannel>) -> Self {
        Self { channel }
    }

    pub async fn generate(
        &self,
        context: ConversationContext,
        user_profile: UserProfileBundle,
    ) -> Result<String, PipelineError> {
        let response = self
            .send(RequestMessage::GenerateReply {
                context,
                user_profile,
            })
            .await?;
        response
            .reply
            .filter(|reply| !reply.trim().is_empty())
            .ok_or(PipelineError::MalformedResponse)
    }

    /// Ask the privileged side to re-read its configuration files.
    pub async fn reload_config(&self) -> Result<bool, PipelineError> {
        let response = self.send(RequestMessage::ReloadConfig {}).await?;
        response.success.ok_or(PipelineError::MalformedResponse)
    }

    pub async fn analyze_profile(
        &self,
        tweets: Vec<String>,
        bio: Option<String>,
    ) -> Result<StyleProfile, PipelineError> {
        let response = self
            .send(RequestMessage::AnalyzeProfile { tweets, bio })
            .await?;
        response.profile.ok_or(PipelineError::MalformedResponse)
    }

    async fn send(&self, request: RequestMessage) -> Result<ResponseMessage, PipelineError> {
        let action = request.action();
        let payload = serde_json::to_value(&request)
            .map_err(|e| replyforge_protocols::TransportError::Encoding(e.to_string()))?;

        debug!("Sending {}", action);
        let raw = self.channel.request(payload).await?;
        Self::interpret(raw)
    }

    fn interpret(raw: Value) -> Result<ResponseMessage, PipelineError> {
        let response: ResponseMessage =
            serde_json::from_value(raw).map_err(|_| PipelineError::MalformedResponse)?;
        match response.error {
            Some(error) => Err(PipelineError::Domain(error)),
            None => Ok(response),
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
