//! Cross-context message channel protocol.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

/// Request/response link to the privileged context.
///
/// A response arrives for every request whose action the other side
/// recognises; anything else surfaces as a [`TransportError`].
#[async_trait]
pub trait MessageChannel: Send + Sync {
    async fn request(&self, payload: Value) -> Result<Value, TransportError>;
}
