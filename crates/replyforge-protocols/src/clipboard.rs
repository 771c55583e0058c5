//! System clipboard protocol.

use async_trait::async_trait;

use crate::error::ClipboardError;

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
