//! OS clipboard.

use async_trait::async_trait;
use tracing::debug;

use replyforge_protocols::Clipboard;
use replyforge_protocols::error::ClipboardError;

/// Writes to the OS clipboard.
///
/// `arboard` is blocking, so every write runs on the blocking pool with a
/// fresh handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

fn map_error(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ClipboardNotSupported | arboard::Error::ClipboardOccupied => {
            ClipboardError::Unavailable(e.to_string())
        }
        other => ClipboardError::Denied(other.to_string()),
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        let len = text.chars().count();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(map_error)?;
            clipboard.set_text(text).map_err(map_error)
        })
        .await
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))??;

        debug!("Wrote {} chars to the system clipboard", len);
        Ok(())
    }
}
