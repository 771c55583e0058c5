//! In-process clipboard.

use async_trait::async_trait;
use parking_lot::Mutex;

use replyforge_protocols::Clipboard;
use replyforge_protocols::error::ClipboardError;

/// Holds the last written text. Can be told to refuse writes.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Mutex<Option<String>>,
    deny: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose every write is denied.
    pub fn denying() -> Self {
        Self {
            text: Mutex::new(None),
            deny: true,
        }
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Denied("clipboard write not permitted".to_string()));
        }
        *self.text.lock() = Some(text.to_string());
        Ok(())
    }
}
