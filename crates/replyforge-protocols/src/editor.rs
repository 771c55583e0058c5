//! Editor adapter protocol.
//!
//! Getting text into a host page's rich-text editor is engine specific and
//! best effort. Each way of doing it is an [`EditorAdapter`]; callers only
//! see whether the text went in or was left on the clipboard.

use async_trait::async_trait;

use crate::error::InsertError;
use crate::page::ElementHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The editor accepted the text.
    Inserted,
    /// The text is on the clipboard for the user to paste.
    ClipboardFallback,
}

#[async_trait]
pub trait EditorAdapter: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn insert(&self, editable: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError>;
}
