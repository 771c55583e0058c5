//! Editor adapter variants.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use replyforge_protocols::error::InsertError;
use replyforge_protocols::{
    Clipboard, EditorAdapter, ElementHandle, InsertOutcome, PageAdapter, SyntheticEvent,
};

/// Focus and assign the text directly. Works for plain inputs; rich-text
/// editors that keep their own document model ignore it.
pub struct DirectAssign {
    page: Arc<dyn PageAdapter>,
}

impl DirectAssign {
    pub fn new(page: Arc<dyn PageAdapter>) -> Self {
        Self { page }
    }
}

#[async_trait]
impl EditorAdapter for DirectAssign {
    fn name(&self) -> &'static str {
        "direct-assign"
    }

    async fn insert(&self, editable: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError> {
        self.page.focus(editable).await?;
        self.page.assign_text(editable, text).await?;
        Ok(InsertOutcome::Inserted)
    }
}

/// Put the text on the clipboard, then dispatch a paste event carrying it
/// followed by an `insertFromPaste` input event, so the host editor's own
/// paste handling performs the insertion.
///
/// Best effort: a host that only trusts browser-generated input may ignore
/// the synthetic events.
pub struct PasteSimulation {
    page: Arc<dyn PageAdapter>,
    clipboard: Arc<dyn Clipboard>,
}

impl PasteSimulation {
    pub fn new(page: Arc<dyn PageAdapter>, clipboard: Arc<dyn Clipboard>) -> Self {
        Self { page, clipboard }
    }
}

#[async_trait]
impl EditorAdapter for PasteSimulation {
    fn name(&self) -> &'static str {
        "paste-simulation"
    }

    async fn insert(&self, editable: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError> {
        self.page.focus(editable).await?;
        self.clipboard.write_text(text).await?;
        debug!("Text written to clipboard");

        self.page
            .dispatch(editable, SyntheticEvent::paste(text))
            .await?;
        self.page
            .dispatch(editable, SyntheticEvent::insert_from_paste())
            .await?;
        debug!("Paste and input events dispatched");
        Ok(InsertOutcome::Inserted)
    }
}

/// Leave the text on the clipboard for a manual paste.
pub struct ClipboardFallback {
    clipboard: Arc<dyn Clipboard>,
}

impl ClipboardFallback {
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        Self { clipboard }
    }
}

#[async_trait]
impl EditorAdapter for ClipboardFallback {
    fn name(&self) -> &'static str {
        "clipboard-fallback"
    }

    async fn insert(&self, _editable: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError> {
        self.clipboard.write_text(text).await?;
        Ok(InsertOutcome::ClipboardFallback)
    }
}

#[cfg(test)]
#[path = "editor_tests.rs"]
mod tests;
