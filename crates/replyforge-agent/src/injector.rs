//! Reply injection with fallbacks.

use std::sync::Arc;

use tracing::{debug, error, warn};

use replyforge_protocols::error::InsertError;
use replyforge_protocols::{Clipboard, EditorAdapter, ElementHandle, InsertOutcome, PageAdapter};

use crate::editor::{ClipboardFallback, PasteSimulation};
use crate::notification::NotificationPresenter;

pub const CLIPBOARD_FALLBACK_MESSAGE: &str = "Reply copied to clipboard! Paste it manually.";
pub const INSERT_FAILED_MESSAGE: &str = "Error: Could not insert reply";

/// Forces a reply into the host editor.
///
/// Tries each [`EditorAdapter`] in order until one succeeds. Landing on the
/// clipboard instead of in the editor, or failing outright, is reported to
/// the user here.
pub struct ReplyInjector {
    page: Arc<dyn PageAdapter>,
    adapters: Vec<Arc<dyn EditorAdapter>>,
    notifier: NotificationPresenter,
}

impl ReplyInjector {
    pub fn new(
        page: Arc<dyn PageAdapter>,
        adapters: Vec<Arc<dyn EditorAdapter>>,
        notifier: NotificationPresenter,
    ) -> Self {
        Self {
            page,
            adapters,
            notifier,
        }
    }

    /// Paste simulation, then a plain clipboard copy.
    pub fn with_clipboard(
        page: Arc<dyn PageAdapter>,
        clipboard: Arc<dyn Clipboard>,
        notifier: NotificationPresenter,
    ) -> Self {
        let adapters: Vec<Arc<dyn EditorAdapter>> = vec![
            Arc::new(PasteSimulation::new(page.clone(), clipboard.clone())),
            Arc::new(ClipboardFallback::new(clipboard)),
        ];
        Self::new(page, adapters, notifier)
    }

    /// Insert `text` into the editable node inside `editor`.
    pub async fn inject(&self, editor: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError> {
        let result = self.try_inject(editor, text).await;
        match &result {
            Ok(InsertOutcome::Inserted) => {}
            Ok(InsertOutcome::ClipboardFallback) => {
                self.notifier.info(CLIPBOARD_FALLBACK_MESSAGE);
            }
            Err(e) => {
                error!("Reply insertion failed: {}", e);
                self.notifier.error(INSERT_FAILED_MESSAGE);
            }
        }
        result
    }

    async fn try_inject(&self, editor: ElementHandle, text: &str) -> Result<InsertOutcome, InsertError> {
        let editable = self
            .page
            .editable_in(editor)
            .await?
            .ok_or(InsertError::NoEditable)?;
        debug!("Editable element found: {:?}", editable);

        let mut last_error = InsertError::NoEditable;
        for adapter in &self.adapters {
            match adapter.insert(editable, text).await {
                Ok(outcome) => {
                    debug!(adapter = adapter.name(), ?outcome, "Reply inserted");
                    return Ok(outcome);
                }
                Err(e) => {
                    warn!(adapter = adapter.name(), "Insertion attempt failed: {}", e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;
