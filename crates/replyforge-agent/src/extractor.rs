//! Conversation context extraction.

use std::sync::Arc;

use tracing::{debug, warn};

use replyforge_protocols::error::PageError;
use replyforge_protocols::{
    ConversationContext, DEFAULT_AUTHOR, DEFAULT_SOURCE_TEXT, ElementHandle, PageAdapter,
};

/// Derives a [`ConversationContext`] from the post a compose surface
/// replies to. Never fails: anything unreadable becomes a default.
pub struct ContextExtractor {
    page: Arc<dyn PageAdapter>,
    max_depth: usize,
}

impl ContextExtractor {
    pub fn new(page: Arc<dyn PageAdapter>, max_depth: usize) -> Self {
        Self { page, max_depth }
    }

    pub async fn extract(&self, surface: ElementHandle) -> ConversationContext {
        match self.try_extract(surface).await {
            Ok(context) => context,
            Err(e) => {
                warn!("Context extraction failed, using defaults: {}", e);
                ConversationContext::fallback()
            }
        }
    }

    async fn try_extract(&self, surface: ElementHandle) -> Result<ConversationContext, PageError> {
        let post = match self
            .page
            .nearest_enclosing_post(surface, self.max_depth)
            .await?
        {
            Some(post) => Some(post),
            None => {
                debug!("No enclosing post within {} ancestors", self.max_depth);
                self.page.first_post().await?
            }
        };

        let Some(post) = post else {
            debug!("No post on the page");
            return Ok(ConversationContext::fallback());
        };

        let source_text = self
            .page
            .post_text(post)
            .await?
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE_TEXT.to_string());

        let author_label = self
            .page
            .author_block_text(post)
            .await?
            .and_then(|block| block.lines().next().map(|line| line.trim().to_string()))
            .filter(|line| !line.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        debug!(author = %author_label, "Context extracted");
        Ok(ConversationContext::new(source_text, author_label))
    }
}

#[cfg(test)]
#[path = "extractor_tests.rs"]
mod tests;
