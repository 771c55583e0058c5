//! Host page adapter protocol.
//!
//! The page-side agent never touches a document directly. Everything it
//! needs from the host page - locating posts and the compose surface,
//! reading text, focusing nodes and dispatching synthetic input - goes
//! through [`PageAdapter`], so the pipeline can run against a live browser
//! bridge or an in-memory tree alike.

use async_trait::async_trait;

use crate::error::PageError;

/// Opaque reference to an element of the host page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(pub u64);

/// A user interaction observed during the capture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInteraction {
    /// Element the user clicked.
    pub target: ElementHandle,
}

/// Synthetic input dispatched at an editable node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntheticEvent {
    /// A `paste` event whose clipboard payload is `text` (`text/plain`).
    Paste { text: String },
    /// An `input` event with the given `inputType`, e.g. `insertFromPaste`.
    Input { input_type: String },
}

impl SyntheticEvent {
    pub fn paste(text: impl Into<String>) -> Self {
        Self::Paste { text: text.into() }
    }

    pub fn insert_from_paste() -> Self {
        Self::Input {
            input_type: "insertFromPaste".to_string(),
        }
    }
}

#[async_trait]
pub trait PageAdapter: Send + Sync {
    /// The post containing `target`, including `target` itself.
    async fn closest_post(&self, target: ElementHandle) -> Result<Option<ElementHandle>, PageError>;

    /// The reply compose surface, if currently rendered.
    async fn compose_surface(&self) -> Result<Option<ElementHandle>, PageError>;

    /// The rich-text editor inside a compose surface.
    async fn editor_in(&self, surface: ElementHandle) -> Result<Option<ElementHandle>, PageError>;

    /// The node that actually accepts text inside an editor: a textbox,
    /// a content-editable descendant, or the editor itself.
    async fn editable_in(&self, editor: ElementHandle) -> Result<Option<ElementHandle>, PageError>;

    /// Walk outward from `from` through at most `max_depth` ancestors and
    /// return the first post found inside the nearest ancestor holding one.
    async fn nearest_enclosing_post(
        &self,
        from: ElementHandle,
        max_depth: usize,
    ) -> Result<Option<ElementHandle>, PageError>;

    /// The first post-like element anywhere in the document.
    async fn first_post(&self) -> Result<Option<ElementHandle>, PageError>;

    /// Rendered body text of a post.
    async fn post_text(&self, post: ElementHandle) -> Result<Option<String>, PageError>;

    /// Rendered text of a post's identity block (display name, handle, ...).
    async fn author_block_text(&self, post: ElementHandle) -> Result<Option<String>, PageError>;

    async fn focus(&self, node: ElementHandle) -> Result<(), PageError>;

    /// Assign text directly. Rich-text editors usually ignore this.
    async fn assign_text(&self, node: ElementHandle, text: &str) -> Result<(), PageError>;

    async fn dispatch(&self, node: ElementHandle, event: SyntheticEvent) -> Result<(), PageError>;
}
