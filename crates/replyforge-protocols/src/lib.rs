//! # Replyforge Protocols
//!
//! Shared definitions for the two isolated halves of replyforge: the
//! page-side agent and the privileged request orchestrator. Contains only
//! data types, the cross-context message protocol, adapter traits and the
//! error taxonomy - no implementations.
//!
//! ## Adapter Traits
//!
//! - [`PageAdapter`] - Queries and synthetic input against the host page
//! - [`EditorAdapter`] - One way of forcing text into the host editor
//! - [`MessageChannel`] - Request/response link to the privileged context
//! - [`Clipboard`] - System clipboard writes
//! - [`NotificationSurface`] - Where transient notifications are rendered
//! - [`KeyValueStore`] - Flat persisted key-value state
//! - [`CompletionBackend`] - Remote chat-completion service

pub mod channel;
pub mod clipboard;
pub mod editor;
pub mod error;
pub mod message;
pub mod notify;
pub mod page;
pub mod provider;
pub mod store;
pub mod types;

pub use channel::MessageChannel;
pub use clipboard::Clipboard;
pub use editor::{EditorAdapter, InsertOutcome};
pub use error::{
    ClipboardError, InsertError, PageError, PipelineError, ProviderError, StoreError, TransportError,
};
pub use message::{RequestMessage, ResponseMessage};
pub use notify::{NotificationId, NotificationKind, NotificationSurface};
pub use page::{ElementHandle, PageAdapter, PageInteraction, SyntheticEvent};
pub use provider::{ChatMessage, ChatRequest, ChatRole, CompletionBackend};
pub use store::KeyValueStore;
pub use types::*;
