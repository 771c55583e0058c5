//! # Replyforge Agent
//!
//! The page-side half of replyforge. It watches user interactions on the
//! host page, and when one signals reply intent it runs the reply pipeline:
//!
//! extract context → check the rate limit → find the editor → read the
//! profile → request a reply → inject it → count it.
//!
//! Everything that touches the page goes through
//! [`PageAdapter`](replyforge_protocols::PageAdapter); the privileged side is
//! reached only through a
//! [`MessageChannel`](replyforge_protocols::MessageChannel).

mod client;
mod editor;
mod extractor;
mod injector;
mod notification;
mod observer;
mod options;
mod pipeline;
mod rate_limit;
mod session;

pub use client::ReplyRequestClient;
pub use editor::{ClipboardFallback, DirectAssign, PasteSimulation};
pub use extractor::ContextExtractor;
pub use injector::{CLIPBOARD_FALLBACK_MESSAGE, INSERT_FAILED_MESSAGE, ReplyInjector};
pub use notification::{NotificationPresenter, TracingSurface};
pub use observer::Observer;
pub use options::AgentOptions;
pub use pipeline::{LOADING_MESSAGE, ReplyPipeline, RunOutcome, SUCCESS_MESSAGE};
pub use rate_limit::RateLimiter;
pub use session::Session;
