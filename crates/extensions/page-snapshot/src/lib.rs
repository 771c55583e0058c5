//! Page adapter over an in-memory element tree.
//!
//! [`SnapshotPage`] parses an HTML snapshot of the host page once and then
//! answers [`PageAdapter`](replyforge_protocols::PageAdapter) queries
//! against it. Focus, direct assignment and dispatched synthetic events are
//! recorded so callers can inspect what an injection attempt did.

mod selectors;
mod snapshot;
mod tree;

pub use selectors::*;
pub use snapshot::{SnapshotBehavior, SnapshotPage};
