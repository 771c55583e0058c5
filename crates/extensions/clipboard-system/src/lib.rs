//! Clipboard implementations for replyforge.
//!
//! - [`SystemClipboard`] writes to the OS clipboard through `arboard`.
//! - [`MemoryClipboard`] keeps the text in process, for headless runs.

mod memory;
mod system;

pub use memory::MemoryClipboard;
pub use system::SystemClipboard;
