//! Error types shared across the replyforge crates.

mod clipboard;
mod insert;
mod page;
mod pipeline;
mod provider;
mod store;
mod transport;

pub use clipboard::*;
pub use insert::*;
pub use page::*;
pub use pipeline::*;
pub use provider::*;
pub use store::*;
pub use transport::*;
