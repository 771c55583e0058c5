//! # Replyforge Store
//!
//! Persisted key-value state shared by both contexts.
//!
//! - [`InMemoryStore`] and [`JsonFileStore`] implement
//!   [`KeyValueStore`](replyforge_protocols::KeyValueStore).
//! - [`ProfileStore`] reads and writes the typed records (credential, style
//!   profile, preferences, usage statistics) with their defaults applied.
//! - [`analyze_posts`] derives a style profile from prior posts.

mod json_file;
mod memory;
mod profile_store;
mod style_analysis;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use profile_store::ProfileStore;
pub use style_analysis::{PostStats, analyze_posts, analyze_profile};
