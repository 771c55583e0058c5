//! Groq chat-completion backend for replyforge.

mod api;
mod provider;

pub use provider::{DEFAULT_API_URL, DEFAULT_MODEL, GroqOptions, GroqProvider};
