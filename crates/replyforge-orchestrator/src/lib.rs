//! # Replyforge Orchestrator
//!
//! The privileged side of replyforge. It owns network access and the
//! persisted store, and answers requests arriving over the message channel:
//!
//! - [`prompt`] turns a conversation context and a style profile into the
//!   model prompt;
//! - [`ToxicityGate`] screens generated text before it leaves this side;
//! - [`Orchestrator`] handles one request at a time;
//! - [`OrchestratorService`] runs the orchestrator as a task behind an
//!   [`OrchestratorHandle`] and guarantees one response per known request.

mod error;
mod orchestrator;
pub mod prompt;
mod service;
mod toxicity;

pub use error::SetupError;
pub use orchestrator::{INTERNAL_ERROR_MESSAGE, Orchestrator};
pub use prompt::{SYSTEM_PROMPT, build_chat_request, build_reply_prompt};
pub use service::{OrchestratorHandle, OrchestratorService};
pub use toxicity::{REFUSAL_MESSAGE, ToxicityGate, Verdict};
