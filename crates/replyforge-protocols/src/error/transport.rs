//! Cross-context message channel errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The receiving context is gone.
    #[error("Could not establish connection. Receiving end does not exist.")]
    Disconnected,

    /// The receiver accepted the message but dropped it without answering.
    #[error("The message port closed before a response was received.")]
    NoResponse,

    #[error("Message could not be encoded: {0}")]
    Encoding(String),
}
