//! Clipboard errors.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard write denied: {0}")]
    Denied(String),

    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}
