//! Completion backend errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status. `message` is already human readable.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// Response arrived but lacked the generated message content.
    #[error("Invalid response from completion API: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// HTTP status, when the remote side answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
