//! Page-side pipeline errors.

use thiserror::Error;

use super::{InsertError, StoreError, TransportError};

/// Everything that can end a reply pipeline run early.
///
/// Extraction and insertion failures never appear here: those are absorbed
/// where they happen.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Rate limit reached ({count}/{max} replies this hour)")]
    RateLimitExceeded { count: u32, max: u32 },

    #[error("API key not found. Check your .env file and reload.")]
    MissingCredential,

    #[error("Could not find text editor")]
    EditorNotFound,

    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Explicit error from the privileged side, surfaced verbatim.
    #[error("{0}")]
    Domain(String),

    #[error("No response from background context")]
    MalformedResponse,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Every insertion strategy failed. The user was already notified.
    #[error("Could not insert reply: {0}")]
    Insertion(#[from] InsertError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_is_verbatim() {
        let err = PipelineError::Domain("Invalid API Key".to_string());
        assert_eq!(err.to_string(), "Invalid API Key");
    }

    #[test]
    fn test_rate_limit_display() {
        let err = PipelineError::RateLimitExceeded { count: 20, max: 20 };
        assert!(err.to_string().contains("20/20"));
    }

    #[test]
    fn test_transport_from() {
        let err = PipelineError::from(TransportError::NoResponse);
        assert!(err.to_string().contains("message port closed"));
    }
}
