//! Orchestrator setup errors.

use thiserror::Error;

use replyforge_config::ConfigError;
use replyforge_protocols::error::StoreError;

/// Failure to load the local configuration into the store.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
