//! # Replyforge Config
//!
//! Two configuration sources:
//!
//! - the local credential and bio files (`.env`, `Summary.txt`), read by
//!   [`ConfigLoader`] at startup and on every reload request;
//! - an optional TOML [`Settings`] file with the tunables (endpoint, model,
//!   limits, delays, paths), read by [`SettingsLoader`].

mod error;
mod loader;
mod schema;
mod sources;
mod validator;

pub use error::ConfigError;
pub use loader::SettingsLoader;
pub use schema::*;
pub use sources::{
    BIO_FILE, CREDENTIAL_FILE, CREDENTIAL_KEY, ConfigLoader, DEFAULT_BIO, LoadedConfig,
    parse_credential,
};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
