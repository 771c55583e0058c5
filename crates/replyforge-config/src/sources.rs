//! Credential and bio files.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::ConfigError;

pub const CREDENTIAL_FILE: &str = ".env";
pub const BIO_FILE: &str = "Summary.txt";
pub const CREDENTIAL_KEY: &str = "GROQ_API_KEY";

/// Bio used when the bio file is missing or unreadable.
pub const DEFAULT_BIO: &str = "Professional and authentic communicator.";

/// Result of a successful load.
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub api_key: String,
    pub bio: String,
}

impl fmt::Debug for LoadedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedConfig")
            .field("api_key", &"<redacted>")
            .field("bio", &self.bio)
            .finish()
    }
}

/// Find `key` in `KEY=VALUE` text.
///
/// Blank lines and lines starting with `#` are skipped, the value is split
/// at the first `=` only, and one leading and one trailing quote character
/// are removed. The first matching line wins.
pub fn parse_credential(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .find_map(|line| {
            let (name, value) = line.split_once('=')?;
            (name.trim() == key).then(|| strip_quotes(value.trim()).to_string())
        })
}

fn strip_quotes(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

/// Loads the credential and bio files from one directory.
///
/// A successful load is cached until [`reload`](Self::reload).
pub struct ConfigLoader {
    config_dir: PathBuf,
    cached: Mutex<Option<LoadedConfig>>,
}

impl ConfigLoader {
    pub fn new(config_dir: impl AsRef<Path>) -> Self {
        Self {
            config_dir: config_dir.as_ref().to_path_buf(),
            cached: Mutex::new(None),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load both files, or return the cached result of an earlier load.
    ///
    /// A missing credential is fatal; a missing bio falls back to
    /// [`DEFAULT_BIO`].
    pub async fn load(&self) -> Result<LoadedConfig, ConfigError> {
        if let Some(cached) = self.cached.lock().clone() {
            return Ok(cached);
        }

        let api_key = self.load_credential().await?;
        let bio = self.load_bio().await;
        let loaded = LoadedConfig { api_key, bio };

        *self.cached.lock() = Some(loaded.clone());
        info!("Configuration loaded from {:?}", self.config_dir);
        Ok(loaded)
    }

    /// Drop the cached result and load again.
    pub async fn reload(&self) -> Result<LoadedConfig, ConfigError> {
        self.cached.lock().take();
        self.load().await
    }

    async fn load_credential(&self) -> Result<String, ConfigError> {
        let path = self.config_dir.join(CREDENTIAL_FILE);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        match parse_credential(&content, CREDENTIAL_KEY) {
            Some(key) if !key.is_empty() => {
                debug!("{} loaded from {:?}", CREDENTIAL_KEY, path);
                Ok(key)
            }
            _ => Err(ConfigError::MissingCredential {
                key: CREDENTIAL_KEY.to_string(),
                path: path.display().to_string(),
            }),
        }
    }

    async fn load_bio(&self) -> String {
        let path = self.config_dir.join(BIO_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("Writing style loaded from {:?}", path);
                content.trim().to_string()
            }
            Err(e) => {
                warn!("{} unavailable ({}), using default profile", BIO_FILE, e);
                DEFAULT_BIO.to_string()
            }
        }
    }
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod tests;
