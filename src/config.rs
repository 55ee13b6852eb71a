//! Runtime configuration, read from the environment (and `.env`).

use std::path::PathBuf;
use thiserror::Error;

use crate::utils::encryption::{CryptoError, SessionKey};

const DEFAULT_SESSION_FILE: &str = ".transfer-session.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
    #[error("SESSION_ENCRYPTION_KEY is invalid: {0}")]
    InvalidKey(#[from] CryptoError),
    #[error("SESSION_STORE must be `file` or `memory`, got `{0}`")]
    InvalidStore(String),
}

/// Where the session entries live
#[derive(Debug, Clone)]
pub enum SessionBackend {
    File { path: PathBuf, key: Option<SessionKey> },
    /// Forgotten when the process exits
    Memory,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub session: SessionBackend,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// - `API_URL` (required)
    /// - `SESSION_STORE`: `file` (default) or `memory`
    /// - `SESSION_FILE`: defaults to `.transfer-session.json`
    /// - `SESSION_ENCRYPTION_KEY`: optional 64 hex chars
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("API_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("API_URL"))?;

        let store = lookup("SESSION_STORE").unwrap_or_else(|| "file".to_string());
        let session = match store.trim().to_lowercase().as_str() {
            "file" => {
                let path = lookup("SESSION_FILE")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string());
                let key = match lookup("SESSION_ENCRYPTION_KEY").filter(|v| !v.trim().is_empty()) {
                    Some(hex_key) => Some(SessionKey::from_hex(&hex_key)?),
                    None => None,
                };
                SessionBackend::File { path: PathBuf::from(path), key }
            }
            "memory" => SessionBackend::Memory,
            other => return Err(ConfigError::InvalidStore(other.to_string())),
        };

        Ok(Settings { api_url, session })
    }
}
