//! Runtime configuration for the catalog client.
//!
//! Configuration lives in an optional RON file. Every field has a default, so
//! a file only needs to name what it overrides:
//!
//! ```ron
//! (
//!     base_url: "http://localhost:8000/api/v2",
//!     page_size: 40,
//! )
//! ```

use crate::errors::ConfigError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_PAGE_SIZE: u32 = 20;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexConfig {
    /// Root of the remote catalog API, without a trailing slash.
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Directory holding persisted session and profile state. `None` selects
    /// the platform data directory.
    pub storage_dir: Option<PathBuf>,
    /// Items per page for the paginated listing.
    pub page_size: u32,
}

impl Default for PokedexConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            storage_dir: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PokedexConfig {
    /// Reads and validates a RON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_ron(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|e| e.to_string())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(invalid("page_size", "must be at least 1"));
        }
        if self.request_timeout_secs == 0 {
            return Err(invalid("request_timeout_secs", "must be at least 1"));
        }
        self.api_url()?;
        Ok(())
    }

    /// The parsed base URL with any trailing slash removed.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.base_url.trim_end_matches('/'))
            .map_err(|e| invalid("base_url", &e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves the storage directory, falling back to `<data dir>/pokedex`
    /// and finally to a relative `.pokedex` directory.
    pub fn resolved_storage_dir(&self) -> PathBuf {
        match &self.storage_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_dir()
                .map(|dir| dir.join("pokedex"))
                .unwrap_or_else(|| PathBuf::from(".pokedex")),
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}
