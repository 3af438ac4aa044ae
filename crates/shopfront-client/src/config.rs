//! # Client Configuration
//!
//! Where the backend lives and where the session is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_PAGE_URL=https://shop.lan                                │
//! │     SHOPFRONT_API_URL=https://api.shop.lan/api                         │
//! │     SHOPFRONT_API_PORT=5000                                            │
//! │     SHOPFRONT_SESSION_PATH=/tmp/session.json                           │
//! │     SHOPFRONT_LOG_REQUESTS=false                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shopfront/client.toml (Linux)                            │
//! │     ~/Library/Application Support/com.shopfront.client/client.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     page http://localhost, port 5000, file-backed session              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [page]
//! url = "http://192.168.1.20:8080"
//!
//! [api]
//! # base_url = "https://api.shop.lan/api"   # skips origin-based resolution
//! port = 5000
//!
//! [session]
//! backend = "file"   # file | memory
//! # path = "/var/lib/shopfront/session.json"
//!
//! [logging]
//! log_requests = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::endpoint::{resolve_base_url, ApiBase, PageOrigin, DEFAULT_API_PORT};
use crate::error::{ClientError, ClientResult};
use crate::session::{FileBackend, MemoryBackend, SessionStore};

// =============================================================================
// Page Settings
// =============================================================================

/// The page origin the client acts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSettings {
    /// Full URL of the page; only its protocol and host are used.
    #[serde(default = "default_page_url")]
    pub url: String,
}

fn default_page_url() -> String {
    "http://localhost".to_string()
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            url: default_page_url(),
        }
    }
}

// =============================================================================
// API Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Explicit base URL. When set, the page origin is ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Port the API listens on when the base is derived from the page.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

fn default_api_port() -> u16 {
    DEFAULT_API_PORT
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: None,
            port: default_api_port(),
        }
    }
}

// =============================================================================
// Session Settings
// =============================================================================

/// Where the token and cached user are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackendKind {
    /// JSON file in the user's data directory.
    #[default]
    File,
    /// Process memory; gone on exit.
    Memory,
}

impl std::fmt::Display for SessionBackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionBackendKind::File => write!(f, "file"),
            SessionBackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for SessionBackendKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(SessionBackendKind::File),
            "memory" | "mem" => Ok(SessionBackendKind::Memory),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown session backend: '{}'. Valid options: file, memory",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub backend: SessionBackendKind,

    /// Session file location. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Emit a diagnostic event for every request.
    #[serde(default = "default_true")]
    pub log_requests: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings { log_requests: true }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub page: PageSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        PageOrigin::parse(&self.page.url)?;

        if self.api.port == 0 {
            return Err(ClientError::InvalidConfig(
                "api.port must be greater than 0".into(),
            ));
        }

        if let Some(ref base) = self.api.base_url {
            let url = Url::parse(base)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ClientError::InvalidConfig(format!(
                    "API base URL must start with http:// or https://, got: {}",
                    base
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SHOPFRONT_PAGE_URL") {
            debug!(url = %url, "Overriding page URL from environment");
            self.page.url = url;
        }

        if let Some(url) = lookup("SHOPFRONT_API_URL") {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api.base_url = Some(url);
        }

        if let Some(port) = lookup("SHOPFRONT_API_PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.api.port = p,
                Err(_) => warn!(port = %port, "Ignoring invalid API port in environment"),
            }
        }

        if let Some(path) = lookup("SHOPFRONT_SESSION_PATH") {
            self.session.backend = SessionBackendKind::File;
            self.session.path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("SHOPFRONT_LOG_REQUESTS") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.logging.log_requests = true,
                "0" | "false" | "no" | "off" => self.logging.log_requests = false,
                _ => warn!(value = %flag, "Unknown SHOPFRONT_LOG_REQUESTS value"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shopfront", "client")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Builders
    // =========================================================================

    /// Resolves the API base once, from the explicit URL or the page origin.
    pub fn api_base(&self) -> ClientResult<ApiBase> {
        if let Some(ref base) = self.api.base_url {
            return Ok(ApiBase::new(base.as_str()));
        }
        let origin = PageOrigin::parse(&self.page.url)?;
        Ok(resolve_base_url(&origin, self.api.port))
    }

    /// Opens the configured session backend.
    pub fn build_session_store(&self) -> ClientResult<SessionStore> {
        match self.session.backend {
            SessionBackendKind::Memory => Ok(SessionStore::new(MemoryBackend::new())),
            SessionBackendKind::File => {
                let path = self
                    .session
                    .path
                    .clone()
                    .or_else(FileBackend::default_path)
                    .ok_or_else(|| {
                        ClientError::InvalidConfig("No data directory for the session file".into())
                    })?;
                debug!(?path, "Using file-backed session");
                Ok(SessionStore::new(FileBackend::new(path)))
            }
        }
    }
}
