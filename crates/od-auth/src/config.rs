//! # Auth Configuration
//!
//! Where the hosted auth backend lives and how long to wait for it.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OD_AUTH_URL=https://project.supabase.co                            │
//! │     OD_AUTH_ANON_KEY=eyJ...                                            │
//! │     OD_AUTH_TIMEOUT_SECS=15                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/od-storefront/auth.toml (Linux)                          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     local development stack, no key                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # auth.toml
//! url = "https://project.supabase.co"
//! anon_key = "eyJ..."
//! timeout_secs = 15
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{AuthError, AuthResult};

/// Longest request timeout accepted.
const MAX_TIMEOUT_SECS: u64 = 120;

fn default_url() -> String {
    "http://127.0.0.1:54321".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Settings for the hosted auth client.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Project base URL; `/auth/v1/...` is joined onto it.
    #[serde(default = "default_url")]
    pub url: String,

    /// Public (anon) API key sent with every request.
    #[serde(default)]
    pub anon_key: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            url: default_url(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The key is a credential; keep it out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("url", &self.url)
            .field("anon_key", &if self.anon_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl AuthConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (auth.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AuthResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading auth config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Auth config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AuthResult<()> {
        let url = Url::parse(&self.url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AuthError::InvalidUrl(format!(
                "Auth URL must start with http:// or https://, got: {}",
                self.url
            )));
        }

        if self.anon_key.trim().is_empty() {
            return Err(AuthError::InvalidConfig("anon_key is not set".into()));
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(AuthError::InvalidConfig(format!(
                "timeout_secs must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("OD_AUTH_URL") {
            debug!(url = %url, "Overriding auth URL from environment");
            self.url = url;
        }

        if let Some(key) = lookup("OD_AUTH_ANON_KEY") {
            debug!("Overriding auth anon key from environment");
            self.anon_key = key;
        }

        if let Some(secs) = lookup("OD_AUTH_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.timeout_secs = s,
                Err(_) => warn!(value = %secs, "Ignoring non-numeric OD_AUTH_TIMEOUT_SECS"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "od", "storefront")
            .map(|dirs| dirs.config_dir().join("auth.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Parsed base URL with a trailing slash, so relative joins keep any
    /// path prefix.
    pub fn base_url(&self) -> AuthResult<Url> {
        let mut raw = self.url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }
}
