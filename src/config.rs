//! Configuration management for the Spotify terminal remote.
//!
//! This module resolves every runtime setting the application needs: the
//! Spotify client credentials, the redirect URI registered with Spotify, the
//! accounts and Web API endpoints, where the token is stored and the timing of
//! the login flow and the UI poll loop.
//!
//! The configuration system follows a hierarchical approach:
//! 1. `SPOTIFY_*` environment variables (highest priority)
//! 2. `config.json` in the per-user config directory
//! 3. `CLIENT_ID` / `CLIENT_SECRET` environment variables for fields still empty
//! 4. Application defaults
//!
//! `.env` files are loaded into the process environment by [`load_env`] before
//! any of this happens, so values placed there behave like real environment
//! variables.

use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

pub const APP_DIR: &str = "sporltui";
pub const CONFIG_FILE: &str = "config.json";
pub const TOKEN_FILE: &str = "token.json";

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub token_file: PathBuf,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub login_timeout_secs: u64,
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            token_file: app_dir().join(TOKEN_FILE),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            login_timeout_secs: DEFAULT_LOGIN_TIMEOUT_SECS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Resolves and validates the configuration from the default locations.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the client id or secret is missing
    /// or the redirect URI is unusable, and I/O or parse errors if
    /// `config.json` exists but cannot be read.
    ///
    /// # Example
    ///
    /// ```
    /// let config = Config::load().await?;
    /// println!("Redirecting to {}", config.redirect_uri);
    /// ```
    pub async fn load() -> Result<Self, ConfigError> {
        let config = Self::resolve().await?;
        config.validate()?;
        Ok(config)
    }

    /// Resolves the configuration without validating it.
    ///
    /// Used by `sporltui configure`, which has to work before the client
    /// credentials are known.
    pub async fn resolve() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&config_path()).await?;
        config.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Reads `path` on top of the defaults. A missing file yields the defaults.
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match async_fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and `SPOTIFY_REDIRECT_URI`
    /// replace whatever the file provided. `CLIENT_ID` and `CLIENT_SECRET` only
    /// fill fields that are still empty. Empty variables are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("SPOTIFY_CLIENT_ID") {
            self.client_id = v;
        }
        if let Some(v) = get("SPOTIFY_CLIENT_SECRET") {
            self.client_secret = v;
        }
        if let Some(v) = get("SPOTIFY_REDIRECT_URI") {
            self.redirect_uri = v;
        }

        if self.client_id.is_empty() {
            if let Some(v) = get("CLIENT_ID") {
                self.client_id = v;
            }
        }
        if self.client_secret.is_empty() {
            if let Some(v) = get("CLIENT_SECRET") {
                self.client_secret = v;
            }
        }
    }

    /// Checks that the configuration can drive a login.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() || self.client_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "client ID and secret must be provided".to_string(),
            ));
        }

        let redirect = self.redirect_url()?;
        if redirect.scheme() != "http" {
            return Err(ConfigError::Invalid(format!(
                "redirect URI must use http for the local listener, got {}",
                redirect.scheme()
            )));
        }
        if redirect.host_str().is_none() {
            return Err(ConfigError::Invalid(format!(
                "redirect URI {} has no host",
                self.redirect_uri
            )));
        }

        for (name, value) in [
            ("auth_url", &self.auth_url),
            ("token_url", &self.token_url),
            ("api_url", &self.api_url),
        ] {
            Url::parse(value)
                .map_err(|e| ConfigError::Invalid(format!("{name} is not a valid URL: {e}")))?;
        }

        if self.login_timeout_secs == 0 || self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "login timeout and poll interval must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn redirect_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.redirect_uri).map_err(|e| {
            ConfigError::Invalid(format!(
                "redirect URI {} is not a valid URL: {e}",
                self.redirect_uri
            ))
        })
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Writes the configuration to the default `config.json`.
    pub async fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = config_path();
        self.save_to(&path).await?;
        Ok(path)
    }

    pub async fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        async_fs::write(path, json).await.map_err(io_err)
    }
}

/// Per-user application directory.
///
/// - Linux: `~/.config/sporltui`
/// - macOS: `~/Library/Application Support/sporltui`
/// - Windows: `%APPDATA%/sporltui`
pub fn app_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

pub fn config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

/// Loads environment variables from `.env` files.
///
/// A `.env` in the working directory is read first, then `sporltui/.env` in
/// the per-user config directory. Variables that are already set are never
/// overwritten, and missing files are not an error.
///
/// # Errors
///
/// Returns an error string if the config directory cannot be created or an
/// existing `.env` file cannot be parsed.
///
/// # Example
///
/// ```
/// use sporltui::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}
