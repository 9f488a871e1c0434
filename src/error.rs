use std::{path::PathBuf, time::Duration};

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Cannot access config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Token file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot access token file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login was not completed within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("OAuth state mismatch in callback")]
    StateMismatch,

    #[error("No authorization code in callback")]
    NoCodeInResponse,

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Code exchange rejected ({status}): {body}")]
    ExchangeFailed { status: StatusCode, body: String },

    #[error("Token refresh rejected ({status}): {body}")]
    RefreshFailed { status: StatusCode, body: String },

    #[error("Not authenticated, run `sporltui auth`")]
    NotAuthenticated,

    #[error("Another login is already in progress")]
    LoginInProgress,

    #[error("Cannot bind callback listener on {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("Callback listener stopped before a response arrived")]
    ListenerClosed,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("Spotify API error ({status}): {body}")]
    RemoteApi { status: StatusCode, body: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
