//! Spotify terminal remote library
//!
//! This library provides everything behind the `sporltui` binary: OAuth login
//! against the Spotify accounts service, a persisted and self-refreshing
//! credential, a small REST client for playback control, and the terminal UI
//! that polls and renders the current track.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the transient OAuth callback listener
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration file, `.env` and environment variables
//! - `error` - Typed errors for configuration, storage, auth and playback
//! - `management` - Credential persistence
//! - `server` - Local HTTP listener used during login
//! - `spotify` - Token lifecycle and playback client
//! - `types` - Data structures and type definitions
//! - `ui` - Terminal user interface
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use sporltui::{config::Config, spotify::AuthService};
//!
//! #[tokio::main]
//! async fn main() -> sporltui::Res<()> {
//!     let config = Config::load().await?;
//!     let auth = Arc::new(AuthService::new(config));
//!     if !auth.has_valid_credential().await {
//!         auth.authenticate().await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod ui;
pub mod utils;

/// Result alias used by the CLI and UI layers, where errors of every kind end
/// up in front of the user.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```
/// info!("Open {} to continue", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits with status 1.
///
/// The expansion diverges, so it can stand in any `match` arm:
///
/// ```
/// let config = match Config::load().await {
///     Ok(config) => config,
///     Err(e) => error!("Cannot load configuration: {}", e),
/// };
/// ```
///
/// Only the CLI layer uses it. Library code returns typed errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!` and carries on.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
