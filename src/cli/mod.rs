//! # CLI Module
//!
//! This module provides the command-line interface layer for sporltui, a
//! terminal remote for Spotify playback. It implements all user-facing
//! commands and coordinates between configuration, the token lifecycle, the
//! playback client and the terminal UI.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Runs the OAuth authorization-code login in the browser
//! - [`logout`] - Forgets the stored token
//! - [`configure`] - Stores client credentials and the redirect URI
//!
//! ### Playback
//!
//! - [`tui`] - Interactive now-playing screen (the default command)
//! - [`status`] - Prints the current track as a table
//! - [`transport`] - Play, pause, toggle, next and previous as one-shot commands
//!
//! ## Authentication Handling
//!
//! Playback commands first make sure a credential is usable: a stored token
//! that has not expired, a refresh with the stored refresh token, or an
//! interactive login as the last resort. Authentication failures end the
//! process with a message; there is nothing useful to do without a token.
//!
//! ## Usage Patterns
//!
//! ```bash
//! sporltui configure --client-id abc --client-secret xyz
//! sporltui auth          # log in once
//! sporltui               # open the terminal UI
//! sporltui next          # skip from any shell or tmux binding
//! sporltui status
//! ```

mod auth;
mod configure;
mod playback;
mod session;
mod tui;

pub use auth::auth;
pub use auth::logout;
pub use configure::configure;
pub use playback::Transport;
pub use playback::status;
pub use playback::transport;
pub use tui::tui;
