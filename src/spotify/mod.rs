//! # Spotify Integration Module
//!
//! This module is the integration layer between sporltui and Spotify's
//! accounts service and Web API. It owns the credential and everything that
//! needs one.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, UI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization-code flow, refresh)
//!     └── Player (currently playing, transport commands)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify accounts service / Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - [`AuthService`] implements the OAuth 2.0 authorization-code flow:
//! - **Interactive Login**: Prints the authorization URL, opens the browser and
//!   waits for the redirect on a transient local listener
//! - **State Verification**: A random `state` nonce binds each request to its
//!   callback; a mismatch aborts the login
//! - **PKCE**: An S256 code challenge accompanies the client secret
//! - **Token Lifecycle**: Lazy loading from disk, refresh on expiry and
//!   persistence before the refreshed token is handed out
//! - **Authorized Requests**: [`AuthorizedClient`] attaches the bearer token
//!   to every request
//!
//! ### Player Module
//!
//! [`player`] - [`PlaybackClient`] wraps the player endpoints:
//! - `GET /me/player/currently-playing` (204 means nothing is loaded)
//! - `PUT /me/player/play`, `PUT /me/player/pause`
//! - `POST /me/player/next`, `POST /me/player/previous`
//!
//! ## Error Handling
//!
//! Nothing here retries. Network failures, rejected codes or refresh tokens and
//! non-2xx API answers are returned as typed errors ([`crate::error::AuthError`],
//! [`crate::error::PlayerError`]) and the caller decides what to do with them.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sporltui::{config::Config, spotify::{AuthService, PlaybackClient}};
//!
//! let auth = Arc::new(AuthService::new(Config::load().await?));
//! let player = PlaybackClient::new(auth.authorized_client().await?);
//! println!("{}", player.format_track_info().await?);
//! ```

pub mod auth;
pub mod player;

pub use auth::AuthService;
pub use auth::AuthorizedClient;
pub use player::PlaybackClient;
