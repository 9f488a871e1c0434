//! # API Module
//!
//! HTTP handlers for the transient listener that receives the OAuth redirect
//! from Spotify's authorization server.
//!
//! ## Endpoints
//!
//! - [`callback`] - Verifies the `state` parameter against the pending login,
//!   extracts the authorization `code` and hands the result to the waiting
//!   login flow through a one-shot channel. Answers `200` with a short success
//!   page, or `400` on a state mismatch, a provider `error` or a missing code.
//!
//! The handler never talks to Spotify itself. The code exchange happens in
//! [`crate::spotify::AuthService`] after the listener has been shut down.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use sporltui::api::{CallbackState, callback};
//!
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .layer(Extension(CallbackState::new("nonce", tx)));
//! ```

mod callback;

pub use callback::CallbackOutcome;
pub use callback::CallbackState;
pub use callback::callback;
