use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tokio::sync::{Mutex, oneshot};

use crate::error::AuthError;

pub type CallbackOutcome = Result<String, AuthError>;

/// Shared state of one pending login: the expected `state` value and the
/// single-fire channel back to the waiting login flow.
#[derive(Clone)]
pub struct CallbackState {
    expected_state: Arc<str>,
    outcome: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
}

impl CallbackState {
    pub fn new(expected_state: impl Into<Arc<str>>, tx: oneshot::Sender<CallbackOutcome>) -> Self {
        Self {
            expected_state: expected_state.into(),
            outcome: Arc::new(Mutex::new(Some(tx))),
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<CallbackState>,
) -> impl IntoResponse {
    let mut outcome = shared_state.outcome.lock().await;
    let Some(tx) = outcome.take() else {
        return (
            StatusCode::CONFLICT,
            Html("<h4>This login attempt has already finished.</h4>"),
        );
    };

    let (result, response) = match verify(&params, &shared_state.expected_state) {
        Ok(code) => (
            Ok(code),
            (
                StatusCode::OK,
                Html(
                    "<h2>Authentication successful.</h2><p>You can now close this window.</p>",
                ),
            ),
        ),
        Err(e) => {
            let page = match &e {
                AuthError::StateMismatch => "<h4>State mismatch.</h4>",
                AuthError::AuthorizationDenied(_) => "<h4>Authorization denied.</h4>",
                _ => "<h4>No code in response.</h4>",
            };
            (Err(e), (StatusCode::BAD_REQUEST, Html(page)))
        }
    };

    // the login flow may already have timed out and dropped the receiver
    let _ = tx.send(result);
    response
}

fn verify(params: &HashMap<String, String>, expected_state: &str) -> CallbackOutcome {
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(AuthError::StateMismatch);
    }

    if let Some(error) = params.get("error") {
        return Err(AuthError::AuthorizationDenied(error.clone()));
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(code.clone()),
        _ => Err(AuthError::NoCodeInResponse),
    }
}
