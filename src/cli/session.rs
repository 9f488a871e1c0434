use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::Config,
    error, info,
    spotify::{AuthService, PlaybackClient, auth::present_authorization_url},
    success,
};

pub(crate) async fn auth_service() -> Arc<AuthService> {
    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => error!(
            "Cannot load configuration. Run sporltui configure or set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET.\n Error: {}",
            e
        ),
    };

    Arc::new(AuthService::new(config))
}

/// Makes sure a usable credential exists: a stored valid token, a successful
/// refresh, or a fresh interactive login.
pub(crate) async fn ensure_login(auth: &AuthService) {
    if auth.has_valid_credential().await {
        return;
    }

    if let Err(e) = auth.get_credential().await {
        info!("No usable token ({}). Starting authentication flow...", e);
        login(auth).await;
    }
}

pub(crate) async fn login(auth: &AuthService) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = auth
        .authenticate_with(|url| {
            present_authorization_url(url);
            pb.set_message("Waiting for authorization in the browser...");
            pb.enable_steady_tick(Duration::from_millis(100));
        })
        .await;

    pb.finish_and_clear();
    match result {
        Ok(()) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

pub(crate) async fn player() -> (Arc<AuthService>, PlaybackClient) {
    let auth = auth_service().await;
    ensure_login(&auth).await;

    let client = match auth.authorized_client().await {
        Ok(client) => client,
        Err(e) => error!("Failed to get token. Please run sporltui auth\n Error: {}", e),
    };

    (auth, PlaybackClient::new(client))
}
