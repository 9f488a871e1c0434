use crate::{
    config::{self, Config},
    error, success, warning,
};

/// Stores client credentials and the redirect URI in `config.json`.
///
/// Only the file is read and written; values coming from the environment are
/// never copied into it.
pub async fn configure(
    client_id: Option<String>,
    client_secret: Option<String>,
    redirect_uri: Option<String>,
) {
    let path = config::config_path();
    let mut config = match Config::load_from(&path).await {
        Ok(config) => config,
        Err(e) => error!("Cannot read configuration. Err: {}", e),
    };

    if let Some(v) = client_id {
        config.client_id = v;
    }
    if let Some(v) = client_secret {
        config.client_secret = v;
    }
    if let Some(v) = redirect_uri {
        config.redirect_uri = v;
    }

    if let Err(e) = config.validate() {
        warning!("{}", e);
    }

    match config.save_to(&path).await {
        Ok(()) => success!("Configuration saved to {}.", path.display()),
        Err(e) => error!("Cannot save configuration. Err: {}", e),
    }
}
