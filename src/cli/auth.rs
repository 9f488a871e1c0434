use crate::{cli::session, error, success};

pub async fn auth(force: bool) {
    let auth = session::auth_service().await;
    if !force && auth.has_valid_credential().await {
        success!("Already authenticated. Use --force to log in again.");
        return;
    }

    session::login(&auth).await;
}

pub async fn logout() {
    let auth = session::auth_service().await;
    match auth.logout().await {
        Ok(()) => success!(
            "Removed stored token {}.",
            auth.config().token_file.display()
        ),
        Err(e) => error!("Failed to remove stored token: {}", e),
    }
}
