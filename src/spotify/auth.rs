use std::sync::Arc;

use reqwest::{Client, IntoUrl, Method, RequestBuilder};
use tokio::sync::{Mutex, oneshot};
use url::Url;

use crate::{
    api::CallbackState,
    config::Config,
    error::AuthError,
    info,
    management::CredentialStore,
    server::CallbackServer,
    types::{OAuthToken, TokenRecord, TokenResponse},
    utils, warning,
};

/// Scopes needed to read and control playback.
pub const SCOPES: [&str; 3] = [
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
];

/// Owns the OAuth token lifecycle: interactive login, the in-memory token,
/// refresh on expiry and persistence through the [`CredentialStore`].
///
/// The in-memory record is guarded by a mutex that stays locked across a
/// refresh, so concurrent callers never refresh twice or persist divergent
/// records. A second mutex allows a single pending login at a time.
pub struct AuthService {
    config: Config,
    store: CredentialStore,
    http: Client,
    token: Mutex<Option<TokenRecord>>,
    login: Mutex<()>,
}

/// Transient state of one interactive login. The `state` nonce lives in the
/// listener's [`CallbackState`].
struct PendingLogin {
    verifier: String,
    server: CallbackServer,
    outcome: oneshot::Receiver<Result<String, AuthError>>,
}

impl AuthService {
    pub fn new(config: Config) -> Self {
        let store = CredentialStore::new(config.token_file.clone());
        Self {
            config,
            store,
            http: Client::new(),
            token: Mutex::new(None),
            login: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `true` when an unexpired token for the configured client is
    /// held in memory or stored on disk. Never touches the network.
    pub async fn has_valid_credential(&self) -> bool {
        let mut token = self.token.lock().await;
        if token.is_none() {
            match self.load_record().await {
                Ok(record) => *token = record,
                Err(e) => {
                    warning!("Cannot load stored token: {}", e);
                    return false;
                }
            }
        }

        token.as_ref().is_some_and(|r| !r.token.is_expired())
    }

    /// Runs the interactive login, printing the authorization URL and trying
    /// to open it in the default browser.
    pub async fn authenticate(&self) -> Result<(), AuthError> {
        self.authenticate_with(present_authorization_url).await
    }

    /// Runs the interactive login and hands the authorization URL to `present`.
    ///
    /// # Flow
    ///
    /// 1. Fails with [`AuthError::LoginInProgress`] if another login is pending
    /// 2. Generates the `state` nonce and the PKCE verifier
    /// 3. Binds the callback listener on the redirect URI
    /// 4. Waits for the callback or the login timeout
    /// 5. Shuts the listener down, on every path
    /// 6. Exchanges the code and persists the new token
    ///
    /// # Errors
    ///
    /// - [`AuthError::Timeout`] - no callback within the login timeout
    /// - [`AuthError::StateMismatch`] - callback carried a foreign `state`
    /// - [`AuthError::NoCodeInResponse`] - callback without `code`
    /// - [`AuthError::AuthorizationDenied`] - user declined the request
    /// - [`AuthError::ExchangeFailed`] / [`AuthError::Network`] - code exchange failed
    /// - [`AuthError::Store`] - token could not be persisted
    pub async fn authenticate_with<F>(&self, present: F) -> Result<(), AuthError>
    where
        F: FnOnce(&Url),
    {
        let _login = self
            .login
            .try_lock()
            .map_err(|_| AuthError::LoginInProgress)?;

        let pending = self.start_login(present).await?;
        let PendingLogin {
            verifier,
            server,
            outcome,
        } = pending;

        let timeout = self.config.login_timeout();
        let result = tokio::time::timeout(timeout, outcome).await;
        server.shutdown().await;

        let code = match result {
            Err(_) => return Err(AuthError::Timeout(timeout)),
            Ok(Err(_)) => return Err(AuthError::ListenerClosed),
            Ok(Ok(outcome)) => outcome?,
        };

        let token = self.exchange_code(&code, &verifier).await?;
        let record = TokenRecord::new(token, self.config.client_id.clone());

        // a refresh in flight must finish before the new record lands
        let mut current = self.token.lock().await;
        self.store.save(&record).await?;
        *current = Some(record);
        Ok(())
    }

    /// Returns a valid access token, refreshing and persisting it first if it
    /// has expired.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] - no token, or expired without a refresh token
    /// - [`AuthError::RefreshFailed`] / [`AuthError::Network`] - refresh failed
    /// - [`AuthError::Store`] - token could not be loaded or persisted
    pub async fn get_credential(&self) -> Result<String, AuthError> {
        let mut token = self.token.lock().await;
        if token.is_none() {
            *token = self.load_record().await?;
        }

        let Some(record) = token.as_ref() else {
            return Err(AuthError::NotAuthenticated);
        };

        if !record.token.is_expired() {
            return Ok(record.token.access_token.clone());
        }

        let Some(refresh_token) = record.token.refresh_token.clone() else {
            return Err(AuthError::NotAuthenticated);
        };

        let refreshed = self.refresh(&refresh_token).await?;
        let record = TokenRecord::new(refreshed, self.config.client_id.clone());
        self.store.save(&record).await?;

        let access_token = record.token.access_token.clone();
        *token = Some(record);
        Ok(access_token)
    }

    /// Returns a request executor that attaches a valid bearer token to every
    /// request it builds. Fails early if no credential is available.
    pub async fn authorized_client(self: &Arc<Self>) -> Result<AuthorizedClient, AuthError> {
        self.get_credential().await?;
        Ok(AuthorizedClient {
            auth: Arc::clone(self),
        })
    }

    /// Forgets the current token in memory and on disk.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let mut token = self.token.lock().await;
        self.store.clear().await?;
        *token = None;
        Ok(())
    }

    pub fn authorization_url(&self, state: &str, code_challenge: &str) -> Result<Url, AuthError> {
        let scope = SCOPES.join(" ");
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("state", state),
                ("access_type", "offline"),
                ("code_challenge_method", "S256"),
                ("code_challenge", code_challenge),
            ],
        )?;
        Ok(url)
    }

    async fn start_login<F>(&self, present: F) -> Result<PendingLogin, AuthError>
    where
        F: FnOnce(&Url),
    {
        let redirect = self.config.redirect_url()?;
        let state = utils::generate_state();
        let verifier = utils::generate_code_verifier();
        let url = self.authorization_url(&state, &utils::generate_code_challenge(&verifier))?;

        let (tx, outcome) = oneshot::channel();
        let server = CallbackServer::start(&redirect, CallbackState::new(state, tx)).await?;
        present(&url);

        Ok(PendingLogin {
            verifier,
            server,
            outcome,
        })
    }

    async fn load_record(&self) -> Result<Option<TokenRecord>, AuthError> {
        let Some(record) = self.store.load().await? else {
            return Ok(None);
        };

        if record.client_id != self.config.client_id {
            warning!(
                "Stored token was issued to client {}, ignoring it.",
                record.client_id
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn exchange_code(&self, code: &str, verifier: &str) -> Result<OAuthToken, AuthError> {
        let res = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::ExchangeFailed { status, body });
        }

        let json: TokenResponse = res.json().await?;
        let expires_in = json.expires_in;
        json.into_token(None).ok_or_else(|| AuthError::ExchangeFailed {
            status,
            body: format!("expires_in out of range: {expires_in}"),
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<OAuthToken, AuthError> {
        let res = self
            .http
            .post(&self.config.token_url)
            .basic_auth(&self.config.client_id, Some(&self.config.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::RefreshFailed { status, body });
        }

        let json: TokenResponse = res.json().await?;
        let expires_in = json.expires_in;
        json.into_token(Some(refresh_token.to_string()))
            .ok_or_else(|| AuthError::RefreshFailed {
                status,
                body: format!("expires_in out of range: {expires_in}"),
            })
    }
}

/// Request executor returned by [`AuthService::authorized_client`].
///
/// Every request fetches the current credential first, so an expired token is
/// refreshed transparently between calls.
#[derive(Clone)]
pub struct AuthorizedClient {
    auth: Arc<AuthService>,
}

impl AuthorizedClient {
    pub async fn request<U: IntoUrl>(
        &self,
        method: Method,
        url: U,
    ) -> Result<RequestBuilder, AuthError> {
        let token = self.auth.get_credential().await?;
        Ok(self.auth.http.request(method, url).bearer_auth(token))
    }

    pub fn auth(&self) -> &Arc<AuthService> {
        &self.auth
    }
}

pub(crate) fn present_authorization_url(url: &Url) {
    info!(
        "Please open the following URL in your browser:\n{}",
        url.as_str()
    );
    if webbrowser::open(url.as_str()).is_err() {
        warning!("Failed to open browser, open the URL above manually.");
    }
}
