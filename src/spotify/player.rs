use reqwest::{Method, Response, StatusCode, header::CONTENT_LENGTH};

use crate::{
    error::PlayerError,
    spotify::auth::AuthorizedClient,
    types::CurrentlyPlaying,
    ui::PlayerControl,
    utils,
};

/// Thin REST client for the Spotify player endpoints.
///
/// Every call goes through an [`AuthorizedClient`], which supplies a valid
/// bearer token and refreshes it when needed. Non-2xx answers become
/// [`PlayerError::RemoteApi`] carrying the status and the response body.
#[derive(Clone)]
pub struct PlaybackClient {
    client: AuthorizedClient,
    api_url: String,
}

impl PlaybackClient {
    pub fn new(client: AuthorizedClient) -> Self {
        let api_url = client.auth().config().api_url.trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Fetches the current playback state. `204 No Content` means nothing is
    /// loaded and maps to [`CurrentlyPlaying::idle`].
    pub async fn currently_playing(&self) -> Result<CurrentlyPlaying, PlayerError> {
        let res = self
            .client
            .request(Method::GET, self.endpoint("me/player/currently-playing"))
            .await?
            .send()
            .await?;

        if res.status() == StatusCode::NO_CONTENT {
            return Ok(CurrentlyPlaying::idle());
        }

        let res = check_status(res).await?;
        Ok(res.json().await?)
    }

    pub async fn play(&self) -> Result<(), PlayerError> {
        self.command(Method::PUT, "me/player/play").await
    }

    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.command(Method::PUT, "me/player/pause").await
    }

    pub async fn next(&self) -> Result<(), PlayerError> {
        self.command(Method::POST, "me/player/next").await
    }

    pub async fn previous(&self) -> Result<(), PlayerError> {
        self.command(Method::POST, "me/player/previous").await
    }

    /// Pauses when playing, resumes otherwise.
    pub async fn play_pause(&self) -> Result<(), PlayerError> {
        if self.currently_playing().await?.is_playing {
            self.pause().await
        } else {
            self.play().await
        }
    }

    pub async fn format_track_info(&self) -> Result<String, PlayerError> {
        let current = self.currently_playing().await?;
        Ok(utils::format_track_info(&current))
    }

    async fn command(&self, method: Method, path: &str) -> Result<(), PlayerError> {
        let res = self
            .client
            .request(method, self.endpoint(path))
            .await?
            .header(CONTENT_LENGTH, 0)
            .send()
            .await?;

        check_status(res).await?;
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }
}

async fn check_status(res: Response) -> Result<Response, PlayerError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    Err(PlayerError::RemoteApi { status, body })
}

impl PlayerControl for PlaybackClient {
    async fn currently_playing(&self) -> Result<CurrentlyPlaying, PlayerError> {
        PlaybackClient::currently_playing(self).await
    }

    async fn play_pause(&self) -> Result<(), PlayerError> {
        PlaybackClient::play_pause(self).await
    }

    async fn next(&self) -> Result<(), PlayerError> {
        PlaybackClient::next(self).await
    }

    async fn previous(&self) -> Result<(), PlayerError> {
        PlaybackClient::previous(self).await
    }
}
