use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Seconds before the real expiry at which a token is already treated as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub expiry: DateTime<Utc>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl OAuthToken {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expiry
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// The persisted credential. At most one exists per user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: OAuthToken,
    pub client_id: String,
    pub last_refresh: DateTime<Utc>,
}

impl TokenRecord {
    pub fn new(token: OAuthToken, client_id: impl Into<String>) -> Self {
        Self {
            token,
            client_id: client_id.into(),
            last_refresh: Utc::now(),
        }
    }
}

/// Token endpoint response for both the code exchange and the refresh grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Converts the response into a token, keeping `previous_refresh` when the
    /// provider did not rotate the refresh token.
    ///
    /// Returns `None` if `expires_in` does not fit a timestamp.
    pub fn into_token(self, previous_refresh: Option<String>) -> Option<OAuthToken> {
        let expiry = Duration::try_seconds(self.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))?;

        Some(OAuthToken {
            access_token: self.access_token,
            token_type: self.token_type.unwrap_or_else(default_token_type),
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub name: String,
    #[serde(default)]
    pub uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: Album,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub uri: String,
}

/// Snapshot of `GET /me/player/currently-playing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<Track>,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub timestamp: i64,
}

impl CurrentlyPlaying {
    /// State reported when nothing is loaded on any device.
    pub fn idle() -> Self {
        Self::default()
    }
}

#[derive(Tabled)]
pub struct PlaybackTableRow {
    pub state: String,
    pub artists: String,
    pub title: String,
    pub album: String,
    pub progress: String,
}
