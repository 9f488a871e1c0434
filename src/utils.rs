use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, RngCore, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{CurrentlyPlaying, Track};

/// Number of random bytes behind an OAuth `state` value.
pub const STATE_BYTES: usize = 32;

pub const NOTHING_PLAYING: &str = "No track currently playing";

pub fn generate_state() -> String {
    let mut bytes = [0u8; STATE_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration_ms(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn join_artists(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_progress(current: &CurrentlyPlaying) -> String {
    let duration = current.item.as_ref().map(|t| t.duration_ms).unwrap_or(0);
    format!(
        "{}/{}",
        format_duration_ms(current.progress_ms.unwrap_or(0)),
        format_duration_ms(duration)
    )
}

/// One-line summary of the playback state: `artists - title (m:ss/m:ss)`.
///
/// Paused tracks are prefixed with `Paused:`. Without a loaded track the
/// result is [`NOTHING_PLAYING`].
pub fn format_track_info(current: &CurrentlyPlaying) -> String {
    let Some(track) = current.item.as_ref().filter(|t| !t.name.is_empty()) else {
        return NOTHING_PLAYING.to_string();
    };

    let line = format!(
        "{} - {} ({})",
        join_artists(track),
        track.name,
        format_progress(current)
    );

    if current.is_playing {
        line
    } else {
        format!("Paused: {line}")
    }
}
