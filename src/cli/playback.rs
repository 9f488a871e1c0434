use tabled::Table;

use crate::{
    cli::session,
    error, info, success,
    types::PlaybackTableRow,
    utils,
};

/// One-shot transport commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
}

pub async fn transport(command: Transport) {
    let (_auth, player) = session::player().await;

    let (result, done) = match command {
        Transport::Play => (player.play().await, "Playback started."),
        Transport::Pause => (player.pause().await, "Playback paused."),
        Transport::Toggle => (player.play_pause().await, "Playback toggled."),
        Transport::Next => (player.next().await, "Skipped to next track."),
        Transport::Previous => (player.previous().await, "Back to previous track."),
    };

    match result {
        Ok(()) => success!("{}", done),
        Err(e) => error!("Playback command failed: {}", e),
    }
}

pub async fn status() {
    let (_auth, player) = session::player().await;

    let current = match player.currently_playing().await {
        Ok(current) => current,
        Err(e) => error!("Failed to fetch playback state: {}", e),
    };

    let Some(track) = current.item.as_ref() else {
        info!("{}", utils::NOTHING_PLAYING);
        return;
    };

    let row = PlaybackTableRow {
        state: if current.is_playing {
            "playing".to_string()
        } else {
            "paused".to_string()
        },
        artists: utils::join_artists(track),
        title: track.name.clone(),
        album: track.album.name.clone(),
        progress: utils::format_progress(&current),
    };

    println!("{}", Table::new(vec![row]));
}
