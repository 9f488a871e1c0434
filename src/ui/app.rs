use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{error::PlayerError, types::CurrentlyPlaying, ui::PlayerControl, utils};

pub const SHORTCUTS: &str = "Shortcuts: p = play/pause, n = next, b = previous, q = quit";

/// User commands routed to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    PlayPause,
    Next,
    Previous,
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::PlayPause),
        KeyCode::Char('n') | KeyCode::Right => Some(Command::Next),
        KeyCode::Char('b') | KeyCode::Left => Some(Command::Previous),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Loading,
    Track(String),
    Error(String),
}

/// Everything the screen shows. Only the most recent poll result is kept.
#[derive(Debug)]
pub struct App {
    pub status: Status,
    pub current: Option<CurrentlyPlaying>,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            status: Status::Loading,
            current: None,
            should_quit: false,
        }
    }

    pub fn on_poll(&mut self, update: Result<CurrentlyPlaying, PlayerError>) {
        match update {
            Ok(current) => {
                self.status = Status::Track(utils::format_track_info(&current));
                self.current = Some(current);
            }
            Err(e) => self.show_error(&e),
        }
    }

    pub fn show_error(&mut self, err: &PlayerError) {
        self.status = Status::Error(format!("Error: {err}"));
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|c| c.is_playing)
    }

    /// Track progress in `0.0..=1.0`, if a track with a known length is loaded.
    pub fn progress_ratio(&self) -> Option<f64> {
        let current = self.current.as_ref()?;
        let duration = current.item.as_ref()?.duration_ms;
        if duration == 0 {
            return None;
        }
        let progress = current.progress_ms.unwrap_or(0).min(duration);
        Some(progress as f64 / duration as f64)
    }

    /// Runs `command` against the player. Failures are shown inline.
    pub async fn dispatch<P: PlayerControl>(&mut self, player: &P, command: Command) {
        let result = match command {
            Command::Quit => {
                self.should_quit = true;
                return;
            }
            Command::PlayPause => player.play_pause().await,
            Command::Next => player.next().await,
            Command::Previous => player.previous().await,
        };

        if let Err(e) = result {
            self.show_error(&e);
        }
    }
}
