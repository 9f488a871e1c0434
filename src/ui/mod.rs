//! # Terminal UI
//!
//! A fixed-layout now-playing screen: track line, progress bar, three transport
//! buttons and a shortcut hint.
//!
//! Three activities run side by side:
//!
//! - the poll task ([`poll::spawn_poller`]) asks the player for the current
//!   track every poll interval and sends the result over a channel,
//! - a reader thread forwards terminal key presses,
//! - the main loop redraws, applies poll results and dispatches commands.
//!
//! The UI only knows the player through [`PlayerControl`]. Errors from any
//! call are rendered in place of the track line and never end the loop.
//! Quitting (`q`, Esc, Ctrl-C, SIGINT or SIGTERM) stops the poll task
//! before its next tick and restores the terminal.

pub mod app;
pub mod poll;
pub mod render;

use std::{
    future::Future,
    io::{self, Stdout},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread,
    time::Duration,
};

use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyEvent, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use tokio::sync::{mpsc, watch};

use crate::{Res, error::PlayerError, types::CurrentlyPlaying};

pub use app::{App, Command};

/// Playback operations the UI needs.
pub trait PlayerControl: Send + Sync + 'static {
    fn currently_playing(
        &self,
    ) -> impl Future<Output = Result<CurrentlyPlaying, PlayerError>> + Send;
    fn play_pause(&self) -> impl Future<Output = Result<(), PlayerError>> + Send;
    fn next(&self) -> impl Future<Output = Result<(), PlayerError>> + Send;
    fn previous(&self) -> impl Future<Output = Result<(), PlayerError>> + Send;
}

type Term = Terminal<CrosstermBackend<Stdout>>;

const KEY_POLL: Duration = Duration::from_millis(100);

/// Runs the UI until the user quits.
pub async fn run<P: PlayerControl>(player: Arc<P>, poll_interval: Duration) -> Res<()> {
    let mut terminal = setup_terminal()?;

    let (stop_tx, stop_rx) = watch::channel(false);
    let (poll_tx, poll_rx) = mpsc::channel(8);
    let (key_tx, key_rx) = mpsc::channel(32);
    let reader_stop = Arc::new(AtomicBool::new(false));

    let poller = poll::spawn_poller(Arc::clone(&player), poll_interval, stop_rx, poll_tx);
    let reader = spawn_key_reader(key_tx, Arc::clone(&reader_stop));

    let result = event_loop(&mut terminal, player.as_ref(), poll_rx, key_rx).await;

    let _ = stop_tx.send(true);
    reader_stop.store(true, Ordering::Relaxed);
    let _ = poller.await;
    let _ = tokio::task::spawn_blocking(move || reader.join()).await;

    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop<P: PlayerControl>(
    terminal: &mut Term,
    player: &P,
    mut poll_rx: mpsc::Receiver<poll::PollUpdate>,
    mut key_rx: mpsc::Receiver<KeyEvent>,
) -> Res<()> {
    let mut app = App::new();
    let signal = shutdown_signal()?;
    tokio::pin!(signal);

    while !app.should_quit {
        terminal.draw(|frame| render::draw(frame, &app))?;

        tokio::select! {
            _ = &mut signal => app.should_quit = true,
            Some(update) = poll_rx.recv() => app.on_poll(update),
            Some(key) = key_rx.recv() => {
                if let Some(command) = app::command_for_key(key) {
                    app.dispatch(player, command).await;
                }
            }
            else => break,
        }
    }

    Ok(())
}

/// Resolves on the first SIGINT or SIGTERM. Both handlers are installed
/// before this returns, so no signal sent afterwards is missed.
#[cfg(unix)]
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()> + Send> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => {}
            _ = terminate.recv() => {}
        }
    })
}

/// Resolves on Ctrl-C.
#[cfg(not(unix))]
pub fn shutdown_signal() -> io::Result<impl Future<Output = ()> + Send> {
    Ok(async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}

fn spawn_key_reader(tx: mpsc::Sender<KeyEvent>, stop: Arc<AtomicBool>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(KEY_POLL) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx.blocking_send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        }
    })
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
