use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};

use crate::{error::PlayerError, types::CurrentlyPlaying, ui::PlayerControl};

pub type PollUpdate = Result<CurrentlyPlaying, PlayerError>;

/// Polls `currently_playing` every `interval`, starting immediately.
///
/// The stop signal is checked ahead of every tick, so no request is issued
/// once `stop` flips to `true`. The task also ends when the receiving side of
/// `tx` is gone.
pub fn spawn_poller<P: PlayerControl>(
    player: Arc<P>,
    interval: Duration,
    mut stop: watch::Receiver<bool>,
    tx: mpsc::Sender<PollUpdate>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow_and_update() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if *stop.borrow() {
                        break;
                    }
                    let update = player.currently_playing().await;
                    if tx.send(update).await.is_err() {
                        break;
                    }
                }
            }
        }
    })
}
