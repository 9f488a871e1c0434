use std::sync::Arc;

use crate::{cli::session, error, ui};

pub async fn tui() {
    let (auth, player) = session::player().await;
    let interval = auth.config().poll_interval();

    if let Err(e) = ui::run(Arc::new(player), interval).await {
        error!("Terminal UI failed: {}", e);
    }
}
