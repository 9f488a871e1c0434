use std::{net::SocketAddr, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use url::Url;

use crate::{
    api::{self, CallbackState},
    error::AuthError,
    warning,
};

/// How long a graceful shutdown may take before the listener task is aborted.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Local listener that receives the OAuth redirect.
///
/// It is bound to the host and port of the registered redirect URI and serves
/// only the redirect path. Call [`CallbackServer::shutdown`] to stop it and
/// release the port; dropping the handle also stops it.
pub struct CallbackServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl CallbackServer {
    pub async fn start(redirect: &Url, state: CallbackState) -> Result<Self, AuthError> {
        let host = redirect.host_str().unwrap_or("127.0.0.1");
        let port = redirect.port_or_known_default().unwrap_or(80);
        let bind_addr = format!("{host}:{port}");

        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AuthError::Bind {
                addr: bind_addr.clone(),
                source: e,
            })?;
        let addr = listener.local_addr().map_err(|e| AuthError::Bind {
            addr: bind_addr,
            source: e,
        })?;

        let app = Router::new()
            .route(redirect.path(), get(api::callback))
            .layer(Extension(state));

        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                warning!("Callback listener failed: {}", e);
            }
        });

        Ok(Self {
            addr,
            shutdown: Some(tx),
            task: Some(task),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops the listener and waits until the socket is released.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(mut task) = self.task.take() {
            if tokio::time::timeout(SHUTDOWN_GRACE, &mut task).await.is_err() {
                task.abort();
                let _ = task.await;
            }
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
