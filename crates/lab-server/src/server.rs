//! Server lifecycle: bind, serve until shutdown, close.
//!
//! A server moves through [`ServerState::Starting`] → [`ServerState::Listening`]
//! → [`ServerState::Closing`] → [`ServerState::Stopped`]. The transition into
//! `Closing` happens when the shutdown future passed to [`Server::serve`]
//! resolves: the listener stops accepting and in-flight requests run to
//! completion before the server reports `Stopped`.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::{Notify, oneshot, watch};
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::{Result, ServerError};

/// Lifecycle state of a [`Server`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Starting,
    Listening,
    Closing,
    Stopped,
}

/// A bound HTTP server that has not started serving yet.
pub struct Server {
    listener: TcpListener,
    app: Router,
    local_addr: SocketAddr,
    shutdown_timeout: Option<Duration>,
    state: watch::Sender<ServerState>,
}

impl Server {
    /// Binds the listening socket described by `config`.
    ///
    /// A bind failure is returned as [`ServerError::Bind`]; nothing is retried.
    pub async fn bind(config: &Config, app: Router) -> Result<Self> {
        let (state, _) = watch::channel(ServerState::Starting);

        let addr = config.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        state.send_replace(ServerState::Listening);
        tracing::info!(%local_addr, "listening");

        Ok(Self {
            listener,
            app,
            local_addr,
            shutdown_timeout: config.shutdown_timeout,
            state,
        })
    }

    /// Address the listener is actually bound to (useful with port `0`).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Subscribes to lifecycle state changes.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Serves requests until `shutdown` resolves, then drains in-flight requests.
    ///
    /// Without a configured shutdown timeout this waits for in-flight
    /// connections indefinitely. With one, it stops waiting once the timeout
    /// elapses after shutdown began.
    pub async fn serve<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            app,
            shutdown_timeout,
            state,
            ..
        } = self;
        let state = Arc::new(state);
        let closing = Arc::new(Notify::new());

        let signal = {
            let state = Arc::clone(&state);
            let closing = Arc::clone(&closing);
            async move {
                shutdown.await;
                state.send_replace(ServerState::Closing);
                tracing::info!("closing listener, waiting for in-flight requests");
                closing.notify_one();
            }
        };

        let serving = axum::serve(listener, app)
            .with_graceful_shutdown(signal)
            .into_future();

        let result = match shutdown_timeout {
            None => serving.await.map_err(ServerError::from),
            Some(grace) => {
                tokio::select! {
                    res = serving => res.map_err(ServerError::from),
                    () = async {
                        closing.notified().await;
                        tokio::time::sleep(grace).await;
                    } => {
                        tracing::warn!(
                            grace_ms = grace.as_millis() as u64,
                            "shutdown timeout elapsed with requests still in flight"
                        );
                        Ok(())
                    }
                }
            }
        };

        state.send_replace(ServerState::Stopped);
        tracing::info!("server closed");
        result
    }

    /// Runs the server on a background task and returns a handle to close it.
    pub fn spawn(self) -> ServerHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let local_addr = self.local_addr;
        let state = self.subscribe();

        // A dropped handle also counts as a shutdown request.
        let task = tokio::spawn(self.serve(async move {
            let _ = shutdown_rx.await;
        }));

        ServerHandle {
            local_addr,
            state,
            shutdown: Some(shutdown_tx),
            task,
        }
    }
}

/// Handle to a server running on a background task.
pub struct ServerHandle {
    local_addr: SocketAddr,
    state: watch::Receiver<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ServerState {
        *self.state.borrow()
    }

    /// Subscribes to lifecycle state changes.
    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.clone()
    }

    /// Starts graceful shutdown and waits until the server has stopped.
    pub async fn close(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.task.await?
    }
}

/// Resolves on SIGINT or SIGTERM, logging which one arrived.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, shutting down gracefully");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, shutting down gracefully");
        }
    }
}
