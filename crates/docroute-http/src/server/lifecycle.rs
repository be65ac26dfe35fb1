//! Server lifecycle management - startup, shutdown, and signal handling

use super::server::BoundApp;
use crate::errors::{HttpError, HttpResult};
use docroute_openapi::OpenApiSpec;
use std::future::pending;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Handle to a running server
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    spec: Arc<OpenApiSpec>,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<io::Result<()>>,
    shutdown_timeout: Duration,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The document published by this server
    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    /// Stop accepting connections and wait for in-flight requests to finish
    pub async fn shutdown(mut self) -> HttpResult<()> {
        if let Some(trigger) = self.shutdown.take() {
            let _ = trigger.send(());
        }
        info!("Shutting down server on {}", self.local_addr);

        match tokio::time::timeout(self.shutdown_timeout, &mut self.task).await {
            Ok(result) => flatten_exit(result),
            Err(_) => {
                self.task.abort();
                Err(HttpError::shutdown(format!(
                    "In-flight requests did not finish within {:?}",
                    self.shutdown_timeout
                )))
            }
        }
    }

    /// Wait until the server stops on its own, e.g. after Ctrl+C
    pub async fn wait(self) -> HttpResult<()> {
        flatten_exit(self.task.await)
    }
}

fn flatten_exit(result: Result<io::Result<()>, tokio::task::JoinError>) -> HttpResult<()> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(HttpError::shutdown(format!("Server error: {}", e))),
        Err(e) => Err(HttpError::shutdown(format!("Server task failed: {}", e))),
    }
}

/// Bind a listener on `addr` and serve `app` in the background
pub(crate) async fn start_server<A>(
    addr: A,
    app: BoundApp,
    shutdown_timeout: Duration,
) -> HttpResult<ServerHandle>
where
    A: ToSocketAddrs,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| HttpError::startup(format!("Failed to bind listener: {}", e)))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| HttpError::startup(format!("Failed to read listener address: {}", e)))?;

    let BoundApp { router, spec } = app;
    let (trigger, requested) = oneshot::channel();

    let task = tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal(requested))
        .await
    });

    info!(
        operations = spec.operation_count(),
        "Server listening on {}", local_addr
    );

    Ok(ServerHandle {
        local_addr,
        spec,
        shutdown: Some(trigger),
        task,
        shutdown_timeout,
    })
}

/// Resolves on Ctrl+C, SIGTERM, or a request from [`ServerHandle::shutdown`]
async fn shutdown_signal(requested: oneshot::Receiver<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install terminate signal handler: {}", e);
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    // A dropped handle leaves the server running until a signal arrives.
    let requested = async {
        if requested.await.is_err() {
            pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down gracefully...");
        },
        _ = requested => {
            info!("Shutdown requested, draining connections...");
        },
    }
}
