pub mod http;
pub mod routes;

use crate::core::catalog::Catalog;
use crate::utils::error::Result;
use self::http::{ReadOutcome, Request, Response, Status};
use self::routes::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

struct AppState {
    catalog: Catalog,
    router: Router,
    read_timeout: Duration,
}

pub struct Server {
    listener: TcpListener,
    state: AppState,
    drain_timeout: Duration,
}

impl Server {
    pub async fn bind(addr: SocketAddr, catalog: Catalog) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let router = Router::new()?;
        Ok(Self {
            listener,
            state: AppState {
                catalog,
                router,
                read_timeout: DEFAULT_READ_TIMEOUT,
            },
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        })
    }

    /// How long a client may take to send its request head before getting a 408.
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.state.read_timeout = timeout;
        self
    }

    /// How long shutdown waits for open connections before aborting them.
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until Ctrl-C or SIGTERM.
    pub async fn serve(self) -> Result<()> {
        let shutdown = shutdown_signal()?;
        self.serve_with_shutdown(shutdown).await
    }

    /// Serves until `shutdown` resolves, then drains open connections for at
    /// most the drain timeout.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send,
    {
        tracing::info!("🚀 Listening on http://{}", self.local_addr()?);

        let Server {
            listener,
            state,
            drain_timeout,
        } = self;
        let state = Arc::new(state);
        let mut connections = JoinSet::new();
        tokio::pin!(shutdown);

        // 接受連線，每個連線一個任務，直到收到關閉訊號
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let state = Arc::clone(&state);
                        connections.spawn(async move {
                            if let Err(e) = handle_connection(stream, &state).await {
                                tracing::debug!("Connection from {} failed: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => tracing::warn!("Failed to accept connection: {}", e),
                },
                Some(_) = connections.join_next(), if !connections.is_empty() => {}
            }
        }

        // 停止接受新連線，再等待進行中的請求
        drop(listener);
        tracing::info!(
            "🛑 Shutting down, waiting for {} open connections",
            connections.len()
        );

        let drained = tokio::time::timeout(drain_timeout, async {
            while connections.join_next().await.is_some() {}
        })
        .await;

        // 逾時仍未結束的連線直接中止
        if drained.is_err() {
            tracing::warn!(
                "⚠️ {} connections still open after {:?}, aborting them",
                connections.len(),
                drain_timeout
            );
            connections.shutdown().await;
        }

        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix. The SIGTERM handler is installed
/// when this is called, not when the future is first polled.
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send> {
    #[cfg(unix)]
    let mut terminate =
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    Ok(async move {
        #[cfg(unix)]
        let terminate = async move {
            terminate.recv().await;
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => tracing::info!("Received Ctrl-C"),
                Err(e) => tracing::error!("Failed to listen for Ctrl-C: {}", e),
            },
            _ = terminate => tracing::info!("Received SIGTERM"),
        }
    })
}

async fn handle_connection(mut stream: TcpStream, state: &AppState) -> std::io::Result<()> {
    let started = Instant::now();

    // 讀取請求標頭，逾時則回應 408
    let outcome = match tokio::time::timeout(state.read_timeout, http::read_head(&mut stream)).await
    {
        Ok(outcome) => outcome?,
        Err(_) => {
            let response =
                Response::error(Status::RequestTimeout, "timeout", "request head not received");
            stream.write_all(&response.to_bytes()).await?;
            stream.shutdown().await?;
            tracing::debug!("Request head timed out after {:?}", state.read_timeout);
            return Ok(());
        }
    };

    let (response, line) = match outcome {
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::TooLarge => (
            Response::error(Status::BadRequest, "bad_request", "request head too large"),
            None,
        ),
        ReadOutcome::Malformed => (
            Response::error(Status::BadRequest, "bad_request", "malformed request"),
            None,
        ),
        ReadOutcome::Head(head) => match Request::parse(&head) {
            Some(request) => (
                state.router.handle(&state.catalog, &request),
                Some(format!("{} {}", request.method, request.path)),
            ),
            None => (
                Response::error(Status::BadRequest, "bad_request", "malformed request line"),
                None,
            ),
        },
    };

    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;

    tracing::info!(
        "{} -> {} in {:?}",
        line.as_deref().unwrap_or("<invalid request>"),
        response.status.code(),
        started.elapsed()
    );
    Ok(())
}
