use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use y2k38_core::TargetInstant;
use y2k38_page::{CONTENT_TYPE, Variant, render};

/// Serves one pre-rendered countdown document for every request.
#[derive(Clone)]
pub struct PageServer {
    variant: Variant,
    page: Bytes,
}

impl PageServer {
    /// The target is fixed for the process, so the document is rendered once here.
    pub fn new(variant: Variant, target: TargetInstant) -> Self {
        let page = Bytes::from(render(variant, target));
        Self { variant, page }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// No routes: the fallback answers any method on any path.
    pub fn router(&self) -> Router {
        Router::new()
            .fallback(serve_page)
            .with_state(self.page.clone())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn bind(self, addr: SocketAddr) -> Result<RunningServer> {
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        let local_addr = listener
            .local_addr()
            .context("failed to read bound address")?;

        let shutdown = CancellationToken::new();
        let signal = shutdown.clone();
        let app = self.router();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { signal.cancelled().await })
                .await
        });

        tracing::info!(
            "serving {} countdown page on http://{local_addr}",
            self.variant()
        );
        Ok(RunningServer {
            local_addr,
            shutdown,
            handle,
        })
    }
}

async fn serve_page(State(page): State<Bytes>) -> impl IntoResponse {
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], page)
}

pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    handle: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Cancelling this token starts a graceful shutdown.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Wait for the server to finish, after the token has been cancelled.
    pub async fn wait(self) -> Result<()> {
        self.handle
            .await
            .context("server task panicked")?
            .context("server error")?;
        tracing::info!("server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received ctrl-c"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
