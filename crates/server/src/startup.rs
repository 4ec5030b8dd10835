use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::AppConfig;
use service::students::InMemoryStudentStore;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::{observability, routes, state::AppState};

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router over a fresh, empty in-memory store.
pub fn build_app() -> Router {
    let store = InMemoryStudentStore::new();
    let state = AppState::new(store);
    routes::build_router(state, build_cors())
}

fn load_bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.bind_addr().parse()?)
}

/// Resolves on Ctrl+C; a failing signal handler never triggers shutdown.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    observability::init_metrics();
    let app = build_app();

    let addr = load_bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "student api listening");
    serve(listener, app, shutdown_signal()).await
}
