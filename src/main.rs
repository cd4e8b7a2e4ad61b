mod config;
mod errors;
mod models;
mod params;
mod render;
mod server;
mod session;
mod state;

use crate::state::{AppState, SessionCommand};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    // Structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("vix_explained starting");

    // Load config
    let cfg = match config::AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("config error: {e}");
            std::process::exit(1);
        }
    };

    // Bounded command channel into the session task
    let (session_tx, session_rx) = mpsc::channel::<SessionCommand>(64);

    let app_state = AppState::new(cfg.clone(), session_tx.clone());

    // ── Spawn tasks ──

    // 1. Session task (sole owner of the parameter store)
    let session_state = app_state.clone();
    let session_handle = tokio::spawn(async move {
        session::run_session(session_state, session_rx).await;
    });

    // 2. Axum HTTP + WS server
    let app = server::router(app_state.clone());

    let addr = cfg.bind_addr();
    tracing::info!(
        dashboard = %cfg.dashboard_dir.display(),
        policy = %cfg.range_policy,
        samples = cfg.sweep_samples,
        "server listening on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("bind error: {e}");
            std::process::exit(1);
        });

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("server error: {e}");
    }

    let _ = session_tx.send(SessionCommand::Shutdown).await;
    let _ = session_handle.await;
    tracing::info!("vix_explained stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("ctrl-c received, shutting down");
}
