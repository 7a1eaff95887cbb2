pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use crate::config::Config;
use crate::infra::factory::bootstrap_state;
use api::router::create_router;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_DIR: &str = "./logs";
const LOG_FILE: &str = "invitation-service.log";

/// Pretty console output plus a JSON file per day. Keep the guard alive for the
/// lifetime of the process or buffered file lines are lost.
pub fn init_logging() -> WorkerGuard {
    let (file_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    let json_file = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("info,invitation_backend=debug,sqlx=warn"));

    let console = tracing_subscriber::fmt::layer()
        .pretty()
        .with_target(false)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,invitation_backend=debug".into()));

    tracing_subscriber::registry().with(console).with(json_file).init();

    info!("Logging to console and {}/{}", LOG_DIR, LOG_FILE);
    guard
}

pub async fn run() {
    let _guard = init_logging();

    let config = Config::from_env();
    let router = create_router(Arc::new(bootstrap_state(&config).await));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("Failed to bind listener");

    info!(
        port = config.port,
        base_url = %config.app_base_url,
        development = config.is_development(),
        "Invitation service listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    info!("Invitation service stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
