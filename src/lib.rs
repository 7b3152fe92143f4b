pub mod api;
pub mod background;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::api::router::create_router;
use crate::background::start_background_worker;
use crate::config::Config;
use crate::infra::factory::bootstrap_state;

const LOG_DIR: &str = "./logs";
const LOG_FILE: &str = "club-service.log";

/// Pretty logs on stdout, JSON lines in a daily-rotated file. The returned
/// guard must stay alive for the whole process or buffered lines are lost.
pub fn init_logging() -> WorkerGuard {
    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(LOG_DIR, LOG_FILE));

    let stdout_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(false)
                .with_filter(stdout_filter),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(file_writer)
                .with_filter(EnvFilter::new("info,club_backend=debug")),
        )
        .init();

    info!("Logging initialized, JSON log file under {}", LOG_DIR);
    guard
}

pub async fn run() {
    let _log_guard = init_logging();

    let config = Config::from_env();
    let port = config.port;
    let state = Arc::new(bootstrap_state(&config).await);

    tokio::spawn(start_background_worker(state.clone()));

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("cannot bind port {}: {}", port, e));

    info!("Club service listening on port {}", port);
    axum::serve(listener, app).await.unwrap();
}
