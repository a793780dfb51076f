//! Application wiring: shared state construction and the HTTP listener.

use crate::config::Config;
use crate::state::AppState;
use crate::web::create_router;
use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;

pub struct App {
    config: Config,
    state: AppState,
}

impl App {
    pub fn new(config: Config) -> Self {
        let state = AppState::new(&config);
        Self { config, state }
    }

    /// Bind the listener and serve until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        let router = create_router(self.state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!(
            port = self.config.port,
            api_url = %self.config.api_url,
            snapshot_path = %self.config.snapshot_path.display(),
            cache_duration_secs = self.config.cache_duration,
            rate_limit_max = self.config.rate_limit_max,
            rate_limit_window_mins = self.config.rate_limit_window,
            "todoproxy listening"
        );

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
