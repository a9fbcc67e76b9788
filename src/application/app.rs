use crate::config::Settings;
use crate::proxy::routes::{self, SharedChecker};
use crate::proxy::ProxyCheckService;
use crate::Result;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Main application struct that coordinates all components
pub struct Application {
    settings: Settings,
    listener: TcpListener,
}

impl Application {
    /// Bind the configured address
    #[instrument(skip(settings), fields(address = %settings.bind_address()))]
    pub async fn build(settings: Settings) -> Result<Self> {
        let listener = TcpListener::bind(settings.bind_address()).await?;
        Ok(Self { settings, listener })
    }

    /// Use an already bound listener, e.g. one on port 0 in tests
    pub fn with_listener(settings: Settings, listener: TcpListener) -> Self {
        Self { settings, listener }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn run(self) -> Result<()> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` completes, letting in-flight checks finish
    #[instrument(skip_all)]
    pub async fn run_until<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let checker: SharedChecker = Arc::new(ProxyCheckService::new(self.settings.proxy_check()));
        let app = routes::router(checker);

        info!(
            address = %self.local_addr()?,
            environment = %self.settings.application.environment,
            fallback_proxy_configured = self.settings.proxy.http_proxy.is_some(),
            "Network checker listening"
        );

        axum::serve(self.listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Network checker stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
