use axum::Router;
use groupsync_core::{
    GroupSyncRepositories, GroupSyncService, create_repositories, in_memory_service,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{Config, StoreBackend},
    http::server::{ApiError, AppState, app_router},
};

pub struct App {
    config: Config,
    router: Router,
    /// Present for the Mongo backend so its client can be closed on shutdown.
    repositories: Option<GroupSyncRepositories>,
}

impl App {
    pub async fn new(config: Config) -> Result<Self, ApiError> {
        let (router, repositories) = match config.backend {
            StoreBackend::Mongo => {
                let repositories = create_repositories(config.endpoints())
                    .await
                    .map_err(|e| ApiError::StartupError(e.to_string()))?;
                let service: GroupSyncService = repositories.clone().into();
                (app_router(AppState::new(service)), Some(repositories))
            }
            StoreBackend::Memory => {
                info!("Using the in-memory store; state is lost on shutdown");
                (app_router(AppState::new(in_memory_service())), None)
            }
        };

        Ok(Self {
            config,
            router,
            repositories,
        })
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), ApiError> {
        let addr = format!("0.0.0.0:{}", self.config.server.api_port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ApiError::StartupError(format!("failed to bind {addr}: {e}")))?;

        info!(address = %addr, environment = ?self.config.environment, "API listening");
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ApiError::StartupError(e.to_string()))?;

        if let Some(repositories) = self.repositories {
            repositories.shutdown().await;
            info!("MongoDB client closed");
        }
        info!("API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
