use crate::api::{create_router, AppState};
use scmview_core::{ConsoleConfig, ScmBackend};
use scmview_sdk::ScmClient;
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub struct ConsoleServer<B> {
    state: AppState<B>,
}

impl ConsoleServer<ScmClient> {
    /// Console backed by the REST backend named in `config`.
    pub fn from_config(config: ConsoleConfig) -> anyhow::Result<Self> {
        let client = ScmClient::from_config(&config)?;
        Ok(Self::new(config, client))
    }
}

impl<B: ScmBackend + 'static> ConsoleServer<B> {
    pub fn new(config: ConsoleConfig, backend: B) -> Self {
        Self {
            state: AppState::new(backend, config),
        }
    }

    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
    }

    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        let app = self.router();

        info!("Console listening on {}", addr);
        info!("Backend: {}", self.state.config.backend_url);
        info!("Widgets: {}", self.state.registry.names().join(", "));

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.state.config
    }
}
