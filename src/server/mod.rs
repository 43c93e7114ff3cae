//! REST server for the product catalog and EMI quotes.

pub mod handlers;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::catalog::CatalogStore;
use crate::config::AppConfig;

/// The catalog server.
pub struct Server {
    config: AppConfig,
    catalog: Arc<dyn CatalogStore>,
}

impl Server {
    pub fn new(config: AppConfig, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { config, catalog }
    }

    /// Build the router with CORS and request tracing.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.catalog.clone(), self.config.api_base_url.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(&self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr()?;
        info!("Starting catalog server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
