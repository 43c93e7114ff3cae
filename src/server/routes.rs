//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::catalog::CatalogStore;

use super::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `catalog` - The product collection
/// * `api_base_url` - Public base url used in product links
pub fn create_router(catalog: Arc<dyn CatalogStore>, api_base_url: impl Into<String>) -> Router {
    let state = Arc::new(AppState {
        catalog,
        api_base_url: api_base_url.into(),
    });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/catalog", get(handlers::list_catalog))
        .route("/api/products", get(handlers::list_products))
        .route("/api/products/:slug", get(handlers::get_product))
        .route("/api/products/:slug/emi", get(handlers::get_emi_quote))
        .route("/api/products/:slug/emi/schedule", get(handlers::get_emi_schedule))
        .with_state(state)
}
