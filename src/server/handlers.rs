//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::catalog::CatalogStore;
use crate::decimal::Money;
use crate::errors::{CalculatorError, CatalogError, SelectionError};
use crate::listing::{PriceTag, ProductSummary};
use crate::payments::{AmortizationSchedule, LoanInput, PaymentResult};
use crate::selection::{OfferQuote, ProductSelection};
use crate::types::Product;

/// Application state.
pub struct AppState {
    /// product collection
    pub catalog: Arc<dyn CatalogStore>,
    /// public base url for product links
    pub api_base_url: String,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error body, `{"message": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
}

/// Failures a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Unprocessable(CalculatorError),
    Internal(CatalogError),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::NotFound { .. } => ApiError::NotFound("Product not found".to_string()),
            other => ApiError::Internal(other),
        }
    }
}

impl From<SelectionError> for ApiError {
    fn from(e: SelectionError) -> Self {
        ApiError::NotFound(e.to_string())
    }
}

impl From<CalculatorError> for ApiError {
    fn from(e: CalculatorError) -> Self {
        ApiError::Unprocessable(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Unprocessable(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            ApiError::Internal(e) => {
                error!(error = %e, "catalog request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

/// List all products.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.catalog.list_products().await?;
    debug!(count = products.len(), "listed products");
    Ok(Json(products))
}

/// Get one product by slug.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.require_product(&slug).await?;
    Ok(Json(product))
}

/// Product cards for the list page.
pub async fn list_catalog(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let products = state.catalog.list_products().await?;
    let summaries = products
        .iter()
        .map(|p| ProductSummary::from_product(p, &state.api_base_url))
        .collect();
    Ok(Json(summaries))
}

/// Query parameters for EMI quotes.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteQuery {
    /// Variant sku. Defaults to the first variant.
    pub sku: Option<String>,
    /// EMI plan name. When present the response carries `selected`.
    pub plan: Option<String>,
}

/// EMI quote for one product page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuote {
    pub slug: String,
    pub sku: String,
    pub variant_label: String,
    pub price: PriceTag,
    pub plans: Vec<OfferQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<PaymentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cashback: Option<Money>,
}

async fn select(
    state: &AppState,
    slug: &str,
    sku: Option<&str>,
    plan: Option<&str>,
) -> Result<ProductSelection, ApiError> {
    let product = state.catalog.require_product(slug).await?;
    let mut selection = ProductSelection::new(product)?;
    if let Some(sku) = sku {
        selection.select_variant(sku)?;
    }
    if let Some(plan) = plan {
        selection.select_offer(plan)?;
    }
    Ok(selection)
}

/// Quote every EMI plan for a variant; `plan` selects one of them.
pub async fn get_emi_quote(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<ProductQuote>, ApiError> {
    let selection = select(&state, &slug, query.sku.as_deref(), query.plan.as_deref()).await?;

    let plans = selection.offer_quotes()?;
    let selected = selection.payment()?;
    let variant = selection.variant();
    debug!(%slug, sku = %variant.sku, plans = plans.len(), "quoted emi plans");

    Ok(Json(ProductQuote {
        slug,
        sku: variant.sku.clone(),
        variant_label: variant.attributes.label(),
        price: selection.price_tag(),
        plans,
        selected_plan: selection.offer().map(|o| o.name.clone()),
        selected,
        cashback: selection.cashback(),
    }))
}

/// Query parameters for an amortization schedule.
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Variant sku. Defaults to the first variant.
    pub sku: Option<String>,
    /// EMI plan name.
    pub plan: String,
}

/// Month-by-month schedule for one variant under one plan.
pub async fn get_emi_schedule(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<AmortizationSchedule>, ApiError> {
    let selection = select(&state, &slug, query.sku.as_deref(), Some(&query.plan)).await?;
    let offer = selection
        .offer()
        .ok_or_else(|| ApiError::NotFound(format!("unknown emi plan: {}", query.plan)))?;

    let input = LoanInput::for_offer(selection.variant().price, offer)?;
    let schedule = AmortizationSchedule::generate(&input)?;
    Ok(Json(schedule))
}
