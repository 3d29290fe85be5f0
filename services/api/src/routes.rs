use crate::infra::AppState;
use aisle::error::AppError;
use aisle::marketplace::access::{navigation_router, OnboardingStatusSource, RouteAccessGuard};
use aisle::marketplace::directory::{
    directory_router, CatalogImporter, DirectoryFacets, DirectoryService,
};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogPreviewRequest {
    /// CSV export to validate, in the same layout the server loads at startup.
    pub(crate) csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogPreviewResponse {
    pub(crate) accepted: usize,
    pub(crate) rejected: Vec<RejectedRowView>,
    pub(crate) facets: DirectoryFacets,
}

#[derive(Debug, Serialize)]
pub(crate) struct RejectedRowView {
    pub(crate) index: usize,
    pub(crate) reason: String,
}

pub(crate) fn with_marketplace_routes<S>(
    directory: Arc<DirectoryService>,
    guard: Arc<RouteAccessGuard<S>>,
) -> axum::Router
where
    S: OnboardingStatusSource + 'static,
{
    directory_router(directory)
        .merge(navigation_router(guard))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/preview",
            axum::routing::post(catalog_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Dry-run a catalog CSV before it is deployed: report what would be
/// accepted, what would be rejected and why, and the filter facets the
/// directory would offer.
pub(crate) async fn catalog_preview_endpoint(
    Json(payload): Json<CatalogPreviewRequest>,
) -> Result<Json<CatalogPreviewResponse>, AppError> {
    let reader = Cursor::new(payload.csv.into_bytes());
    let catalog = CatalogImporter::from_reader(reader)?;

    let rejected = catalog
        .rejected()
        .iter()
        .map(|record| RejectedRowView {
            index: record.index,
            reason: record.rejection.to_string(),
        })
        .collect();

    Ok(Json(CatalogPreviewResponse {
        accepted: catalog.len(),
        rejected,
        facets: catalog.facets(),
    }))
}
