use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use lagos_rent::agents::agent_router;
use lagos_rent::error::AppError;
use lagos_rent::listings::{listing_router, CatalogImporter, ImportError, ListingState};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::atomic::Ordering;
use tracing::info;

/// Replaces the catalog with an inline listing export.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogImportRequest {
    pub(crate) format: String,
    pub(crate) payload: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CatalogImportResponse {
    pub(crate) success: bool,
    pub(crate) fetch: u64,
    pub(crate) count: usize,
}

pub(crate) fn app_router(state: AppState, default_page_size: usize) -> Router {
    let listings = ListingState {
        catalog: state.catalog.clone(),
        default_page_size,
    };

    listing_router(listings)
        .merge(agent_router())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/catalog/import", post(catalog_import_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "listings": state.catalog.snapshot().len() })
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

pub(crate) async fn catalog_import_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<CatalogImportRequest>,
) -> Result<Json<CatalogImportResponse>, AppError> {
    let ticket = state.catalog.begin_fetch();
    let reader = Cursor::new(request.payload.into_bytes());
    let records = match request.format.trim().to_ascii_lowercase().as_str() {
        "json" => CatalogImporter::from_json_reader(reader)?,
        "csv" => CatalogImporter::from_csv_reader(reader)?,
        other => return Err(ImportError::UnsupportedFormat(other.to_string()).into()),
    };

    let snapshot = state.catalog.apply(ticket, records)?;
    info!(fetch = ticket.0, count = snapshot.len(), "catalog replaced from upload");

    Ok(Json(CatalogImportResponse {
        success: true,
        fetch: ticket.0,
        count: snapshot.len(),
    }))
}
