use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::catalog::{CatalogError, PropertyCatalog};
use super::domain::{PropertyId, PropertyRecord};
use super::query::{ListingQueryParams, QueryPage};
use crate::error::AppError;

/// Shared state for the listing endpoints.
#[derive(Clone)]
pub struct ListingState {
    pub catalog: Arc<PropertyCatalog>,
    pub default_page_size: usize,
}

/// Pagination block mirroring the marketplace API envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEnvelope {
    pub success: bool,
    pub data: Vec<PropertyRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl From<QueryPage> for ListingEnvelope {
    fn from(page: QueryPage) -> Self {
        Self {
            success: true,
            pagination: Some(Pagination {
                page: page.page,
                limit: page.page_size,
                total: page.total,
                pages: page.pages,
            }),
            data: page.items,
        }
    }
}

pub fn listing_router(state: ListingState) -> Router {
    Router::new()
        .route("/api/v1/properties", get(search_handler))
        .route("/api/v1/properties/featured", get(featured_handler))
        .route("/api/v1/properties/:property_id", get(detail_handler))
        .with_state(state)
}

pub(crate) async fn search_handler(
    State(state): State<ListingState>,
    Query(params): Query<ListingQueryParams>,
) -> Json<ListingEnvelope> {
    let spec = params.into_filter(state.default_page_size);
    let page = state.catalog.snapshot().query(&spec);
    Json(page.into())
}

pub(crate) async fn featured_handler(State(state): State<ListingState>) -> Json<ListingEnvelope> {
    Json(ListingEnvelope {
        success: true,
        data: state.catalog.snapshot().featured(),
        pagination: None,
    })
}

pub(crate) async fn detail_handler(
    State(state): State<ListingState>,
    Path(property_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = PropertyId(property_id);
    let snapshot = state.catalog.snapshot();
    let record = snapshot
        .get(&id)
        .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
    Ok(Json(json!({ "success": true, "data": record })))
}
