use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{Vendor, VendorSearch};
use crate::state::AppState;

// GET /api/vendors
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VendorSearch>,
) -> Json<Vec<Vendor>> {
    let results = state.catalog.search(&params);
    tracing::debug!(?params, found = results.len(), "vendor search");
    Json(results)
}

// GET /api/vendors/:vendor_id
pub async fn get_vendor(
    State(state): State<Arc<AppState>>,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vendor>, AppError> {
    state
        .catalog
        .get(&vendor_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("vendor {vendor_id}")))
}
