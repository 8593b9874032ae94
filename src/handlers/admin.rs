use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::check_auth;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, DashboardStats};
use crate::services::backend::BackendMode;
use crate::state::AppState;
use crate::store::BookingStore;

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let status_filter = match query.status.as_deref() {
        Some(s) => Some(
            BookingStatus::parse(s)
                .ok_or_else(|| AppError::BadRequest(format!("unknown status {s:?}")))?,
        ),
        None => None,
    };
    let limit = query.limit.unwrap_or(50);

    let bookings = state
        .bookings
        .list_all()
        .await?
        .into_iter()
        .filter(|b| status_filter.map_or(true, |s| b.status == s))
        .take(limit)
        .collect();

    Ok(Json(bookings))
}

// GET /api/admin/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardStats>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = state.bookings.list_all().await?;
    Ok(Json(DashboardStats::from_bookings(&bookings)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendResponse {
    mode: BackendMode,
    remote_configured: bool,
}

#[derive(Deserialize)]
pub struct BackendRequest {
    pub mode: BackendMode,
}

// GET /api/admin/backend
pub async fn get_backend(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BackendResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    Ok(Json(BackendResponse {
        mode: state.bookings.mode(),
        remote_configured: state.bookings.has_remote(),
    }))
}

// POST /api/admin/backend
pub async fn set_backend(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BackendRequest>,
) -> Result<Json<BackendResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    state.bookings.set_mode(body.mode)?;
    Ok(Json(BackendResponse {
        mode: state.bookings.mode(),
        remote_configured: state.bookings.has_remote(),
    }))
}
