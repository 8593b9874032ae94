//! Raw booking store contract for peer services. No actor checks happen here;
//! peers authenticate with the admin token and are trusted as a whole.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use super::bookings::{PaymentEventRequest, TransitionRequest};
use super::check_auth;
use crate::errors::AppError;
use crate::models::{Booking, BookingDraft};
use crate::state::AppState;
use crate::store::BookingStore;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub user_id: Option<String>,
    pub vendor_id: Option<String>,
}

// POST /api/store/bookings
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    let booking = state.bookings.create(draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/store/bookings
pub async fn list(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = match (query.user_id, query.vendor_id) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "filter by userId or vendorId, not both".to_string(),
            ))
        }
        (Some(user_id), None) => state.bookings.list_by_user(&user_id).await?,
        (None, Some(vendor_id)) => state.bookings.list_by_vendor(&vendor_id).await?,
        (None, None) => state.bookings.list_all().await?,
    };
    Ok(Json(bookings))
}

// GET /api/store/bookings/:id
pub async fn get(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.get(&id).await?))
}

// POST /api/store/bookings/:id/transition
pub async fn transition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.apply_transition(&id, body.operation).await?))
}

// POST /api/store/bookings/:id/payment
pub async fn payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<PaymentEventRequest>,
) -> Result<Json<Booking>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;
    Ok(Json(state.bookings.apply_payment(&id, body.event).await?))
}
