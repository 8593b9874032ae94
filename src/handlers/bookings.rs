use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;

use super::actor_from_headers;
use crate::errors::AppError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};
use crate::services::bookings::{self, BookingForm};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub operation: Transition,
}

#[derive(Deserialize)]
pub struct PaymentEventRequest {
    pub event: PaymentEvent,
}

// POST /api/bookings
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(draft): Json<BookingDraft>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let actor = actor_from_headers(&headers)?;
    let booking = bookings::submit(&state.bookings, &actor, draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// POST /api/vendors/:vendor_id/bookings
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(vendor_id): Path<String>,
    Json(form): Json<BookingForm>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let actor = actor_from_headers(&headers)?;
    let draft = bookings::draft_from_catalog(&state.catalog, &vendor_id, form, &actor)?;
    let booking = bookings::submit(&state.bookings, &actor, draft).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Booking>, AppError> {
    let actor = actor_from_headers(&headers)?;
    Ok(Json(bookings::view(&state.bookings, &actor, &id).await?))
}

// GET /api/users/:user_id/bookings
pub async fn list_for_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let actor = actor_from_headers(&headers)?;
    Ok(Json(
        bookings::list_for_user(&state.bookings, &actor, &user_id).await?,
    ))
}

// GET /api/vendors/:vendor_id/bookings
pub async fn list_for_vendor(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(vendor_id): Path<String>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let actor = actor_from_headers(&headers)?;
    Ok(Json(
        bookings::list_for_vendor(&state.bookings, &actor, &vendor_id).await?,
    ))
}

// POST /api/bookings/:id/transition
pub async fn transition(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<TransitionRequest>,
) -> Result<Json<Booking>, AppError> {
    let actor = actor_from_headers(&headers)?;
    let booking = bookings::transition(&state.bookings, &actor, &id, body.operation).await?;
    Ok(Json(booking))
}

// POST /api/bookings/:id/payment
pub async fn payment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<PaymentEventRequest>,
) -> Result<Json<Booking>, AppError> {
    let actor = actor_from_headers(&headers)?;
    let booking = bookings::record_payment(&state.bookings, &actor, &id, body.event).await?;
    Ok(Json(booking))
}
