pub mod admin;
pub mod bookings;
pub mod health;
pub mod payment;
pub mod store_api;
pub mod vendors;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::errors::AppError;
use crate::models::{Actor, Role};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/payment/calculate", post(payment::calculate))
        .route("/api/vendors", get(vendors::search))
        .route("/api/vendors/:vendor_id", get(vendors::get_vendor))
        .route(
            "/api/vendors/:vendor_id/bookings",
            get(bookings::list_for_vendor).post(bookings::submit_form),
        )
        .route("/api/users/:user_id/bookings", get(bookings::list_for_user))
        .route("/api/bookings", post(bookings::create))
        .route("/api/bookings/:id", get(bookings::get_booking))
        .route("/api/bookings/:id/transition", post(bookings::transition))
        .route("/api/bookings/:id/payment", post(bookings::payment))
        .route("/api/admin/bookings", get(admin::get_bookings))
        .route("/api/admin/stats", get(admin::get_stats))
        .route(
            "/api/admin/backend",
            get(admin::get_backend).post(admin::set_backend),
        )
        .route(
            "/api/store/bookings",
            get(store_api::list).post(store_api::create),
        )
        .route("/api/store/bookings/:id", get(store_api::get))
        .route(
            "/api/store/bookings/:id/transition",
            post(store_api::transition),
        )
        .route("/api/store/bookings/:id/payment", post(store_api::payment))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token.is_empty() || token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

/// Identity forwarded by the authentication layer in front of this service.
fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, AppError> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    let id = header("x-actor-id").ok_or(AppError::Unauthorized)?;
    let role = header("x-actor-role")
        .and_then(Role::parse)
        .ok_or(AppError::Unauthorized)?;

    Ok(Actor::new(id, role))
}
