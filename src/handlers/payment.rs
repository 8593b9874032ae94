use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{PaymentQuote, PaymentRequest};
use crate::state::AppState;

// POST /api/payment/calculate
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PaymentRequest>,
) -> Result<Json<PaymentQuote>, AppError> {
    let quote = state.quoter.quote(&req).await?;
    Ok(Json(PaymentQuote {
        breakdown: quote.breakdown.rounded(),
        source: quote.source,
    }))
}
