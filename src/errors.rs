use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("invalid booking draft: {0}")]
    InvalidDraft(String),

    #[error("cannot {operation} a booking that is {from}")]
    InvalidTransition { from: String, operation: String },

    #[error("booking not found: {0}")]
    NotFound(String),

    #[error("remote booking service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl BookingError {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::InvalidDraft(_) => "invalid_draft",
            BookingError::InvalidTransition { .. } => "invalid_transition",
            BookingError::NotFound(_) => "not_found",
            BookingError::RemoteUnavailable(_) => "remote_unavailable",
            BookingError::Forbidden(_) => "forbidden",
            BookingError::Storage(_) => "storage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("payment service unavailable: {0}")]
    RemoteUnavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl AppError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Booking(e) => {
                let status = match e {
                    BookingError::InvalidDraft(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    BookingError::InvalidTransition { .. } => StatusCode::CONFLICT,
                    BookingError::NotFound(_) => StatusCode::NOT_FOUND,
                    BookingError::RemoteUnavailable(_) => StatusCode::BAD_GATEWAY,
                    BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
                    BookingError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, e.kind())
            }
            AppError::Payment(PaymentError::InvalidAmount(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_amount")
            }
            AppError::Payment(PaymentError::RemoteUnavailable(_)) => {
                (StatusCode::BAD_GATEWAY, "remote_unavailable")
            }
            AppError::Config(_) => (StatusCode::CONFLICT, "config"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        if status.is_server_error() {
            tracing::error!(error = %self, kind, "request failed");
        }

        let mut body = serde_json::json!({ "error": self.to_string(), "kind": kind });
        // peers rebuild the exact BookingError from these fields
        if let AppError::Booking(e) = &self {
            match e {
                BookingError::InvalidTransition { from, operation } => {
                    body["from"] = from.clone().into();
                    body["operation"] = operation.clone().into();
                }
                BookingError::InvalidDraft(detail)
                | BookingError::NotFound(detail)
                | BookingError::RemoteUnavailable(detail)
                | BookingError::Forbidden(detail)
                | BookingError::Storage(detail) => {
                    body["detail"] = detail.clone().into();
                }
            }
        }
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::from(BookingError::InvalidDraft("x".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::from(BookingError::InvalidTransition {
                    from: "completed".into(),
                    operation: "cancel".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                AppError::from(BookingError::NotFound("b1".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::from(BookingError::RemoteUnavailable("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::from(PaymentError::InvalidAmount("-5".into())),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_transition_message() {
        let err = BookingError::InvalidTransition {
            from: "completed".into(),
            operation: "cancel".into(),
        };
        assert_eq!(err.to_string(), "cannot cancel a booking that is completed");
        assert_eq!(err.kind(), "invalid_transition");
    }
}
