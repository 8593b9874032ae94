use std::time::Duration;

use async_trait::async_trait;
use anyhow::Context;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::BookingStore;
use crate::errors::BookingError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};

/// Client for a peer service exposing the booking store API under
/// `/api/store/bookings`.
pub struct RemoteStore {
    base_url: Url,
    token: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: String, token: String, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("invalid remote booking url {base_url:?}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("remote booking url {base_url} cannot carry a path");
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            token,
            client,
        })
    }

    /// Store API url with each of `segments` percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["api", "store", "bookings"])
                .extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BookingError> {
        let resp = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "remote booking call failed");
                BookingError::RemoteUnavailable(e.to_string())
            })?;

        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().await.map_err(|e| {
                BookingError::RemoteUnavailable(format!("unreadable response: {e}"))
            });
        }

        let body: serde_json::Value = resp.json().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }
}

fn error_from_response(status: StatusCode, body: &serde_json::Value) -> BookingError {
    let field = |name: &str| body[name].as_str().map(|s| s.to_string());
    let detail = field("detail")
        .or_else(|| field("error"))
        .unwrap_or_else(|| status.to_string());

    match status {
        StatusCode::NOT_FOUND => BookingError::NotFound(detail),
        StatusCode::UNPROCESSABLE_ENTITY => BookingError::InvalidDraft(detail),
        StatusCode::CONFLICT => BookingError::InvalidTransition {
            from: field("from").unwrap_or_else(|| "unknown".to_string()),
            operation: field("operation").unwrap_or(detail),
        },
        StatusCode::FORBIDDEN => BookingError::Forbidden(detail),
        _ => {
            tracing::warn!(%status, detail = %detail, "remote booking service returned an error");
            BookingError::RemoteUnavailable(format!("{status}: {detail}"))
        }
    }
}

#[async_trait]
impl BookingStore for RemoteStore {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        draft.validate()?;
        self.send(self.client.post(self.url(&[])).json(&draft)).await
    }

    async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        self.send(self.client.get(self.url(&[id]))).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.send(self.client.get(self.url(&[])).query(&[("userId", user_id)]))
            .await
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.send(self.client.get(self.url(&[])).query(&[("vendorId", vendor_id)]))
            .await
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        self.send(self.client.get(self.url(&[]))).await
    }

    async fn apply_transition(&self, id: &str, op: Transition) -> Result<Booking, BookingError> {
        self.send(
            self.client
                .post(self.url(&[id, "transition"]))
                .json(&json!({ "operation": op })),
        )
        .await
    }

    async fn apply_payment(&self, id: &str, event: PaymentEvent) -> Result<Booking, BookingError> {
        self.send(
            self.client
                .post(self.url(&[id, "payment"]))
                .json(&json!({ "event": event })),
        )
        .await
    }
}
