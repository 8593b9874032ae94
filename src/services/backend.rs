use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, BookingError};
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};
use crate::store::BookingStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    Local,
    Remote,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Local => "local",
            BackendMode::Remote => "remote",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Some(BackendMode::Local),
            "remote" => Some(BackendMode::Remote),
            _ => None,
        }
    }
}

/// Routes booking operations to the local store or to the remote peer.
///
/// Switching modes only affects operations issued afterwards; bookings are
/// never copied between the two sides.
pub struct BackendSelector {
    local: Arc<dyn BookingStore>,
    remote: Option<Arc<dyn BookingStore>>,
    use_remote: AtomicBool,
}

impl BackendSelector {
    pub fn new(
        local: Arc<dyn BookingStore>,
        remote: Option<Arc<dyn BookingStore>>,
        mode: BackendMode,
    ) -> Result<Self, AppError> {
        let selector = Self {
            local,
            remote,
            use_remote: AtomicBool::new(false),
        };
        selector.set_mode(mode)?;
        Ok(selector)
    }

    pub fn local_only(local: Arc<dyn BookingStore>) -> Self {
        Self {
            local,
            remote: None,
            use_remote: AtomicBool::new(false),
        }
    }

    pub fn mode(&self) -> BackendMode {
        if self.use_remote.load(Ordering::SeqCst) {
            BackendMode::Remote
        } else {
            BackendMode::Local
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub fn set_mode(&self, mode: BackendMode) -> Result<(), AppError> {
        if mode == BackendMode::Remote && self.remote.is_none() {
            return Err(AppError::Config(
                "no remote booking service is configured".to_string(),
            ));
        }

        let previous = self.mode();
        self.use_remote
            .store(mode == BackendMode::Remote, Ordering::SeqCst);
        if previous != mode {
            tracing::info!(from = previous.as_str(), to = mode.as_str(), "booking backend switched");
        }
        Ok(())
    }

    /// The active mode together with the store it selects, read once.
    fn current(&self) -> (BackendMode, &dyn BookingStore) {
        match (&self.remote, self.mode()) {
            (Some(remote), BackendMode::Remote) => (BackendMode::Remote, remote.as_ref()),
            _ => (BackendMode::Local, self.local.as_ref()),
        }
    }

    fn store(&self) -> &dyn BookingStore {
        self.current().1
    }
}

#[async_trait]
impl BookingStore for BackendSelector {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let (mode, store) = self.current();
        let booking = store.create(draft).await?;
        tracing::info!(
            booking_id = %booking.id,
            vendor_id = %booking.vendor_id,
            backend = mode.as_str(),
            "booking created"
        );
        Ok(booking)
    }

    async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        self.store().get(id).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.store().list_by_user(user_id).await
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.store().list_by_vendor(vendor_id).await
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        self.store().list_all().await
    }

    async fn apply_transition(&self, id: &str, op: Transition) -> Result<Booking, BookingError> {
        let (mode, store) = self.current();
        let booking = store.apply_transition(id, op).await?;
        tracing::info!(
            booking_id = %id,
            operation = op.as_str(),
            status = booking.status.as_str(),
            backend = mode.as_str(),
            "booking transitioned"
        );
        Ok(booking)
    }

    async fn apply_payment(&self, id: &str, event: PaymentEvent) -> Result<Booking, BookingError> {
        let (mode, store) = self.current();
        let booking = store.apply_payment(id, event).await?;
        tracing::info!(
            booking_id = %id,
            event = event.as_str(),
            payment_status = booking.payment_status.as_str(),
            backend = mode.as_str(),
            "booking payment updated"
        );
        Ok(booking)
    }
}
