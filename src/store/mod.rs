pub mod memory;
pub mod remote;
pub mod sqlite;

use async_trait::async_trait;

use crate::errors::BookingError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};

pub use memory::MemoryStore;
pub use remote::RemoteStore;
pub use sqlite::SqliteStore;

/// Ordered collection of bookings. Listing calls always reflect the current
/// state; transitions on the same id never interleave.
#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError>;

    async fn get(&self, id: &str) -> Result<Booking, BookingError>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError>;

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, BookingError>;

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError>;

    async fn apply_transition(&self, id: &str, op: Transition) -> Result<Booking, BookingError>;

    async fn apply_payment(&self, id: &str, event: PaymentEvent) -> Result<Booking, BookingError>;
}
