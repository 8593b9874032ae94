use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;

use super::BookingStore;
use crate::db::{self, queries};
use crate::errors::BookingError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};

/// Durable local store on top of SQLite. The connection lock serializes every
/// write, so a transition is a plain read-check-write.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

fn storage(e: anyhow::Error) -> BookingError {
    BookingError::Storage(format!("{e:#}"))
}

impl SqliteStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        let conn = db::init_db(path)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, BookingError> {
        self.conn
            .lock()
            .map_err(|_| BookingError::Storage("database lock poisoned".to_string()))
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Booking) -> Result<(), BookingError>,
    ) -> Result<Booking, BookingError> {
        let conn = self.conn()?;
        let mut booking = queries::get_booking_by_id(&conn, id)
            .map_err(storage)?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))?;

        let previous = booking.status;
        apply(&mut booking)?;

        if !queries::update_booking_state(&conn, &booking, previous).map_err(storage)? {
            return Err(BookingError::Storage(format!(
                "booking {id} changed underneath an update"
            )));
        }
        Ok(booking)
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let booking = Booking::from_draft(draft)?;
        let conn = self.conn()?;
        queries::create_booking(&conn, &booking).map_err(storage)?;
        Ok(booking)
    }

    async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        let conn = self.conn()?;
        queries::get_booking_by_id(&conn, id)
            .map_err(storage)?
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        let conn = self.conn()?;
        queries::get_bookings_for_user(&conn, user_id).map_err(storage)
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, BookingError> {
        let conn = self.conn()?;
        queries::get_bookings_for_vendor(&conn, vendor_id).map_err(storage)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        let conn = self.conn()?;
        queries::get_all_bookings(&conn).map_err(storage)
    }

    async fn apply_transition(&self, id: &str, op: Transition) -> Result<Booking, BookingError> {
        self.mutate(id, |booking| booking.apply_transition(op))
    }

    async fn apply_payment(&self, id: &str, event: PaymentEvent) -> Result<Booking, BookingError> {
        self.mutate(id, |booking| booking.apply_payment(event))
    }
}
