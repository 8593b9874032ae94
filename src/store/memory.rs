use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use async_trait::async_trait;

use super::BookingStore;
use crate::errors::BookingError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};

type Entry = Arc<Mutex<Booking>>;

#[derive(Default)]
struct Index {
    order: Vec<Entry>,
    by_id: HashMap<String, Entry>,
}

/// In-process store. The index lock is only held to find entries; each
/// booking has its own lock, so writes to one id never block reads of another.
#[derive(Default)]
pub struct MemoryStore {
    index: RwLock<Index>,
}

fn poisoned() -> BookingError {
    BookingError::Storage("booking store lock poisoned".to_string())
}

fn lock(entry: &Entry) -> Result<MutexGuard<'_, Booking>, BookingError> {
    entry.lock().map_err(|_| poisoned())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: &str) -> Result<Entry, BookingError> {
        let index = self.index.read().map_err(|_| poisoned())?;
        index
            .by_id
            .get(id)
            .cloned()
            .ok_or_else(|| BookingError::NotFound(id.to_string()))
    }

    fn snapshot_where(&self, keep: impl Fn(&Booking) -> bool) -> Result<Vec<Booking>, BookingError> {
        let entries: Vec<Entry> = {
            let index = self.index.read().map_err(|_| poisoned())?;
            index.order.clone()
        };

        let mut bookings = vec![];
        for entry in &entries {
            let booking = lock(entry)?;
            if keep(&booking) {
                bookings.push(booking.clone());
            }
        }
        Ok(bookings)
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut Booking) -> Result<(), BookingError>,
    ) -> Result<Booking, BookingError> {
        let entry = self.entry(id)?;
        let mut booking = lock(&entry)?;
        apply(&mut booking)?;
        Ok(booking.clone())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn create(&self, draft: BookingDraft) -> Result<Booking, BookingError> {
        let booking = Booking::from_draft(draft)?;

        let mut index = self.index.write().map_err(|_| poisoned())?;
        if index.by_id.contains_key(&booking.id) {
            return Err(BookingError::Storage(format!(
                "booking id {} already in use",
                booking.id
            )));
        }
        let entry = Arc::new(Mutex::new(booking.clone()));
        index.by_id.insert(booking.id.clone(), Arc::clone(&entry));
        index.order.push(entry);

        Ok(booking)
    }

    async fn get(&self, id: &str) -> Result<Booking, BookingError> {
        let entry = self.entry(id)?;
        let booking = lock(&entry)?;
        Ok(booking.clone())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.snapshot_where(|b| b.user_id == user_id)
    }

    async fn list_by_vendor(&self, vendor_id: &str) -> Result<Vec<Booking>, BookingError> {
        self.snapshot_where(|b| b.vendor_id == vendor_id)
    }

    async fn list_all(&self) -> Result<Vec<Booking>, BookingError> {
        self.snapshot_where(|_| true)
    }

    async fn apply_transition(&self, id: &str, op: Transition) -> Result<Booking, BookingError> {
        self.mutate(id, |booking| booking.apply_transition(op))
    }

    async fn apply_payment(&self, id: &str, event: PaymentEvent) -> Result<Booking, BookingError> {
        self.mutate(id, |booking| booking.apply_payment(event))
    }
}
