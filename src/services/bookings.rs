use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::{AppError, BookingError};
use crate::models::{Actor, Booking, BookingDraft, PaymentEvent, Role, Transition};
use crate::services::catalog::VendorCatalog;
use crate::store::BookingStore;

/// What the couple fills in on a vendor's booking form; price and names come
/// from the catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub service_id: String,
    pub event_type: String,
    pub service_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub user_name: Option<String>,
}

pub fn draft_from_catalog(
    catalog: &VendorCatalog,
    vendor_id: &str,
    form: BookingForm,
    actor: &Actor,
) -> Result<BookingDraft, AppError> {
    let vendor = catalog
        .get(vendor_id)
        .ok_or_else(|| AppError::NotFound(format!("vendor {vendor_id}")))?;

    let service = vendor.service(&form.service_id).ok_or_else(|| {
        BookingError::InvalidDraft(format!(
            "service {:?} is not offered by {}",
            form.service_id, vendor.name
        ))
    })?;

    Ok(BookingDraft {
        user_id: actor.id.clone(),
        user_name: form.user_name.unwrap_or_else(|| actor.id.clone()),
        vendor_id: vendor.id.clone(),
        vendor_name: vendor.name.clone(),
        service_name: service.name.clone(),
        event_type: form.event_type,
        service_date: form.service_date,
        amount: Some(service.price),
        notes: form.notes,
        contact_phone: form.contact_phone,
        contact_email: form.contact_email,
    })
}

pub async fn submit(
    store: &dyn BookingStore,
    actor: &Actor,
    draft: BookingDraft,
) -> Result<Booking, BookingError> {
    actor.authorize_submit(&draft)?;
    store.create(draft).await
}

pub async fn view(store: &dyn BookingStore, actor: &Actor, id: &str) -> Result<Booking, BookingError> {
    let booking = store.get(id).await?;
    actor.authorize_view(&booking)?;
    Ok(booking)
}

pub async fn list_for_user(
    store: &dyn BookingStore,
    actor: &Actor,
    user_id: &str,
) -> Result<Vec<Booking>, BookingError> {
    if actor.role != Role::Admin && !(actor.role == Role::User && actor.id == user_id) {
        return Err(BookingError::Forbidden(format!(
            "{} may not list bookings of {user_id}",
            actor.id
        )));
    }
    store.list_by_user(user_id).await
}

pub async fn list_for_vendor(
    store: &dyn BookingStore,
    actor: &Actor,
    vendor_id: &str,
) -> Result<Vec<Booking>, BookingError> {
    if actor.role != Role::Admin && !(actor.role == Role::Vendor && actor.id == vendor_id) {
        return Err(BookingError::Forbidden(format!(
            "{} may not list bookings of {vendor_id}",
            actor.id
        )));
    }
    store.list_by_vendor(vendor_id).await
}

/// Counterparties never change after creation, so checking the actor against
/// a prior read is safe even if the status moves before the write.
pub async fn transition(
    store: &dyn BookingStore,
    actor: &Actor,
    id: &str,
    op: Transition,
) -> Result<Booking, BookingError> {
    let booking = store.get(id).await?;
    actor.authorize_transition(&booking, op)?;
    store.apply_transition(id, op).await
}

pub async fn record_payment(
    store: &dyn BookingStore,
    actor: &Actor,
    id: &str,
    event: PaymentEvent,
) -> Result<Booking, BookingError> {
    let booking = store.get(id).await?;
    actor.authorize_payment(&booking, event)?;
    store.apply_payment(id, event).await
}
