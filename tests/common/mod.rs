//! Test-only seeding: fixtures are drafts replayed through the public store
//! operations, so seeded bookings obey the same state machine as live ones.

use serde::Deserialize;

use vendorbook::models::{Booking, BookingDraft, PaymentEvent, Transition};
use vendorbook::store::BookingStore;

pub const BOOKINGS_FIXTURE: &str = include_str!("../fixtures/bookings.json");

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum Step {
    Transition(Transition),
    Payment(PaymentEvent),
}

#[derive(Deserialize)]
struct FixtureBooking {
    draft: BookingDraft,
    #[serde(default)]
    steps: Vec<Step>,
}

pub async fn seed_bookings(store: &dyn BookingStore, json: &str) -> anyhow::Result<Vec<Booking>> {
    let fixtures: Vec<FixtureBooking> = serde_json::from_str(json)?;

    let mut seeded = vec![];
    for fixture in fixtures {
        let mut booking = store.create(fixture.draft).await?;
        for step in fixture.steps {
            booking = match step {
                Step::Transition(op) => store.apply_transition(&booking.id, op).await?,
                Step::Payment(event) => store.apply_payment(&booking.id, event).await?,
            };
        }
        seeded.push(booking);
    }
    Ok(seeded)
}
