use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Booking, BookingStatus, PaymentStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub rejected: usize,
    pub paid_revenue: Decimal,
}

impl DashboardStats {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        let mut stats = Self::default();
        for booking in bookings {
            stats.total_bookings += 1;
            match booking.status {
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Completed => stats.completed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
                BookingStatus::Rejected => stats.rejected += 1,
            }
            // stored rows are not re-validated against the draft ceiling
            if booking.payment_status == PaymentStatus::Paid {
                stats.paid_revenue = stats.paid_revenue.saturating_add(booking.amount);
            }
        }
        stats
    }
}
