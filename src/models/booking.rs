use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::payment::MAX_AMOUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub service_name: String,
    pub event_type: String,
    pub service_date: NaiveDate,
    pub amount: Decimal,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    Rejected,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 5] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
        BookingStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Completed | BookingStatus::Cancelled | BookingStatus::Rejected
        )
    }

    /// Status reached by applying `op`, or `None` when `op` is not allowed from here.
    pub fn next(&self, op: Transition) -> Option<BookingStatus> {
        match (self, op) {
            (BookingStatus::Pending, Transition::Accept) => Some(BookingStatus::Confirmed),
            (BookingStatus::Pending, Transition::Reject) => Some(BookingStatus::Rejected),
            (BookingStatus::Confirmed, Transition::Complete) => Some(BookingStatus::Completed),
            (BookingStatus::Pending | BookingStatus::Confirmed, Transition::Cancel) => {
                Some(BookingStatus::Cancelled)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Unpaid,
    Pending,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unpaid" => Some(PaymentStatus::Unpaid),
            "pending" => Some(PaymentStatus::Pending),
            "paid" => Some(PaymentStatus::Paid),
            "refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Accept,
    Reject,
    Complete,
    Cancel,
}

impl Transition {
    pub const ALL: [Transition; 4] = [
        Transition::Accept,
        Transition::Reject,
        Transition::Complete,
        Transition::Cancel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Transition::Accept => "accept",
            Transition::Reject => "reject",
            Transition::Complete => "complete",
            Transition::Cancel => "cancel",
        }
    }
}

/// Payment progress, gated by the booking status it belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentEvent {
    Initiate,
    Settle,
    Refund,
}

impl PaymentEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentEvent::Initiate => "initiate",
            PaymentEvent::Settle => "settle",
            PaymentEvent::Refund => "refund",
        }
    }

    pub fn next(&self, status: BookingStatus, payment: PaymentStatus) -> Option<PaymentStatus> {
        let billable = matches!(status, BookingStatus::Confirmed | BookingStatus::Completed);
        match (self, payment) {
            (PaymentEvent::Initiate, PaymentStatus::Unpaid) if billable => {
                Some(PaymentStatus::Pending)
            }
            (PaymentEvent::Settle, PaymentStatus::Unpaid | PaymentStatus::Pending) if billable => {
                Some(PaymentStatus::Paid)
            }
            (PaymentEvent::Refund, PaymentStatus::Paid) if status == BookingStatus::Cancelled => {
                Some(PaymentStatus::Refunded)
            }
            _ => None,
        }
    }
}

/// Fields collected by the submission form before a booking exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    pub user_id: String,
    pub user_name: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub service_name: String,
    pub event_type: String,
    pub service_date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
}

impl BookingDraft {
    pub fn validate(&self) -> Result<(), BookingError> {
        let mut problems = vec![];

        if self.user_id.trim().is_empty() {
            problems.push("userId is required");
        }
        if self.vendor_id.trim().is_empty() {
            problems.push("vendorId is required");
        }
        if self.service_name.trim().is_empty() {
            problems.push("serviceName is required");
        }
        if self.service_date.is_none() {
            problems.push("serviceDate is required");
        }
        match self.amount {
            Some(amount) if amount > MAX_AMOUNT => {
                problems.push("amount must not exceed one trillion")
            }
            Some(amount) if amount > Decimal::ZERO => {}
            _ => problems.push("amount must be greater than zero"),
        }
        if !is_valid_email(&self.contact_email) {
            problems.push("contactEmail must be a valid email");
        }
        if self.contact_phone.chars().filter(|c| c.is_ascii_digit()).count() < 10 {
            problems.push("contactPhone must have at least 10 digits");
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BookingError::InvalidDraft(problems.join("; ")))
        }
    }
}

fn is_valid_email(s: &str) -> bool {
    let s = s.trim();
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !s.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .map(|(host, tld)| !host.is_empty() && !tld.is_empty())
                    .unwrap_or(false)
        }
        None => false,
    }
}

impl Booking {
    /// Validates `draft` and builds a fresh `pending`/`unpaid` booking from it.
    pub fn from_draft(draft: BookingDraft) -> Result<Self, BookingError> {
        draft.validate()?;

        let (Some(service_date), Some(amount)) = (draft.service_date, draft.amount) else {
            return Err(BookingError::InvalidDraft(
                "serviceDate and amount are required".to_string(),
            ));
        };

        let now = Utc::now().naive_utc();
        Ok(Self {
            id: format!("booking-{}", uuid::Uuid::new_v4()),
            user_id: draft.user_id.trim().to_string(),
            user_name: draft.user_name,
            vendor_id: draft.vendor_id.trim().to_string(),
            vendor_name: draft.vendor_name,
            service_name: draft.service_name.trim().to_string(),
            event_type: draft.event_type,
            service_date,
            amount,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            notes: draft.notes.filter(|n| !n.trim().is_empty()),
            contact_phone: draft.contact_phone.trim().to_string(),
            contact_email: draft.contact_email.trim().to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves the booking along the state machine. On error nothing is changed.
    pub fn apply_transition(&mut self, op: Transition) -> Result<(), BookingError> {
        let next = self
            .status
            .next(op)
            .ok_or_else(|| BookingError::InvalidTransition {
                from: self.status.as_str().to_string(),
                operation: op.as_str().to_string(),
            })?;

        self.status = next;
        self.updated_at = Utc::now().naive_utc();
        Ok(())
    }

    pub fn apply_payment(&mut self, event: PaymentEvent) -> Result<(), BookingError> {
        let next = event
            .next(self.status, self.payment_status)
            .ok_or_else(|| BookingError::InvalidTransition {
                from: format!(
                    "{} (payment {})",
                    self.status.as_str(),
                    self.payment_status.as_str()
                ),
                operation: event.as_str().to_string(),
            })?;

        self.payment_status = next;
        self.updated_at = Utc::now().naive_utc();
        Ok(())
    }
}
