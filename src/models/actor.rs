use serde::{Deserialize, Serialize};

use crate::errors::BookingError;
use crate::models::{Booking, BookingDraft, PaymentEvent, Transition};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Vendor,
    Admin,
}

impl Role {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "vendor" => Some(Role::Vendor),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// An authenticated caller, as vouched for by the upstream auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    fn is_user_of(&self, booking: &Booking) -> bool {
        self.role == Role::User && self.id == booking.user_id
    }

    fn is_vendor_of(&self, booking: &Booking) -> bool {
        self.role == Role::Vendor && self.id == booking.vendor_id
    }

    pub fn can_view(&self, booking: &Booking) -> bool {
        self.is_admin() || self.is_user_of(booking) || self.is_vendor_of(booking)
    }

    pub fn authorize_view(&self, booking: &Booking) -> Result<(), BookingError> {
        if self.can_view(booking) {
            Ok(())
        } else {
            Err(BookingError::Forbidden(format!(
                "{} is not a party to booking {}",
                self.id, booking.id
            )))
        }
    }

    pub fn authorize_submit(&self, draft: &BookingDraft) -> Result<(), BookingError> {
        match self.role {
            Role::Admin => Ok(()),
            Role::User if draft.user_id == self.id => Ok(()),
            Role::User => Err(BookingError::Forbidden(
                "users may only book for themselves".to_string(),
            )),
            Role::Vendor => Err(BookingError::Forbidden(
                "vendors cannot submit booking requests".to_string(),
            )),
        }
    }

    /// accept/reject/complete belong to the vendor, cancel to either party.
    pub fn authorize_transition(&self, booking: &Booking, op: Transition) -> Result<(), BookingError> {
        let allowed = self.is_admin()
            || match op {
                Transition::Accept | Transition::Reject | Transition::Complete => {
                    self.is_vendor_of(booking)
                }
                Transition::Cancel => self.is_vendor_of(booking) || self.is_user_of(booking),
            };

        if allowed {
            Ok(())
        } else {
            Err(BookingError::Forbidden(format!(
                "{} may not {} booking {}",
                self.id,
                op.as_str(),
                booking.id
            )))
        }
    }

    pub fn authorize_payment(&self, booking: &Booking, event: PaymentEvent) -> Result<(), BookingError> {
        let allowed = self.is_admin()
            || match event {
                PaymentEvent::Initiate | PaymentEvent::Settle => self.is_user_of(booking),
                PaymentEvent::Refund => self.is_vendor_of(booking),
            };

        if allowed {
            Ok(())
        } else {
            Err(BookingError::Forbidden(format!(
                "{} may not {} payment for booking {}",
                self.id,
                event.as_str(),
                booking.id
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::tests::sample_draft;

    fn booking() -> Booking {
        Booking::from_draft(sample_draft()).unwrap()
    }

    #[test]
    fn test_vendor_only_operations() {
        let b = booking();
        let vendor = Actor::new("vendor1", Role::Vendor);
        let user = Actor::new("user1", Role::User);
        let other_vendor = Actor::new("vendor2", Role::Vendor);

        for op in [Transition::Accept, Transition::Reject, Transition::Complete] {
            assert!(vendor.authorize_transition(&b, op).is_ok());
            assert!(matches!(
                user.authorize_transition(&b, op),
                Err(BookingError::Forbidden(_))
            ));
            assert!(other_vendor.authorize_transition(&b, op).is_err());
        }
    }

    #[test]
    fn test_cancel_by_either_party() {
        let b = booking();
        assert!(Actor::new("vendor1", Role::Vendor)
            .authorize_transition(&b, Transition::Cancel)
            .is_ok());
        assert!(Actor::new("user1", Role::User)
            .authorize_transition(&b, Transition::Cancel)
            .is_ok());
        assert!(Actor::new("user2", Role::User)
            .authorize_transition(&b, Transition::Cancel)
            .is_err());
        // a user id that happens to equal the vendor id is still not the vendor
        assert!(Actor::new("vendor1", Role::User)
            .authorize_transition(&b, Transition::Accept)
            .is_err());
    }

    #[test]
    fn test_admin_may_do_anything() {
        let b = booking();
        let admin = Actor::new("ops", Role::Admin);
        for op in Transition::ALL {
            assert!(admin.authorize_transition(&b, op).is_ok());
        }
        assert!(admin.can_view(&b));
    }

    #[test]
    fn test_submit_rules() {
        let draft = sample_draft();
        assert!(Actor::new("user1", Role::User).authorize_submit(&draft).is_ok());
        assert!(Actor::new("user2", Role::User).authorize_submit(&draft).is_err());
        assert!(Actor::new("vendor1", Role::Vendor).authorize_submit(&draft).is_err());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("Vendor"), Some(Role::Vendor));
        assert_eq!(Role::parse(" admin "), Some(Role::Admin));
        assert_eq!(Role::parse("guest"), None);
    }
}
