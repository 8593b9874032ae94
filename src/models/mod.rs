pub mod actor;
pub mod booking;
pub mod payment;
pub mod stats;
pub mod vendor;

pub use actor::{Actor, Role};
pub use booking::{Booking, BookingDraft, BookingStatus, PaymentEvent, PaymentStatus, Transition};
pub use payment::{PaymentBreakdown, PaymentQuote, PaymentRequest, QuoteSource};
pub use stats::DashboardStats;
pub use vendor::{SortBy, Vendor, VendorSearch, VendorService};
