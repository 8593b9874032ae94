pub mod backend;
pub mod bookings;
pub mod catalog;
pub mod payment;
pub mod quote;
