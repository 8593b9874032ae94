//! Booking lifecycle and payment breakdown service for a wedding vendor
//! marketplace.

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
