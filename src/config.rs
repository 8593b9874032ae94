use std::env;
use std::time::Duration;

use crate::services::backend::BackendMode;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocalStoreKind {
    Memory,
    Sqlite,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub admin_token: String,
    pub local_store: LocalStoreKind,
    pub database_url: String,
    pub booking_backend: BackendMode,
    pub remote_booking_url: Option<String>,
    pub remote_booking_token: String,
    pub payment_service_url: Option<String>,
    pub remote_timeout: Duration,
    pub vendor_catalog_path: Option<String>,
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let local_store = match env::var("LOCAL_STORE").as_deref() {
            Ok("sqlite") => LocalStoreKind::Sqlite,
            _ => LocalStoreKind::Memory,
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or_else(|_| "changeme".to_string()),
            local_store,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| "vendorbook.db".to_string()),
            booking_backend: env::var("BOOKING_BACKEND")
                .ok()
                .and_then(|v| BackendMode::parse(&v))
                .unwrap_or(BackendMode::Local),
            remote_booking_url: optional("REMOTE_BOOKING_URL"),
            remote_booking_token: env::var("REMOTE_BOOKING_TOKEN").unwrap_or_default(),
            payment_service_url: optional("PAYMENT_SERVICE_URL"),
            remote_timeout: Duration::from_secs(
                env::var("REMOTE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
            vendor_catalog_path: optional("VENDOR_CATALOG_PATH"),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            admin_token: "changeme".to_string(),
            local_store: LocalStoreKind::Memory,
            database_url: ":memory:".to_string(),
            booking_backend: BackendMode::Local,
            remote_booking_url: None,
            remote_booking_token: String::new(),
            payment_service_url: None,
            remote_timeout: Duration::from_secs(10),
            vendor_catalog_path: None,
        }
    }
}
