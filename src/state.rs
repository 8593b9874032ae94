use std::sync::Arc;

use crate::config::{AppConfig, LocalStoreKind};
use crate::services::backend::BackendSelector;
use crate::services::catalog::VendorCatalog;
use crate::services::quote::PaymentQuoter;
use crate::store::{BookingStore, MemoryStore, RemoteStore, SqliteStore};

pub struct AppState {
    pub config: AppConfig,
    pub bookings: BackendSelector,
    pub catalog: VendorCatalog,
    pub quoter: PaymentQuoter,
}

impl AppState {
    /// Wires stores, catalog and payment quoter from configuration.
    pub fn from_config(config: AppConfig) -> anyhow::Result<Self> {
        let local: Arc<dyn BookingStore> = match config.local_store {
            LocalStoreKind::Memory => {
                tracing::info!("using in-memory booking store");
                Arc::new(MemoryStore::new())
            }
            LocalStoreKind::Sqlite => {
                tracing::info!("using SQLite booking store at {}", config.database_url);
                Arc::new(SqliteStore::open(&config.database_url)?)
            }
        };

        let remote: Option<Arc<dyn BookingStore>> = match &config.remote_booking_url {
            Some(url) => {
                tracing::info!("remote booking service available at {url}");
                Some(Arc::new(RemoteStore::new(
                    url.clone(),
                    config.remote_booking_token.clone(),
                    config.remote_timeout,
                )?))
            }
            None => None,
        };

        let bookings = BackendSelector::new(local, remote, config.booking_backend)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?;

        let catalog = VendorCatalog::load(config.vendor_catalog_path.as_deref())?;
        tracing::info!("loaded {} vendors", catalog.len());

        let quoter = PaymentQuoter::new(config.payment_service_url.clone(), config.remote_timeout)?;

        Ok(Self {
            config,
            bookings,
            catalog,
            quoter,
        })
    }
}
