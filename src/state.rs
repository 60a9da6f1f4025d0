//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the one catalog store, the upload directory and the order sink.
//! Handlers take the catalog lock for a single store call at a time.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use canvas::catalog::{CatalogStore, seed_backgrounds};
use tokio::sync::RwLock;

use crate::config::Config;
use crate::services::orders::OrderSink;
use crate::services::upload::UploadStore;

/// Shared application state. Clone is required by Axum, so every field is
/// Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RwLock<CatalogStore>>,
    pub uploads: Arc<UploadStore>,
    pub orders: Arc<dyn OrderSink>,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: CatalogStore, uploads: UploadStore, orders: Arc<dyn OrderSink>) -> Self {
        Self { catalog: Arc::new(RwLock::new(catalog)), uploads: Arc::new(uploads), orders }
    }

    /// Build state from configuration, seeding the sample catalog if asked.
    #[must_use]
    pub fn from_config(config: &Config, orders: Arc<dyn OrderSink>) -> Self {
        let catalog = if config.seed_catalog {
            CatalogStore::with_backgrounds(seed_backgrounds())
        } else {
            CatalogStore::new()
        };
        let uploads = UploadStore::new(&config.upload_dir, &config.upload_url_prefix, config.max_upload_bytes);
        Self::new(catalog, uploads, orders)
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
