//! Shared, refreshable catalogue.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::{CatalogConfig, CatalogError, SurfaceCatalog, is_stale, load_snapshot};

/// Thread-safe handle to the current catalogue snapshot.
///
/// Readers get an `Arc` to an immutable snapshot; a reload swaps in a new one
/// without disturbing requests that still hold the old one.
#[derive(Clone)]
pub struct CatalogHandle {
    inner: Arc<RwLock<Arc<SurfaceCatalog>>>,
    config: CatalogConfig,
}

impl CatalogHandle {
    /// Load the snapshot named by `config`.
    pub async fn load(config: CatalogConfig) -> Result<Self, CatalogError> {
        let catalog = read(&config)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Wrap an already built catalogue.
    pub fn with_catalog(config: CatalogConfig, catalog: SurfaceCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
            config,
        }
    }

    /// An empty catalogue that can be filled later by [`reload`](Self::reload).
    pub fn empty(config: CatalogConfig) -> Self {
        Self::with_catalog(config, SurfaceCatalog::empty())
    }

    /// The current snapshot.
    pub async fn current(&self) -> Arc<SurfaceCatalog> {
        let guard = self.inner.read().await;
        Arc::clone(&guard)
    }

    /// Re-read the snapshot file and swap it in.
    ///
    /// On failure the existing snapshot is preserved and the error returned.
    pub async fn reload(&self) -> Result<usize, CatalogError> {
        let catalog = read(&self.config)?;
        let count = catalog.stop_count();

        let mut guard = self.inner.write().await;
        *guard = Arc::new(catalog);

        Ok(count)
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}

fn read(config: &CatalogConfig) -> Result<SurfaceCatalog, CatalogError> {
    let catalog = load_snapshot(&config.path)?;

    if is_stale(catalog.timestamp(), config.ttl, Utc::now()) {
        warn!(
            path = %config.path.display(),
            timestamp = ?catalog.timestamp(),
            "catalogue snapshot is older than its TTL"
        );
    }
    info!(
        path = %config.path.display(),
        stops = catalog.stop_count(),
        "loaded catalogue snapshot"
    );

    Ok(catalog)
}
