//! CatalogLoader - one catalog fetch per dialog opening.

use std::sync::Arc;
use std::time::Duration;

use visualfabric_core::catalog::{CatalogService, OutfitOption};
use visualfabric_core::{FabricError, Result};

/// Fetches the outfit catalog and normalises every failure to a catalog error.
///
/// No caching and no retry: each call is one request.
#[derive(Clone)]
pub struct CatalogLoader {
    service: Arc<dyn CatalogService>,
    timeout: Duration,
}

impl CatalogLoader {
    pub fn new(service: Arc<dyn CatalogService>, timeout: Duration) -> Self {
        Self { service, timeout }
    }

    pub async fn load(&self) -> Result<Vec<OutfitOption>> {
        match tokio::time::timeout(self.timeout, self.service.list_outfits()).await {
            Ok(Ok(options)) => Ok(options),
            Ok(Err(err)) if err.is_catalog() => Err(err),
            Ok(Err(err)) => Err(FabricError::catalog(err.to_string())),
            Err(_) => Err(FabricError::catalog(format!(
                "Catalog request timed out after {}s",
                self.timeout.as_secs()
            ))),
        }
    }
}
