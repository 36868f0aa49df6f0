//! Catalog service trait.

use async_trait::async_trait;

use super::model::OutfitOption;
use crate::error::Result;

/// Source of the outfit catalog.
///
/// Implementations report any non-200 status or transport failure as
/// [`FabricError::Catalog`](crate::FabricError::Catalog). Order of the returned
/// options is preserved for display.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Fetches the current list of outfit options.
    async fn list_outfits(&self) -> Result<Vec<OutfitOption>>;
}
