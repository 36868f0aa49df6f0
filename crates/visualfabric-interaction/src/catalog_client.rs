//! HttpCatalogService - `GET /prompts/` adapter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use visualfabric_core::catalog::{CatalogService, OutfitOption, PromptRecord};
use visualfabric_core::config::ServiceConfig;
use visualfabric_core::{FabricError, Result};

use crate::http::{PROMPTS_ROUTE, with_proxy_header};

/// Catalog service that talks to the remote prompt list.
#[derive(Clone)]
pub struct HttpCatalogService {
    client: Client,
    config: ServiceConfig,
}

impl HttpCatalogService {
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Shares an existing connection pool.
    pub fn with_client(client: Client, config: ServiceConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    async fn list_outfits(&self) -> Result<Vec<OutfitOption>> {
        let url = self.config.endpoint(PROMPTS_ROUTE);
        tracing::debug!("[Catalog] GET {}", url);

        let request = with_proxy_header(
            self.client.get(&url).timeout(self.config.catalog_timeout()),
            &self.config,
        );

        let response = request
            .send()
            .await
            .map_err(|e| FabricError::catalog(format!("Catalog request failed: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FabricError::Catalog {
                status: Some(status.as_u16()),
                message: format!("Catalog service returned {}: {}", status, body),
            });
        }

        let records: Vec<PromptRecord> = response
            .json()
            .await
            .map_err(|e| FabricError::catalog(format!("Failed to parse catalog response: {}", e)))?;

        tracing::debug!("[Catalog] Received {} outfit options", records.len());

        Ok(records.into_iter().map(OutfitOption::from).collect())
    }
}
