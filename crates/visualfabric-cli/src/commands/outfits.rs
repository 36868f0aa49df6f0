use std::sync::Arc;

use anyhow::{Result, anyhow};
use visualfabric_application::CatalogLoader;
use visualfabric_core::config::ServiceConfig;
use visualfabric_interaction::HttpCatalogService;

pub async fn run(config: &ServiceConfig) -> Result<()> {
    let loader = CatalogLoader::new(
        Arc::new(HttpCatalogService::new(config.clone())),
        config.catalog_timeout(),
    );

    let options = loader.load().await.map_err(|e| {
        tracing::warn!("[CLI] {}", e);
        anyhow!(e.user_message())
    })?;

    if options.is_empty() {
        println!("No outfit options available.");
        return Ok(());
    }

    for option in options {
        println!("{}\t{}", option.id, option.label);
    }
    Ok(())
}
