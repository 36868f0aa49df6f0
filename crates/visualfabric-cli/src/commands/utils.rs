use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use visualfabric_application::{MockupWorkflowController, Notification, NotificationLevel};
use visualfabric_core::config::ServiceConfig;
use visualfabric_interaction::config::{apply_base_url_override, load_service_config};
use visualfabric_interaction::{HttpCatalogService, HttpMockupService};

/// Loads the config file and environment, then applies `--base-url`.
pub fn resolve_config(base_url: Option<String>) -> Result<ServiceConfig> {
    let config = load_service_config().context("Failed to load VisualFabric configuration")?;
    let config = apply_base_url_override(config, base_url);
    tracing::debug!("[CLI] Using service at {}", config.base_url);
    Ok(config)
}

/// Builds a controller wired to the HTTP services, sharing one client.
pub fn build_controller(config: &ServiceConfig) -> MockupWorkflowController {
    let client = reqwest::Client::new();
    let catalog = HttpCatalogService::with_client(client.clone(), config.clone());
    let mockups = HttpMockupService::with_client(client, config.clone());
    MockupWorkflowController::new(Arc::new(catalog), Arc::new(mockups), config)
}

/// Prints queued notifications the way the dialog would toast them.
pub fn print_notifications(rx: &mut broadcast::Receiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        match notification.level {
            NotificationLevel::Success => eprintln!("✅ {}", notification.message),
            NotificationLevel::Error => eprintln!("❌ {}", notification.message),
        }
    }
}
