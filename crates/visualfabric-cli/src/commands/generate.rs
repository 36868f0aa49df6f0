use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use visualfabric_application::CatalogState;
use visualfabric_core::config::ServiceConfig;
use visualfabric_core::error::{CATALOG_UNAVAILABLE_MESSAGE, GENERATION_FAILED_MESSAGE};
use visualfabric_core::fabric::FabricFile;

use super::utils::{build_controller, print_notifications};

/// Runs one full dialog: open, pick fabric, pick outfit, generate, save.
pub async fn run(
    config: &ServiceConfig,
    fabric: &Path,
    outfit: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut controller = build_controller(config);
    let mut notifications = controller.subscribe();

    controller.open();
    controller.settle().await;
    print_notifications(&mut notifications);
    if matches!(controller.catalog_state(), Some(CatalogState::Failed)) {
        bail!(CATALOG_UNAVAILABLE_MESSAGE);
    }

    let file = FabricFile::from_path(fabric)
        .await
        .with_context(|| format!("Failed to read fabric image {}", fabric.display()))?;
    if !controller.accept_file(file) {
        bail!("{} was not accepted as a fabric image", fabric.display());
    }
    controller.settle().await;
    print_notifications(&mut notifications);

    if !controller.select_outfit(outfit) {
        bail!(
            "Unknown outfit '{}'. Run `visualfabric outfits` to list the options.",
            outfit
        );
    }

    controller.request_generation()?;
    eprintln!("⏳ Generating mockup...");
    controller.settle().await;
    print_notifications(&mut notifications);

    let image = controller
        .session()
        .and_then(|session| session.result_image())
        .cloned()
        .ok_or_else(|| anyhow!(GENERATION_FAILED_MESSAGE))?;
    controller.close();

    let output = output.unwrap_or_else(|| PathBuf::from(format!("mockup.{}", image.extension())));
    tokio::fs::write(&output, &image.bytes)
        .await
        .with_context(|| format!("Failed to write mockup to {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}
