//! Domain layer for the VisualFabric mockup workflow.
//!
//! Holds the session state machine and the seams (`CatalogService`,
//! `MockupService`, `PreviewRenderer`) the application layer drives.

pub mod catalog;
pub mod config;
pub mod error;
pub mod fabric;
pub mod mockup;
pub mod session;

// Re-export common error type
pub use error::{FabricError, Result};
