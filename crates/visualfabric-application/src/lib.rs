//! Application layer: the mockup dialog's workflow.
//!
//! - `catalog_loader`: fetches the outfit catalog once per dialog opening
//! - `workflow`: `MockupWorkflowController`, the single owner of a session
//! - `notification`: transient user feedback (toasts)

pub mod catalog_loader;
pub mod notification;
pub mod workflow;

pub use catalog_loader::CatalogLoader;
pub use notification::{Notification, NotificationLevel};
pub use workflow::{CatalogState, MockupWorkflowController, OutfitSelector, WorkflowUpdate};
