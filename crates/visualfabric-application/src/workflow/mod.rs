//! Mockup workflow: the dialog's session owner and its async plumbing.
//!
//! # Module Structure
//!
//! - `catalog_state`: what the outfit selector shows (`CatalogState`, `OutfitSelector`)
//! - `event`: completions sent back from spawned work (`WorkflowEvent`) and
//!   what applying them did (`WorkflowUpdate`)
//! - `controller`: `MockupWorkflowController`

mod catalog_state;
mod controller;
mod event;

#[cfg(test)]
mod controller_test;

pub use catalog_state::{CatalogState, OutfitSelector};
pub use controller::MockupWorkflowController;
pub use event::WorkflowUpdate;
