//! Workflow session domain module.
//!
//! # Module Structure
//!
//! - `stage`: workflow stages (`Stage`) and the derived `IdleCondition`
//! - `model`: the aggregate root (`WorkflowSession`) and its transitions
//! - `rejection`: why a generation request was refused (`GenerationRejected`)

mod model;
mod rejection;
mod stage;

pub use model::WorkflowSession;
pub use rejection::GenerationRejected;
pub use stage::{IdleCondition, Stage};
