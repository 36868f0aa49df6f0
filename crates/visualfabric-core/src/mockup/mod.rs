//! Mockup generation domain models and service trait.

mod model;
mod service;

pub use model::{DEFAULT_MOCKUP_MIME, MockupImage, MockupRequest};
pub use service::MockupService;
