//! Outfit catalog domain models and service trait.
//!
//! The catalog is the server-provided list of garment styles a fabric can be
//! rendered as. It is fetched fresh every time the dialog opens.

mod model;
mod service;

pub use model::{OutfitOption, PromptRecord};
pub use service::CatalogService;
