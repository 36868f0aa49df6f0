//! Fabric intake: the user's source image and its preview.
//!
//! - `model`: `FabricFile` (what the picker hands over) and `UploadedFabric`
//!   (what the session holds)
//! - `preview`: data URI encoding and the `PreviewRenderer` seam

mod model;
mod preview;

pub use model::{FabricFile, SOFT_SIZE_LIMIT_BYTES, UploadedFabric, is_image_mime};
pub use preview::{DataUriRenderer, PreviewRenderer, data_uri};
