//! Mockup service trait.

use async_trait::async_trait;

use super::model::{MockupImage, MockupRequest};
use crate::error::Result;

/// Remote renderer that turns a fabric and an outfit into a mockup.
///
/// Any non-200 status or transport failure is reported as
/// [`FabricError::Generation`](crate::FabricError::Generation).
#[async_trait]
pub trait MockupService: Send + Sync {
    async fn generate(&self, request: MockupRequest) -> Result<MockupImage>;
}
