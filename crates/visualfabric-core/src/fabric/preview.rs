//! Preview rendering for accepted fabrics.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::error::Result;

/// Encodes bytes as a `data:<mime>;base64,<payload>` URI.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes))
}

/// Turns raw fabric bytes into something the dialog can display.
#[async_trait]
pub trait PreviewRenderer: Send + Sync {
    async fn render(&self, mime_type: &str, bytes: &[u8]) -> Result<String>;
}

/// Default renderer: an inline base64 data URI.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriRenderer;

#[async_trait]
impl PreviewRenderer for DataUriRenderer {
    async fn render(&self, mime_type: &str, bytes: &[u8]) -> Result<String> {
        Ok(data_uri(mime_type, bytes))
    }
}
