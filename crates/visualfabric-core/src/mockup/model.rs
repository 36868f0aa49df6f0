use std::sync::Arc;

use crate::error::{FabricError, Result};
use crate::fabric::{UploadedFabric, data_uri, is_image_mime};

/// MIME type assumed when the service does not name a specific image format.
pub const DEFAULT_MOCKUP_MIME: &str = "image/png";

/// Everything the mockup endpoint needs for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupRequest {
    /// The chosen outfit's id, sent as `prompt_id`.
    pub prompt_id: String,
    /// Original file name of the fabric.
    pub file_name: String,
    /// Original MIME type of the fabric.
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl MockupRequest {
    pub fn new(prompt_id: impl Into<String>, fabric: &UploadedFabric) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            file_name: fabric.display_name.clone(),
            mime_type: fabric.mime_type.clone(),
            bytes: fabric.raw_bytes.clone(),
        }
    }
}

/// A generated mockup held locally for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupImage {
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl MockupImage {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Builds an image from a successful response body.
    ///
    /// A missing or `application/octet-stream` content type falls back to
    /// [`DEFAULT_MOCKUP_MIME`]. Any other non-image type, or an empty body,
    /// is a generation failure.
    pub fn from_response(content_type: Option<&str>, bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(FabricError::generation("Mockup response body was empty"));
        }

        let essence = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        let mime_type = match essence.as_deref() {
            None | Some("") | Some("application/octet-stream") => DEFAULT_MOCKUP_MIME.to_string(),
            Some(ct) if is_image_mime(ct) => ct.to_string(),
            Some(ct) => {
                return Err(FabricError::generation(format!(
                    "Mockup response was not an image (content-type: {})",
                    ct
                )));
            }
        };

        Ok(Self::new(mime_type, bytes))
    }

    /// A URI the dialog can put straight into an `<img>`-like widget.
    pub fn data_uri(&self) -> String {
        data_uri(&self.mime_type, &self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the MIME type, for saving to disk.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            _ => "png",
        }
    }
}
