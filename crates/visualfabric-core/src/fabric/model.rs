use std::path::Path;
use std::sync::Arc;

use crate::error::{FabricError, Result};

/// Size the upload area advertises. Not enforced.
pub const SOFT_SIZE_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Returns true for `image/*` MIME types.
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type
        .split(';')
        .next()
        .map(|essence| essence.trim().to_ascii_lowercase().starts_with("image/"))
        .unwrap_or(false)
}

/// A local file picked by the user, before it enters a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FabricFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, guessing its MIME type from the extension.
    ///
    /// Non-image files are rejected here, mirroring the picker's `image/*` filter.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();

        if !is_image_mime(&mime_type) {
            return Err(FabricError::intake(format!(
                "{} is not an image ({})",
                path.display(),
                mime_type
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("fabric")
            .to_string();

        Ok(Self {
            name,
            mime_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime_type)
    }
}

/// The fabric held by a session.
///
/// Raw bytes are recorded as soon as the file is accepted. The preview arrives
/// one asynchronous step later, so `preview_data_uri` may be `None` while the
/// bytes are already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFabric {
    pub raw_bytes: Arc<[u8]>,
    pub mime_type: String,
    pub display_name: String,
    pub preview_data_uri: Option<String>,
}

impl UploadedFabric {
    pub fn size(&self) -> usize {
        self.raw_bytes.len()
    }

    pub fn exceeds_soft_limit(&self) -> bool {
        self.size() > SOFT_SIZE_LIMIT_BYTES
    }

    pub fn has_preview(&self) -> bool {
        self.preview_data_uri.is_some()
    }
}

impl From<FabricFile> for UploadedFabric {
    fn from(file: FabricFile) -> Self {
        Self {
            raw_bytes: Arc::from(file.bytes),
            mime_type: file.mime_type,
            display_name: file.name,
            preview_data_uri: None,
        }
    }
}
