use serde::{Deserialize, Serialize};

/// A selectable garment style.
///
/// Supplied entirely by the catalog service; identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitOption {
    /// Opaque identifier sent back as `prompt_id` when generating.
    pub id: String,
    /// Display text for the selector.
    pub label: String,
}

impl OutfitOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Wire shape of one entry in the `GET /prompts/` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub id: String,
    pub outfit: String,
}

impl From<PromptRecord> for OutfitOption {
    fn from(record: PromptRecord) -> Self {
        Self {
            id: record.id,
            label: record.outfit,
        }
    }
}
