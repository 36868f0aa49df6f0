use thiserror::Error;

/// Reasons a generation request is refused without touching the network.
///
/// None of these change the session's stage.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationRejected {
    #[error("The dialog is closed")]
    DialogClosed,

    #[error("A mockup is already being generated")]
    AlreadyGenerating,

    #[error("Start over to generate another mockup")]
    NotIdle,

    #[error("Please upload a fabric image first")]
    MissingFabric,

    #[error("Please select an outfit option")]
    MissingOutfit,
}

impl GenerationRejected {
    /// Whether the user should be told about this rejection.
    ///
    /// Duplicate submissions are silently absorbed.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::MissingFabric | Self::MissingOutfit)
    }
}
