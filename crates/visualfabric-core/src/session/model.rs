use uuid::Uuid;

use super::rejection::GenerationRejected;
use super::stage::{IdleCondition, Stage};
use crate::fabric::UploadedFabric;
use crate::mockup::{MockupImage, MockupRequest};

/// One open-to-close lifetime of the mockup dialog.
///
/// Fields are only reachable through the transition methods below, which keep
/// two invariants:
/// - a result image implies `Stage::Result`
/// - an error message implies `Stage::Idle`
///
/// Every transition returns whether it applied. A transition that does not
/// fit the current stage leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSession {
    id: String,
    fabric: Option<UploadedFabric>,
    selected_outfit_id: Option<String>,
    stage: Stage,
    result_image: Option<MockupImage>,
    error_message: Option<String>,
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowSession {
    /// Creates an empty `Idle` session with a fresh id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fabric: None,
            selected_outfit_id: None,
            stage: Stage::Idle,
            result_image: None,
            error_message: None,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn fabric(&self) -> Option<&UploadedFabric> {
        self.fabric.as_ref()
    }

    pub fn selected_outfit_id(&self) -> Option<&str> {
        self.selected_outfit_id.as_deref()
    }

    pub fn result_image(&self) -> Option<&MockupImage> {
        self.result_image.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    // ============================================================================
    // Derived state
    // ============================================================================

    pub fn is_idle(&self) -> bool {
        self.stage == Stage::Idle
    }

    pub fn is_generating(&self) -> bool {
        self.stage == Stage::Generating
    }

    /// True when a submission would pass every guard.
    pub fn can_generate(&self) -> bool {
        self.is_idle() && self.fabric.is_some() && self.selected_outfit_id.is_some()
    }

    /// Sub-condition of `Idle`, or `None` in any other stage.
    ///
    /// A visible error wins over field presence.
    pub fn idle_condition(&self) -> Option<IdleCondition> {
        if !self.is_idle() {
            return None;
        }
        if self.error_message.is_some() {
            return Some(IdleCondition::ErrorShown);
        }
        let condition = match (self.fabric.is_some(), self.selected_outfit_id.is_some()) {
            (false, false) => IdleCondition::Empty,
            (true, false) => IdleCondition::FileOnly,
            (false, true) => IdleCondition::OutfitOnly,
            (true, true) => IdleCondition::Ready,
        };
        Some(condition)
    }

    /// Checks the result/error invariants.
    pub fn invariants_hold(&self) -> bool {
        let result_ok = self.result_image.is_none() || self.stage == Stage::Result;
        let error_ok = self.error_message.is_none() || self.stage == Stage::Idle;
        result_ok && error_ok && self.stage != Stage::Closed
    }

    // ============================================================================
    // Transitions
    // ============================================================================

    /// Records a newly accepted fabric, replacing any previous one.
    ///
    /// The preview starts empty. Only allowed while `Idle`.
    pub fn accept_fabric(&mut self, fabric: UploadedFabric) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.fabric = Some(UploadedFabric {
            preview_data_uri: None,
            ..fabric
        });
        true
    }

    /// Stores the rendered preview for the current fabric.
    ///
    /// Callers are responsible for making sure the preview belongs to the
    /// current fabric and not a replaced one.
    pub fn attach_preview(&mut self, preview_data_uri: String) -> bool {
        match self.fabric.as_mut() {
            Some(fabric) => {
                fabric.preview_data_uri = Some(preview_data_uri);
                true
            }
            None => false,
        }
    }

    /// Selects an outfit by id. Only allowed while `Idle`.
    pub fn select_outfit(&mut self, outfit_id: impl Into<String>) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.selected_outfit_id = Some(outfit_id.into());
        true
    }

    /// Moves `Idle -> Generating` when a fabric and an outfit are present.
    ///
    /// Clears any previous error and result, and returns the request to send.
    pub fn begin_generation(&mut self) -> Result<MockupRequest, GenerationRejected> {
        match self.stage {
            Stage::Generating => return Err(GenerationRejected::AlreadyGenerating),
            Stage::Result => return Err(GenerationRejected::NotIdle),
            Stage::Closed => return Err(GenerationRejected::DialogClosed),
            Stage::Idle => {}
        }

        let fabric = self.fabric.as_ref().ok_or(GenerationRejected::MissingFabric)?;
        let outfit_id = self
            .selected_outfit_id
            .as_ref()
            .ok_or(GenerationRejected::MissingOutfit)?;

        let request = MockupRequest::new(outfit_id.clone(), fabric);
        self.stage = Stage::Generating;
        self.error_message = None;
        self.result_image = None;
        Ok(request)
    }

    /// Moves `Generating -> Result` with the generated image.
    pub fn complete_generation(&mut self, image: MockupImage) -> bool {
        if !self.is_generating() {
            return false;
        }
        self.stage = Stage::Result;
        self.result_image = Some(image);
        true
    }

    /// Moves `Generating -> Idle` with a user-facing message.
    pub fn fail_generation(&mut self, message: impl Into<String>) -> bool {
        if !self.is_generating() {
            return false;
        }
        self.stage = Stage::Idle;
        self.result_image = None;
        self.error_message = Some(message.into());
        true
    }

    /// Shows an error outside the generation path (catalog failure).
    ///
    /// Only allowed while `Idle`, so the error invariant holds.
    pub fn report_error(&mut self, message: impl Into<String>) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.error_message = Some(message.into());
        true
    }

    /// Moves `Result -> Idle`, clearing every field.
    pub fn reset(&mut self) -> bool {
        if self.stage != Stage::Result {
            return false;
        }
        self.stage = Stage::Idle;
        self.fabric = None;
        self.selected_outfit_id = None;
        self.result_image = None;
        self.error_message = None;
        true
    }
}
