use visualfabric_core::Result;
use visualfabric_core::catalog::OutfitOption;
use visualfabric_core::mockup::MockupImage;

/// Completion of a spawned async step, routed back to the controller.
///
/// Each carries the identifiers that were current when the step started so
/// the controller can drop results the session has moved past.
#[derive(Debug)]
pub(crate) enum WorkflowEvent {
    CatalogLoaded {
        epoch: u64,
        result: Result<Vec<OutfitOption>>,
    },
    PreviewRendered {
        epoch: u64,
        token: u64,
        result: Result<String>,
    },
    GenerationSettled {
        epoch: u64,
        ticket: u64,
        result: Result<MockupImage>,
    },
}

/// What applying one completion did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowUpdate {
    CatalogReady { options: usize },
    CatalogFailed,
    PreviewReady,
    PreviewFailed,
    MockupReady,
    GenerationFailed,
    /// The session had moved on (closed, reopened, file replaced); result dropped.
    Discarded,
}
