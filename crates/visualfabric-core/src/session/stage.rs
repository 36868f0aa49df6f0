//! Stage types for workflow state management.

use serde::{Deserialize, Serialize};

/// Top-level workflow stage.
///
/// `Closed` is never held by a live session; the controller reports it once
/// the dialog has been dismissed and the session discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Waiting for input. Covers every combination of file/outfit/error.
    Idle,
    /// A mockup request is in flight.
    Generating,
    /// A mockup is on screen. Only `reset` or `close` leave this stage.
    Result,
    /// The dialog was dismissed.
    Closed,
}

/// Which incidental combination of fields an `Idle` session is showing.
///
/// These are not separate stages: nothing triggers a move between them
/// except filling or clearing fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleCondition {
    Empty,
    FileOnly,
    OutfitOnly,
    Ready,
    ErrorShown,
}
