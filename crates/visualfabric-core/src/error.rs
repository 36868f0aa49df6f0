//! Error types for the VisualFabric workflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the outfit catalog cannot be fetched.
pub const CATALOG_UNAVAILABLE_MESSAGE: &str =
    "Could not load outfit options. Close and reopen the demo to try again.";

/// Shown when a mockup request fails for any reason.
pub const GENERATION_FAILED_MESSAGE: &str = "Mockup generation failed. Please try again.";

/// A shared error type for the whole workflow.
///
/// Variants carry the underlying detail for diagnostics. Use
/// [`FabricError::user_message`] for anything that reaches the user.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FabricError {
    /// The outfit catalog service failed or answered with a non-200 status
    #[error("Catalog error: {message}")]
    Catalog {
        status: Option<u16>,
        message: String,
    },

    /// The mockup service failed or answered with a non-200 status
    #[error("Generation error: {message}")]
    Generation {
        status: Option<u16>,
        message: String,
    },

    /// A remote call did not settle in time
    #[error("Timed out after {seconds}s: {operation}")]
    Timeout {
        operation: String,
        seconds: u64,
    },

    /// A local file could not be taken in as a fabric
    #[error("Intake error: {0}")]
    Intake(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FabricError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Catalog error without an HTTP status
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Generation error without an HTTP status
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an Intake error
    pub fn intake(message: impl Into<String>) -> Self {
        Self::Intake(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog { .. })
    }

    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// HTTP status reported by the remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Catalog { status, .. } | Self::Generation { status, .. } => *status,
            _ => None,
        }
    }

    /// Short text safe to show in the dialog.
    ///
    /// Never includes the underlying error. Anything that is not a catalog
    /// failure happened on the generation path.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Catalog { .. } => CATALOG_UNAVAILABLE_MESSAGE,
            _ => GENERATION_FAILED_MESSAGE,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FabricError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FabricError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FabricError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Body decode failures are serialization errors; anything else is transport.
impl From<reqwest::Error> for FabricError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Serialization {
                format: "HTTP body".to_string(),
                message: err.to_string(),
            };
        }
        Self::Internal(format!("HTTP transport error: {}", err))
    }
}

/// A type alias for `Result<T, FabricError>`.
pub type Result<T> = std::result::Result<T, FabricError>;
