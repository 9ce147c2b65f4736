use thiserror::Error;

use crate::domain::catalog::Axis;

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A flag or prompt value names an option the catalog does not know.
    #[error("unknown {axis} '{id}'")]
    UnknownOption {
        axis: Axis,
        id: String,
        available: Vec<&'static str>,
    },

    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Sidecar metadata could not be serialized or parsed.
    #[error("configuration serialization failed: {reason}")]
    Serialization { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownOption {
                axis, available, ..
            } => {
                let mut out = vec![format!("Available {axis} options:")];
                for id in available {
                    out.push(format!("  • {id}"));
                }
                out
            }
            Self::InvalidProjectName { reason, .. } => vec![
                format!("Project name is invalid: {reason}"),
                "Use lowercase letters, digits, and hyphens".into(),
                "Examples: my-app, blog2, acme-shop".into(),
            ],
            Self::Serialization { .. } => vec![
                "The precast.json sidecar could not be processed".into(),
                "Re-create it by running the command again, or fix the JSON by hand".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownOption { .. } => ErrorCategory::NotFound,
            Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
