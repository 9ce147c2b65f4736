//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Project directory already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// No scaffold generator is registered for the requested framework.
    #[error("Unknown framework '{id}'")]
    UnknownFramework { id: String },

    /// No generator is registered for an enrichment step's selection.
    #[error("No {kind} generator registered for '{id}'")]
    GeneratorNotRegistered { kind: &'static str, id: String },

    /// A generator refused a combination its own support list excludes.
    #[error("Generator '{generator}' does not support this stack: {reason}")]
    UnsupportedCombination { generator: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderFailed { reason: String },

    /// An external command exited non-zero or could not be spawned.
    #[error("Command failed: {command}: {detail}")]
    CommandFailed { command: String, detail: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Or remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::UnknownFramework { id } => vec![
                format!("'{id}' is not a known framework"),
                "Run 'precast list' to see available frameworks".into(),
            ],
            Self::GeneratorNotRegistered { kind, .. } => vec![
                format!("No {kind} generator is available for that selection"),
                "Run 'precast list' to see supported options".into(),
            ],
            Self::UnsupportedCombination { reason, .. } => vec![
                format!("Unsupported combination: {reason}"),
                "Validation should have caught this — please report it".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("External command failed: {command}"),
                "Ensure the command is installed and in your PATH".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::UnknownFramework { .. } | Self::GeneratorNotRegistered { .. } => {
                ErrorCategory::NotFound
            }
            Self::UnsupportedCombination { .. } => ErrorCategory::Compatibility,
            Self::FilesystemError { .. }
            | Self::RenderFailed { .. }
            | Self::CommandFailed { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
