// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Precast.
//!
//! This module contains pure business logic with ZERO external dependencies
//! beyond serde for the sidecar contract. All I/O, templating, and process
//! concerns are handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Immutable catalog**: Stack options are load-time static data
//! - **Validation never mutates**: normalization is a separate explicit phase

// Public API - what the world sees
pub mod catalog;
pub mod config;
pub mod error;
pub mod recommend;
pub mod rules;
pub mod validator;

// Re-exports for convenience
pub use catalog::{Axis, StackOption};
pub use config::{ConfigDraft, ConfigPatch, ProjectConfig, normalize};
pub use error::{DomainError, ErrorCategory};
pub use recommend::ConfigRecommender;
pub use rules::{CompatibilityRule, RulePredicate, RuleSeverity};
pub use validator::{CompatibilityValidator, ValidationResult};
