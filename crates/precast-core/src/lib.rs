//! Precast Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Precast
//! project creation tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          precast-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ProjectOrchestrator, collectors)    │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (Filesystem, TemplateEngine, Runner,   │
//! │   Framework/Feature generators)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     precast-adapters (Infrastructure)   │
//! │  (LocalFilesystem, SimpleTemplateEngine,│
//! │   LocalProcessRunner, generators)       │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (StackCatalog, CompatibilityValidator, │
//! │   ConfigRecommender, ProjectConfig)     │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use precast_core::domain::{CompatibilityValidator, ConfigDraft};
//!
//! // 1. Resolve a full configuration from a draft
//! let config = ConfigDraft::default().resolve("my-app").unwrap();
//!
//! // 2. Validate it before any filesystem work
//! let validator = CompatibilityValidator::new();
//! let report = validator.validate(&config);
//! assert!(report.valid);
//!
//! // 3. Hand it to a ProjectOrchestrator built with injected adapters
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GeneratorRegistry, ProjectOrchestrator, SetupErrorCollector,
        ports::{FeatureGenerator, Filesystem, FrameworkGenerator, ProcessRunner, TemplateEngine},
    };
    pub use crate::domain::{
        Axis, CompatibilityRule, CompatibilityValidator, ConfigDraft, ConfigPatch,
        ConfigRecommender, ProjectConfig, RuleSeverity, StackOption, ValidationResult, catalog,
        normalize,
    };
    pub use crate::error::{PrecastError, PrecastResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
