//! Application layer for Precast.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectOrchestrator)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Registry**: per-technology generator lookup
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod collector;
pub mod error;
pub mod ports;
pub mod registry;
pub mod services;

// Re-export main services
pub use collector::{SetupErrorCollector, SetupFailure};
pub use registry::GeneratorRegistry;
pub use services::ProjectOrchestrator;
pub use services::artifacts;

// Re-export port traits (for adapter implementation)
pub use ports::{
    FeatureGenerator, Filesystem, FrameworkGenerator, GeneratorContext, ProcessRunner,
    TemplateContext, TemplateEngine,
};

pub use error::ApplicationError;
