//! Generator registry.
//!
//! Holds the per-technology collaborators the orchestrator selects from:
//! framework scaffolds keyed by framework id, database generators keyed by
//! ORM id, auth generators keyed by provider id, UI-library generators keyed
//! by library id. Populated once at startup (see
//! `precast_adapters::default_registry`); lookup misses surface as
//! orchestrator errors, not panics.

use crate::application::ports::{FeatureGenerator, FrameworkGenerator};

#[derive(Default)]
pub struct GeneratorRegistry {
    frameworks: Vec<Box<dyn FrameworkGenerator>>,
    databases: Vec<Box<dyn FeatureGenerator>>,
    auth_providers: Vec<Box<dyn FeatureGenerator>>,
    ui_libraries: Vec<Box<dyn FeatureGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn register_framework(&mut self, generator: Box<dyn FrameworkGenerator>) {
        self.frameworks.push(generator);
    }

    /// Register a database generator; its id is the ORM it drives.
    pub fn register_database(&mut self, generator: Box<dyn FeatureGenerator>) {
        self.databases.push(generator);
    }

    pub fn register_auth(&mut self, generator: Box<dyn FeatureGenerator>) {
        self.auth_providers.push(generator);
    }

    pub fn register_ui_library(&mut self, generator: Box<dyn FeatureGenerator>) {
        self.ui_libraries.push(generator);
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn framework(&self, id: &str) -> Option<&dyn FrameworkGenerator> {
        self.frameworks
            .iter()
            .find(|g| g.id() == id)
            .map(|g| &**g)
    }

    pub fn database(&self, orm_id: &str) -> Option<&dyn FeatureGenerator> {
        self.databases
            .iter()
            .find(|g| g.id() == orm_id)
            .map(|g| &**g)
    }

    pub fn auth(&self, provider_id: &str) -> Option<&dyn FeatureGenerator> {
        self.auth_providers
            .iter()
            .find(|g| g.id() == provider_id)
            .map(|g| &**g)
    }

    pub fn ui_library(&self, library_id: &str) -> Option<&dyn FeatureGenerator> {
        self.ui_libraries
            .iter()
            .find(|g| g.id() == library_id)
            .map(|g| &**g)
    }

    /// Ids of all registered framework scaffolds.
    pub fn framework_ids(&self) -> Vec<&'static str> {
        self.frameworks.iter().map(|g| g.id()).collect()
    }
}
