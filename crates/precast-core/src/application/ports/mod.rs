//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `precast-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::ProjectConfig;
use crate::error::PrecastResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `precast_adapters::filesystem::LocalFilesystem` (production)
/// - `precast_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - Writes must be durable enough that a subsequent `path_exists` on the
///   same path reflects them
/// - Async-ready (can be extended with async-trait later)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn ensure_dir(&self, path: &Path) -> PrecastResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> PrecastResult<()>;

    /// Read a file's content.
    fn read_file(&self, path: &Path) -> PrecastResult<String>;

    /// Check if path exists.
    fn path_exists(&self, path: &Path) -> bool;

    /// Copy a single file.
    fn copy(&self, src: &Path, dst: &Path) -> PrecastResult<()>;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> PrecastResult<()>;
}

/// Variable set handed to the template engine.
///
/// The engine treats this as an opaque key/value bag; the standard keys are
/// derived from the project configuration.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard variables for a configuration: project name (plus case
    /// variants), every stack axis, and the language.
    pub fn from_config(config: &ProjectConfig) -> Self {
        let mut ctx = Self::new();
        ctx.insert("PROJECT_NAME", &config.name);
        ctx.insert("PROJECT_NAME_SNAKE", config.name.replace('-', "_"));
        ctx.insert("FRAMEWORK", &config.framework);
        ctx.insert("BACKEND", &config.backend);
        ctx.insert("DATABASE", &config.database);
        ctx.insert("ORM", &config.orm);
        ctx.insert("STYLING", &config.styling);
        ctx.insert("RUNTIME", &config.runtime);
        ctx.insert("LANGUAGE", &config.language);
        ctx.insert("PACKAGE_MANAGER", &config.package_manager);
        ctx
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Port for template rendering.
///
/// The core treats this as an opaque text-substitution service; what the
/// placeholder syntax looks like is the adapter's business.
///
/// Implemented by:
/// - `precast_adapters::template::SimpleTemplateEngine`
pub trait TemplateEngine: Send + Sync {
    /// Substitute context variables into template text.
    fn render(&self, template: &str, context: &TemplateContext) -> PrecastResult<String>;
}

/// Port for spawning external processes (git, package managers).
///
/// A non-zero exit status is an `Err`, never a silent success. Whether that
/// error is fatal depends on the phase it occurs in — the orchestrator
/// decides, not the runner.
pub trait ProcessRunner: Send + Sync {
    fn run(&self, command: &str, args: &[&str], cwd: &Path) -> PrecastResult<()>;
}

/// Shared handle to the driven ports, passed into every generator.
pub struct GeneratorContext<'a> {
    pub fs: &'a dyn Filesystem,
    pub engine: &'a dyn TemplateEngine,
    pub runner: &'a dyn ProcessRunner,
}

impl GeneratorContext<'_> {
    /// Render a template and write the result, creating parent directories.
    pub fn process_template(
        &self,
        template: &str,
        output: &Path,
        context: &TemplateContext,
    ) -> PrecastResult<()> {
        let rendered = self.engine.render(template, context)?;
        if let Some(parent) = output.parent() {
            self.fs.ensure_dir(parent)?;
        }
        self.fs.write_file(output, &rendered)
    }

    /// Write literal content, creating parent directories.
    pub fn write(&self, output: &Path, content: &str) -> PrecastResult<()> {
        if let Some(parent) = output.parent() {
            self.fs.ensure_dir(parent)?;
        }
        self.fs.write_file(output, content)
    }
}

/// Framework scaffold generator: produces the initial file set a project is
/// built from. Exactly one is selected per run, keyed by framework id; an
/// unknown id is a fatal error in the orchestrator.
pub trait FrameworkGenerator: Send + Sync {
    fn id(&self) -> &'static str;

    fn scaffold(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()>;
}

/// Per-technology enrichment generator (database/ORM, auth, UI library).
///
/// `supported_databases` / `supported_orms` are the generator's own
/// secondary self-check; the central validator remains the authority for
/// whether a combination was ever offered. Empty means "no restriction".
pub trait FeatureGenerator: Send + Sync {
    fn id(&self) -> &'static str;

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()>;

    /// Install this feature's packages. Only invoked when the user opted
    /// into automatic installs; failures are soft.
    fn install_dependencies(
        &self,
        _config: &ProjectConfig,
        _project_path: &Path,
        _ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        Ok(())
    }

    /// Human guidance printed after creation.
    fn next_steps(&self) -> Vec<String> {
        Vec::new()
    }

    fn supported_databases(&self) -> &'static [&'static str] {
        &[]
    }

    fn supported_orms(&self) -> &'static [&'static str] {
        &[]
    }
}
