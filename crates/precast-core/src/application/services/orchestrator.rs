//! Project orchestrator - main application service.
//!
//! Turns one validated configuration into a materialized project directory:
//!
//! 1. Precondition: the target directory must not exist (fail fast, no writes)
//! 2. Framework scaffold (unknown framework id is fatal)
//! 3. Enrichment pipeline: fixed, ordered, each step behind its own guard and
//!    its own error boundary — a failing step is logged, recorded in the
//!    collector, and the pipeline continues
//! 4. Sidecar metadata, deployment config, git init, Docker files — fatal on
//!    error
//! 5. Any error escaping 2-4 removes the entire project directory (full
//!    rollback) and re-raises
//!
//! The soft-failure contract of step 3 is the load-bearing distinction: an
//! enrichment failure leaves a structurally complete project in place, while
//! a scaffold or git failure leaves nothing behind.
//!
//! [`ProjectOrchestrator::add_features`] drives the same step bodies against
//! an existing project for the `add` flow; there is no scaffold and no
//! rollback there, only the soft-failure contract.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        GeneratorRegistry, SetupErrorCollector,
        error::ApplicationError,
        ports::{FeatureGenerator, Filesystem, GeneratorContext, ProcessRunner, TemplateEngine},
        services::artifacts,
    },
    domain::{ConfigPatch, ProjectConfig},
    error::PrecastResult,
};

/// Fixed step names used as collector keys. Tests assert on these strings;
/// do not reword them casually.
mod step {
    pub const AI_CONTEXT: &str = "AI context files";
    pub const COLOR_PALETTE: &str = "Color palette";
    pub const DATABASE: &str = "Database configuration setup";
    pub const AUTH: &str = "Authentication setup";
    pub const UI_LIBRARY: &str = "UI library setup";
    pub const POWERUPS: &str = "Powerups setup";
    pub const PLUGINS: &str = "Plugins setup";
    pub const ADMIN_WIDGET: &str = "Admin widget setup";
    pub const DOCKER_COMPOSE: &str = "Docker compose setup";
    pub const ENV_FILES: &str = "Environment files";
}

/// Main orchestration service.
pub struct ProjectOrchestrator {
    registry: GeneratorRegistry,
    fs: Box<dyn Filesystem>,
    engine: Box<dyn TemplateEngine>,
    runner: Box<dyn ProcessRunner>,
}

impl ProjectOrchestrator {
    /// Create a new orchestrator with the given adapters.
    pub fn new(
        registry: GeneratorRegistry,
        fs: Box<dyn Filesystem>,
        engine: Box<dyn TemplateEngine>,
        runner: Box<dyn ProcessRunner>,
    ) -> Self {
        Self {
            registry,
            fs,
            engine,
            runner,
        }
    }

    fn ctx(&self) -> GeneratorContext<'_> {
        GeneratorContext {
            fs: self.fs.as_ref(),
            engine: self.engine.as_ref(),
            runner: self.runner.as_ref(),
        }
    }

    /// Create the project described by `config`.
    ///
    /// `config.project_path` must already be resolved by the caller
    /// (`cwd.join(name)` for the CLI). Enrichment failures land in
    /// `collector`; the returned `Err` covers fatal phases only, after a
    /// full rollback of the project directory.
    #[instrument(skip_all, fields(project = %config.name, path = %config.project_path.display()))]
    pub fn create_project(
        &self,
        config: &ProjectConfig,
        collector: &mut SetupErrorCollector,
    ) -> PrecastResult<()> {
        let project_path = config.project_path.as_path();

        // Single-writer lock: nothing may be written before this check.
        if self.fs.path_exists(project_path) {
            return Err(ApplicationError::ProjectExists {
                path: project_path.to_path_buf(),
            }
            .into());
        }

        self.fs.ensure_dir(project_path)?;
        info!("Project directory created");

        match self.materialize(config, project_path, collector) {
            Ok(()) => {
                info!(
                    soft_failures = collector.len(),
                    "Project created successfully"
                );
                Ok(())
            }
            Err(e) => {
                warn!("Fatal error during creation, rolling back");
                self.rollback(project_path);
                Err(e)
            }
        }
    }

    /// Apply a feature patch to an existing project: run the setup steps the
    /// patch touches (soft failures, as in creation) and rewrite the sidecar.
    #[instrument(skip_all, fields(project = %config.name))]
    pub fn add_features(
        &self,
        config: &mut ProjectConfig,
        patch: &ConfigPatch,
        collector: &mut SetupErrorCollector,
    ) -> PrecastResult<()> {
        let project_path = config.project_path.clone();
        if !self.fs.path_exists(&project_path) {
            return Err(ApplicationError::FilesystemError {
                path: project_path.clone(),
                reason: "Project directory does not exist".into(),
            }
            .into());
        }

        config.apply(patch);
        let config = &*config;
        let ctx = self.ctx();
        let path = project_path.as_path();

        if (patch.database.is_some() || patch.orm.is_some()) && config.database != "none" {
            run_step(step::DATABASE, collector, || {
                self.setup_database(config, path, &ctx)
            });
        }
        if patch.auth_provider.is_some() {
            run_step(step::AUTH, collector, || self.setup_auth(config, path, &ctx));
        }
        if patch.ui_library.is_some() {
            run_step(step::UI_LIBRARY, collector, || {
                self.setup_ui_library(config, path, &ctx)
            });
        }
        if !patch.powerups.is_empty() {
            run_step(step::POWERUPS, collector, || {
                self.setup_powerups(config, path, &ctx)
            });
        }
        if !patch.plugins.is_empty() {
            run_step(step::PLUGINS, collector, || {
                self.setup_plugins(config, path, &ctx)
            });
        }
        if self.wants_admin(config)
            && (patch.database.is_some()
                || patch.auth_provider.is_some()
                || !patch.plugins.is_empty())
        {
            run_step(step::ADMIN_WIDGET, collector, || {
                self.setup_admin_widget(config, path, &ctx)
            });
        }
        if patch.docker == Some(true) {
            run_step(step::DOCKER_COMPOSE, collector, || {
                self.write_docker_files(config, path, &ctx)
            });
        }
        if patch.database.is_some() || patch.auth_provider.is_some() {
            run_step(step::ENV_FILES, collector, || {
                self.setup_env_files(config, path, &ctx)
            });
        }

        // Persist the merged configuration so the next `add` starts from it.
        self.fs
            .write_file(&path.join("precast.json"), &config.to_sidecar_json()?)?;

        info!(soft_failures = collector.len(), "Features applied");
        Ok(())
    }

    // ── Fatal phases ──────────────────────────────────────────────────────

    fn materialize(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        collector: &mut SetupErrorCollector,
    ) -> PrecastResult<()> {
        let ctx = self.ctx();

        // Scaffold first; every later step patches files inside it.
        let generator = self.registry.framework(&config.framework).ok_or_else(|| {
            ApplicationError::UnknownFramework {
                id: config.framework.clone(),
            }
        })?;
        generator.scaffold(config, project_path, &ctx)?;
        info!(framework = %config.framework, "Scaffold generated");

        self.run_enrichment(config, project_path, &ctx, collector);

        // Sidecar metadata: later `add` invocations reconstruct the stack
        // from this file.
        self.fs.write_file(
            &project_path.join("precast.json"),
            &config.to_sidecar_json()?,
        )?;

        if let Some(method) = config.deployment_method.as_deref() {
            if method != "none" {
                let (file, content) = artifacts::deployment_config(config).ok_or_else(|| {
                    ApplicationError::GeneratorNotRegistered {
                        kind: "deployment",
                        id: method.to_string(),
                    }
                })?;
                ctx.write(&project_path.join(file), &content)?;
                info!(method, "Deployment config written");
            }
        }

        if config.git {
            self.init_git(config, project_path)?;
        }

        if config.docker {
            self.write_docker_files(config, project_path, &ctx)?;
            info!("Docker files written");
        }

        Ok(())
    }

    /// Initialize a repository and commit the generated tree. A non-zero
    /// exit here is fatal and triggers rollback.
    fn init_git(&self, config: &ProjectConfig, project_path: &Path) -> PrecastResult<()> {
        self.runner.run("git", &["init"], project_path)?;
        self.fs.write_file(
            &project_path.join(".gitignore"),
            &artifacts::gitignore(config),
        )?;
        self.runner.run("git", &["add", "-A"], project_path)?;
        self.runner
            .run("git", &["commit", "-m", "Initial commit"], project_path)?;
        info!("Git repository initialized");
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.fs.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }

    // ── Enrichment pipeline ───────────────────────────────────────────────

    /// Run the optional setup steps in their fixed order. Each step is
    /// individually guarded and individually fallible; nothing here returns
    /// an error to the caller.
    fn run_enrichment(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
        collector: &mut SetupErrorCollector,
    ) {
        if config.ai_context || self.mcp_requested(config) {
            run_step(step::AI_CONTEXT, collector, || {
                self.setup_ai_context(config, project_path, ctx)
            });
        }

        if config
            .color_palette
            .as_deref()
            .is_some_and(|p| !p.is_empty())
        {
            run_step(step::COLOR_PALETTE, collector, || {
                let palette = config.color_palette.as_deref().unwrap_or_default();
                ctx.write(
                    &project_path.join("styles/palette.css"),
                    &artifacts::palette_css(palette),
                )
            });
        }

        if config.database != "none" {
            run_step(step::DATABASE, collector, || {
                self.setup_database(config, project_path, ctx)
            });
        }

        if config.auth_provider.as_deref().is_some_and(|p| p != "none") {
            run_step(step::AUTH, collector, || {
                self.setup_auth(config, project_path, ctx)
            });
        }

        if config.ui_library.as_deref().is_some_and(|l| !l.is_empty()) {
            run_step(step::UI_LIBRARY, collector, || {
                self.setup_ui_library(config, project_path, ctx)
            });
        }

        if !config.powerups.is_empty() {
            run_step(step::POWERUPS, collector, || {
                self.setup_powerups(config, project_path, ctx)
            });
        }

        if !config.plugins.is_empty() {
            run_step(step::PLUGINS, collector, || {
                self.setup_plugins(config, project_path, ctx)
            });
        }

        if self.wants_admin(config) {
            run_step(step::ADMIN_WIDGET, collector, || {
                self.setup_admin_widget(config, project_path, ctx)
            });
        }

        if config.docker && config.database != "none" {
            run_step(step::DOCKER_COMPOSE, collector, || {
                ctx.write(
                    &project_path.join("docker-compose.yml"),
                    &artifacts::docker_compose(config),
                )
            });
        }

        let wants_env = config.database != "none"
            || config.auth_provider.as_deref().is_some_and(|p| p != "none");
        if wants_env {
            run_step(step::ENV_FILES, collector, || {
                self.setup_env_files(config, project_path, ctx)
            });
        }
    }

    // ── Step bodies ───────────────────────────────────────────────────────

    fn mcp_requested(&self, config: &ProjectConfig) -> bool {
        config.ai_assistant.as_deref() == Some("claude") && !config.mcp_servers.is_empty()
    }

    /// Admin widget ships whenever there is something for it to manage.
    fn wants_admin(&self, config: &ProjectConfig) -> bool {
        !config.plugins.is_empty()
            || config.database != "none"
            || config.auth_provider.as_deref().is_some_and(|p| p != "none")
    }

    fn setup_ai_context(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        if config.ai_context {
            ctx.write(
                &project_path.join("CLAUDE.md"),
                &artifacts::ai_context_markdown(config),
            )?;
        }
        // Claude-specific MCP wiring; other assistants have no equivalent.
        if self.mcp_requested(config) {
            ctx.write(
                &project_path.join(".mcp.json"),
                &artifacts::mcp_config_json(&config.mcp_servers),
            )?;
        }
        Ok(())
    }

    fn setup_database(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let generator = self.registry.database(&config.orm).ok_or_else(|| {
            ApplicationError::GeneratorNotRegistered {
                kind: "database",
                id: config.orm.clone(),
            }
        })?;
        self.run_feature(generator, config, project_path, ctx)
    }

    fn setup_auth(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let provider = config.auth_provider.as_deref().unwrap_or_default();
        let generator = self.registry.auth(provider).ok_or_else(|| {
            ApplicationError::GeneratorNotRegistered {
                kind: "auth",
                id: provider.to_string(),
            }
        })?;
        self.run_feature(generator, config, project_path, ctx)
    }

    fn setup_ui_library(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let library = config.ui_library.as_deref().unwrap_or_default();
        let generator = self.registry.ui_library(library).ok_or_else(|| {
            ApplicationError::GeneratorNotRegistered {
                kind: "ui library",
                id: library.to_string(),
            }
        })?;
        self.run_feature(generator, config, project_path, ctx)
    }

    fn run_feature(
        &self,
        generator: &dyn FeatureGenerator,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        generator.setup(config, project_path, ctx)?;
        if config.auto_install {
            generator.install_dependencies(config, project_path, ctx)?;
        }
        Ok(())
    }

    fn setup_powerups(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let mut unknown = Vec::new();
        for powerup in &config.powerups {
            match artifacts::powerup_file(powerup) {
                Some((file, content)) => {
                    ctx.write(&project_path.join(file), content)?;
                }
                None => unknown.push(powerup.as_str()),
            }
        }
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::GeneratorNotRegistered {
                kind: "powerup",
                id: unknown.join(", "),
            }
            .into())
        }
    }

    fn setup_plugins(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let doc = serde_json::json!({ "plugins": config.plugins });
        ctx.write(
            &project_path.join(".precast/plugins.json"),
            &serde_json::to_string_pretty(&doc).unwrap_or_default(),
        )
    }

    fn setup_admin_widget(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(
            &project_path.join(".precast/admin.json"),
            &artifacts::admin_config_json(config),
        )
    }

    fn setup_env_files(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let content = artifacts::env_file(config);
        ctx.write(&project_path.join(".env"), &content)?;
        ctx.write(&project_path.join(".env.example"), &content)
    }

    fn write_docker_files(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(
            &project_path.join("Dockerfile"),
            &artifacts::dockerfile(config),
        )?;
        ctx.write(
            &project_path.join("docker-compose.yml"),
            &artifacts::docker_compose(config),
        )?;
        ctx.write(
            &project_path.join(".dockerignore"),
            &artifacts::dockerignore(),
        )
    }

    /// Collected next-step guidance from the generators the configuration
    /// selects; printed by the CLI after a successful run.
    pub fn next_steps(&self, config: &ProjectConfig) -> Vec<String> {
        let mut steps = Vec::new();
        if config.database != "none" {
            if let Some(generator) = self.registry.database(&config.orm) {
                steps.extend(generator.next_steps());
            }
        }
        if let Some(provider) = config.auth_provider.as_deref() {
            if let Some(generator) = self.registry.auth(provider) {
                steps.extend(generator.next_steps());
            }
        }
        steps
    }
}

/// Run one enrichment step inside its error boundary.
fn run_step(
    name: &str,
    collector: &mut SetupErrorCollector,
    body: impl FnOnce() -> PrecastResult<()>,
) {
    if let Err(e) = body() {
        warn!(step = name, error = %e, "Enrichment step failed, continuing");
        collector.record(name, e);
    }
}
