//! Implementation of the `precast add` command.
//!
//! Reloads the sidecar metadata of an existing project, merges the requested
//! features as an explicit patch, re-validates the combined stack, and runs
//! only the setup steps the patch touches. Failures in individual steps are
//! soft, exactly as during creation.

use tracing::{info, instrument};

use precast_adapters::{
    LocalFilesystem, LocalProcessRunner, SimpleTemplateEngine, default_registry,
};
use precast_core::{
    application::{ProjectOrchestrator, SetupErrorCollector, ports::Filesystem},
    domain::{CompatibilityValidator, ConfigPatch, ProjectConfig, normalize},
};

use crate::{
    cli::{AddArgs, GlobalArgs},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `precast add` command.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: AddArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let fs = LocalFilesystem::new();
    let sidecar_path = args.path.join("precast.json");

    if !fs.path_exists(&sidecar_path) {
        return Err(CliError::NotAPrecastProject {
            path: args.path.clone(),
        });
    }

    // Reconstruct the stack without re-prompting.
    let sidecar = fs
        .read_file(&sidecar_path)
        .map_err(CliError::Core)?;
    let mut project =
        ProjectConfig::from_sidecar_json(&sidecar).map_err(|e| CliError::Core(e.into()))?;
    project.project_path = args.path.clone();

    let patch = build_patch(&args);
    if patch.is_empty() {
        output.info("Nothing to add — pass at least one feature flag")?;
        return Ok(());
    }

    // Re-validate the merged stack before touching any file.
    let mut preview = project.clone();
    preview.apply(&patch);
    let preview = normalize(&preview);

    let validator = CompatibilityValidator::new();
    let report = validator.validate(&preview);
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    if !report.valid {
        return Err(CliError::ValidationFailed {
            errors: report.errors,
        });
    }

    let orchestrator = ProjectOrchestrator::new(
        default_registry(),
        Box::new(fs),
        Box::new(SimpleTemplateEngine::new()),
        Box::new(LocalProcessRunner::new()),
    );
    let mut collector = SetupErrorCollector::new();

    output.header(&format!("Adding features to '{}'...", project.name))?;
    info!(project = %project.name, "Feature addition started");

    orchestrator.add_features(&mut project, &patch, &mut collector)?;

    for failure in collector.failures() {
        output.warning(&failure.to_string())?;
    }

    output.success("Features added")?;
    if !global.quiet {
        for step in orchestrator.next_steps(&project) {
            output.print(&format!("  {step}"))?;
        }
    }

    Ok(())
}

/// Translate flags into the explicit partial-update record.
fn build_patch(args: &AddArgs) -> ConfigPatch {
    ConfigPatch {
        database: args.database.clone(),
        orm: args.orm.clone(),
        ui_library: args.ui_library.clone(),
        auth_provider: args.auth.clone(),
        deployment_method: args.deploy.clone(),
        docker: args.docker.then_some(true),
        powerups: args.powerups.clone(),
        plugins: args.plugins.clone(),
    }
}
