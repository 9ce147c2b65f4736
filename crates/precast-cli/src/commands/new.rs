//! Implementation of the `precast new` command.
//!
//! Responsibility: translate CLI flags (and prompts) into a validated
//! `ProjectConfig`, call the core orchestrator, and display results. No
//! business logic lives here.

use tracing::{debug, info, instrument};

use precast_adapters::{
    LocalFilesystem, LocalProcessRunner, SimpleTemplateEngine, default_registry,
};
use precast_core::{
    application::{ProjectOrchestrator, SetupErrorCollector},
    domain::{Axis, CompatibilityValidator, ConfigDraft, ProjectConfig, normalize},
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `precast new` command.
///
/// Dispatch sequence:
/// 1. Validate the project name
/// 2. Build a draft from flags + config-file defaults
/// 3. Prompt for missing axes (unless `--yes`)
/// 4. Resolve, normalize, and validate the full configuration
/// 5. Confirm with user unless `--yes` or `--quiet`
/// 6. Early-exit if `--dry-run`
/// 7. Execute creation via `ProjectOrchestrator`
/// 8. Print soft failures, next steps, and success
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    validate_project_name(&args.name)?;

    // 2. Flags win over config-file defaults; unset axes stay None for the
    //    prompt/default machinery.
    let mut draft = build_draft(&args, &config);

    // 3. Interactive prompting for anything still unset.
    let validator = CompatibilityValidator::new();
    if !args.yes {
        prompt_missing_axes(&mut draft, &validator)?;
    }

    // 4. Resolve + normalize + validate.
    let resolved = draft
        .resolve(&args.name)
        .map_err(|e| CliError::Core(e.into()))?;
    let mut project = normalize(&resolved);
    project.project_path = std::env::current_dir()?.join(&project.name);

    let report = validator.validate(&project);
    for warning in &report.warnings {
        output.warning(warning)?;
    }
    if !report.valid {
        return Err(CliError::ValidationFailed {
            errors: report.errors,
        });
    }

    debug!(
        framework = %project.framework,
        backend = %project.backend,
        database = %project.database,
        orm = %project.orm,
        "Configuration validated"
    );

    // 5. Show configuration and confirm.
    if !global.quiet && !args.yes {
        show_configuration(&project, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 6. Dry run: describe but do not write.
    if args.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            project.name,
            project.project_path.display(),
        ))?;
        show_configuration(&project, &output)?;
        return Ok(());
    }

    // 7. Create adapters and run.
    let orchestrator = ProjectOrchestrator::new(
        default_registry(),
        Box::new(LocalFilesystem::new()),
        Box::new(SimpleTemplateEngine::new()),
        Box::new(LocalProcessRunner::new()),
    );
    let mut collector = SetupErrorCollector::new();

    output.header(&format!("Creating '{}'...", project.name))?;
    info!(path = %project.project_path.display(), "Creation started");

    orchestrator.create_project(&project, &mut collector)?;

    // 8. Soft failures are warnings, not errors: the project exists.
    for failure in collector.failures() {
        output.warning(&failure.to_string())?;
    }

    output.success(&format!("Project '{}' created!", project.name))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project.name))?;
        if !project.auto_install {
            output.print(&format!("  {} install", project.package_manager))?;
        }
        for step in orchestrator.next_steps(&project) {
            output.print(&format!("  {step}"))?;
        }
    }

    Ok(())
}

// ── Name validation ───────────────────────────────────────────────────────────

fn validate_project_name(name: &str) -> CliResult<()> {
    if name.is_empty() {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "name cannot be empty".into(),
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CliError::InvalidProjectName {
            name: name.into(),
            reason: "only lowercase letters, digits, and hyphens are allowed".into(),
        });
    }
    Ok(())
}

// ── Draft construction ────────────────────────────────────────────────────────

fn build_draft(args: &NewArgs, config: &AppConfig) -> ConfigDraft {
    let pick = |flag: &Option<String>, fallback: &Option<String>| -> Option<String> {
        flag.clone().or_else(|| fallback.clone())
    };

    ConfigDraft {
        framework: pick(&args.framework, &config.defaults.framework),
        backend: pick(&args.backend, &config.defaults.backend),
        database: pick(&args.database, &config.defaults.database),
        orm: pick(&args.orm, &config.defaults.orm),
        styling: pick(&args.styling, &config.defaults.styling),
        runtime: pick(&args.runtime, &config.defaults.runtime),
        typescript: args.no_typescript.then_some(false),
        git: args.no_git.then_some(false),
        docker: args.docker.then_some(true),
        package_manager: pick(&args.package_manager, &config.defaults.package_manager),
        ui_library: args.ui_library.clone(),
        auth_provider: args.auth.clone(),
        deployment_method: args.deploy.clone(),
        color_palette: args.palette.clone(),
        ai_context: args.ai.then_some(true),
        auto_install: args.install.then_some(true),
        ..Default::default()
    }
}

// ── Interactive prompting ─────────────────────────────────────────────────────

/// Prompt for each unset main axis, offering only options compatible with
/// what has already been chosen.
#[cfg(feature = "interactive")]
fn prompt_missing_axes(
    draft: &mut ConfigDraft,
    validator: &CompatibilityValidator,
) -> CliResult<()> {
    use precast_core::domain::{ConfigRecommender, catalog};

    let recommender = ConfigRecommender::new();

    if draft.framework.is_none() {
        let choices: Vec<&str> = catalog::options(Axis::Framework)
            .iter()
            .map(|o| o.id)
            .collect();
        let id = select("Framework", &choices)?;
        draft.set_axis(Axis::Framework, id);
    }

    if draft.backend.is_none() {
        let framework = draft.framework.clone().unwrap_or_default();
        let choices: Vec<&str> = ConfigRecommender::backends_for(&framework)
            .into_iter()
            .filter(|b| validator.is_compatible(Axis::Framework, &framework, Axis::Backend, b, draft))
            .collect();
        let id = select("Backend", &choices)?;
        draft.set_axis(Axis::Backend, id);
    }

    if draft.database.is_none() {
        let backend = draft.backend.clone().unwrap_or_default();
        let recs = recommender.recommendations(draft);
        let choices: Vec<&str> = recs
            .get(&Axis::Database)
            .cloned()
            .unwrap_or_else(|| vec!["none"])
            .into_iter()
            .filter(|d| validator.is_compatible(Axis::Backend, &backend, Axis::Database, d, draft))
            .collect();
        let id = select("Database", &choices)?;
        draft.set_axis(Axis::Database, id);
    }

    if draft.orm.is_none() {
        let database = draft.database.clone().unwrap_or_default();
        let choices: Vec<&str> = ConfigRecommender::orms_for(Some(&database))
            .into_iter()
            .filter(|o| validator.is_compatible(Axis::Database, &database, Axis::Orm, o, draft))
            .collect();
        let id = select("ORM", &choices)?;
        draft.set_axis(Axis::Orm, id);
    }

    Ok(())
}

#[cfg(feature = "interactive")]
fn select(prompt: &str, choices: &[&str]) -> CliResult<String> {
    use dialoguer::Select;

    if choices.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!("no compatible {} options remain", prompt.to_lowercase()),
        });
    }

    let index = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()
        .map_err(|_| CliError::Cancelled)?;

    Ok(choices[index].to_string())
}

/// Without the `interactive` feature, unset axes cannot be prompted for;
/// the user must pass flags or `--yes`.
#[cfg(not(feature = "interactive"))]
fn prompt_missing_axes(
    draft: &mut ConfigDraft,
    _validator: &CompatibilityValidator,
) -> CliResult<()> {
    let missing = [Axis::Framework, Axis::Backend, Axis::Database, Axis::Orm]
        .iter()
        .any(|&axis| draft.axis(axis).is_none());
    if missing {
        return Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        });
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(project: &ProjectConfig, out: &OutputManager) -> CliResult<()> {
    out.header("Configuration")?;
    out.print(&format!("  Project:    {}", project.name))?;
    out.print(&format!("  Framework:  {}", project.framework))?;
    out.print(&format!("  Backend:    {}", project.backend))?;
    out.print(&format!("  Database:   {}", project.database))?;
    out.print(&format!("  ORM:        {}", project.orm))?;
    out.print(&format!("  Styling:    {}", project.styling))?;
    out.print(&format!("  Runtime:    {}", project.runtime))?;
    out.print(&format!("  Language:   {}", project.language))?;
    if let Some(ui) = project.ui_library.as_deref() {
        out.print(&format!("  UI library: {ui}"))?;
    }
    if let Some(auth) = project.auth_provider.as_deref() {
        out.print(&format!("  Auth:       {auth}"))?;
    }
    out.print(&format!("  Git:        {}", project.git))?;
    out.print(&format!("  Docker:     {}", project.docker))?;
    out.print("")?;
    Ok(())
}

fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    print!("Continue? [Y/n] ");
    io::stdout().flush().map_err(|e| CliError::IoError {
        message: "failed to flush stdout".into(),
        source: e,
    })?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: e,
        })?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── validate_project_name ─────────────────────────────────────────────────

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate_project_name(""),
            Err(CliError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn uppercase_and_spaces_are_invalid() {
        assert!(validate_project_name("MyApp").is_err());
        assert!(validate_project_name("my app").is_err());
        assert!(validate_project_name("my_app").is_err());
        assert!(validate_project_name("app!").is_err());
    }

    #[test]
    fn valid_names_pass() {
        for name in &["my-app", "app", "blog2", "a-b-c"] {
            assert!(validate_project_name(name).is_ok(), "failed for: {name}");
        }
    }

    // ── build_draft ───────────────────────────────────────────────────────────

    fn new_args(name: &str) -> NewArgs {
        use clap::Parser;
        use crate::cli::{Cli, Commands};
        let cli = Cli::parse_from(["precast", "new", name, "-y"]);
        match cli.command {
            Commands::New(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn flags_override_config_defaults() {
        let mut args = new_args("x");
        args.framework = Some("vue".into());
        let mut config = AppConfig::default();
        config.defaults.framework = Some("react".into());
        config.defaults.orm = Some("prisma".into());

        let draft = build_draft(&args, &config);
        assert_eq!(draft.framework.as_deref(), Some("vue"));
        // Config default survives where no flag was given.
        assert_eq!(draft.orm.as_deref(), Some("prisma"));
    }

    #[test]
    fn negation_flags_only_set_when_passed() {
        let args = new_args("x");
        let draft = build_draft(&args, &AppConfig::default());
        // Unset means "resolve() decides", not "false".
        assert_eq!(draft.typescript, None);
        assert_eq!(draft.git, None);
        assert_eq!(draft.docker, None);
    }

    #[test]
    fn no_typescript_flag_sets_false() {
        let mut args = new_args("x");
        args.no_typescript = true;
        args.no_git = true;
        let draft = build_draft(&args, &AppConfig::default());
        assert_eq!(draft.typescript, Some(false));
        assert_eq!(draft.git, Some(false));
    }
}
