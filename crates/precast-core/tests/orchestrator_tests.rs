//! Integration tests for the project orchestrator, driven through the
//! in-memory adapters.

use std::path::Path;

use precast_adapters::{
    MemoryFilesystem, RecordingProcessRunner, SimpleTemplateEngine, default_registry,
    generators::frameworks::AppScaffold,
};
use precast_core::{
    application::{
        GeneratorRegistry, ProjectOrchestrator, SetupErrorCollector,
        ports::{FeatureGenerator, Filesystem, FrameworkGenerator, GeneratorContext},
    },
    domain::{ConfigDraft, ConfigPatch, ProjectConfig},
    error::{PrecastError, PrecastResult},
};

// ── Harness ──────────────────────────────────────────────────────────────────

struct Harness {
    fs: MemoryFilesystem,
    runner: RecordingProcessRunner,
    orchestrator: ProjectOrchestrator,
}

fn harness() -> Harness {
    harness_with(default_registry())
}

fn harness_with(registry: GeneratorRegistry) -> Harness {
    let fs = MemoryFilesystem::new();
    let runner = RecordingProcessRunner::new();
    let orchestrator = ProjectOrchestrator::new(
        registry,
        Box::new(fs.clone()),
        Box::new(SimpleTemplateEngine::new()),
        Box::new(runner.clone()),
    );
    Harness {
        fs,
        runner,
        orchestrator,
    }
}

fn make_config(f: impl FnOnce(&mut ConfigDraft)) -> ProjectConfig {
    let mut draft = ConfigDraft::default();
    f(&mut draft);
    let mut config = draft.resolve("my-app").unwrap();
    config.project_path = "/out/my-app".into();
    config
}

fn root() -> &'static Path {
    Path::new("/out/my-app")
}

// ── Happy path ───────────────────────────────────────────────────────────────

#[test]
fn creates_scaffold_sidecar_and_gitignore() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|_| {});

    h.orchestrator.create_project(&config, &mut collector).unwrap();

    assert!(collector.is_empty());
    assert!(h.fs.path_exists(&root().join("package.json")));
    assert!(h.fs.path_exists(&root().join("precast.json")));
    assert!(h.fs.path_exists(&root().join(".gitignore")));
    assert!(h.runner.ran("git init"));
    assert!(h.runner.ran("git commit -m Initial commit"));
}

#[test]
fn sidecar_round_trips_the_configuration() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
        d.auth_provider = Some("better-auth".into());
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();

    let json = h.fs.read_file(&root().join("precast.json")).unwrap();
    let restored = ProjectConfig::from_sidecar_json(&json).unwrap();
    assert_eq!(restored.orm, "prisma");
    assert_eq!(restored.auth_provider.as_deref(), Some("better-auth"));
    assert_eq!(restored.name, "my-app");
}

#[test]
fn no_git_means_no_git_invocations() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.git = Some(false));

    h.orchestrator.create_project(&config, &mut collector).unwrap();

    assert!(h.runner.invocations().is_empty());
    assert!(!h.fs.path_exists(&root().join(".gitignore")));
}

// ── Pre-existing directory guard ─────────────────────────────────────────────

#[test]
fn existing_directory_fails_fast_with_no_writes() {
    let h = harness();
    h.fs.ensure_dir(root()).unwrap();
    let before = h.fs.list_files();

    let mut collector = SetupErrorCollector::new();
    let err = h
        .orchestrator
        .create_project(&make_config(|_| {}), &mut collector)
        .unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(h.fs.list_files(), before, "no file may be written");
    assert!(h.runner.invocations().is_empty());
    // The pre-existing directory itself is untouched.
    assert!(h.fs.path_exists(root()));
}

// ── Rollback atomicity ───────────────────────────────────────────────────────

/// Scaffold that writes one file and then fails.
struct ExplodingScaffold;

impl FrameworkGenerator for ExplodingScaffold {
    fn id(&self) -> &'static str {
        "react"
    }

    fn scaffold(
        &self,
        _config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(&project_path.join("partial.txt"), "half written")?;
        Err(PrecastError::Internal {
            message: "scaffold blew up".into(),
        })
    }
}

#[test]
fn scaffold_failure_rolls_back_partial_output() {
    let mut registry = GeneratorRegistry::new();
    registry.register_framework(Box::new(ExplodingScaffold));
    let h = harness_with(registry);

    let mut collector = SetupErrorCollector::new();
    let err = h
        .orchestrator
        .create_project(&make_config(|_| {}), &mut collector)
        .unwrap_err();

    assert!(err.to_string().contains("scaffold blew up"));
    assert!(!h.fs.path_exists(root()), "directory must be fully removed");
    assert!(!h.fs.path_exists(&root().join("partial.txt")));
}

#[test]
fn unknown_framework_is_fatal_and_rolls_back() {
    // Registry without any frameworks registered.
    let h = harness_with(GeneratorRegistry::new());

    let mut collector = SetupErrorCollector::new();
    let err = h
        .orchestrator
        .create_project(&make_config(|_| {}), &mut collector)
        .unwrap_err();

    assert!(err.to_string().contains("Unknown framework"));
    assert!(!h.fs.path_exists(root()));
}

#[test]
fn git_failure_is_fatal_and_rolls_back() {
    let h = harness();
    h.runner.fail_matching("git commit");

    let mut collector = SetupErrorCollector::new();
    let err = h
        .orchestrator
        .create_project(&make_config(|_| {}), &mut collector)
        .unwrap_err();

    assert!(err.to_string().contains("git commit"));
    assert!(!h.fs.path_exists(root()));
}

// ── Enrichment isolation ─────────────────────────────────────────────────────

/// Database generator that always fails, registered under the prisma id.
struct FailingDatabase;

impl FeatureGenerator for FailingDatabase {
    fn id(&self) -> &'static str {
        "prisma"
    }

    fn setup(
        &self,
        _config: &ProjectConfig,
        _project_path: &Path,
        _ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        Err(PrecastError::Internal {
            message: "migration tooling unavailable".into(),
        })
    }
}

fn registry_with_failing_database() -> GeneratorRegistry {
    let mut registry = GeneratorRegistry::new();
    for scaffold in AppScaffold::all() {
        registry.register_framework(Box::new(scaffold));
    }
    registry.register_database(Box::new(FailingDatabase));
    registry.register_auth(Box::new(
        precast_adapters::generators::auth::BetterAuthGenerator,
    ));
    registry
}

#[test]
fn database_failure_is_soft_and_later_steps_still_run() {
    let h = harness_with(registry_with_failing_database());

    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
        d.auth_provider = Some("better-auth".into());
        d.docker = Some(true);
    });

    // Overall creation still succeeds.
    h.orchestrator.create_project(&config, &mut collector).unwrap();

    // (a) the project directory survives
    assert!(h.fs.path_exists(root()));
    // (b) the failure is recorded under the step's fixed name
    assert!(collector.has_step("Database configuration setup"));
    assert_eq!(collector.len(), 1);
    // (c) subsequent steps still ran
    assert!(h.fs.path_exists(&root().join("src/lib/auth.ts")));
    assert!(h.fs.path_exists(&root().join("docker-compose.yml")));
    assert!(h.fs.path_exists(&root().join(".env")));
    assert!(h.fs.path_exists(&root().join(".env.example")));
}

#[test]
fn collector_resets_between_runs() {
    let h = harness_with(registry_with_failing_database());
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(!collector.is_empty());

    collector.clear();
    assert!(collector.is_empty());
}

// ── Step guards ──────────────────────────────────────────────────────────────

#[test]
fn admin_widget_runs_when_database_present() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(h.fs.path_exists(&root().join(".precast/admin.json")));
}

#[test]
fn admin_widget_skipped_for_bare_frontend() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|_| {});

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(!h.fs.path_exists(&root().join(".precast/admin.json")));
}

#[test]
fn admin_widget_runs_for_plugins_alone() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.plugins = vec!["stripe".into()]);

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(h.fs.path_exists(&root().join(".precast/admin.json")));
    assert!(h.fs.path_exists(&root().join(".precast/plugins.json")));
}

#[test]
fn compose_without_database_has_no_db_service() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.docker = Some(true));

    h.orchestrator.create_project(&config, &mut collector).unwrap();

    // The legacy docker step still writes compose, but with no db block.
    let compose = h.fs.read_file(&root().join("docker-compose.yml")).unwrap();
    assert!(!compose.contains("db-data"));
    assert!(h.fs.path_exists(&root().join("Dockerfile")));
    assert!(h.fs.path_exists(&root().join(".dockerignore")));
}

#[test]
fn compose_with_database_gains_service_block() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.docker = Some(true);
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();

    let compose = h.fs.read_file(&root().join("docker-compose.yml")).unwrap();
    assert!(compose.contains("postgres:16-alpine"));
    assert!(compose.contains("db-data"));
}

#[test]
fn mcp_config_only_for_claude_with_servers() {
    // claude + servers → written
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.ai_assistant = Some("claude".into());
        d.mcp_servers = vec!["filesystem".into()];
    });
    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(h.fs.path_exists(&root().join(".mcp.json")));

    // claude without servers → skipped
    let h = harness();
    let config = make_config(|d| d.ai_assistant = Some("claude".into()));
    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(!h.fs.path_exists(&root().join(".mcp.json")));

    // other assistant with servers → skipped
    let h = harness();
    let config = make_config(|d| {
        d.ai_assistant = Some("copilot".into());
        d.mcp_servers = vec!["filesystem".into()];
    });
    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(!h.fs.path_exists(&root().join(".mcp.json")));
}

#[test]
fn ai_context_file_written_when_requested() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.ai_context = Some(true));

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    let md = h.fs.read_file(&root().join("CLAUDE.md")).unwrap();
    assert!(md.contains("Framework: react"));
}

// ── Gitignore content varies by stack ────────────────────────────────────────

#[test]
fn gitignore_contains_db_pattern_for_prisma_only() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
    });
    h.orchestrator.create_project(&config, &mut collector).unwrap();
    let gitignore = h.fs.read_file(&root().join(".gitignore")).unwrap();
    assert!(gitignore.contains("*.db"));

    let h = harness();
    let config = make_config(|_| {});
    h.orchestrator.create_project(&config, &mut collector).unwrap();
    let gitignore = h.fs.read_file(&root().join(".gitignore")).unwrap();
    assert!(!gitignore.contains("*.db"));
}

// ── Deployment ───────────────────────────────────────────────────────────────

#[test]
fn deployment_config_written_for_vercel() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.deployment_method = Some("vercel".into()));

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(h.fs.path_exists(&root().join("vercel.json")));
}

#[test]
fn unknown_deployment_method_is_fatal() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| d.deployment_method = Some("heroku".into()));

    let err = h
        .orchestrator
        .create_project(&config, &mut collector)
        .unwrap_err();
    assert!(err.to_string().contains("heroku"));
    assert!(!h.fs.path_exists(root()), "fatal errors roll back");
}

// ── Auto-install ─────────────────────────────────────────────────────────────

#[test]
fn auto_install_invokes_package_manager_for_database() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
        d.auto_install = Some(true);
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(h.runner.ran("npm install prisma"));
}

#[test]
fn install_failure_is_soft() {
    let h = harness();
    h.runner.fail_matching("npm install");
    let mut collector = SetupErrorCollector::new();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
        d.auto_install = Some(true);
    });

    h.orchestrator.create_project(&config, &mut collector).unwrap();
    assert!(collector.has_step("Database configuration setup"));
    assert!(h.fs.path_exists(root()));
}

// ── Add features to an existing project ──────────────────────────────────────

#[test]
fn add_features_patches_existing_project_and_rewrites_sidecar() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let mut config = make_config(|_| {});
    h.orchestrator.create_project(&config, &mut collector).unwrap();

    let patch = ConfigPatch {
        database: Some("postgres".into()),
        orm: Some("prisma".into()),
        auth_provider: Some("better-auth".into()),
        ..Default::default()
    };
    h.orchestrator
        .add_features(&mut config, &patch, &mut collector)
        .unwrap();

    assert!(collector.is_empty());
    assert_eq!(config.database, "postgres");
    assert!(h.fs.path_exists(&root().join("prisma/schema.prisma")));
    assert!(h.fs.path_exists(&root().join("src/lib/auth.ts")));
    assert!(h.fs.path_exists(&root().join(".env")));

    let json = h.fs.read_file(&root().join("precast.json")).unwrap();
    let restored = ProjectConfig::from_sidecar_json(&json).unwrap();
    assert_eq!(restored.orm, "prisma");
}

#[test]
fn add_features_requires_an_existing_directory() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let mut config = make_config(|_| {});
    // No create_project call: the directory was never made.

    let patch = ConfigPatch {
        docker: Some(true),
        ..Default::default()
    };
    let err = h
        .orchestrator
        .add_features(&mut config, &patch, &mut collector)
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn add_features_skips_untouched_steps() {
    let h = harness();
    let mut collector = SetupErrorCollector::new();
    let mut config = make_config(|_| {});
    h.orchestrator.create_project(&config, &mut collector).unwrap();

    let patch = ConfigPatch {
        ui_library: Some("shadcn".into()),
        ..Default::default()
    };
    h.orchestrator
        .add_features(&mut config, &patch, &mut collector)
        .unwrap();

    assert!(h.fs.path_exists(&root().join("components.json")));
    // Database/env steps were not requested and must not have run.
    assert!(!h.fs.path_exists(&root().join(".env")));
}

// ── Next steps ───────────────────────────────────────────────────────────────

#[test]
fn next_steps_come_from_selected_generators() {
    let h = harness();
    let config = make_config(|d| {
        d.database = Some("postgres".into());
        d.orm = Some("prisma".into());
        d.auth_provider = Some("better-auth".into());
    });

    let steps = h.orchestrator.next_steps(&config);
    assert!(steps.iter().any(|s| s.contains("prisma")));
    assert!(steps.iter().any(|s| s.contains("AUTH_SECRET")));
}
