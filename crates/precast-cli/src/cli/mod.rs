//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "precast",
    bin_name = "precast",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Full-stack project creation with compatibility checking",
    long_about = "Precast prompts for a stack (framework, backend, database, ORM, \
                  styling), validates the combination, and materializes a ready-to-run \
                  project directory.",
    after_help = "EXAMPLES:\n\
        \x20 precast new my-app --framework react --backend node\n\
        \x20 precast new my-api --framework next --database postgres --orm prisma -y\n\
        \x20 precast add --ui-library shadcn\n\
        \x20 precast list --axis orm\n\
        \x20 precast completions bash > /usr/share/bash-completion/completions/precast",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_aliases = ["n", "init"],
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 precast new my-app --framework react\n\
            \x20 precast new my-api --framework next --database postgres --orm prisma -y\n\
            \x20 precast new my-site --framework astro --backend none --no-typescript"
    )]
    New(NewArgs),

    /// Add features to an existing project.
    #[command(
        about = "Add features to an existing precast project",
        after_help = "EXAMPLES:\n\
            \x20 precast add --ui-library shadcn\n\
            \x20 precast add --database postgres --orm drizzle\n\
            \x20 precast add --docker"
    )]
    Add(AddArgs),

    /// List available stack options.
    #[command(
        visible_alias = "ls",
        about = "List available stack options",
        after_help = "EXAMPLES:\n\
            \x20 precast list\n\
            \x20 precast list --axis framework"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 precast completions bash > ~/.local/share/bash-completion/completions/precast\n\
            \x20 precast completions zsh  > ~/.zfunc/_precast\n\
            \x20 precast completions fish > ~/.config/fish/completions/precast.fish"
    )]
    Completions(CompletionsArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `precast new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name; becomes the directory name under the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Frontend framework.
    #[arg(short = 'f', long = "framework", value_name = "ID", help = "Frontend framework")]
    pub framework: Option<String>,

    /// Backend.
    #[arg(short = 'b', long = "backend", value_name = "ID", help = "Backend")]
    pub backend: Option<String>,

    /// Database.
    #[arg(short = 'd', long = "database", value_name = "ID", help = "Database")]
    pub database: Option<String>,

    /// ORM.
    #[arg(short = 'o', long = "orm", value_name = "ID", help = "ORM")]
    pub orm: Option<String>,

    /// Styling solution.
    #[arg(short = 's', long = "styling", value_name = "ID", help = "Styling solution")]
    pub styling: Option<String>,

    /// JavaScript runtime.
    #[arg(short = 'r', long = "runtime", value_name = "ID", help = "JavaScript runtime")]
    pub runtime: Option<String>,

    /// Generate JavaScript instead of TypeScript.
    #[arg(long = "no-typescript", help = "Use JavaScript instead of TypeScript")]
    pub no_typescript: bool,

    /// Skip git repository initialization.
    #[arg(long = "no-git", help = "Skip git init and initial commit")]
    pub no_git: bool,

    /// Generate Docker files.
    #[arg(long = "docker", help = "Generate Dockerfile and docker-compose.yml")]
    pub docker: bool,

    /// UI component library.
    #[arg(long = "ui-library", value_name = "ID", help = "UI component library")]
    pub ui_library: Option<String>,

    /// Authentication provider.
    #[arg(long = "auth", value_name = "ID", help = "Authentication provider")]
    pub auth: Option<String>,

    /// Deployment target.
    #[arg(long = "deploy", value_name = "ID", help = "Deployment target (vercel, netlify, cloudflare)")]
    pub deploy: Option<String>,

    /// Color palette for generated styles.
    #[arg(long = "palette", value_name = "NAME", help = "Color palette")]
    pub palette: Option<String>,

    /// Generate AI assistant context files.
    #[arg(long = "ai", help = "Generate AI assistant context files")]
    pub ai: bool,

    /// Package manager to record and use for installs.
    #[arg(long = "pm", value_name = "PM", help = "Package manager (npm, pnpm, bun, yarn)")]
    pub package_manager: Option<String>,

    /// Run package installs for configured features.
    #[arg(long = "install", help = "Install feature dependencies after setup")]
    pub install: bool,

    /// Accept catalog defaults for anything not specified.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip prompts, using defaults for unset options"
    )]
    pub yes: bool,

    /// Preview the resolved configuration without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

// ── add ───────────────────────────────────────────────────────────────────────

/// Arguments for `precast add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project directory (defaults to the current directory).
    #[arg(value_name = "PATH", default_value = ".", help = "Project directory")]
    pub path: PathBuf,

    /// Database to add.
    #[arg(short = 'd', long = "database", value_name = "ID", help = "Database")]
    pub database: Option<String>,

    /// ORM to add.
    #[arg(short = 'o', long = "orm", value_name = "ID", help = "ORM")]
    pub orm: Option<String>,

    /// UI component library to add.
    #[arg(long = "ui-library", value_name = "ID", help = "UI component library")]
    pub ui_library: Option<String>,

    /// Authentication provider to add.
    #[arg(long = "auth", value_name = "ID", help = "Authentication provider")]
    pub auth: Option<String>,

    /// Deployment target to add.
    #[arg(long = "deploy", value_name = "ID", help = "Deployment target")]
    pub deploy: Option<String>,

    /// Add Docker files.
    #[arg(long = "docker", help = "Add Dockerfile and docker-compose.yml")]
    pub docker: bool,

    /// Powerups to add (repeatable).
    #[arg(long = "powerup", value_name = "ID", help = "Powerup to add (repeatable)")]
    pub powerups: Vec<String>,

    /// Plugins to add (repeatable).
    #[arg(long = "plugin", value_name = "ID", help = "Plugin to add (repeatable)")]
    pub plugins: Vec<String>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `precast list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Restrict the listing to one axis.
    #[arg(long = "axis", value_enum, help = "Show only one axis")]
    pub axis: Option<AxisArg>,
}

/// CLI-facing axis names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum AxisArg {
    Framework,
    Backend,
    Database,
    Orm,
    Styling,
    Runtime,
}

impl From<AxisArg> for precast_core::domain::Axis {
    fn from(axis: AxisArg) -> Self {
        use precast_core::domain::Axis;
        match axis {
            AxisArg::Framework => Axis::Framework,
            AxisArg::Backend => Axis::Backend,
            AxisArg::Database => Axis::Database,
            AxisArg::Orm => Axis::Orm,
            AxisArg::Styling => Axis::Styling,
            AxisArg::Runtime => Axis::Runtime,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `precast completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
