//! Named compatibility rules.
//!
//! A rule is one record: a unique name, a predicate, a user-facing message,
//! and a severity. The predicate is a data-oriented enum evaluated by a
//! single `match` — adding a built-in rule means adding a variant or reusing
//! an existing one with different parameters, not scattering closures.
//! Runtime-contributed rules (feature flags, plugins) use the [`RulePredicate::Custom`]
//! variant, whose function may itself fail; that failure is reported as the
//! rule failing to execute rather than aborting evaluation of other rules.

use std::fmt;

use crate::domain::config::ProjectConfig;

/// Whether a failing rule blocks creation or merely advises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSeverity {
    /// Violation blocks project creation.
    Error,
    /// Violation is reported but creation proceeds.
    Warning,
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// Predicate over a full configuration. Returns `Ok(true)` when the
/// configuration PASSES the rule.
#[derive(Clone)]
pub enum RulePredicate {
    /// Selecting `orm` demands `database`.
    OrmRequiresDatabase {
        orm: &'static str,
        database: &'static str,
    },
    /// The pairing works but is advised against.
    DiscouragedPair {
        orm: &'static str,
        database: &'static str,
    },
    /// A database may not be selected without a backend.
    DatabaseRequiresBackend,
    /// Docker is pointless without a database service to containerize.
    DockerWithoutDatabase,
    /// These frameworks work markedly better with TypeScript enabled.
    PrefersTypeScript { frameworks: &'static [&'static str] },
    /// Documented no-op: always passes. Exists so the rule name stays
    /// visible in the registered set; the relationship it describes is
    /// recorded in the catalog's advisory `recommended` relation.
    AlwaysPass,
    /// Externally contributed predicate. `Err` means the predicate itself
    /// could not run; the validator reports that as a rule-execution error.
    Custom(fn(&ProjectConfig) -> Result<bool, String>),
}

impl RulePredicate {
    /// Evaluate against a configuration.
    pub fn evaluate(&self, config: &ProjectConfig) -> Result<bool, String> {
        match self {
            Self::OrmRequiresDatabase { orm, database } => {
                Ok(config.orm != *orm || config.database == *database)
            }
            Self::DiscouragedPair { orm, database } => {
                Ok(!(config.orm == *orm && config.database == *database))
            }
            Self::DatabaseRequiresBackend => {
                Ok(!(config.backend == "none" && config.database != "none"))
            }
            Self::DockerWithoutDatabase => Ok(!(config.docker && config.database == "none")),
            Self::PrefersTypeScript { frameworks } => {
                Ok(config.typescript || !frameworks.contains(&config.framework.as_str()))
            }
            Self::AlwaysPass => Ok(true),
            Self::Custom(check) => check(config),
        }
    }
}

impl fmt::Debug for RulePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrmRequiresDatabase { orm, database } => f
                .debug_struct("OrmRequiresDatabase")
                .field("orm", orm)
                .field("database", database)
                .finish(),
            Self::DiscouragedPair { orm, database } => f
                .debug_struct("DiscouragedPair")
                .field("orm", orm)
                .field("database", database)
                .finish(),
            Self::DatabaseRequiresBackend => f.write_str("DatabaseRequiresBackend"),
            Self::DockerWithoutDatabase => f.write_str("DockerWithoutDatabase"),
            Self::PrefersTypeScript { frameworks } => f
                .debug_struct("PrefersTypeScript")
                .field("frameworks", frameworks)
                .finish(),
            Self::AlwaysPass => f.write_str("AlwaysPass"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One registered compatibility rule.
#[derive(Debug, Clone)]
pub struct CompatibilityRule {
    /// Unique id; used for removal and for execution-failure reports.
    pub name: &'static str,
    pub predicate: RulePredicate,
    /// Message shown when the rule fails.
    pub message: &'static str,
    pub severity: RuleSeverity,
}

/// The default rule set, in registration order.
///
/// Evaluation never short-circuits: every rule runs and every failure
/// accumulates, so ordering only affects message order.
pub fn default_rules() -> Vec<CompatibilityRule> {
    vec![
        CompatibilityRule {
            name: "mongoose-requires-mongodb",
            predicate: RulePredicate::OrmRequiresDatabase {
                orm: "mongoose",
                database: "mongodb",
            },
            message: "Mongoose requires MongoDB as the database",
            severity: RuleSeverity::Error,
        },
        CompatibilityRule {
            name: "prisma-sqlite-discouraged",
            predicate: RulePredicate::DiscouragedPair {
                orm: "prisma",
                database: "sqlite",
            },
            message: "Prisma with SQLite is not recommended for production",
            severity: RuleSeverity::Warning,
        },
        CompatibilityRule {
            name: "database-requires-backend",
            predicate: RulePredicate::DatabaseRequiresBackend,
            message: "Cannot use a database without a backend",
            severity: RuleSeverity::Error,
        },
        CompatibilityRule {
            name: "docker-without-database",
            predicate: RulePredicate::DockerWithoutDatabase,
            message: "Docker is enabled but no database is selected",
            severity: RuleSeverity::Warning,
        },
        CompatibilityRule {
            name: "typescript-recommended",
            predicate: RulePredicate::PrefersTypeScript {
                frameworks: &["angular", "vue"],
            },
            message: "Angular and Vue projects work best with TypeScript",
            severity: RuleSeverity::Warning,
        },
        CompatibilityRule {
            // Kept as a registered no-op: the React requirement for Next.js
            // is enforced nowhere else on purpose (see DESIGN.md); this entry
            // documents the invariant without gating anything.
            name: "nextjs-requires-react",
            predicate: RulePredicate::AlwaysPass,
            message: "Next.js projects are built on React",
            severity: RuleSeverity::Error,
        },
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────────
