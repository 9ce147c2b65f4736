//! The compatibility validator.
//!
//! `validate` is a pure, read-only judgment over a full [`ProjectConfig`]:
//! it never mutates its input, never panics on user data, and reports every
//! violation it finds rather than stopping at the first. All outcomes are
//! values (`ValidationResult`), never `Err` — a configuration that cannot be
//! judged does not exist.
//!
//! Normalization (rewriting of user input) is explicitly NOT this module's
//! job; see [`crate::domain::config::normalize`].

use crate::domain::{
    catalog::{self, Axis},
    config::{ConfigDraft, ProjectConfig},
    rules::{CompatibilityRule, RuleSeverity, default_rules},
};

/// Outcome of one `validate` call. Produced fresh each time, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Evaluates configurations against the registered rule set plus structural
/// checks.
///
/// Construct one instance at process start and pass it by reference; there
/// is deliberately no global singleton.
pub struct CompatibilityValidator {
    rules: Vec<CompatibilityRule>,
}

impl CompatibilityValidator {
    /// A validator carrying the default rule set.
    pub fn new() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// A validator with no rules; structural checks still apply.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register an additional rule. Later rules run after earlier ones.
    pub fn add_rule(&mut self, rule: CompatibilityRule) {
        self.rules.push(rule);
    }

    /// Remove a rule by name. Returns whether one was found and removed.
    pub fn remove_rule(&mut self, name: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.name != name);
        self.rules.len() != before
    }

    /// Names of the registered rules, in registration order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Judge a full configuration.
    ///
    /// 1. Every registered rule runs, in registration order, independent of
    ///    the others; a predicate that fails to execute is itself an error.
    /// 2. Structural checks run: name format, axis fields present and known
    ///    to the catalog, ORM/database pairing, framework hard dependencies.
    /// 3. `valid` is `errors.is_empty()`; warnings never affect it.
    pub fn validate(&self, config: &ProjectConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for rule in &self.rules {
            match rule.predicate.evaluate(config) {
                Ok(true) => {}
                Ok(false) => match rule.severity {
                    RuleSeverity::Error => errors.push(rule.message.to_string()),
                    RuleSeverity::Warning => warnings.push(rule.message.to_string()),
                },
                Err(reason) => {
                    errors.push(format!("rule '{}' failed to execute: {reason}", rule.name));
                }
            }
        }

        schema_violations(config, &mut errors);

        ValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Would setting `axis1 = id1` together with `axis2 = id2` on top of the
    /// draft produce a valid configuration?
    ///
    /// Pure and side-effect free; safe to call once per prompt choice while
    /// building option lists. Unset draft axes are filled with catalog
    /// defaults so an incomplete draft is never rejected for being
    /// incomplete — only the pairing under test can fail.
    pub fn is_compatible(
        &self,
        axis1: Axis,
        id1: &str,
        axis2: Axis,
        id2: &str,
        draft: &ConfigDraft,
    ) -> bool {
        let mut overlay = draft.clone();
        overlay.set_axis(axis1, id1);
        overlay.set_axis(axis2, id2);

        let mut synthetic = match overlay.resolve("app") {
            Ok(config) => config,
            // Unknown id in the draft itself; treat as incompatible.
            Err(_) => return false,
        };
        // Defaults keep typescript on; respect an explicit draft choice.
        if let Some(ts) = draft.typescript {
            synthetic.typescript = ts;
        }

        self.validate(&synthetic).valid
    }
}

impl Default for CompatibilityValidator {
    fn default() -> Self {
        Self::new()
    }
}

// ── Structural checks ────────────────────────────────────────────────────────

/// Append one error line per violated field, formatted `"<field>: <message>"`.
///
/// `typescript` / `git` / `docker` being booleans is guaranteed by the type
/// system here; the checks below cover everything the type system cannot.
fn schema_violations(config: &ProjectConfig, errors: &mut Vec<String>) {
    if config.name.is_empty() {
        errors.push("name: must not be empty".into());
    } else if !config
        .name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        errors.push("name: may only contain lowercase letters, digits, and hyphens".into());
    }

    for axis in [
        Axis::Framework,
        Axis::Backend,
        Axis::Database,
        Axis::Orm,
        Axis::Styling,
    ] {
        let value = config.axis(axis);
        if value.is_empty() {
            errors.push(format!("{axis}: must not be empty"));
        } else if catalog::option(axis, value).is_none() {
            errors.push(format!("{axis}: unknown option '{value}'"));
        }
    }

    // Every non-"none" ORM needs a database it can actually drive.
    if config.orm != "none" {
        if config.database == "none" {
            errors.push(format!("orm: '{}' requires a database", config.orm));
        } else if let Some(orm) = catalog::option(Axis::Orm, &config.orm) {
            if orm.incompatible.contains(&config.database.as_str()) {
                errors.push(format!(
                    "orm: '{}' is not compatible with database '{}'",
                    config.orm, config.database
                ));
            }
        }
    }

    // Hard dependencies declared by the chosen framework. No default
    // framework currently declares any; the check exists for catalog
    // entries that do.
    if let Some(framework) = catalog::option(Axis::Framework, &config.framework) {
        if framework.dependencies.contains(&"typescript") && !config.typescript {
            errors.push(format!(
                "typescript: required by framework '{}'",
                config.framework
            ));
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::ConfigDraft;
    use crate::domain::rules::{CompatibilityRule, RulePredicate};

    fn valid_config() -> ProjectConfig {
        let draft = ConfigDraft {
            framework: Some("react".into()),
            backend: Some("node".into()),
            database: Some("postgres".into()),
            orm: Some("prisma".into()),
            ..Default::default()
        };
        draft.resolve("x").unwrap()
    }

    // ── Core properties ──────────────────────────────────────────────────────

    #[test]
    fn valid_config_passes_cleanly() {
        let report = CompatibilityValidator::new().validate(&valid_config());
        assert!(report.valid, "errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn validate_is_deterministic() {
        let validator = CompatibilityValidator::new();
        let config = valid_config();
        assert_eq!(validator.validate(&config), validator.validate(&config));
    }

    #[test]
    fn validate_does_not_mutate_input() {
        let config = valid_config();
        let snapshot = config.clone();
        CompatibilityValidator::new().validate(&config);
        assert_eq!(config, snapshot);
    }

    #[test]
    fn every_rule_runs_no_short_circuit() {
        // Two error rules both violated: both messages must appear.
        let mut config = valid_config();
        config.backend = "none".into();
        config.database = "mongodb".into();
        config.orm = "mongoose".into(); // passes mongoose gate
        config.name = "Bad Name".into(); // schema violation on top

        let report = CompatibilityValidator::new().validate(&config);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("without a backend"))
        );
        assert!(report.errors.iter().any(|e| e.starts_with("name:")));
    }

    #[test]
    fn failure_count_matches_violations() {
        // One failing error rule + one failing warning rule, no schema issues.
        let mut config = valid_config();
        config.orm = "mongoose".into();
        config.database = "sqlite".into(); // mongoose gate fails (error)
        // also: mongoose/sqlite structural incompatibility adds one schema error
        let report = CompatibilityValidator::new().validate(&config);
        assert_eq!(report.errors.len(), 2);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn broken_rule_reports_and_others_still_run() {
        let mut validator = CompatibilityValidator::new();
        validator.add_rule(CompatibilityRule {
            name: "exploding-rule",
            predicate: RulePredicate::Custom(|_| Err("boom".into())),
            message: "unused",
            severity: RuleSeverity::Error,
        });

        let mut config = valid_config();
        config.database = "sqlite".into(); // prisma+sqlite warning still expected

        let report = validator.validate(&config);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("'exploding-rule' failed to execute"))
        );
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("not recommended"))
        );
    }

    // ── Default rule behaviors ───────────────────────────────────────────────

    #[test]
    fn mongoose_rejected_for_every_non_mongodb_database() {
        let validator = CompatibilityValidator::new();
        for db in ["postgres", "mysql", "sqlite"] {
            let mut config = valid_config();
            config.orm = "mongoose".into();
            config.database = db.into();
            assert!(!validator.validate(&config).valid, "db = {db}");
        }

        let mut config = valid_config();
        config.orm = "mongoose".into();
        config.database = "mongodb".into();
        assert!(validator.validate(&config).valid);
    }

    #[test]
    fn prisma_sqlite_warns_but_passes() {
        let mut config = valid_config();
        config.orm = "prisma".into();
        config.database = "sqlite".into();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(report.valid);
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn database_without_backend_is_rejected() {
        let mut config = valid_config();
        config.backend = "none".into();
        config.database = "postgres".into();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(!report.valid);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("database") && e.contains("backend"))
        );
    }

    #[test]
    fn docker_without_database_warns_but_passes() {
        let mut config = valid_config();
        config.database = "none".into();
        config.orm = "none".into();
        config.docker = true;
        let report = CompatibilityValidator::new().validate(&config);
        assert!(report.valid);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.to_lowercase().contains("docker"))
        );
    }

    #[test]
    fn vue_without_typescript_warns() {
        let mut config = valid_config();
        config.framework = "vue".into();
        config.typescript = false;
        let report = CompatibilityValidator::new().validate(&config);
        assert!(report.valid);
        assert!(
            report
                .warnings
                .iter()
                .any(|w| w.contains("TypeScript"))
        );
    }

    #[test]
    fn mongodb_with_drizzle_is_rejected() {
        let mut config = valid_config();
        config.framework = "react".into();
        config.database = "mongodb".into();
        config.orm = "drizzle".into();
        assert!(!CompatibilityValidator::new().validate(&config).valid);
    }

    // ── Schema checks ────────────────────────────────────────────────────────

    #[test]
    fn bad_name_formats_as_field_message() {
        let mut config = valid_config();
        config.name = "My App!".into();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(report.errors.iter().any(|e| e.starts_with("name: ")));
    }

    #[test]
    fn unknown_axis_value_is_rejected() {
        let mut config = valid_config();
        config.styling = "stylus".into();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("styling") && e.contains("stylus"))
        );
    }

    #[test]
    fn empty_axis_value_is_rejected() {
        let mut config = valid_config();
        config.framework = String::new();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("framework: must not be empty"))
        );
    }

    #[test]
    fn orm_without_database_is_rejected() {
        let mut config = valid_config();
        config.database = "none".into();
        config.orm = "prisma".into();
        let report = CompatibilityValidator::new().validate(&config);
        assert!(
            report
                .errors
                .iter()
                .any(|e| e.contains("requires a database"))
        );
    }

    // ── Rule registry mutation ───────────────────────────────────────────────

    #[test]
    fn remove_rule_by_name() {
        let mut validator = CompatibilityValidator::new();
        assert!(validator.remove_rule("docker-without-database"));
        assert!(!validator.remove_rule("docker-without-database"));

        let mut config = valid_config();
        config.database = "none".into();
        config.orm = "none".into();
        config.docker = true;
        let report = validator.validate(&config);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn added_rule_participates() {
        let mut validator = CompatibilityValidator::new();
        validator.add_rule(CompatibilityRule {
            name: "no-bun-yet",
            predicate: RulePredicate::Custom(|c| Ok(c.runtime != "bun")),
            message: "Bun support is experimental",
            severity: RuleSeverity::Warning,
        });

        let mut config = valid_config();
        config.runtime = "bun".into();
        let report = validator.validate(&config);
        assert!(report.valid);
        assert!(report.warnings.iter().any(|w| w.contains("Bun")));
    }

    // ── is_compatible ────────────────────────────────────────────────────────

    #[test]
    fn pairwise_check_filters_orm_choices_for_mongodb() {
        let validator = CompatibilityValidator::new();
        let draft = ConfigDraft {
            backend: Some("node".into()),
            ..Default::default()
        };

        assert!(validator.is_compatible(
            Axis::Database,
            "mongodb",
            Axis::Orm,
            "mongoose",
            &draft
        ));
        assert!(!validator.is_compatible(
            Axis::Database,
            "mongodb",
            Axis::Orm,
            "drizzle",
            &draft
        ));
    }

    #[test]
    fn pairwise_check_respects_chosen_backend() {
        let validator = CompatibilityValidator::new();
        let draft = ConfigDraft {
            backend: Some("none".into()),
            ..Default::default()
        };
        // Any real database is incompatible once the backend is "none".
        assert!(!validator.is_compatible(Axis::Database, "postgres", Axis::Orm, "none", &draft));
        assert!(validator.is_compatible(Axis::Database, "none", Axis::Orm, "none", &draft));
    }

    #[test]
    fn pairwise_check_has_no_side_effects() {
        let validator = CompatibilityValidator::new();
        let draft = ConfigDraft::default();
        let snapshot = draft.clone();
        validator.is_compatible(Axis::Database, "postgres", Axis::Orm, "prisma", &draft);
        assert_eq!(draft, snapshot);
    }
}
