//! The project configuration record and its partial forms.
//!
//! A [`ProjectConfig`] is the fully-resolved description of the project the
//! user wants to create. It is built once per invocation (from flags, prompts,
//! or a sidecar file), normalized, validated, and then consumed read-only by
//! every generation step.
//!
//! Three shapes exist on purpose:
//!
//! - [`ProjectConfig`] — complete, every axis filled
//! - [`ConfigDraft`] — all-optional, drives interactive prompting
//! - [`ConfigPatch`] — all-optional, applied to an existing config by the
//!   add-features flow; only fields intended for mutation are settable
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::{self, Axis},
    error::DomainError,
};

// ── Full configuration ───────────────────────────────────────────────────────

/// A fully-resolved project configuration.
///
/// Serialized verbatim into the `precast.json` sidecar written to each
/// created project; every serialized field must round-trip losslessly so
/// later `add` invocations can reconstruct the stack without re-prompting.
/// `project_path` is deliberately skipped — the sidecar stays relocatable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub name: String,
    pub framework: String,
    pub backend: String,
    pub database: String,
    pub orm: String,
    pub styling: String,
    pub runtime: String,
    pub typescript: bool,
    pub git: bool,
    pub docker: bool,
    #[serde(default)]
    pub auto_install: bool,
    #[serde(default)]
    pub ai_context: bool,
    pub package_manager: String,
    /// `"typescript"` or `"javascript"`; kept in sync by [`normalize`].
    pub language: String,
    #[serde(skip)]
    pub project_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_library: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_assistant: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub powerups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mcp_servers: Vec<String>,
}

impl ProjectConfig {
    /// Read the value of one stack axis.
    pub fn axis(&self, axis: Axis) -> &str {
        match axis {
            Axis::Framework => &self.framework,
            Axis::Backend => &self.backend,
            Axis::Database => &self.database,
            Axis::Orm => &self.orm,
            Axis::Styling => &self.styling,
            Axis::Runtime => &self.runtime,
        }
    }

    /// Overwrite the value of one stack axis.
    pub fn set_axis(&mut self, axis: Axis, id: impl Into<String>) {
        let slot = match axis {
            Axis::Framework => &mut self.framework,
            Axis::Backend => &mut self.backend,
            Axis::Database => &mut self.database,
            Axis::Orm => &mut self.orm,
            Axis::Styling => &mut self.styling,
            Axis::Runtime => &mut self.runtime,
        };
        *slot = id.into();
    }

    /// Merge a patch into this configuration. Unset patch fields leave the
    /// existing values untouched.
    pub fn apply(&mut self, patch: &ConfigPatch) {
        if let Some(db) = &patch.database {
            self.database = db.clone();
        }
        if let Some(orm) = &patch.orm {
            self.orm = orm.clone();
        }
        if let Some(ui) = &patch.ui_library {
            self.ui_library = Some(ui.clone());
        }
        if let Some(auth) = &patch.auth_provider {
            self.auth_provider = Some(auth.clone());
        }
        if let Some(deploy) = &patch.deployment_method {
            self.deployment_method = Some(deploy.clone());
        }
        if let Some(docker) = patch.docker {
            self.docker = docker;
        }
        if !patch.powerups.is_empty() {
            for p in &patch.powerups {
                if !self.powerups.contains(p) {
                    self.powerups.push(p.clone());
                }
            }
        }
        if !patch.plugins.is_empty() {
            for p in &patch.plugins {
                if !self.plugins.contains(p) {
                    self.plugins.push(p.clone());
                }
            }
        }
    }

    /// Serialize for the sidecar metadata file.
    pub fn to_sidecar_json(&self) -> Result<String, DomainError> {
        serde_json::to_string_pretty(self).map_err(|e| DomainError::Serialization {
            reason: e.to_string(),
        })
    }

    /// Reconstruct a configuration from sidecar contents. The caller is
    /// responsible for setting `project_path` afterwards.
    pub fn from_sidecar_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| DomainError::Serialization {
            reason: e.to_string(),
        })
    }
}

// ── Normalization ────────────────────────────────────────────────────────────

/// Normalize a configuration before validation.
///
/// Validation is a read-only judgment; any rewriting of user input happens
/// here, in one explicit place:
///
/// - backend `express` / `hono` collapse to the plain `node` backend (the
///   generated server scaffold is the same either way)
/// - `language` is re-derived from the `typescript` flag
///
/// The input is not mutated; callers validate the returned value.
pub fn normalize(config: &ProjectConfig) -> ProjectConfig {
    let mut out = config.clone();
    if matches!(out.backend.as_str(), "express" | "hono") {
        out.backend = "node".into();
    }
    out.language = if out.typescript {
        "typescript".into()
    } else {
        "javascript".into()
    };
    out
}

// ── Draft (prompt-time partial) ──────────────────────────────────────────────

/// A partially specified configuration, filled in axis by axis during
/// interactive prompting (or all at once from CLI flags).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDraft {
    pub framework: Option<String>,
    pub backend: Option<String>,
    pub database: Option<String>,
    pub orm: Option<String>,
    pub styling: Option<String>,
    pub runtime: Option<String>,
    pub typescript: Option<bool>,
    pub git: Option<bool>,
    pub docker: Option<bool>,
    pub package_manager: Option<String>,
    pub ui_library: Option<String>,
    pub auth_provider: Option<String>,
    pub deployment_method: Option<String>,
    pub color_palette: Option<String>,
    pub ai_assistant: Option<String>,
    pub ai_context: Option<bool>,
    pub auto_install: Option<bool>,
    pub powerups: Vec<String>,
    pub plugins: Vec<String>,
    pub mcp_servers: Vec<String>,
}

impl ConfigDraft {
    /// Read one axis, if set.
    pub fn axis(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::Framework => self.framework.as_deref(),
            Axis::Backend => self.backend.as_deref(),
            Axis::Database => self.database.as_deref(),
            Axis::Orm => self.orm.as_deref(),
            Axis::Styling => self.styling.as_deref(),
            Axis::Runtime => self.runtime.as_deref(),
        }
    }

    /// Set one axis.
    pub fn set_axis(&mut self, axis: Axis, id: impl Into<String>) {
        let value = Some(id.into());
        match axis {
            Axis::Framework => self.framework = value,
            Axis::Backend => self.backend = value,
            Axis::Database => self.database = value,
            Axis::Orm => self.orm = value,
            Axis::Styling => self.styling = value,
            Axis::Runtime => self.runtime = value,
        }
    }

    /// Resolve into a full configuration, filling unset axes with catalog
    /// defaults.
    ///
    /// Explicitly provided axis ids are checked against the catalog up
    /// front so a typo in a flag fails with the list of valid choices
    /// instead of surfacing later as a validation error.
    pub fn resolve(&self, name: impl Into<String>) -> Result<ProjectConfig, DomainError> {
        for axis in Axis::ALL {
            if let Some(id) = self.axis(axis) {
                if catalog::option(axis, id).is_none() {
                    return Err(DomainError::UnknownOption {
                        axis,
                        id: id.to_string(),
                        available: catalog::options(axis).iter().map(|o| o.id).collect(),
                    });
                }
            }
        }

        let pick =
            |axis: Axis| -> String { self.axis(axis).unwrap_or(catalog::default_id(axis)).into() };

        let typescript = self.typescript.unwrap_or(true);
        Ok(ProjectConfig {
            name: name.into(),
            framework: pick(Axis::Framework),
            backend: pick(Axis::Backend),
            database: pick(Axis::Database),
            orm: pick(Axis::Orm),
            styling: pick(Axis::Styling),
            runtime: pick(Axis::Runtime),
            typescript,
            git: self.git.unwrap_or(true),
            docker: self.docker.unwrap_or(false),
            auto_install: self.auto_install.unwrap_or(false),
            ai_context: self.ai_context.unwrap_or(false),
            package_manager: self.package_manager.clone().unwrap_or_else(|| "npm".into()),
            language: if typescript {
                "typescript".into()
            } else {
                "javascript".into()
            },
            project_path: PathBuf::new(),
            ui_library: self.ui_library.clone(),
            auth_provider: self.auth_provider.clone(),
            deployment_method: self.deployment_method.clone(),
            color_palette: self.color_palette.clone(),
            ai_assistant: self.ai_assistant.clone(),
            powerups: self.powerups.clone(),
            plugins: self.plugins.clone(),
            mcp_servers: self.mcp_servers.clone(),
        })
    }
}

// ── Patch (add-features partial) ─────────────────────────────────────────────

/// Explicit partial update applied to an existing project's configuration.
///
/// Only the fields the add-features flow is allowed to change are present;
/// each is independently optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    pub database: Option<String>,
    pub orm: Option<String>,
    pub ui_library: Option<String>,
    pub auth_provider: Option<String>,
    pub deployment_method: Option<String>,
    pub docker: Option<bool>,
    pub powerups: Vec<String>,
    pub plugins: Vec<String>,
}

impl ConfigPatch {
    /// `true` if no field is set; applying an empty patch is a no-op.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
