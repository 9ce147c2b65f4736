//! Next-choice recommendation tables.
//!
//! Given a partially filled draft, propose compatible options for the next
//! unset axis. This drives interactive prompting and nothing else: the
//! recommender never overrides an explicit choice and never rejects a
//! configuration — rejection is the validator's job.

use std::collections::BTreeMap;

use crate::domain::{catalog::Axis, config::ConfigDraft};

/// Frameworks offered when nothing has been chosen yet.
const POPULAR_FRAMEWORKS: &[&str] = &["react", "next", "vue"];

/// Backends suggested for a framework that has no dedicated entry below.
const GENERIC_NODE_BACKENDS: &[&str] = &["node", "express", "fastify", "hono", "none"];

/// Framework → suggested backends.
const FRAMEWORK_BACKENDS: &[(&str, &[&str])] = &[
    ("next", &["next", "none"]),
    ("nuxt", &["node", "none"]),
    ("angular", &["express", "fastify", "nestjs", "none"]),
];

/// Database → suggested ORMs.
const DATABASE_ORMS: &[(&str, &[&str])] = &[
    ("postgres", &["prisma", "drizzle", "typeorm", "none"]),
    ("mysql", &["prisma", "drizzle", "typeorm", "none"]),
    ("sqlite", &["prisma", "drizzle", "none"]),
    ("mongodb", &["mongoose", "prisma", "none"]),
];

/// The full generic database list offered once any real backend is chosen.
const ALL_DATABASES: &[&str] = &["postgres", "mysql", "sqlite", "mongodb", "none"];

/// Computes advisory next-axis suggestions from static tables.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigRecommender;

impl ConfigRecommender {
    pub fn new() -> Self {
        Self
    }

    /// Suggestions for every axis that is still unset and whose predecessor
    /// axis has been decided. Axes with nothing to suggest are absent from
    /// the map.
    pub fn recommendations(&self, draft: &ConfigDraft) -> BTreeMap<Axis, Vec<&'static str>> {
        let mut out = BTreeMap::new();

        if draft.framework.is_none() {
            out.insert(Axis::Framework, POPULAR_FRAMEWORKS.to_vec());
        }

        if let Some(framework) = draft.framework.as_deref() {
            if draft.backend.is_none() {
                out.insert(Axis::Backend, Self::backends_for(framework));
            }
        }

        if let Some(backend) = draft.backend.as_deref() {
            if draft.database.is_none() {
                let databases = if backend == "none" {
                    vec!["none"]
                } else {
                    ALL_DATABASES.to_vec()
                };
                out.insert(Axis::Database, databases);
            }
        }

        if draft.orm.is_none() {
            out.insert(Axis::Orm, Self::orms_for(draft.database.as_deref()));
        }

        out
    }

    /// Backend suggestions for one framework.
    pub fn backends_for(framework: &str) -> Vec<&'static str> {
        FRAMEWORK_BACKENDS
            .iter()
            .find(|(id, _)| *id == framework)
            .map(|(_, backends)| backends.to_vec())
            .unwrap_or_else(|| GENERIC_NODE_BACKENDS.to_vec())
    }

    /// ORM suggestions for a database. Unset or unknown databases suggest
    /// only "none".
    pub fn orms_for(database: Option<&str>) -> Vec<&'static str> {
        database
            .and_then(|db| DATABASE_ORMS.iter().find(|(id, _)| *id == db))
            .map(|(_, orms)| orms.to_vec())
            .unwrap_or_else(|| vec!["none"])
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
