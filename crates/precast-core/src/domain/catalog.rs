//! Stack option registry.
//!
//! # Design Rationale
//!
//! Each axis of the stack (framework, backend, database, ORM, styling,
//! runtime) is a flat static table of [`StackOption`] records. All lookups,
//! defaults, and relational data (`dependencies`, `incompatible`,
//! `recommended`) derive from these tables; nothing else in the crate is
//! allowed to hard-code knowledge about a specific option.
//!
//! # Adding a New Option
//!
//! 1. Add one [`StackOption`] entry to the appropriate registry
//! 2. That's it — validation, recommendation, and prompting pick it up
//!
//! Lookup misses are a *normal* outcome ("unknown id"): callers treat
//! `None` as "this option does not exist" and the validator turns it into a
//! rejection. Nothing here ever panics on user input.

use std::fmt;

// ── Axes ─────────────────────────────────────────────────────────────────────

/// One configurable dimension of the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    Framework,
    Backend,
    Database,
    Orm,
    Styling,
    Runtime,
}

impl Axis {
    /// All axes, in prompt order.
    pub const ALL: [Axis; 6] = [
        Axis::Framework,
        Axis::Backend,
        Axis::Database,
        Axis::Orm,
        Axis::Styling,
        Axis::Runtime,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Axis::Framework => "framework",
            Axis::Backend => "backend",
            Axis::Database => "database",
            Axis::Orm => "orm",
            Axis::Styling => "styling",
            Axis::Runtime => "runtime",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Option records ───────────────────────────────────────────────────────────

/// One selectable value within a stack axis.
///
/// `dependencies` are option ids (possibly from other axes, e.g.
/// `"typescript"`) that MUST also be selected. `incompatible` lists ids that
/// MUST NOT be selected together with this one. `recommended` is advisory
/// only and is consumed by the recommender, never by the validator.
#[derive(Debug, Clone, Copy)]
pub struct StackOption {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub dependencies: &'static [&'static str],
    pub incompatible: &'static [&'static str],
    pub recommended: &'static [&'static str],
}

// ── Registries ───────────────────────────────────────────────────────────────

/// Single source of truth for framework options.
///
/// Note: `next` deliberately does NOT declare `react` as a hard dependency.
/// The relationship is recorded as a recommendation only; see the
/// always-passing `nextjs-requires-react` rule in `rules.rs`.
pub static FRAMEWORKS: &[StackOption] = &[
    StackOption {
        id: "react",
        name: "React",
        description: "Component-based UI library",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript", "tailwind"],
    },
    StackOption {
        id: "vue",
        name: "Vue",
        description: "Progressive UI framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript"],
    },
    StackOption {
        id: "angular",
        name: "Angular",
        description: "Batteries-included application framework",
        dependencies: &[],
        incompatible: &[],
        // TypeScript is strongly advised but intentionally not a hard
        // dependency: the validator emits a warning, not an error.
        recommended: &["typescript", "scss"],
    },
    StackOption {
        id: "svelte",
        name: "Svelte",
        description: "Compile-time UI framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript"],
    },
    StackOption {
        id: "next",
        name: "Next.js",
        description: "React meta-framework with server rendering",
        dependencies: &[],
        incompatible: &[],
        recommended: &["react", "typescript"],
    },
    StackOption {
        id: "nuxt",
        name: "Nuxt",
        description: "Vue meta-framework with server rendering",
        dependencies: &[],
        incompatible: &[],
        recommended: &["vue", "typescript"],
    },
    StackOption {
        id: "astro",
        name: "Astro",
        description: "Content-focused islands framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript"],
    },
];

/// Backend options. `node` is the plain-runtime backend that `express` and
/// `hono` normalize to before validation (see `config::normalize`).
pub static BACKENDS: &[StackOption] = &[
    StackOption {
        id: "node",
        name: "Node.js",
        description: "Plain Node HTTP server",
        dependencies: &[],
        incompatible: &[],
        recommended: &["postgres"],
    },
    StackOption {
        id: "express",
        name: "Express",
        description: "Minimal Node web framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["postgres", "prisma"],
    },
    StackOption {
        id: "fastify",
        name: "Fastify",
        description: "Fast, low-overhead Node web framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["postgres"],
    },
    StackOption {
        id: "hono",
        name: "Hono",
        description: "Small multi-runtime web framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["sqlite"],
    },
    StackOption {
        id: "nestjs",
        name: "NestJS",
        description: "Structured Node application framework",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript", "postgres", "typeorm"],
    },
    StackOption {
        id: "next",
        name: "Next.js API routes",
        description: "Backend built into a Next.js app",
        dependencies: &[],
        incompatible: &[],
        recommended: &["prisma"],
    },
    StackOption {
        id: "none",
        name: "None",
        description: "Frontend-only project",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
];

pub static DATABASES: &[StackOption] = &[
    StackOption {
        id: "postgres",
        name: "PostgreSQL",
        description: "Relational database",
        dependencies: &[],
        incompatible: &[],
        recommended: &["prisma", "drizzle"],
    },
    StackOption {
        id: "mysql",
        name: "MySQL",
        description: "Relational database",
        dependencies: &[],
        incompatible: &[],
        recommended: &["prisma", "drizzle"],
    },
    StackOption {
        id: "sqlite",
        name: "SQLite",
        description: "Embedded file database",
        dependencies: &[],
        incompatible: &[],
        recommended: &["drizzle"],
    },
    StackOption {
        id: "mongodb",
        name: "MongoDB",
        description: "Document database",
        dependencies: &[],
        incompatible: &["drizzle", "typeorm"],
        recommended: &["mongoose"],
    },
    StackOption {
        id: "none",
        name: "None",
        description: "No database",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
];

/// ORM options. `incompatible` entries name database ids the ORM cannot
/// drive; the validator rejects such pairings structurally, in addition to
/// any named rule covering the same ground.
pub static ORMS: &[StackOption] = &[
    StackOption {
        id: "prisma",
        name: "Prisma",
        description: "Schema-first ORM with generated client",
        dependencies: &[],
        incompatible: &[],
        recommended: &["postgres"],
    },
    StackOption {
        id: "drizzle",
        name: "Drizzle",
        description: "Typed SQL query builder",
        dependencies: &[],
        incompatible: &["mongodb"],
        recommended: &["postgres", "sqlite"],
    },
    StackOption {
        id: "typeorm",
        name: "TypeORM",
        description: "Decorator-based ORM",
        dependencies: &[],
        incompatible: &["mongodb"],
        recommended: &["postgres"],
    },
    StackOption {
        id: "mongoose",
        name: "Mongoose",
        description: "MongoDB object modeling",
        dependencies: &[],
        incompatible: &["postgres", "mysql", "sqlite"],
        recommended: &["mongodb"],
    },
    StackOption {
        id: "none",
        name: "None",
        description: "No ORM, raw driver or no database",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
];

pub static STYLING: &[StackOption] = &[
    StackOption {
        id: "css",
        name: "Plain CSS",
        description: "No preprocessor",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
    StackOption {
        id: "scss",
        name: "SCSS",
        description: "Sass preprocessor",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
    StackOption {
        id: "tailwind",
        name: "Tailwind CSS",
        description: "Utility-first CSS",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
    StackOption {
        id: "styled-components",
        name: "styled-components",
        description: "CSS-in-JS for React",
        dependencies: &[],
        incompatible: &[],
        recommended: &["react"],
    },
];

pub static RUNTIMES: &[StackOption] = &[
    StackOption {
        id: "node",
        name: "Node.js",
        description: "Default JavaScript runtime",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
    StackOption {
        id: "bun",
        name: "Bun",
        description: "Fast all-in-one runtime",
        dependencies: &[],
        incompatible: &[],
        recommended: &[],
    },
    StackOption {
        id: "deno",
        name: "Deno",
        description: "Secure TypeScript-first runtime",
        dependencies: &[],
        incompatible: &[],
        recommended: &["typescript"],
    },
];

// ── Registry lookup API ──────────────────────────────────────────────────────
//
// These functions are the ONLY entry points for catalog queries.
// Do not write `match` arms on option ids elsewhere.

/// All options registered for an axis.
pub fn options(axis: Axis) -> &'static [StackOption] {
    match axis {
        Axis::Framework => FRAMEWORKS,
        Axis::Backend => BACKENDS,
        Axis::Database => DATABASES,
        Axis::Orm => ORMS,
        Axis::Styling => STYLING,
        Axis::Runtime => RUNTIMES,
    }
}

/// Find an option by id within an axis.
///
/// `None` is an expected outcome for unknown ids; callers decide whether
/// that means "reject" (validator) or "skip" (recommender).
pub fn option(axis: Axis, id: &str) -> Option<&'static StackOption> {
    options(axis).iter().find(|opt| opt.id == id)
}

/// The id substituted when the user accepts defaults (`--yes`) or when a
/// synthetic config needs a placeholder for an unset axis.
pub const fn default_id(axis: Axis) -> &'static str {
    match axis {
        Axis::Framework => "react",
        Axis::Backend => "node",
        Axis::Database => "none",
        Axis::Orm => "none",
        Axis::Styling => "css",
        Axis::Runtime => "node",
    }
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registries are internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
/// Catches registration errors at development time, not at user runtime.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for axis in Axis::ALL {
        let opts = options(axis);
        for (i, opt) in opts.iter().enumerate() {
            // Ids are unique within their axis.
            assert!(
                !opts[..i].iter().any(|other| other.id == opt.id),
                "duplicate id '{}' in {axis} registry",
                opt.id
            );

            // Incompatibility targets on relational axes must be resolvable
            // somewhere in the catalog (or be the typescript pseudo-option).
            for &target in opt.incompatible.iter().chain(opt.dependencies) {
                let known = target == "typescript"
                    || Axis::ALL.iter().any(|&a| option(a, target).is_some());
                assert!(
                    known,
                    "{axis} option '{}' references unknown id '{target}'",
                    opt.id
                );
            }
        }

        // The default for each axis must itself be registered.
        assert!(
            option(axis, default_id(axis)).is_some(),
            "default id '{}' missing from {axis} registry",
            default_id(axis)
        );
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
