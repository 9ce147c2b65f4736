//! Database/ORM setup generators, keyed by ORM id.
//!
//! Each generator self-checks the database it is asked to drive against its
//! own `supported_databases` list. The central validator is the authority
//! for whether the combination was ever offered; the self-check exists so a
//! programmatically-built config cannot sneak past it silently.

use std::path::Path;

use precast_core::{
    application::{
        ApplicationError,
        ports::{FeatureGenerator, GeneratorContext, TemplateContext},
    },
    domain::ProjectConfig,
    error::PrecastResult,
};

fn check_supported(
    generator: &dyn FeatureGenerator,
    config: &ProjectConfig,
) -> PrecastResult<()> {
    let supported = generator.supported_databases();
    if !supported.is_empty() && !supported.contains(&config.database.as_str()) {
        return Err(ApplicationError::UnsupportedCombination {
            generator: generator.id().to_string(),
            reason: format!(
                "database '{}' not in [{}]",
                config.database,
                supported.join(", ")
            ),
        }
        .into());
    }
    Ok(())
}

fn install(
    config: &ProjectConfig,
    project_path: &Path,
    ctx: &GeneratorContext<'_>,
    packages: &[&str],
) -> PrecastResult<()> {
    let mut args = vec!["install"];
    args.extend_from_slice(packages);
    ctx.runner.run(&config.package_manager, &args, project_path)
}

// ── Prisma ───────────────────────────────────────────────────────────────────

pub struct PrismaGenerator;

impl FeatureGenerator for PrismaGenerator {
    fn id(&self) -> &'static str {
        "prisma"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        check_supported(self, config)?;

        let provider = match config.database.as_str() {
            "postgres" => "postgresql",
            "mongodb" => "mongodb",
            other => other,
        };
        let schema = format!(
            "generator client {{\n\
             \x20 provider = \"prisma-client-js\"\n\
             }}\n\
             \n\
             datasource db {{\n\
             \x20 provider = \"{provider}\"\n\
             \x20 url      = env(\"DATABASE_URL\")\n\
             }}\n"
        );
        ctx.write(&project_path.join("prisma/schema.prisma"), &schema)
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["prisma", "@prisma/client"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec![
            "Run 'npx prisma migrate dev' to create your first migration".into(),
            "Edit prisma/schema.prisma to define your models".into(),
        ]
    }

    fn supported_databases(&self) -> &'static [&'static str] {
        &["postgres", "mysql", "sqlite", "mongodb"]
    }
}

// ── Drizzle ──────────────────────────────────────────────────────────────────

pub struct DrizzleGenerator;

impl FeatureGenerator for DrizzleGenerator {
    fn id(&self) -> &'static str {
        "drizzle"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        check_supported(self, config)?;

        let dialect = match config.database.as_str() {
            "postgres" => "postgresql",
            "mysql" => "mysql",
            _ => "sqlite",
        };
        let vars = TemplateContext::from_config(config).with("DIALECT", dialect);
        ctx.process_template(
            "import { defineConfig } from 'drizzle-kit'\n\nexport default defineConfig({\n  dialect: '{{DIALECT}}',\n  schema: './src/db/schema.ts',\n  out: './drizzle',\n})\n",
            &project_path.join("drizzle.config.ts"),
            &vars,
        )?;
        ctx.write(
            &project_path.join("src/db/schema.ts"),
            "// Define your tables here\n",
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["drizzle-orm", "drizzle-kit"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Run 'npx drizzle-kit push' after defining your schema".into()]
    }

    fn supported_databases(&self) -> &'static [&'static str] {
        &["postgres", "mysql", "sqlite"]
    }
}

// ── TypeORM ──────────────────────────────────────────────────────────────────

pub struct TypeOrmGenerator;

impl FeatureGenerator for TypeOrmGenerator {
    fn id(&self) -> &'static str {
        "typeorm"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        check_supported(self, config)?;

        let vars = TemplateContext::from_config(config);
        ctx.process_template(
            "import { DataSource } from 'typeorm'\n\nexport const dataSource = new DataSource({\n  type: '{{DATABASE}}',\n  url: process.env.DATABASE_URL,\n  entities: ['src/entities/*.ts'],\n  synchronize: false,\n})\n",
            &project_path.join("src/data-source.ts"),
            &vars,
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["typeorm", "reflect-metadata"])
    }

    fn supported_databases(&self) -> &'static [&'static str] {
        &["postgres", "mysql", "sqlite"]
    }
}

// ── Mongoose ─────────────────────────────────────────────────────────────────

pub struct MongooseGenerator;

impl FeatureGenerator for MongooseGenerator {
    fn id(&self) -> &'static str {
        "mongoose"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        check_supported(self, config)?;

        ctx.write(
            &project_path.join("src/db/connect.ts"),
            "import mongoose from 'mongoose'\n\nexport async function connect() {\n  await mongoose.connect(process.env.DATABASE_URL ?? '')\n}\n",
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["mongoose"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Start MongoDB locally or point DATABASE_URL at Atlas".into()]
    }

    fn supported_databases(&self) -> &'static [&'static str] {
        &["mongodb"]
    }
}

// ── Raw driver (no ORM) ──────────────────────────────────────────────────────

/// Selected when a database is configured with `orm = "none"`: emits a thin
/// connection helper over the database's plain driver.
pub struct RawDriverGenerator;

impl FeatureGenerator for RawDriverGenerator {
    fn id(&self) -> &'static str {
        "none"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let driver = match config.database.as_str() {
            "postgres" => "pg",
            "mysql" => "mysql2",
            "sqlite" => "better-sqlite3",
            "mongodb" => "mongodb",
            other => {
                return Err(ApplicationError::UnsupportedCombination {
                    generator: self.id().to_string(),
                    reason: format!("no raw driver known for '{other}'"),
                }
                .into());
            }
        };
        let vars = TemplateContext::from_config(config).with("DRIVER", driver);
        ctx.process_template(
            "// Raw {{DATABASE}} access via {{DRIVER}}\nexport const connectionString = process.env.DATABASE_URL\n",
            &project_path.join("src/db/index.ts"),
            &vars,
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let driver = match config.database.as_str() {
            "postgres" => "pg",
            "mysql" => "mysql2",
            "sqlite" => "better-sqlite3",
            _ => "mongodb",
        };
        install(config, project_path, ctx, &[driver])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryFilesystem, RecordingProcessRunner, SimpleTemplateEngine};
    use precast_core::application::ports::Filesystem;
    use precast_core::domain::ConfigDraft;

    fn config(database: &str, orm: &str) -> ProjectConfig {
        let draft = ConfigDraft {
            database: Some(database.into()),
            orm: Some(orm.into()),
            ..Default::default()
        };
        let mut config = draft.resolve("demo").unwrap();
        config.project_path = "/p".into();
        config
    }

    fn harness() -> (MemoryFilesystem, SimpleTemplateEngine, RecordingProcessRunner) {
        let fs = MemoryFilesystem::new();
        fs.ensure_dir(Path::new("/p")).unwrap();
        (fs, SimpleTemplateEngine::new(), RecordingProcessRunner::new())
    }

    #[test]
    fn prisma_writes_schema_with_provider() {
        let (fs, engine, runner) = harness();
        let ctx = GeneratorContext {
            fs: &fs,
            engine: &engine,
            runner: &runner,
        };
        PrismaGenerator
            .setup(&config("postgres", "prisma"), Path::new("/p"), &ctx)
            .unwrap();
        let schema = fs.read_file(Path::new("/p/prisma/schema.prisma")).unwrap();
        assert!(schema.contains("provider = \"postgresql\""));
    }

    #[test]
    fn mongoose_self_check_rejects_postgres() {
        let (fs, engine, runner) = harness();
        let ctx = GeneratorContext {
            fs: &fs,
            engine: &engine,
            runner: &runner,
        };
        // The validator would never offer this; the self-check still holds.
        let mut bad = config("postgres", "mongoose");
        bad.database = "postgres".into();
        let err = MongooseGenerator
            .setup(&bad, Path::new("/p"), &ctx)
            .unwrap_err();
        assert!(err.to_string().contains("mongoose"));
    }

    #[test]
    fn drizzle_config_names_dialect() {
        let (fs, engine, runner) = harness();
        let ctx = GeneratorContext {
            fs: &fs,
            engine: &engine,
            runner: &runner,
        };
        DrizzleGenerator
            .setup(&config("postgres", "drizzle"), Path::new("/p"), &ctx)
            .unwrap();
        let out = fs.read_file(Path::new("/p/drizzle.config.ts")).unwrap();
        assert!(out.contains("dialect: 'postgresql'"));
    }

    #[test]
    fn install_uses_configured_package_manager() {
        let (fs, engine, runner) = harness();
        let ctx = GeneratorContext {
            fs: &fs,
            engine: &engine,
            runner: &runner,
        };
        let mut c = config("mongodb", "mongoose");
        c.package_manager = "pnpm".into();
        MongooseGenerator
            .install_dependencies(&c, Path::new("/p"), &ctx)
            .unwrap();
        let calls = runner.invocations();
        assert_eq!(calls[0].command, "pnpm");
        assert_eq!(calls[0].args, vec!["install", "mongoose"]);
    }

    #[test]
    fn raw_driver_picks_driver_per_database() {
        let (fs, engine, runner) = harness();
        let ctx = GeneratorContext {
            fs: &fs,
            engine: &engine,
            runner: &runner,
        };
        RawDriverGenerator
            .setup(&config("sqlite", "none"), Path::new("/p"), &ctx)
            .unwrap();
        let out = fs.read_file(Path::new("/p/src/db/index.ts")).unwrap();
        assert!(out.contains("better-sqlite3"));
    }
}
