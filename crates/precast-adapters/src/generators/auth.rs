//! Authentication provider generators, keyed by provider id.

use std::path::Path;

use precast_core::{
    application::ports::{FeatureGenerator, GeneratorContext, TemplateContext},
    domain::ProjectConfig,
    error::PrecastResult,
};

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

// ── better-auth ──────────────────────────────────────────────────────────────

pub struct BetterAuthGenerator;

impl FeatureGenerator for BetterAuthGenerator {
    fn id(&self) -> &'static str {
        "better-auth"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let vars = TemplateContext::from_config(config);
        ctx.process_template(
            "import { betterAuth } from 'better-auth'\n\nexport const auth = betterAuth({\n  appName: '{{PROJECT_NAME}}',\n  secret: process.env.AUTH_SECRET,\n})\n",
            &project_path.join("src/lib/auth.ts"),
            &vars,
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["better-auth"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Set AUTH_SECRET in .env before starting the server".into()]
    }
}

// ── Auth.js / NextAuth ───────────────────────────────────────────────────────

pub struct NextAuthGenerator;

impl FeatureGenerator for NextAuthGenerator {
    fn id(&self) -> &'static str {
        "nextauth"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let vars = TemplateContext::from_config(config);
        ctx.process_template(
            "import NextAuth from 'next-auth'\n\nexport const { handlers, auth } = NextAuth({\n  providers: [],\n})\n",
            &project_path.join("src/auth.ts"),
            &vars,
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["next-auth"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Add at least one provider in src/auth.ts".into()]
    }
}

// ── Clerk ────────────────────────────────────────────────────────────────────

pub struct ClerkGenerator;

impl FeatureGenerator for ClerkGenerator {
    fn id(&self) -> &'static str {
        "clerk"
    }

    fn setup(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let vars = TemplateContext::from_config(config);
        ctx.process_template(
            "import { clerkMiddleware } from '@clerk/nextjs/server'\n\nexport default clerkMiddleware()\n\nexport const config = {\n  matcher: ['/((?!_next|.*\\\\..*).*)'],\n}\n",
            &project_path.join("src/middleware.ts"),
            &vars,
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["@clerk/nextjs"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Copy your Clerk keys into .env".into()]
    }
}
