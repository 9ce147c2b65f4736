//! UI library generators, keyed by library id.

use std::path::Path;

use precast_core::{
    application::ports::{FeatureGenerator, GeneratorContext},
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

// ── shadcn/ui ────────────────────────────────────────────────────────────────

pub struct ShadcnGenerator;

impl FeatureGenerator for ShadcnGenerator {
    fn id(&self) -> &'static str {
        "shadcn"
    }

    fn setup(
        &self,
        _config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(
            &project_path.join("components.json"),
            "{\n  \"style\": \"default\",\n  \"tailwind\": {\n    \"css\": \"src/index.css\",\n    \"baseColor\": \"neutral\"\n  },\n  \"aliases\": {\n    \"components\": \"@/components\"\n  }\n}\n",
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["class-variance-authority", "clsx"])
    }

    fn next_steps(&self) -> Vec<String> {
        vec!["Add components with 'npx shadcn add button'".into()]
    }
}

// ── daisyUI ──────────────────────────────────────────────────────────────────

pub struct DaisyUiGenerator;

impl FeatureGenerator for DaisyUiGenerator {
    fn id(&self) -> &'static str {
        "daisyui"
    }

    fn setup(
        &self,
        _config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(
            &project_path.join("src/styles/daisyui.css"),
            "@import 'tailwindcss';\n@plugin 'daisyui';\n",
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(config, project_path, ctx, &["daisyui"])
    }
}

// ── Material UI ──────────────────────────────────────────────────────────────

pub struct MuiGenerator;

impl FeatureGenerator for MuiGenerator {
    fn id(&self) -> &'static str {
        "mui"
    }

    fn setup(
        &self,
        _config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        ctx.write(
            &project_path.join("src/theme.ts"),
            "import { createTheme } from '@mui/material/styles'\n\nexport const theme = createTheme({})\n",
        )
    }

    fn install_dependencies(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        install(
            config,
            project_path,
            ctx,
            &["@mui/material", "@emotion/react", "@emotion/styled"],
        )
    }
}
