//! Framework scaffold generators.
//!
//! Each generator emits the minimal runnable file set for its framework:
//! package.json, an entry source file, and framework-specific config. The
//! enrichment steps patch files into this tree afterwards, so the scaffold
//! must exist first.

use std::path::Path;

use serde_json::json;

use precast_core::{
    application::ports::{FrameworkGenerator, GeneratorContext, TemplateContext},
    domain::ProjectConfig,
    error::PrecastResult,
};

/// Scaffold generator for one registered framework id.
pub struct AppScaffold {
    id: &'static str,
}

impl AppScaffold {
    pub fn new(id: &'static str) -> Self {
        Self { id }
    }

    /// All framework ids this module ships scaffolds for.
    pub fn all() -> Vec<AppScaffold> {
        ["react", "vue", "angular", "svelte", "next", "nuxt", "astro"]
            .into_iter()
            .map(AppScaffold::new)
            .collect()
    }

    fn source_ext(&self, config: &ProjectConfig) -> &'static str {
        let jsx = matches!(self.id, "react" | "next");
        match (config.typescript, jsx) {
            (true, true) => "tsx",
            (true, false) => "ts",
            (false, true) => "jsx",
            (false, false) => "js",
        }
    }

    fn package_json(&self, config: &ProjectConfig) -> String {
        let mut dependencies = serde_json::Map::new();
        let mut scripts = json!({
            "dev": "vite",
            "build": "vite build",
        });

        match self.id {
            "react" => {
                dependencies.insert("react".into(), json!("^19.0.0"));
                dependencies.insert("react-dom".into(), json!("^19.0.0"));
            }
            "vue" => {
                dependencies.insert("vue".into(), json!("^3.5.0"));
            }
            "angular" => {
                dependencies.insert("@angular/core".into(), json!("^19.0.0"));
                dependencies.insert("@angular/cli".into(), json!("^19.0.0"));
                scripts = json!({ "start": "ng serve", "build": "ng build" });
            }
            "svelte" => {
                dependencies.insert("svelte".into(), json!("^5.0.0"));
            }
            "next" => {
                dependencies.insert("next".into(), json!("^15.0.0"));
                dependencies.insert("react".into(), json!("^19.0.0"));
                dependencies.insert("react-dom".into(), json!("^19.0.0"));
                scripts = json!({ "dev": "next dev", "build": "next build", "start": "next start" });
            }
            "nuxt" => {
                dependencies.insert("nuxt".into(), json!("^3.15.0"));
                scripts = json!({ "dev": "nuxt dev", "build": "nuxt build" });
            }
            "astro" => {
                dependencies.insert("astro".into(), json!("^5.0.0"));
                scripts = json!({ "dev": "astro dev", "build": "astro build" });
            }
            _ => {}
        }

        if config.styling == "tailwind" {
            dependencies.insert("tailwindcss".into(), json!("^4.0.0"));
        }
        if config.styling == "styled-components" {
            dependencies.insert("styled-components".into(), json!("^6.1.0"));
        }

        let doc = json!({
            "name": "{{PROJECT_NAME}}",
            "version": "0.1.0",
            "private": true,
            "scripts": scripts,
            "dependencies": dependencies,
        });
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }

    fn entry_file(&self, config: &ProjectConfig) -> (String, &'static str) {
        let ext = self.source_ext(config);
        match self.id {
            "next" => (
                format!("app/page.{ext}"),
                "export default function Home() {\n  return <main>Welcome to {{PROJECT_NAME}}</main>\n}\n",
            ),
            "vue" | "nuxt" => (
                "app.vue".into(),
                "<template>\n  <main>Welcome to {{PROJECT_NAME}}</main>\n</template>\n",
            ),
            "svelte" => (
                "src/App.svelte".into(),
                "<main>Welcome to {{PROJECT_NAME}}</main>\n",
            ),
            "astro" => (
                "src/pages/index.astro".into(),
                "---\n---\n<main>Welcome to {{PROJECT_NAME}}</main>\n",
            ),
            "angular" => (
                format!("src/main.{ext}"),
                "import { bootstrapApplication } from '@angular/platform-browser'\nimport { AppComponent } from './app/app.component'\n\nbootstrapApplication(AppComponent)\n",
            ),
            _ => (
                format!("src/main.{ext}"),
                "const root = document.getElementById('root')\n\n// {{PROJECT_NAME}} entry point\nconsole.log('Welcome to {{PROJECT_NAME}}')\n",
            ),
        }
    }
}

impl FrameworkGenerator for AppScaffold {
    fn id(&self) -> &'static str {
        self.id
    }

    fn scaffold(
        &self,
        config: &ProjectConfig,
        project_path: &Path,
        ctx: &GeneratorContext<'_>,
    ) -> PrecastResult<()> {
        let vars = TemplateContext::from_config(config);

        ctx.process_template(
            &self.package_json(config),
            &project_path.join("package.json"),
            &vars,
        )?;

        let (entry_path, entry_template) = self.entry_file(config);
        ctx.process_template(entry_template, &project_path.join(entry_path), &vars)?;

        ctx.process_template(
            "# {{PROJECT_NAME}}\n\nScaffolded with precast.\n",
            &project_path.join("README.md"),
            &vars,
        )?;

        if config.typescript {
            ctx.write(
                &project_path.join("tsconfig.json"),
                "{\n  \"compilerOptions\": {\n    \"target\": \"ES2022\",\n    \"module\": \"ESNext\",\n    \"moduleResolution\": \"bundler\",\n    \"strict\": true,\n    \"skipLibCheck\": true\n  }\n}\n",
            )?;
        }

        if config.backend == "node" {
            let ext = if config.typescript { "ts" } else { "js" };
            ctx.process_template(
                "import { createServer } from 'node:http'\n\nconst server = createServer((_req, res) => {\n  res.end('{{PROJECT_NAME}} api')\n})\n\nserver.listen(process.env.PORT || 3000)\n",
                &project_path.join(format!("server/index.{ext}")),
                &vars,
            )?;
        }

        Ok(())
    }
}
