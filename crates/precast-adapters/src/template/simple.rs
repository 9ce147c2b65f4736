//! Simple variable substitution engine.

use precast_core::{
    application::ports::{TemplateContext, TemplateEngine},
    error::PrecastResult,
};

/// Renderer using `{{KEY}}` substitution.
///
/// Placeholders without a matching context variable are left untouched:
/// generated files may legitimately contain double braces (JSX, YAML
/// templating) that are not ours to rewrite.
pub struct SimpleTemplateEngine;

impl SimpleTemplateEngine {
    /// Create a new simple engine.
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimpleTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for SimpleTemplateEngine {
    fn render(&self, template: &str, context: &TemplateContext) -> PrecastResult<String> {
        let mut out = template.to_string();
        for (key, value) in context.iter() {
            out = out.replace(&format!("{{{{{key}}}}}"), value);
        }
        Ok(out)
    }
}
