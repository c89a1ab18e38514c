//! Template engine for source assembly.

use crate::error::{CodegenError, Result};
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

/// React component unit.
pub const REACT_COMPONENT: &str = "react_component";
/// React type-declaration unit.
pub const REACT_TYPES: &str = "react_types";
/// Vue single-file component.
pub const VUE_COMPONENT: &str = "vue_component";
/// Static HTML page.
pub const HTML_PAGE: &str = "html_page";

const REACT_COMPONENT_TEMPLATE: &str = "\
{{imports}}

{{signature}} => {
{{body}}  return (
{{markup}}
  );
};
{{exports}}";

const REACT_TYPES_TEMPLATE: &str = "\
{{imports}}export interface {{name}}Props {
  className?: string;
}
{{state}}
{{handlers}}";

const VUE_COMPONENT_TEMPLATE: &str = "\
<template>
{{markup}}
</template>

<script setup{{lang}}>
{{script}}</script>

<style scoped>
@import './{{name}}.css';
</style>
";

const HTML_PAGE_TEMPLATE: &str = "\
<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"utf-8\" />
  <title>{{name}}</title>
  <link rel=\"stylesheet\" href=\"./{{name}}.css\" />
</head>
<body>
{{indent markup 2}}
</body>
</html>
";

handlebars_helper!(indent: |content: str, spaces: u64| indent_lines(content, spaces as usize));

/// Prefix every non-blank line of `content` with `spaces` spaces.
pub fn indent_lines(content: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Template engine using Handlebars.
///
/// Output is source code, so HTML escaping is disabled.
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Create an engine with helpers but no templates.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("indent", Box::new(indent));
        Self { handlebars }
    }

    /// Create an engine with the built-in unit templates registered.
    pub fn with_builtin_templates() -> Result<Self> {
        let mut engine = Self::new();
        engine.register_template(REACT_COMPONENT, REACT_COMPONENT_TEMPLATE)?;
        engine.register_template(REACT_TYPES, REACT_TYPES_TEMPLATE)?;
        engine.register_template(VUE_COMPONENT, VUE_COMPONENT_TEMPLATE)?;
        engine.register_template(HTML_PAGE, HTML_PAGE_TEMPLATE)?;
        Ok(engine)
    }

    /// Register a template.
    pub fn register_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(CodegenError::InvalidTemplate)?;
        Ok(())
    }

    /// Render a registered template.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.handlebars
            .render(name, data)
            .map_err(CodegenError::TemplateError)
    }
}

impl<'a> Default for TemplateEngine<'a> {
    fn default() -> Self {
        Self::new()
    }
}
