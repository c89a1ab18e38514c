//! Static HTML pages.

use super::{GeneratedFile, OutputDialect, UnitSources};
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::markup::MarkupSyntax;
use crate::templates::{TemplateEngine, HTML_PAGE};
use serde::Serialize;

/// HTML dialect. Produces one flat page per document with no bindings.
pub struct HtmlDialect {
    engine: TemplateEngine<'static>,
    css_framework: Option<String>,
}

#[derive(Serialize)]
struct PageData<'d> {
    name: &'d str,
    markup: &'d str,
}

impl HtmlDialect {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtin_templates()?,
            css_framework: config.css_framework.clone(),
        })
    }
}

impl OutputDialect for HtmlDialect {
    fn name(&self) -> &'static str {
        "html"
    }

    fn supports_components(&self) -> bool {
        false
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }

    fn markup_syntax(&self) -> MarkupSyntax {
        MarkupSyntax::Html
    }

    fn css_framework(&self) -> Option<&str> {
        self.css_framework.as_deref()
    }

    fn assemble_unit(
        &self,
        unit: &UnitSources<'_>,
        _ctx: &GenerationContext<'_>,
    ) -> Result<Vec<GeneratedFile>> {
        let page = self.engine.render(
            HTML_PAGE,
            &PageData {
                name: unit.name,
                markup: unit.markup,
            },
        )?;

        Ok(vec![
            GeneratedFile::new(format!("{}/index.html", unit.name), page),
            GeneratedFile::new(format!("{}/{}.css", unit.name, unit.name), unit.styles),
        ])
    }
}
