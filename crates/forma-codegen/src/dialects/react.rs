//! React function components with hooks.

use super::{GeneratedFile, OutputDialect, UnitSources};
use crate::assembler::TemplateAssembler;
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::markup::MarkupSyntax;
use crate::templates::TemplateEngine;

/// React dialect (TypeScript by default).
pub struct ReactDialect {
    engine: TemplateEngine<'static>,
    use_typescript: bool,
    css_framework: Option<String>,
}

impl ReactDialect {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtin_templates()?,
            use_typescript: config.typed,
            css_framework: config.css_framework.clone(),
        })
    }
}

impl OutputDialect for ReactDialect {
    fn name(&self) -> &'static str {
        "react"
    }

    fn supports_components(&self) -> bool {
        true
    }

    fn file_extension(&self) -> &'static str {
        if self.use_typescript {
            "tsx"
        } else {
            "jsx"
        }
    }

    fn markup_syntax(&self) -> MarkupSyntax {
        MarkupSyntax::Jsx
    }

    fn markup_depth(&self) -> usize {
        // Inside `return (` of the component body.
        2
    }

    fn css_framework(&self) -> Option<&str> {
        self.css_framework.as_deref()
    }

    fn assemble_unit(
        &self,
        unit: &UnitSources<'_>,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<GeneratedFile>> {
        let assembled = TemplateAssembler::new(&self.engine, self.use_typescript).assemble(
            unit.name,
            unit.markup,
            ctx,
            unit.is_sub_component,
            unit.used_boundaries,
        )?;

        let dir = unit.name;
        let mut files = vec![
            GeneratedFile::new(
                format!("{}/{}.{}", dir, unit.name, self.file_extension()),
                assembled.source,
            ),
            GeneratedFile::new(format!("{}/{}.css", dir, unit.name), unit.styles),
        ];
        if let Some(types) = assembled.type_declarations {
            files.push(GeneratedFile::new(
                format!("{}/{}.types.ts", dir, unit.name),
                types,
            ));
        }
        Ok(files)
    }
}
