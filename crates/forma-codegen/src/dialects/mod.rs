//! Output dialects.
//!
//! A dialect decides how a unit's markup, stylesheet and script are spelled
//! and laid out on disk. The pipeline itself is dialect-independent.

#[cfg(feature = "html")]
mod html;
#[cfg(feature = "react")]
mod react;
#[cfg(feature = "vue")]
mod vue;

#[cfg(feature = "html")]
pub use html::HtmlDialect;
#[cfg(feature = "react")]
pub use react::ReactDialect;
#[cfg(feature = "vue")]
pub use vue::VueDialect;

use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::error::{CodegenError, Result};
use crate::markup::{MarkupSyntax, MarkupTransformer};
use crate::styles::StyleTransformer;
use forma_core::DesignNode;

/// Common trait for output dialects.
pub trait OutputDialect {
    /// Dialect name (e.g., "react").
    fn name(&self) -> &'static str;

    /// Whether boundary subtrees may become separate units.
    fn supports_components(&self) -> bool;

    /// Extension of the main unit file.
    fn file_extension(&self) -> &'static str;

    /// Attribute and binding spellings used in markup.
    fn markup_syntax(&self) -> MarkupSyntax;

    /// Indentation depth of markup inside the unit file.
    fn markup_depth(&self) -> usize {
        0
    }

    /// Render a unit's markup and collect the boundaries it references.
    fn render_markup(
        &self,
        root: &DesignNode,
        ctx: &GenerationContext<'_>,
        current: &str,
    ) -> RenderedMarkup {
        let transformer =
            MarkupTransformer::new(ctx, self.markup_syntax()).with_unit_root(&root.id);
        RenderedMarkup {
            text: transformer.render(root, self.markup_depth(), current),
            used_boundaries: transformer.referenced_boundaries(root, current),
        }
    }

    /// CSS framework recorded in stylesheet headers.
    fn css_framework(&self) -> Option<&str> {
        None
    }

    /// Render a unit's stylesheet.
    fn render_styles(&self, root: &DesignNode, label: &str) -> String {
        StyleTransformer::new()
            .with_css_framework(self.css_framework())
            .emit(root, label)
    }

    /// Assemble a unit into files.
    fn assemble_unit(
        &self,
        unit: &UnitSources<'_>,
        ctx: &GenerationContext<'_>,
    ) -> Result<Vec<GeneratedFile>>;
}

/// Markup for one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedMarkup {
    pub text: String,
    /// Node identifiers of referenced boundaries, in document order.
    pub used_boundaries: Vec<String>,
}

/// Everything rendered for a unit before assembly.
#[derive(Debug, Clone)]
pub struct UnitSources<'s> {
    /// Generated unit name.
    pub name: &'s str,
    pub markup: &'s str,
    pub styles: &'s str,
    pub is_sub_component: bool,
    pub used_boundaries: &'s [String],
}

/// A generated file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    /// File path relative to the output root.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Create the dialect selected by `config`.
pub fn create(config: &GeneratorConfig) -> Result<Box<dyn OutputDialect>> {
    use crate::config::OutputDialectKind;

    tracing::debug!(dialect = %config.dialect, typed = config.typed, "selecting output dialect");
    match config.dialect {
        #[cfg(feature = "react")]
        OutputDialectKind::React => Ok(Box::new(ReactDialect::new(config)?)),
        #[cfg(feature = "html")]
        OutputDialectKind::Html => Ok(Box::new(HtmlDialect::new(config)?)),
        #[cfg(feature = "vue")]
        OutputDialectKind::Vue => Ok(Box::new(VueDialect::new(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(CodegenError::UnsupportedFeature {
            feature: format!("{} output", other),
            target: "this build".to_string(),
        }),
    }
}
