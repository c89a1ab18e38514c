//! Generation orchestration.
//!
//! The controller generates the root unit, then every boundary its markup
//! references, each under an isolated [`GenerationContext`]. Generated names
//! are tracked across units so no file is written twice.

use crate::analyzer::{ComponentAnalyzer, InteractiveElementAnalyzer};
use crate::config::GeneratorConfig;
use crate::context::GenerationContext;
use crate::dialects::{self, OutputDialect, UnitSources};
use crate::error::{CodegenError, Result};
use forma_core::naming::component_name;
use forma_core::{normalize, DesignNode};
use indexmap::{IndexMap, IndexSet};

/// Generated files keyed by relative path, in emission order.
pub type GeneratedFiles = IndexMap<String, String>;

/// Name of the root unit when the document has no usable name.
pub const DEFAULT_UNIT_NAME: &str = "Component";

/// Generate every unit for `root` under `config`.
pub fn generate(root: &DesignNode, config: &GeneratorConfig) -> Result<GeneratedFiles> {
    GenerationController::new(config.clone())?.run(root)
}

/// Drives the pipeline for one document.
pub struct GenerationController {
    config: GeneratorConfig,
    dialect: Box<dyn OutputDialect>,
    files: GeneratedFiles,
    emitted: IndexSet<String>,
}

impl GenerationController {
    /// Create a controller using the dialect selected by `config`.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let dialect = dialects::create(&config)?;
        Ok(Self::with_dialect(config, dialect))
    }

    /// Create a controller with a custom dialect.
    pub fn with_dialect(config: GeneratorConfig, dialect: Box<dyn OutputDialect>) -> Self {
        Self {
            config,
            dialect,
            files: GeneratedFiles::new(),
            emitted: IndexSet::new(),
        }
    }

    /// Names of the units generated by the last run, in emission order.
    pub fn generated_units(&self) -> impl Iterator<Item = &str> {
        self.emitted.iter().map(String::as_str)
    }

    /// Normalize `root` and generate all of its units.
    pub fn run(&mut self, root: &DesignNode) -> Result<GeneratedFiles> {
        self.files.clear();
        self.emitted.clear();

        let normalized = normalize(root, None, &self.config.preprocess)?.ok_or_else(|| {
            CodegenError::EmptyDocument {
                id: root.id.clone(),
            }
        })?;
        let name = component_name(normalized.label(), DEFAULT_UNIT_NAME);

        tracing::debug!(
            root = %root.id,
            unit = %name,
            dialect = self.dialect.name(),
            "starting generation"
        );

        let mut ctx = GenerationContext::new();
        self.generate_unit(&normalized, &name, false, &mut ctx)?;

        tracing::debug!(
            units = self.emitted.len(),
            files = self.files.len(),
            "generation finished"
        );
        Ok(std::mem::take(&mut self.files))
    }

    fn generate_unit<'a>(
        &mut self,
        node: &'a DesignNode,
        name: &str,
        is_sub_component: bool,
        ctx: &mut GenerationContext<'a>,
    ) -> Result<()> {
        ctx.reset();
        self.emitted.insert(name.to_string());
        tracing::debug!(unit = name, node = %node.id, is_sub_component, "generating unit");

        if self.config.componentize && self.dialect.supports_components() {
            ComponentAnalyzer::new(&self.config.rules.boundaries).identify_boundaries(node, ctx);
        }
        InteractiveElementAnalyzer::new(&self.config.rules.interactions).classify(node, ctx);

        let markup = self.dialect.render_markup(node, ctx, name);
        let styles = self.dialect.render_styles(node, name);
        let files = self.dialect.assemble_unit(
            &UnitSources {
                name,
                markup: &markup.text,
                styles: &styles,
                is_sub_component,
                used_boundaries: &markup.used_boundaries,
            },
            ctx,
        )?;
        for file in files {
            self.files.insert(file.path, file.content);
        }

        let pending: Vec<(String, &'a DesignNode)> = markup
            .used_boundaries
            .iter()
            .filter_map(|id| ctx.component(id))
            .map(|info| (info.name.clone(), info.subtree_root))
            .collect();

        for (child_name, subtree) in pending {
            if self.emitted.contains(&child_name) {
                tracing::trace!(unit = %child_name, "already generated");
                continue;
            }
            let mut scope = ctx.isolate();
            self.generate_unit(subtree, &child_name, true, &mut scope)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialects::GeneratedFile;
    use crate::markup::MarkupSyntax;
    use forma_core::{Color, NodeType};

    /// Renders like JSX but refuses to assemble sub-components.
    struct FailingDialect;

    impl OutputDialect for FailingDialect {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn supports_components(&self) -> bool {
            true
        }

        fn file_extension(&self) -> &'static str {
            "txt"
        }

        fn markup_syntax(&self) -> MarkupSyntax {
            MarkupSyntax::Jsx
        }

        fn assemble_unit(
            &self,
            unit: &UnitSources<'_>,
            _ctx: &GenerationContext<'_>,
        ) -> Result<Vec<GeneratedFile>> {
            if unit.is_sub_component {
                return Err(CodegenError::UnsupportedFeature {
                    feature: "sub-components".to_string(),
                    target: "failing".to_string(),
                });
            }
            Ok(vec![GeneratedFile::new(format!("{}.txt", unit.name), unit.markup)])
        }
    }

    fn page() -> DesignNode {
        DesignNode::new("root", NodeType::Frame)
            .with_name("Shop")
            .with_fill(Color::rgb(1.0, 1.0, 1.0))
            .with_child(DesignNode::new("q", NodeType::Frame).with_name("Query Input"))
            .with_child(
                DesignNode::new("c", NodeType::Frame)
                    .with_name("Product Card")
                    .with_fill(Color::rgb(0.9, 0.9, 0.9))
                    .with_child(DesignNode::new("s", NodeType::Frame).with_name("Like Toggle")),
            )
    }

    #[test]
    fn test_context_restored_after_nested_error() {
        let root = page();
        let mut controller =
            GenerationController::with_dialect(GeneratorConfig::new(), Box::new(FailingDialect));
        let mut ctx = GenerationContext::new();

        let result = controller.generate_unit(&root, "Shop", false, &mut ctx);
        assert!(matches!(result, Err(CodegenError::UnsupportedFeature { .. })));

        // The root unit's bookkeeping survives the failed nested unit.
        assert_eq!(ctx.component("c").map(|info| info.name.as_str()), Some("ProductCard"));
        assert!(ctx.interactive_element("q").is_some());
        assert!(ctx.interactive_element("s").is_some());
        assert_eq!(ctx.state_variable_count(), 2);
    }

    #[test]
    fn test_error_surfaces_from_run() {
        let mut controller =
            GenerationController::with_dialect(GeneratorConfig::new(), Box::new(FailingDialect));
        assert!(controller.run(&page()).is_err());
        assert_eq!(
            controller.generated_units().collect::<Vec<_>>(),
            vec!["Shop", "ProductCard"]
        );
    }

    #[test]
    fn test_units_and_layout() {
        let mut controller = GenerationController::new(GeneratorConfig::new()).unwrap();
        let files = controller.run(&page()).unwrap();

        assert_eq!(
            files.keys().map(String::as_str).collect::<Vec<_>>(),
            vec![
                "Shop/Shop.tsx",
                "Shop/Shop.css",
                "Shop/Shop.types.ts",
                "ProductCard/ProductCard.tsx",
                "ProductCard/ProductCard.css",
                "ProductCard/ProductCard.types.ts",
            ]
        );
        assert_eq!(
            controller.generated_units().collect::<Vec<_>>(),
            vec!["Shop", "ProductCard"]
        );
    }

    #[test]
    fn test_hidden_root_is_empty_document() {
        let mut root = page();
        root.visible = Some(false);
        let config = GeneratorConfig::new()
            .with_preprocess(forma_core::PreprocessOptions::new().drop_hidden());
        let err = generate(&root, &config).unwrap_err();
        assert!(matches!(err, CodegenError::EmptyDocument { ref id } if id == "root"));
    }

    #[test]
    fn test_duplicate_ids_propagate() {
        let root = DesignNode::new("root", NodeType::Frame)
            .with_child(DesignNode::new("x", NodeType::Text))
            .with_child(DesignNode::new("x", NodeType::Text));
        let err = generate(&root, &GeneratorConfig::new()).unwrap_err();
        assert!(matches!(err, CodegenError::Core(_)));
    }
}
