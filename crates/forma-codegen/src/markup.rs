//! Markup rendering.
//!
//! [`MarkupTransformer`] turns a normalized tree into indented markup. Each
//! node goes through a fixed sequence of simplifications (wrapper elision,
//! boundary substitution, control remapping, text collapse) before being
//! written as an element. Attribute and binding spellings come from a
//! [`MarkupSyntax`], so every dialect shares the same structure.

use crate::context::{handler_name, GenerationContext, InteractiveElement, InteractiveKind};
use crate::styles::has_meaningful_style;
use forma_core::naming::{class_name, escape_html_text, escape_jsx_text};
use forma_core::DesignNode;

/// Attribute and binding spellings of a markup flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupSyntax {
    /// JSX: `className`, `onClick={...}`.
    Jsx,
    /// Static HTML: `class`, no bindings.
    Html,
    /// Vue templates: `class`, `@click="..."`, `:value="..."`.
    VueTemplate,
}

impl MarkupSyntax {
    fn class_attr(&self) -> &'static str {
        match self {
            Self::Jsx => "className",
            Self::Html | Self::VueTemplate => "class",
        }
    }

    fn escape(&self, text: &str) -> String {
        match self {
            Self::Jsx => escape_jsx_text(text),
            Self::Html | Self::VueTemplate => escape_html_text(text),
        }
    }

    fn click(&self, handler: &str) -> Option<String> {
        match self {
            Self::Jsx => Some(format!("onClick={{{}}}", handler)),
            Self::VueTemplate => Some(format!("@click=\"{}\"", handler)),
            Self::Html => None,
        }
    }

    fn value(&self, expression: &str) -> Option<String> {
        match self {
            Self::Jsx => Some(format!("value={{{}}}", expression)),
            Self::VueTemplate => Some(format!(":value=\"{}\"", expression)),
            Self::Html => None,
        }
    }

    fn change(&self, handler: &str) -> Option<String> {
        match self {
            Self::Jsx => Some(format!("onChange={{{}}}", handler)),
            Self::VueTemplate => Some(format!("@input=\"{}\"", handler)),
            Self::Html => None,
        }
    }
}

/// An element about to be written.
struct Element {
    tag: &'static str,
    attrs: Vec<String>,
    self_closing: bool,
}

impl Element {
    fn open(&self, with_class: Option<&str>, syntax: MarkupSyntax) -> String {
        let mut parts = vec![self.tag.to_string()];
        if let Some(class) = with_class {
            parts.push(format!("{}=\"{}\"", syntax.class_attr(), class));
        }
        parts.extend(self.attrs.iter().cloned());
        parts.join(" ")
    }
}

/// Renders a tree as markup for one generated unit.
pub struct MarkupTransformer<'c, 'a> {
    ctx: &'c GenerationContext<'a>,
    syntax: MarkupSyntax,
    indent_width: usize,
    unit_root: Option<&'c str>,
}

impl<'c, 'a> MarkupTransformer<'c, 'a> {
    /// Create a transformer reading classification results from `ctx`.
    pub fn new(ctx: &'c GenerationContext<'a>, syntax: MarkupSyntax) -> Self {
        Self {
            ctx,
            syntax,
            indent_width: 2,
            unit_root: None,
        }
    }

    /// Identify the root node of the unit being rendered.
    ///
    /// The unit root always renders inline, even when it was registered as a
    /// boundary under a different name than the unit's own.
    pub fn with_unit_root(mut self, node_id: &'c str) -> Self {
        self.unit_root = Some(node_id);
        self
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.indent_width)
    }

    /// Render `node` at `depth` inside the unit named `current`.
    ///
    /// Returns an empty string for nodes that elide to nothing.
    pub fn render(&self, node: &DesignNode, depth: usize, current: &str) -> String {
        if let Some(only_child) = self.elided_child(node) {
            return self.render(only_child, depth, current);
        }

        let indent = self.indent(depth);
        let class = class_name(node.label());

        if let Some(name) = self.boundary_reference(node, current) {
            return format!(
                "{}<{} {}=\"{}\" />",
                indent,
                name,
                self.syntax.class_attr(),
                class
            );
        }

        let interactive = self.ctx.interactive_element(&node.id);
        let mut element = self.element_for(node, interactive);

        if let Some(text) = node.text() {
            if element.self_closing {
                element
                    .attrs
                    .push(format!("placeholder=\"{}\"", escape_html_text(text)));
                return format!("{}<{} />", indent, element.open(Some(&class), self.syntax));
            }
            return format!(
                "{}<{}>{}</{}>",
                indent,
                element.open(Some(&class), self.syntax),
                self.syntax.escape(text),
                element.tag
            );
        }

        if interactive.is_none() {
            if let Some(text) = self.collapsible_text(node) {
                return format!("{}{}", indent, self.syntax.escape(text));
            }
        }

        let children: Vec<String> = node
            .children
            .iter()
            .map(|child| self.render(child, depth + 1, current))
            .filter(|rendered| !rendered.is_empty())
            .collect();

        if element.self_closing && !children.is_empty() {
            let mut lines = vec![format!(
                "{}<div {}=\"{}\">",
                indent,
                self.syntax.class_attr(),
                class
            )];
            lines.push(format!(
                "{}<{} />",
                self.indent(depth + 1),
                element.open(None, self.syntax)
            ));
            lines.extend(children);
            lines.push(format!("{}</div>", indent));
            return lines.join("\n");
        }

        if children.is_empty() && interactive.is_none() && !has_meaningful_style(node) {
            return String::new();
        }

        let open = element.open(Some(&class), self.syntax);
        if element.self_closing {
            return format!("{}<{} />", indent, open);
        }
        if children.is_empty() {
            return format!("{}<{}></{}>", indent, open, element.tag);
        }

        let mut lines = vec![format!("{}<{}>", indent, open)];
        lines.extend(children);
        lines.push(format!("{}</{}>", indent, element.tag));
        lines.join("\n")
    }

    /// Identifiers of boundaries the rendered markup of `node` references, in
    /// document order.
    pub fn referenced_boundaries(&self, node: &DesignNode, current: &str) -> Vec<String> {
        let mut found = Vec::new();
        self.scan(node, current, &mut found);
        found
    }

    fn scan(&self, node: &DesignNode, current: &str, found: &mut Vec<String>) {
        if let Some(only_child) = self.elided_child(node) {
            return self.scan(only_child, current, found);
        }
        if self.boundary_reference(node, current).is_some() {
            if !found.contains(&node.id) {
                found.push(node.id.clone());
            }
            return;
        }
        if node.text().is_some() {
            return;
        }
        if self.ctx.interactive_element(&node.id).is_none()
            && self.collapsible_text(node).is_some()
        {
            return;
        }
        for child in &node.children {
            self.scan(child, current, found);
        }
    }

    /// The single child a style-less structural wrapper collapses to.
    fn elided_child<'n>(&self, node: &'n DesignNode) -> Option<&'n DesignNode> {
        let elidable = node.node_type.is_container()
            && node.children.len() == 1
            && !has_meaningful_style(node)
            && self.ctx.interactive_element(&node.id).is_none();
        if elidable {
            node.children.first()
        } else {
            None
        }
    }

    /// Generated name to reference instead of inlining `node`.
    fn boundary_reference(&self, node: &DesignNode, current: &str) -> Option<&str> {
        if self.unit_root == Some(node.id.as_str()) {
            return None;
        }
        self.ctx
            .component(&node.id)
            .map(|info| info.name.as_str())
            .filter(|name| *name != current)
    }

    /// Text of the sole text child of a style-less node.
    fn collapsible_text<'n>(&self, node: &'n DesignNode) -> Option<&'n str> {
        if node.children.len() != 1 || has_meaningful_style(node) {
            return None;
        }
        node.children.first().and_then(DesignNode::text)
    }

    fn element_for(&self, node: &DesignNode, interactive: Option<&InteractiveElement>) -> Element {
        let base = if node.is_text() { "p" } else { "div" };
        let Some(element) = interactive else {
            return Element {
                tag: base,
                attrs: Vec::new(),
                self_closing: false,
            };
        };

        let handler = handler_name(element.kind.handler_kind(), &element.identifier);
        match element.kind {
            InteractiveKind::Button => Element {
                tag: "button",
                attrs: std::iter::once("type=\"button\"".to_string())
                    .chain(self.syntax.click(&handler))
                    .collect(),
                self_closing: false,
            },
            InteractiveKind::Input => {
                let expression = self.ctx.state_expression(&element.identifier);
                Element {
                    tag: "input",
                    attrs: std::iter::once("type=\"text\"".to_string())
                        .chain(self.syntax.value(&expression))
                        .chain(self.syntax.change(&handler))
                        .collect(),
                    self_closing: true,
                }
            }
            InteractiveKind::Accordion | InteractiveKind::Toggle => Element {
                tag: base,
                attrs: self.syntax.click(&handler).into_iter().collect(),
                self_closing: false,
            },
        }
    }
}
