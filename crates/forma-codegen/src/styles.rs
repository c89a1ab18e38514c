//! Stylesheet extraction.
//!
//! One pre-order pass derives a rule body per class name. Classes whose
//! bodies are identical share a single comma-joined selector.

use forma_core::naming::class_name;
use forma_core::{
    AxisAlign, ConstraintMode, DesignNode, LayoutMode, LayoutWrap, Positioning, Sizing,
    TextAlign, TextDecoration,
};
use indexmap::{IndexMap, IndexSet};

/// Whether a node carries any visual attribute worth a rule.
pub fn has_meaningful_style(node: &DesignNode) -> bool {
    !node.fills.is_empty()
        || !node.strokes.is_empty()
        || node.corner_radius.is_some_and(|r| r > 0.0)
        || node.layout_mode.is_some_and(|mode| mode.is_flex())
        || node.padding().any()
        || node.opacity.is_some_and(|o| o < 1.0)
        || matches!(
            node.layout_positioning,
            Some(Positioning::Absolute | Positioning::Relative)
        )
        || node.absolute_bounding_box.is_some()
}

/// Ordered CSS declarations. Setting a property again replaces its value in
/// place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(IndexMap<&'static str, String>);

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        self.0.insert(property, value.into());
    }

    #[cfg(test)]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Order-independent fingerprint of the declarations.
    pub fn style_key(&self) -> StyleKey {
        let mut pairs: Vec<(String, String)> = self
            .0
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        pairs.sort();
        StyleKey(pairs)
    }

    /// Render as an indented rule body.
    pub fn to_css(&self, indent: &str) -> String {
        let mut out = String::new();
        for (property, value) in self.iter() {
            out.push_str(&format!("{}{}: {};\n", indent, property, value));
        }
        out
    }
}

/// Fingerprint used to merge identical rule bodies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey(Vec<(String, String)>);

struct RuleGroup {
    classes: Vec<String>,
    body: Declarations,
}

/// Emits a deduplicated stylesheet for a tree.
#[derive(Debug, Clone, Default)]
pub struct StyleTransformer<'c> {
    css_framework: Option<&'c str>,
}

impl<'c> StyleTransformer<'c> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a CSS framework name in the stylesheet header.
    pub fn with_css_framework(mut self, framework: Option<&'c str>) -> Self {
        self.css_framework = framework;
        self
    }

    /// Emit the stylesheet for `root`.
    pub fn emit(&self, root: &DesignNode, root_label: &str) -> String {
        let mut visited = IndexSet::new();
        let mut groups: IndexMap<StyleKey, RuleGroup> = IndexMap::new();
        collect(root, &mut visited, &mut groups);

        let mut out = format!("/* {} styles */\n", root_label);
        if let Some(framework) = self.css_framework {
            out.push_str(&format!("/* css framework: {} */\n", framework));
        }

        for group in groups.values() {
            if group.body.is_empty() {
                continue;
            }
            let selector = group
                .classes
                .iter()
                .map(|class| format!(".{}", class))
                .collect::<Vec<_>>()
                .join(", ");
            out.push('\n');
            out.push_str(&format!("{} {{\n", selector));
            out.push_str(&group.body.to_css("  "));
            out.push_str("}\n");
        }

        tracing::trace!(rules = groups.len(), classes = visited.len(), "emitted stylesheet");
        out
    }
}

fn collect(
    node: &DesignNode,
    visited: &mut IndexSet<String>,
    groups: &mut IndexMap<StyleKey, RuleGroup>,
) {
    let class = class_name(node.label());
    if (node.is_text() || node.absolute_bounding_box.is_some()) && visited.insert(class.clone()) {
        let body = rule_body(node);
        let key = body.style_key();
        groups
            .entry(key)
            .or_insert_with(|| RuleGroup {
                classes: Vec::new(),
                body,
            })
            .classes
            .push(class);
    }

    for child in &node.children {
        collect(child, visited, groups);
    }
}

/// Build the rule body for one node.
pub fn rule_body(node: &DesignNode) -> Declarations {
    let mut decl = Declarations::new();
    let padding = node.padding();

    if !node.strokes.is_empty() || padding.any() {
        decl.set("box-sizing", "border-box");
    }

    push_size(node, &mut decl);

    if !node.is_text() {
        if let Some((color, alpha)) = node.first_solid_fill() {
            if alpha > 0.0 {
                decl.set("background-color", color.to_css(alpha));
            }
        }
    }

    if let Some((color, alpha)) = node.first_solid_stroke() {
        let weight = node.stroke_weight.unwrap_or(1.0);
        decl.set(
            "border",
            format!("{}px solid {}", format_number(weight), color.to_css(alpha)),
        );
    }

    if let Some(radius) = node.corner_radius.filter(|r| *r > 0.0) {
        decl.set("border-radius", radius_token(radius));
    }

    if padding.any() {
        let value = if padding.is_uniform() {
            spacing_token(padding.top)
        } else {
            format!(
                "{} {} {} {}",
                spacing_token(padding.top),
                spacing_token(padding.right),
                spacing_token(padding.bottom),
                spacing_token(padding.left)
            )
        };
        decl.set("padding", value);
    }

    push_typography(node, &mut decl);
    push_flex(node, &mut decl);

    match node.layout_positioning {
        Some(Positioning::Absolute) => decl.set("position", "absolute"),
        Some(Positioning::Relative) => decl.set("position", "relative"),
        _ => {}
    }

    push_constraints(node, &mut decl);

    if node.clips_content == Some(true) {
        decl.set("overflow", "hidden");
    }
    if let Some(opacity) = node.opacity.filter(|o| *o < 1.0) {
        decl.set("opacity", format_number(opacity));
    }
    if node.is_hidden() {
        decl.set("display", "none");
    }

    for (property, value) in [
        ("min-width", node.min_width),
        ("max-width", node.max_width),
        ("min-height", node.min_height),
        ("max-height", node.max_height),
    ] {
        if let Some(value) = value {
            decl.set(property, px(value));
        }
    }

    if node.is_text() {
        decl.set("white-space", "pre-wrap");
        decl.set("word-wrap", "break-word");
    }

    decl
}

fn push_size(node: &DesignNode, decl: &mut Declarations) {
    let Some(bounds) = node.absolute_bounding_box else {
        return;
    };
    for (property, sizing, value) in [
        ("width", node.layout_sizing_horizontal, bounds.width),
        ("height", node.layout_sizing_vertical, bounds.height),
    ] {
        match sizing {
            Some(Sizing::Fill) => decl.set(property, "100%"),
            Some(Sizing::Fixed) => decl.set(property, px(value)),
            _ if node.is_text() => decl.set(property, px(value)),
            _ => {}
        }
    }
}

fn push_typography(node: &DesignNode, decl: &mut Declarations) {
    if let Some(style) = &node.style {
        if let Some(family) = &style.font_family {
            decl.set("font-family", format!("'{}', sans-serif", family));
        }
        if let Some(size) = style.font_size {
            decl.set("font-size", px(size));
        }
        if let Some(weight) = style.font_weight {
            decl.set("font-weight", format_number(weight));
        }
        if let Some(spacing) = style.letter_spacing.filter(|s| *s != 0.0) {
            decl.set("letter-spacing", px(spacing));
        }
        match (
            style.line_height_px,
            style.line_height_percent_font_size,
            style.font_size,
        ) {
            (Some(height), _, _) => decl.set("line-height", px(height)),
            (None, Some(percent), Some(size)) => {
                decl.set("line-height", px(percent / 100.0 * size))
            }
            _ => {}
        }
    }

    if node.is_text() {
        if let Some((color, alpha)) = node.first_solid_fill() {
            if alpha > 0.0 {
                decl.set("color", color.to_css(alpha));
            }
        }
    }

    if let Some(style) = &node.style {
        match style.text_align_horizontal {
            Some(TextAlign::Center) => decl.set("text-align", "center"),
            Some(TextAlign::Right) => decl.set("text-align", "right"),
            Some(TextAlign::Justified) => decl.set("text-align", "justify"),
            _ => {}
        }
        match style.text_decoration {
            Some(TextDecoration::Underline) => decl.set("text-decoration", "underline"),
            Some(TextDecoration::Strikethrough) => decl.set("text-decoration", "line-through"),
            _ => {}
        }
    }
}

fn push_flex(node: &DesignNode, decl: &mut Declarations) {
    match node.layout_mode {
        Some(mode) if mode.is_flex() => {
            decl.set("display", "flex");
            decl.set(
                "flex-direction",
                if mode == LayoutMode::Horizontal {
                    "row"
                } else {
                    "column"
                },
            );
            match node.primary_axis_align_items {
                Some(AxisAlign::Center) => decl.set("justify-content", "center"),
                Some(AxisAlign::Max) => decl.set("justify-content", "flex-end"),
                Some(AxisAlign::SpaceBetween) => decl.set("justify-content", "space-between"),
                _ => {}
            }
            match node.counter_axis_align_items {
                Some(AxisAlign::Center) => decl.set("align-items", "center"),
                Some(AxisAlign::Max) => decl.set("align-items", "flex-end"),
                Some(AxisAlign::Baseline) => decl.set("align-items", "baseline"),
                _ => {}
            }
            if let Some(gap) = node.item_spacing.filter(|g| *g > 0.0) {
                decl.set("gap", gap_token(gap));
            }
            if node.layout_wrap == Some(LayoutWrap::Wrap) {
                decl.set("flex-wrap", "wrap");
            }
        }
        _ if node.children.len() > 1 => {
            if let Some(direction) = infer_direction(node) {
                decl.set("display", "flex");
                decl.set("flex-direction", direction);
            }
        }
        _ => {}
    }
}

/// Guess a flex direction for freeform children from their placement.
fn infer_direction(node: &DesignNode) -> Option<&'static str> {
    let first = node.children.first()?.absolute_bounding_box;
    let second = node.children.get(1)?.absolute_bounding_box;

    if let (Some(a), Some(b)) = (first, second) {
        if (b.y - a.y).abs() < 10.0 && (b.x - a.x).abs() > 10.0 {
            return Some("row");
        }
    }
    (node.children.len() > 2).then_some("column")
}

fn push_constraints(node: &DesignNode, decl: &mut Declarations) {
    let Some(constraints) = node.constraints else {
        return;
    };

    match constraints.horizontal {
        ConstraintMode::Min => decl.set("justify-self", "start"),
        ConstraintMode::Center => decl.set("justify-self", "center"),
        ConstraintMode::Max => decl.set("justify-self", "end"),
        ConstraintMode::Stretch => {
            decl.set("justify-self", "stretch");
            decl.set("width", "100%");
        }
        ConstraintMode::Scale => decl.set("width", "100%"),
        ConstraintMode::Other => {}
    }

    match constraints.vertical {
        ConstraintMode::Min => decl.set("align-self", "flex-start"),
        ConstraintMode::Center => decl.set("align-self", "center"),
        ConstraintMode::Max => decl.set("align-self", "flex-end"),
        ConstraintMode::Stretch => {
            decl.set("align-self", "stretch");
            decl.set("height", "100%");
        }
        ConstraintMode::Scale => decl.set("height", "100%"),
        ConstraintMode::Other => {}
    }
}

fn radius_token(value: f64) -> String {
    match value as i64 {
        4 if value.fract() == 0.0 => "var(--radius-sm)".to_string(),
        8 if value.fract() == 0.0 => "var(--radius-md)".to_string(),
        12 if value.fract() == 0.0 => "var(--radius-lg)".to_string(),
        _ => px(value),
    }
}

fn spacing_token(value: f64) -> String {
    if value.fract() != 0.0 {
        return px(value);
    }
    match value as i64 {
        0 => "0".to_string(),
        4 => "var(--spacing-xs)".to_string(),
        8 => "var(--spacing-sm)".to_string(),
        16 => "var(--spacing-md)".to_string(),
        24 => "var(--spacing-lg)".to_string(),
        32 => "var(--spacing-xl)".to_string(),
        _ => px(value),
    }
}

fn gap_token(value: f64) -> String {
    if value.fract() != 0.0 {
        return px(value);
    }
    match value as i64 {
        8 => "var(--spacing-sm)".to_string(),
        16 => "var(--spacing-md)".to_string(),
        24 => "var(--spacing-lg)".to_string(),
        _ => px(value),
    }
}

fn px(value: f64) -> String {
    format!("{}px", format_number(value))
}

/// Format with at most two decimals and no trailing zeros.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.2}", rounded);
        s.trim_end_matches('0').to_string()
    }
}
