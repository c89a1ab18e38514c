//! Design document model.
//!
//! A document is a tree of [`DesignNode`]s as exported by the design tool.
//! Field names follow the tool's camelCase JSON, and every attribute other
//! than the identifier and type tag is optional.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Paint list attached to a node (fills or strokes).
pub type PaintList = SmallVec<[Paint; 2]>;

/// Type tag of a design node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    #[default]
    Frame,
    Group,
    Section,
    Text,
    Rectangle,
    Ellipse,
    Line,
    Star,
    RegularPolygon,
    Vector,
    BooleanOperation,
    Component,
    ComponentSet,
    Instance,
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Structural containers that exist only to group other nodes.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Document | Self::Canvas | Self::Frame | Self::Group | Self::Section
        )
    }

    /// Reusable components and their instances.
    pub fn is_reusable(&self) -> bool {
        matches!(self, Self::Component | Self::Instance)
    }

    /// Primitive shapes.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            Self::Rectangle | Self::Ellipse | Self::Line | Self::Star | Self::RegularPolygon
        )
    }
}

/// An axis-aligned rectangle in document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// This rectangle expressed relative to `origin`'s top-left corner.
    pub fn relative_to(&self, origin: &Rect) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to 8-bit channel values.
    pub fn to_rgb8(&self) -> (u8, u8, u8) {
        (
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        )
    }

    /// Hex string (`#rrggbb`), ignoring alpha.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// CSS color value with `alpha` as the effective opacity.
    ///
    /// Opaque colors use hex notation, translucent ones `rgba()`.
    pub fn to_css(&self, alpha: f64) -> String {
        if alpha >= 1.0 {
            self.to_hex()
        } else {
            let (r, g, b) = self.to_rgb8();
            format!("rgba({}, {}, {}, {})", r, g, b, (alpha * 100.0).round() / 100.0)
        }
    }
}

/// Kind of paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    #[default]
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    #[serde(other)]
    Other,
}

/// A fill or stroke entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type", default)]
    pub kind: PaintKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl Paint {
    /// A visible solid paint.
    pub fn solid(color: Color) -> Self {
        Self {
            kind: PaintKind::Solid,
            visible: None,
            opacity: None,
            color: Some(color),
        }
    }

    /// Mark the paint hidden.
    pub fn hidden(mut self) -> Self {
        self.visible = Some(false);
        self
    }

    /// Anything but an explicit `visible: false` counts as visible.
    pub fn is_visible(&self) -> bool {
        self.visible != Some(false)
    }

    /// Solid color with its effective alpha, if this is a solid paint.
    pub fn solid_color(&self) -> Option<(Color, f64)> {
        if self.kind != PaintKind::Solid {
            return None;
        }
        let color = self.color?;
        Some((color, color.a * self.opacity.unwrap_or(1.0)))
    }
}

/// Auto-layout axis mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    /// No auto-layout; children are freely positioned.
    #[serde(rename = "NONE")]
    Freeform,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

impl LayoutMode {
    /// Whether this is a mode the style emitter knows how to express.
    pub fn is_flex(&self) -> bool {
        matches!(self, Self::Horizontal | Self::Vertical)
    }
}

/// Alignment along an auto-layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AxisAlign {
    Min,
    Center,
    Max,
    SpaceBetween,
    Baseline,
    #[serde(other)]
    Other,
}

/// Auto-layout wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutWrap {
    NoWrap,
    Wrap,
    #[serde(other)]
    Other,
}

/// Positioning mode of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Positioning {
    Auto,
    Absolute,
    Relative,
    #[serde(other)]
    Other,
}

/// Per-axis constraint mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintMode {
    #[serde(alias = "LEFT", alias = "TOP")]
    Min,
    Center,
    #[serde(alias = "RIGHT", alias = "BOTTOM")]
    Max,
    #[serde(alias = "LEFT_RIGHT", alias = "TOP_BOTTOM")]
    Stretch,
    Scale,
    #[serde(other)]
    Other,
}

/// Constraints for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConstraint {
    pub vertical: ConstraintMode,
    pub horizontal: ConstraintMode,
}

/// Sizing behavior along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sizing {
    Fixed,
    Hug,
    Fill,
    #[serde(other)]
    Other,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justified,
    #[serde(other)]
    Other,
}

/// Text decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextDecoration {
    #[serde(rename = "NONE")]
    Plain,
    Underline,
    Strikethrough,
    #[serde(other)]
    Other,
}

/// Typography attached to a text node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeStyle {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub line_height_px: Option<f64>,
    pub line_height_percent_font_size: Option<f64>,
    pub text_align_horizontal: Option<TextAlign>,
    pub text_decoration: Option<TextDecoration>,
}

/// Padding on all four sides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Whether all four sides are equal.
    pub fn is_uniform(&self) -> bool {
        self.top == self.right && self.right == self.bottom && self.bottom == self.left
    }

    /// Whether any side is non-zero.
    pub fn any(&self) -> bool {
        self.top != 0.0 || self.right != 0.0 || self.bottom != 0.0 || self.left != 0.0
    }
}

/// One element of a design document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignNode {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub children: Vec<DesignNode>,

    // Geometry
    pub absolute_bounding_box: Option<Rect>,
    /// Bounding box relative to the parent, filled in by normalization.
    #[serde(skip)]
    pub relative_bounding_box: Option<Rect>,

    // Auto-layout
    pub layout_mode: Option<LayoutMode>,
    pub primary_axis_align_items: Option<AxisAlign>,
    pub counter_axis_align_items: Option<AxisAlign>,
    pub item_spacing: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_right: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_left: Option<f64>,
    pub layout_wrap: Option<LayoutWrap>,

    // Paint
    pub fills: PaintList,
    pub strokes: PaintList,
    pub stroke_weight: Option<f64>,
    pub corner_radius: Option<f64>,

    // Text
    pub characters: Option<String>,
    pub style: Option<TypeStyle>,

    // Positioning
    pub layout_positioning: Option<Positioning>,
    pub constraints: Option<LayoutConstraint>,
    pub layout_sizing_horizontal: Option<Sizing>,
    pub layout_sizing_vertical: Option<Sizing>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,

    // Appearance
    pub opacity: Option<f64>,
    pub visible: Option<bool>,
    pub clips_content: Option<bool>,
}

impl DesignNode {
    /// Create a node with an identifier and type tag.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            ..Default::default()
        }
    }

    /// Set the node name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: DesignNode) -> Self {
        self.children.push(child);
        self
    }

    /// Set the absolute bounding box.
    pub fn with_bounds(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.absolute_bounding_box = Some(Rect::new(x, y, width, height));
        self
    }

    /// Append a solid fill.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fills.push(Paint::solid(color));
        self
    }

    /// Append a solid stroke.
    pub fn with_stroke(mut self, color: Color, weight: f64) -> Self {
        self.strokes.push(Paint::solid(color));
        self.stroke_weight = Some(weight);
        self
    }

    /// Set the literal characters of a text node.
    pub fn with_text(mut self, characters: impl Into<String>) -> Self {
        self.characters = Some(characters.into());
        self
    }

    /// Set the auto-layout mode.
    pub fn with_layout(mut self, mode: LayoutMode) -> Self {
        self.layout_mode = Some(mode);
        self
    }

    /// Set uniform padding.
    pub fn with_padding(mut self, value: f64) -> Self {
        self.padding_top = Some(value);
        self.padding_right = Some(value);
        self.padding_bottom = Some(value);
        self.padding_left = Some(value);
        self
    }

    /// Set the corner radius.
    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = Some(radius);
        self
    }

    /// The human-assigned name, if present and not blank.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.trim().is_empty())
    }

    /// Whether this is a text node.
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Literal characters of a text node, if non-empty.
    pub fn text(&self) -> Option<&str> {
        if !self.is_text() {
            return None;
        }
        self.characters.as_deref().filter(|chars| !chars.is_empty())
    }

    /// Whether the node is explicitly hidden.
    pub fn is_hidden(&self) -> bool {
        self.visible == Some(false)
    }

    /// Padding on all four sides, missing sides as zero.
    pub fn padding(&self) -> Padding {
        Padding {
            top: self.padding_top.unwrap_or(0.0),
            right: self.padding_right.unwrap_or(0.0),
            bottom: self.padding_bottom.unwrap_or(0.0),
            left: self.padding_left.unwrap_or(0.0),
        }
    }

    /// First visible solid fill with its effective alpha.
    pub fn first_solid_fill(&self) -> Option<(Color, f64)> {
        self.fills
            .iter()
            .filter(|paint| paint.is_visible())
            .find_map(Paint::solid_color)
    }

    /// First visible solid stroke with its effective alpha.
    pub fn first_solid_stroke(&self) -> Option<(Color, f64)> {
        self.strokes
            .iter()
            .filter(|paint| paint.is_visible())
            .find_map(Paint::solid_color)
    }

    /// Copy of this node without its children.
    pub fn without_children(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            node_type: self.node_type,
            children: Vec::new(),
            absolute_bounding_box: self.absolute_bounding_box,
            relative_bounding_box: self.relative_bounding_box,
            layout_mode: self.layout_mode,
            primary_axis_align_items: self.primary_axis_align_items,
            counter_axis_align_items: self.counter_axis_align_items,
            item_spacing: self.item_spacing,
            padding_top: self.padding_top,
            padding_right: self.padding_right,
            padding_bottom: self.padding_bottom,
            padding_left: self.padding_left,
            layout_wrap: self.layout_wrap,
            fills: self.fills.clone(),
            strokes: self.strokes.clone(),
            stroke_weight: self.stroke_weight,
            corner_radius: self.corner_radius,
            characters: self.characters.clone(),
            style: self.style.clone(),
            layout_positioning: self.layout_positioning,
            constraints: self.constraints,
            layout_sizing_horizontal: self.layout_sizing_horizontal,
            layout_sizing_vertical: self.layout_sizing_vertical,
            min_width: self.min_width,
            max_width: self.max_width,
            min_height: self.min_height,
            max_height: self.max_height,
            opacity: self.opacity,
            visible: self.visible,
            clips_content: self.clips_content,
        }
    }

    /// Find a node by identifier in this subtree (pre-order).
    pub fn find(&self, id: &str) -> Option<&DesignNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }
}
