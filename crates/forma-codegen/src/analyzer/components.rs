//! Component boundary detection.

use super::name_matches;
use crate::config::BoundaryKeywords;
use crate::context::{ComponentInfo, GenerationContext};
use forma_core::naming::to_pascal_case;
use forma_core::DesignNode;

/// Partitions a tree into subtrees that become their own generated units.
pub struct ComponentAnalyzer<'r> {
    rules: &'r BoundaryKeywords,
}

impl<'r> ComponentAnalyzer<'r> {
    /// Create an analyzer with the given rules.
    pub fn new(rules: &'r BoundaryKeywords) -> Self {
        Self { rules }
    }

    /// Register every boundary under `root` (inclusive) on `ctx`.
    ///
    /// The walk is pre-order and stops descending at each boundary; a
    /// boundary's interior is analyzed when that boundary is generated.
    pub fn identify_boundaries<'a>(&self, root: &'a DesignNode, ctx: &mut GenerationContext<'a>) {
        self.visit(root, None, 0, ctx);
        tracing::debug!(
            root = %root.id,
            boundaries = ctx.components().count(),
            "identified component boundaries"
        );
    }

    fn visit<'a>(
        &self,
        node: &'a DesignNode,
        parent: Option<&'a DesignNode>,
        depth: usize,
        ctx: &mut GenerationContext<'a>,
    ) {
        if self.is_boundary(node, depth) {
            let name = match node.label().map(to_pascal_case) {
                Some(name) if !name.is_empty() => name,
                _ => ctx.next_anonymous_name(),
            };
            tracing::trace!(node = %node.id, %name, depth, "boundary");
            ctx.register_component(
                node.id.clone(),
                ComponentInfo {
                    name,
                    subtree_root: node,
                    parent_node_id: parent.map(|p| p.id.clone()),
                },
            );
            return;
        }

        for child in &node.children {
            self.visit(child, Some(node), depth + 1, ctx);
        }
    }

    /// Evaluate the boundary rules in precedence order.
    pub fn is_boundary(&self, node: &DesignNode, depth: usize) -> bool {
        if node.node_type.is_reusable() {
            return true;
        }
        if name_matches(node.label(), &self.rules.name_keywords) {
            return true;
        }
        self.has_repeated_structure(node, depth)
    }

    fn has_repeated_structure(&self, node: &DesignNode, depth: usize) -> bool {
        if node.children.len() < self.rules.min_children || depth >= self.rules.max_depth {
            return false;
        }
        match (node.children.first(), node.children.get(1)) {
            (Some(first), Some(second)) => {
                first.node_type == second.node_type
                    && first.children.len().abs_diff(second.children.len())
                        <= self.rules.child_count_tolerance
            }
            _ => false,
        }
    }
}
