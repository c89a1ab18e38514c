//! Normalization of raw design documents.
//!
//! Normalization is a pure transform: the input tree is never modified and a
//! fresh tree is returned, so one document can be normalized repeatedly under
//! different options.

use crate::errors::{CoreError, Result};
use crate::node::DesignNode;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Options controlling normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Keep nodes whose `visible` flag is explicitly false.
    ///
    /// Hidden nodes that are kept are emitted with `display: none`.
    pub keep_hidden: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self { keep_hidden: true }
    }
}

impl PreprocessOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop hidden nodes during normalization.
    pub fn drop_hidden(mut self) -> Self {
        self.keep_hidden = false;
        self
    }
}

/// Normalize `node` (and its subtree) under `parent`.
///
/// Computes parent-relative bounding boxes, removes hidden paints, and drops
/// children that normalize to nothing. Returns `Ok(None)` when `node` itself
/// normalizes to nothing.
pub fn normalize(
    node: &DesignNode,
    parent: Option<&DesignNode>,
    options: &PreprocessOptions,
) -> Result<Option<DesignNode>> {
    let mut seen = HashSet::new();
    let normalized = normalize_node(node, parent, options, &mut seen)?;
    tracing::trace!(nodes = seen.len(), root = %node.id, "normalized document");
    Ok(normalized)
}

fn normalize_node<'a>(
    node: &'a DesignNode,
    parent: Option<&DesignNode>,
    options: &PreprocessOptions,
    seen: &mut HashSet<&'a str>,
) -> Result<Option<DesignNode>> {
    if !options.keep_hidden && node.is_hidden() {
        return Ok(None);
    }

    if !seen.insert(node.id.as_str()) {
        return Err(CoreError::DuplicateNodeId {
            id: node.id.clone(),
        });
    }

    let mut normalized = node.without_children();

    normalized.relative_bounding_box = match (
        node.absolute_bounding_box.as_ref(),
        parent.and_then(|p| p.absolute_bounding_box.as_ref()),
    ) {
        (Some(own), Some(origin)) => Some(own.relative_to(origin)),
        _ => None,
    };

    normalized.fills.retain(|paint| paint.is_visible());
    normalized.strokes.retain(|paint| paint.is_visible());

    for child in &node.children {
        if let Some(child) = normalize_node(child, Some(node), options, seen)? {
            normalized.children.push(child);
        }
    }

    Ok(Some(normalized))
}
