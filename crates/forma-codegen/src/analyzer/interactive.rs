//! Interactive control classification.

use super::name_matches;
use crate::config::InteractionKeywords;
use crate::context::{
    handler_name, EventHandler, GenerationContext, InteractiveElement, InteractiveKind,
    StateType, StateVariable,
};
use forma_core::naming::safe_identifier;
use forma_core::DesignNode;
use serde_json::json;

/// Classifies nodes as controls and derives their state and handlers.
pub struct InteractiveElementAnalyzer<'r> {
    rules: &'r InteractionKeywords,
}

impl<'r> InteractiveElementAnalyzer<'r> {
    /// Create an analyzer with the given keyword sets.
    pub fn new(rules: &'r InteractionKeywords) -> Self {
        Self { rules }
    }

    /// Classify every node under `root` (inclusive), then update the
    /// aggregation flag.
    pub fn classify(&self, root: &DesignNode, ctx: &mut GenerationContext<'_>) {
        self.visit(root, ctx);
        ctx.update_aggregation();
        tracing::debug!(
            root = %root.id,
            elements = ctx.interactive_elements().count(),
            state = ctx.state_variable_count(),
            handlers = ctx.event_handler_count(),
            aggregated = ctx.state_aggregation(),
            "classified interactive elements"
        );
    }

    /// Kinds whose keyword set matches `node`, in classification order.
    pub fn kinds_for(&self, node: &DesignNode) -> Vec<InteractiveKind> {
        InteractiveKind::ALL
            .into_iter()
            .filter(|kind| name_matches(node.label(), self.keywords(*kind)))
            .collect()
    }

    fn keywords(&self, kind: InteractiveKind) -> &[String] {
        match kind {
            InteractiveKind::Button => &self.rules.button,
            InteractiveKind::Input => &self.rules.input,
            InteractiveKind::Accordion => &self.rules.accordion,
            InteractiveKind::Toggle => &self.rules.toggle,
        }
    }

    fn visit(&self, node: &DesignNode, ctx: &mut GenerationContext<'_>) {
        for kind in self.kinds_for(node) {
            register(node, kind, ctx);
        }
        for child in &node.children {
            self.visit(child, ctx);
        }
    }
}

fn register(node: &DesignNode, kind: InteractiveKind, ctx: &mut GenerationContext<'_>) {
    let identifier = safe_identifier(node.label(), kind.fallback_identifier());
    tracing::trace!(node = %node.id, ?kind, %identifier, "interactive element");

    let state = match kind {
        InteractiveKind::Button => None,
        InteractiveKind::Input => Some((StateType::String, json!(""))),
        InteractiveKind::Accordion | InteractiveKind::Toggle => {
            Some((StateType::Boolean, json!(false)))
        }
    };
    if let Some((state_type, default_value)) = state.clone() {
        ctx.add_state_variable(StateVariable {
            identifier: identifier.clone(),
            state_type,
            default_value,
        });
    }

    let handler_kind = kind.handler_kind();
    ctx.add_event_handler(EventHandler {
        identifier: handler_name(handler_kind, &identifier),
        kind: handler_kind,
        interaction: Some(kind),
        state: state.map(|_| identifier.clone()),
    });

    ctx.register_element(InteractiveElement {
        node_id: node.id.clone(),
        kind,
        identifier,
        original_name: node.name.clone(),
    });
}
