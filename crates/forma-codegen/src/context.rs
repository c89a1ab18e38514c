//! Per-unit generation context.
//!
//! A [`GenerationContext`] holds everything the analyzers learn about one
//! generated unit: interactive elements, state variables, event handlers and
//! component boundaries. Exactly one context is live at a time. Nested units
//! are generated inside an [`IsolationScope`], which snapshots the live
//! context, hands out an empty one, and restores the snapshot when dropped.

use forma_core::naming::to_pascal_case;
use forma_core::DesignNode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// Name of the aggregated state record in generated sources.
pub const AGGREGATE_STATE: &str = "state";

/// More state variables than this switches to one aggregated record.
pub const AGGREGATION_THRESHOLD: usize = 3;

/// Interaction kind of a classified node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractiveKind {
    Button,
    Input,
    Accordion,
    Toggle,
}

impl InteractiveKind {
    /// All kinds, in classification order.
    pub const ALL: [InteractiveKind; 4] = [Self::Button, Self::Input, Self::Accordion, Self::Toggle];

    /// Identifier used when the node name has no usable characters.
    pub fn fallback_identifier(&self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Input => "input",
            Self::Accordion => "accordion",
            Self::Toggle => "toggle",
        }
    }

    /// Handler kind registered for this control.
    pub fn handler_kind(&self) -> HandlerKind {
        match self {
            Self::Button => HandlerKind::Click,
            Self::Input => HandlerKind::Change,
            Self::Accordion | Self::Toggle => HandlerKind::Toggle,
        }
    }
}

/// Semantic kind of an event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    Click,
    Change,
    Toggle,
}

impl HandlerKind {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Click => "Click",
            Self::Change => "Change",
            Self::Toggle => "Toggle",
        }
    }
}

/// Semantic type of a state variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateType {
    String,
    Boolean,
}

impl StateType {
    /// Convert to TypeScript type.
    pub fn to_typescript(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// A node classified as an interactive control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveElement {
    pub node_id: String,
    pub kind: InteractiveKind,
    /// Reserved-word-safe camelCase identifier.
    pub identifier: String,
    pub original_name: Option<String>,
}

/// A state variable in the generated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVariable {
    pub identifier: String,
    pub state_type: StateType,
    pub default_value: serde_json::Value,
}

/// An event handler in the generated unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHandler {
    pub identifier: String,
    pub kind: HandlerKind,
    /// Kind of control that registered the handler.
    pub interaction: Option<InteractiveKind>,
    /// State variable the handler updates.
    pub state: Option<String>,
}

/// A subtree that becomes its own generated unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo<'a> {
    pub name: String,
    pub subtree_root: &'a DesignNode,
    pub parent_node_id: Option<String>,
}

/// Handler identifier for a control identifier, e.g. `handleSearchInputChange`.
pub fn handler_name(kind: HandlerKind, identifier: &str) -> String {
    format!("handle{}{}", to_pascal_case(identifier), kind.suffix())
}

/// Setter identifier for an independent state slot, e.g. `setSearchInput`.
pub fn setter_name(identifier: &str) -> String {
    format!("set{}", to_pascal_case(identifier))
}

/// Mutable bookkeeping for one generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext<'a> {
    interactive_elements: IndexMap<String, InteractiveElement>,
    state_variables: IndexMap<String, StateVariable>,
    event_handlers: IndexMap<String, EventHandler>,
    components: IndexMap<String, ComponentInfo<'a>>,
    anonymous_components: usize,
    state_aggregation: bool,
}

impl<'a> GenerationContext<'a> {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an interactive element. A later entry for the same node replaces
    /// the earlier one.
    pub fn register_element(&mut self, element: InteractiveElement) {
        self.interactive_elements
            .insert(element.node_id.clone(), element);
    }

    /// Add a state variable unless one with the same identifier exists.
    pub fn add_state_variable(&mut self, variable: StateVariable) {
        self.state_variables
            .entry(variable.identifier.clone())
            .or_insert(variable);
    }

    /// Add an event handler unless one with the same identifier exists.
    pub fn add_event_handler(&mut self, handler: EventHandler) {
        self.event_handlers
            .entry(handler.identifier.clone())
            .or_insert(handler);
    }

    /// Record a component boundary.
    pub fn register_component(&mut self, node_id: impl Into<String>, info: ComponentInfo<'a>) {
        self.components.insert(node_id.into(), info);
    }

    /// Next name for an unnamed component: `Component1`, `Component2`, ...
    pub fn next_anonymous_name(&mut self) -> String {
        self.anonymous_components += 1;
        format!("Component{}", self.anonymous_components)
    }

    /// Recompute the aggregation flag from the state variable count.
    pub fn update_aggregation(&mut self) {
        self.state_aggregation = self.state_variables.len() > AGGREGATION_THRESHOLD;
    }

    pub fn interactive_element(&self, node_id: &str) -> Option<&InteractiveElement> {
        self.interactive_elements.get(node_id)
    }

    pub fn interactive_elements(&self) -> impl Iterator<Item = &InteractiveElement> {
        self.interactive_elements.values()
    }

    pub fn state_variables(&self) -> impl Iterator<Item = &StateVariable> {
        self.state_variables.values()
    }

    pub fn state_variable_count(&self) -> usize {
        self.state_variables.len()
    }

    pub fn event_handlers(&self) -> impl Iterator<Item = &EventHandler> {
        self.event_handlers.values()
    }

    pub fn event_handler_count(&self) -> usize {
        self.event_handlers.len()
    }

    pub fn component(&self, node_id: &str) -> Option<&ComponentInfo<'a>> {
        self.components.get(node_id)
    }

    /// Boundaries in discovery order, keyed by node identifier.
    pub fn components(&self) -> impl Iterator<Item = (&String, &ComponentInfo<'a>)> {
        self.components.iter()
    }

    pub fn anonymous_component_count(&self) -> usize {
        self.anonymous_components
    }

    pub fn state_aggregation(&self) -> bool {
        self.state_aggregation
    }

    /// Expression reading a state variable in markup and handlers.
    pub fn state_expression(&self, identifier: &str) -> String {
        if self.state_aggregation {
            format!("{}.{}", AGGREGATE_STATE, identifier)
        } else {
            identifier.to_string()
        }
    }

    /// Deep copy of every collection, the counter and the aggregation flag.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Clear everything, including the anonymous-component counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Replace the live state with a snapshot.
    pub fn restore(&mut self, snapshot: Self) {
        *self = snapshot;
    }

    /// Snapshot and reset this context for a nested unit.
    ///
    /// The snapshot is restored when the returned scope is dropped, whether
    /// the nested generation returned normally, returned an error, or
    /// unwound.
    pub fn isolate(&mut self) -> IsolationScope<'_, 'a> {
        let saved = self.snapshot();
        self.reset();
        tracing::trace!(
            saved_components = saved.components.len(),
            saved_state = saved.state_variables.len(),
            "isolated generation context"
        );
        IsolationScope {
            context: self,
            saved: Some(saved),
        }
    }
}

/// Guard restoring a context snapshot on drop.
#[derive(Debug)]
pub struct IsolationScope<'s, 'a> {
    context: &'s mut GenerationContext<'a>,
    saved: Option<GenerationContext<'a>>,
}

impl<'s, 'a> Deref for IsolationScope<'s, 'a> {
    type Target = GenerationContext<'a>;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl<'s, 'a> DerefMut for IsolationScope<'s, 'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl<'s, 'a> Drop for IsolationScope<'s, 'a> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.context.restore(saved);
            tracing::trace!("restored generation context");
        }
    }
}
