//! Generator configuration.

use crate::error::Result;
use forma_core::PreprocessOptions;
use serde::{Deserialize, Serialize};

/// Output dialect selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputDialectKind {
    #[default]
    React,
    Html,
    Vue,
}

impl std::fmt::Display for OutputDialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::React => write!(f, "react"),
            Self::Html => write!(f, "html"),
            Self::Vue => write!(f, "vue"),
        }
    }
}

/// Options for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Output dialect.
    pub dialect: OutputDialectKind,
    /// Emit typed sources and type-declaration files.
    pub typed: bool,
    /// Split boundary subtrees into their own units.
    pub componentize: bool,
    /// CSS framework name. Only recorded in stylesheet headers.
    pub css_framework: Option<String>,
    /// Normalization options.
    pub preprocess: PreprocessOptions,
    /// Keyword tables for boundary and interaction classification.
    pub rules: ClassificationRules,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            dialect: OutputDialectKind::React,
            typed: true,
            componentize: true,
            css_framework: None,
            preprocess: PreprocessOptions::default(),
            rules: ClassificationRules::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Select the output dialect.
    pub fn with_dialect(mut self, dialect: OutputDialectKind) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable typed output.
    pub fn with_typed(mut self, typed: bool) -> Self {
        self.typed = typed;
        self
    }

    /// Enable or disable componentization.
    pub fn with_componentize(mut self, componentize: bool) -> Self {
        self.componentize = componentize;
        self
    }

    /// Set the CSS framework name.
    pub fn with_css_framework(mut self, framework: impl Into<String>) -> Self {
        self.css_framework = Some(framework.into());
        self
    }

    /// Set normalization options.
    pub fn with_preprocess(mut self, options: PreprocessOptions) -> Self {
        self.preprocess = options;
        self
    }

    /// Replace the classification rules.
    pub fn with_rules(mut self, rules: ClassificationRules) -> Self {
        self.rules = rules;
        self
    }
}

/// Keyword tables driving node classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationRules {
    pub boundaries: BoundaryKeywords,
    pub interactions: InteractionKeywords,
}

/// Rules deciding which subtrees become their own component.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryKeywords {
    /// Substrings of a lowercased node name that mark a boundary.
    pub name_keywords: Vec<String>,
    /// Minimum child count for the repeated-structure rule.
    pub min_children: usize,
    /// The repeated-structure rule only applies above this depth.
    pub max_depth: usize,
    /// Allowed difference in child count between the first two children.
    pub child_count_tolerance: usize,
}

impl Default for BoundaryKeywords {
    fn default() -> Self {
        Self {
            name_keywords: to_owned(&[
                "card", "item", "list-item", "row", "cell", "header", "footer", "sidebar", "nav",
                "menu", "button-group", "form-group", "input-group", "modal", "dialog", "popup",
                "accordion", "tab", "tab-item", "panel", "section", "widget", "block", "box",
                "container", "wrapper",
            ]),
            min_children: 3,
            max_depth: 3,
            child_count_tolerance: 1,
        }
    }
}

/// Keyword sets for the four recognized control kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionKeywords {
    pub button: Vec<String>,
    pub input: Vec<String>,
    pub accordion: Vec<String>,
    pub toggle: Vec<String>,
}

impl Default for InteractionKeywords {
    fn default() -> Self {
        Self {
            button: to_owned(&[
                "button", "btn", "click", "submit", "confirm", "cancel", "ok", "apply",
            ]),
            input: to_owned(&["input", "textfield", "text-field", "form", "search", "textarea"]),
            accordion: to_owned(&[
                "accordion",
                "collapse",
                "collapsible",
                "expand",
                "아코디언",
                "접기",
            ]),
            toggle: to_owned(&["toggle", "switch", "토글"]),
        }
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}
