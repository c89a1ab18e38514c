//! Tree analysis for code generation.
//!
//! Two independent passes populate a [`GenerationContext`](crate::context::GenerationContext):
//! boundary detection decides which subtrees become their own units, and
//! interaction classification derives state and handlers for controls.

mod components;
mod interactive;

pub use components::ComponentAnalyzer;
pub use interactive::InteractiveElementAnalyzer;

/// Case-insensitive keyword match against a node name.
pub(crate) fn name_matches(name: Option<&str>, keywords: &[String]) -> bool {
    let Some(name) = name else {
        return false;
    };
    let lower = name.to_lowercase();
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && lower.contains(&keyword.to_lowercase()))
}
