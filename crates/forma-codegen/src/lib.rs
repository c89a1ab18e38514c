//! Component source generation from Forma design documents.
//!
//! This crate turns a design document tree into UI component sources:
//! markup, a deduplicated stylesheet and type declarations, one unit per
//! detected component boundary.
//!
//! # Features
//!
//! - `react` - React function components (TypeScript or JavaScript)
//! - `html` - Static HTML pages
//! - `vue` - Vue single-file components
//!
//! # Example
//!
//! ```ignore
//! use forma_codegen::{generate, GeneratorConfig};
//!
//! let files = generate(&document, &GeneratorConfig::new())?;
//! for (path, content) in &files {
//!     println!("{}:\n{}", path, content);
//! }
//! ```

pub mod analyzer;
pub mod assembler;
pub mod config;
pub mod context;
pub mod controller;
pub mod dialects;
pub mod error;
pub mod markup;
pub mod styles;
pub mod templates;

pub use analyzer::{ComponentAnalyzer, InteractiveElementAnalyzer};
pub use assembler::{AssembledUnit, TemplateAssembler};
pub use config::{
    BoundaryKeywords, ClassificationRules, GeneratorConfig, InteractionKeywords,
    OutputDialectKind,
};
pub use context::{
    ComponentInfo, EventHandler, GenerationContext, HandlerKind, InteractiveElement,
    InteractiveKind, IsolationScope, StateType, StateVariable,
};
pub use controller::{generate, GeneratedFiles, GenerationController};
pub use dialects::{GeneratedFile, OutputDialect, RenderedMarkup, UnitSources};
pub use error::{CodegenError, Result};
pub use markup::{MarkupSyntax, MarkupTransformer};
pub use styles::{StyleKey, StyleTransformer};
pub use templates::TemplateEngine;

#[cfg(feature = "html")]
pub use dialects::HtmlDialect;
#[cfg(feature = "react")]
pub use dialects::ReactDialect;
#[cfg(feature = "vue")]
pub use dialects::VueDialect;
