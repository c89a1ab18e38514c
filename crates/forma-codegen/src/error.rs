//! Error types for code generation.

use forma_core::CoreError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The document normalized to nothing.
    #[error("Document {id} has no visible content to generate")]
    EmptyDocument { id: String },

    /// Malformed input rejected by the core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Unsupported feature for the selected dialect.
    #[error("Feature '{feature}' is not supported for {target}")]
    UnsupportedFeature {
        feature: String,
        target: String,
    },

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
