//! Error types for the Forma core.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Top-level error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two nodes in one document share an identifier.
    #[error("Duplicate node identifier: {id}")]
    DuplicateNodeId { id: String },

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Errors raised by a design source while fetching a document.
///
/// These are collaborator failures. The pipeline never retries them.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Document not found: {document_id}")]
    NotFound { document_id: String },

    #[error("Node {node_id} not found in document {document_id}")]
    NodeNotFound {
        document_id: String,
        node_id: String,
    },

    #[error("Not authorized to read document {document_id}")]
    Unauthorized { document_id: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed document payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
