//! Core types and utilities for the Forma design-to-code pipeline.
//!
//! This crate provides the foundational pieces shared by the generators:
//! - The design document model ([`DesignNode`] and its attribute types)
//! - Normalization of raw documents before analysis
//! - Identifier and class-name utilities
//! - The design source boundary used to obtain documents
//! - Error types

pub mod errors;
pub mod naming;
pub mod node;
pub mod preprocess;
pub mod source;

pub use errors::*;
pub use node::*;
pub use preprocess::{normalize, PreprocessOptions};
pub use source::{DesignSource, JsonFileSource};
