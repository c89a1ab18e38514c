//! Design source boundary.
//!
//! A [`DesignSource`] hands the pipeline a document tree. Network clients
//! live outside this crate; [`JsonFileSource`] reads documents previously
//! exported to disk.

use crate::errors::SourceError;
use crate::node::DesignNode;
use indexmap::IndexMap;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Something that can produce design documents.
pub trait DesignSource {
    /// Fetch a document, or only the subtree rooted at `node_id`.
    ///
    /// Failures are returned as-is and never retried by the pipeline.
    fn fetch_document(
        &self,
        document_id: &str,
        node_id: Option<&str>,
    ) -> Result<DesignNode, SourceError>;
}

/// Exported payload shapes accepted by [`JsonFileSource`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    /// Full file export: `{ "document": { ... } }`.
    File { document: DesignNode },
    /// Node subset export: `{ "nodes": { "<id>": { "document": { ... } } } }`.
    Nodes { nodes: IndexMap<String, NodeEntry> },
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    document: DesignNode,
}

/// Reads `<root>/<document_id>.json` exports from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading from `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, document_id: &str) -> Result<String, SourceError> {
        let path = self.root.join(format!("{}.json", document_id));
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => SourceError::NotFound {
                document_id: document_id.to_string(),
            },
            ErrorKind::PermissionDenied => SourceError::Unauthorized {
                document_id: document_id.to_string(),
            },
            _ => SourceError::Io(err),
        })
    }
}

impl DesignSource for JsonFileSource {
    fn fetch_document(
        &self,
        document_id: &str,
        node_id: Option<&str>,
    ) -> Result<DesignNode, SourceError> {
        let raw = self.read(document_id)?;
        let payload: Payload = serde_json::from_str(&raw)?;
        tracing::debug!(document_id, ?node_id, "loaded design document");

        let not_found = |node_id: &str| SourceError::NodeNotFound {
            document_id: document_id.to_string(),
            node_id: node_id.to_string(),
        };

        match (payload, node_id) {
            (Payload::File { document }, None) => Ok(document),
            (Payload::File { document }, Some(id)) => {
                document.find(id).cloned().ok_or_else(|| not_found(id))
            }
            (Payload::Nodes { mut nodes }, Some(id)) => match nodes.shift_remove(id) {
                Some(entry) => Ok(entry.document),
                None => nodes
                    .values()
                    .find_map(|entry| entry.document.find(id))
                    .cloned()
                    .ok_or_else(|| not_found(id)),
            },
            (Payload::Nodes { nodes }, None) => nodes
                .into_iter()
                .next()
                .map(|(_, entry)| entry.document)
                .ok_or_else(|| SourceError::NotFound {
                    document_id: document_id.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_reads_full_file_export() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "abc.json",
            r#"{ "document": { "id": "0:0", "type": "DOCUMENT", "children": [
                { "id": "1:1", "name": "Login", "type": "FRAME" }
            ] } }"#,
        );

        let source = JsonFileSource::new(dir.path());
        let doc = source.fetch_document("abc", None).unwrap();
        assert_eq!(doc.node_type, NodeType::Document);

        let frame = source.fetch_document("abc", Some("1:1")).unwrap();
        assert_eq!(frame.label(), Some("Login"));
    }

    #[test]
    fn test_reads_node_subset_export() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "abc.json",
            r#"{ "nodes": { "1:1": { "document": { "id": "1:1", "name": "Card", "type": "FRAME" } } } }"#,
        );

        let source = JsonFileSource::new(dir.path());
        let node = source.fetch_document("abc", Some("1:1")).unwrap();
        assert_eq!(node.label(), Some("Card"));
    }

    #[test]
    fn test_missing_document_and_node() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "abc.json", r#"{ "document": { "id": "0:0", "type": "DOCUMENT" } }"#);

        let source = JsonFileSource::new(dir.path());
        assert!(matches!(
            source.fetch_document("missing", None),
            Err(SourceError::NotFound { .. })
        ));
        assert!(matches!(
            source.fetch_document("abc", Some("9:9")),
            Err(SourceError::NodeNotFound { .. })
        ));
    }

    #[test]
    fn test_malformed_payload() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.json", "[1, 2, 3]");

        let source = JsonFileSource::new(dir.path());
        assert!(matches!(
            source.fetch_document("bad", None),
            Err(SourceError::Malformed(_))
        ));
    }
}
