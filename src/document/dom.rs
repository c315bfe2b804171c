use thiserror::Error;

/// Index of a node inside a document handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Failure of the tag-enumeration query. Fails the whole collection batch.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Document unavailable: {0}")]
    Unavailable(String),
}

/// Read-only access to one document, threaded explicitly into the collector
/// and owner resolver instead of relying on an ambient global document.
pub trait DocumentHandle {
    /// All elements named `tag` (case-insensitive), in document order.
    fn elements_by_tag(&self, tag: &str) -> Result<Vec<NodeId>, EnumerationError>;

    /// The parent node when it is an element. `None` above the document element.
    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    /// Node name as the DOM reports it (upper case for HTML elements).
    fn node_name(&self, node: NodeId) -> &str;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Deterministic structural path of `node`, e.g. `1,HTML,1,BODY,0,INPUT`.
    fn node_path(&self, node: NodeId) -> String;

    /// The catch-all owner for controls outside any form.
    fn is_root_container(&self, node: NodeId) -> bool {
        self.node_name(node) == "BODY"
    }

    fn is_form(&self, node: NodeId) -> bool {
        self.node_name(node) == "FORM"
    }
}
