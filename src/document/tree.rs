use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::dom::{DocumentHandle, EnumerationError, NodeId};
use crate::document::node_path::node_path;

// ============================================================================
// Serializable DOM snapshot (offline input)
// ============================================================================

/// A nested, serializable DOM node.
///
/// Special node names: `#document`, `#doctype`, `#text`, `#comment`.
/// Anything else is an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomSnapshot {
    pub node_name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DomSnapshot>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl DomSnapshot {
    pub fn document(children: Vec<DomSnapshot>) -> Self {
        Self {
            node_name: "#document".into(),
            attributes: BTreeMap::new(),
            children,
            text: None,
        }
    }

    pub fn doctype() -> Self {
        Self {
            node_name: "#doctype".into(),
            attributes: BTreeMap::new(),
            children: vec![],
            text: None,
        }
    }

    pub fn element(name: &str, attributes: &[(&str, &str)], children: Vec<DomSnapshot>) -> Self {
        Self {
            node_name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            children,
            text: None,
        }
    }

    pub fn text(content: &str) -> Self {
        Self {
            node_name: "#text".into(),
            attributes: BTreeMap::new(),
            children: vec![],
            text: Some(content.to_string()),
        }
    }
}

// ============================================================================
// Arena-backed document tree
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Doctype,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    name: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Immutable document built from a [`DomSnapshot`].
///
/// Node ids are assigned in pre-order, so ascending id order is document order.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<NodeData>,
}

impl DocumentTree {
    /// Build a tree. A snapshot whose root is not `#document` is wrapped in one.
    pub fn from_snapshot(snapshot: &DomSnapshot) -> Self {
        let wrapped;
        let root = if snapshot.node_name == "#document" {
            snapshot
        } else {
            wrapped = DomSnapshot::document(vec![snapshot.clone()]);
            &wrapped
        };

        let mut nodes: Vec<NodeData> = Vec::new();
        let mut stack: Vec<(&DomSnapshot, Option<NodeId>)> = vec![(root, None)];

        while let Some((snap, parent)) = stack.pop() {
            let id = NodeId(nodes.len());
            let kind = kind_of(&snap.node_name);
            let name = match kind {
                NodeKind::Element => snap.node_name.to_ascii_uppercase(),
                _ => snap.node_name.clone(),
            };
            let attributes = match kind {
                NodeKind::Element => snap
                    .attributes
                    .iter()
                    .map(|(k, v)| (k.to_ascii_lowercase(), v.clone()))
                    .collect(),
                _ => BTreeMap::new(),
            };

            nodes.push(NodeData {
                kind,
                name,
                attributes,
                text: snap.text.clone(),
                parent,
                children: Vec::new(),
            });
            if let Some(p) = parent {
                nodes[p.0].children.push(id);
            }

            for child in snap.children.iter().rev() {
                stack.push((child, Some(id)));
            }
        }

        Self { nodes }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let snapshot: DomSnapshot = serde_json::from_str(json)?;
        Ok(Self::from_snapshot(&snapshot))
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.0].kind
    }

    pub fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].text.as_deref()
    }

    /// First element with the given `id` attribute.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .find(|&n| self.attribute(n, "id") == Some(id))
    }
}

impl DocumentHandle for DocumentTree {
    fn elements_by_tag(&self, tag: &str) -> Result<Vec<NodeId>, EnumerationError> {
        let valid = tag == "*"
            || (!tag.is_empty() && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
        if !valid {
            return Err(EnumerationError::InvalidTag(tag.to_string()));
        }

        Ok(self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.kind == NodeKind::Element)
            .filter(|(_, n)| tag == "*" || n.name.eq_ignore_ascii_case(tag))
            .map(|(i, _)| NodeId(i))
            .collect())
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0]
            .parent
            .filter(|p| self.nodes[p.0].kind == NodeKind::Element)
    }

    fn node_name(&self, node: NodeId) -> &str {
        &self.nodes[node.0].name
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes[node.0]
            .attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    fn node_path(&self, node: NodeId) -> String {
        node_path(self, node)
    }
}

fn kind_of(node_name: &str) -> NodeKind {
    match node_name {
        "#document" => NodeKind::Document,
        "#doctype" => NodeKind::Doctype,
        "#text" => NodeKind::Text,
        "#comment" => NodeKind::Comment,
        _ => NodeKind::Element,
    }
}
