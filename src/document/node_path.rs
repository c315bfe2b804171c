use crate::document::dom::{DocumentHandle, NodeId};
use crate::document::tree::{DocumentTree, NodeKind};

/// Structural path of `node`: comma-joined `index,NODENAME` pairs from the
/// document down to the node, e.g. `1,HTML,1,BODY,0,INPUT`.
///
/// `index` counts preceding siblings, ignoring whitespace-only text nodes, so
/// the path is stable across formatting-only differences in the markup.
/// The document node itself has an empty path.
pub fn node_path(tree: &DocumentTree, node: NodeId) -> String {
    let mut segments = Vec::new();
    let mut current = node;

    while let Some(parent) = tree.parent_node(current) {
        segments.push(format!(
            "{},{}",
            sibling_index(tree, parent, current),
            tree.node_name(current)
        ));
        current = parent;
    }

    segments.reverse();
    segments.join(",")
}

fn sibling_index(tree: &DocumentTree, parent: NodeId, node: NodeId) -> usize {
    tree.children(parent)
        .iter()
        .take_while(|&&sibling| sibling != node)
        .filter(|&&sibling| !is_blank_text(tree, sibling))
        .count()
}

fn is_blank_text(tree: &DocumentTree, node: NodeId) -> bool {
    tree.kind(node) == NodeKind::Text && tree.text(node).unwrap_or("").trim().is_empty()
}
