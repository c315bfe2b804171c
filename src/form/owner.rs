use crate::document::dom::{DocumentHandle, NodeId};
use crate::form::form_model::OwnerResult;

/// Upper bound on ancestor steps. Real documents nest far shallower; the
/// bound only stops a malformed handle whose parent chain loops.
pub const MAX_ANCESTOR_STEPS: usize = 4096;

/// Resolve the form that owns `node` by walking up its ancestor chain.
///
/// - `BODY` reached: its structural path, not identified.
/// - `FORM` reached: its `id`, else its `name`, else its structural path.
/// - Walk left the document: no label, not identified.
///
/// An unnamed form and no form at all produce the same shape; callers cannot
/// tell them apart from the result alone.
pub fn resolve_owner<D: DocumentHandle + ?Sized>(doc: &D, node: NodeId) -> OwnerResult {
    let mut current = Some(node);

    for _ in 0..MAX_ANCESTOR_STEPS {
        let Some(n) = current else {
            return OwnerResult::unresolved();
        };

        if doc.is_root_container(n) {
            return OwnerResult::positional(doc.node_path(n));
        }

        if doc.is_form(n) {
            if let Some(id) = non_empty(doc.attribute(n, "id")) {
                return OwnerResult::identified(id);
            }
            if let Some(name) = non_empty(doc.attribute(n, "name")) {
                return OwnerResult::identified(name);
            }
            return OwnerResult::positional(doc.node_path(n));
        }

        current = doc.parent_element(n);
    }

    OwnerResult::unresolved()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::dom::EnumerationError;

    /// A handle whose only node is its own parent.
    struct LoopingDocument;

    impl DocumentHandle for LoopingDocument {
        fn elements_by_tag(&self, _tag: &str) -> Result<Vec<NodeId>, EnumerationError> {
            Ok(vec![NodeId(0)])
        }
        fn parent_element(&self, node: NodeId) -> Option<NodeId> {
            Some(node)
        }
        fn node_name(&self, _node: NodeId) -> &str {
            "DIV"
        }
        fn attribute(&self, _node: NodeId, _name: &str) -> Option<&str> {
            None
        }
        fn node_path(&self, _node: NodeId) -> String {
            "0,DIV".into()
        }
    }

    #[test]
    fn cyclic_parent_chain_terminates_unresolved() {
        assert_eq!(resolve_owner(&LoopingDocument, NodeId(0)), OwnerResult::unresolved());
    }
}
