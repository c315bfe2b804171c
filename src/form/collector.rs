use tracing::debug;

use crate::document::dom::{DocumentHandle, EnumerationError, NodeId};
use crate::form::form_model::{ControlKind, FormRecord};
use crate::form::owner::resolve_owner;

/// Snapshot every form control in `doc`.
///
/// Records come grouped as inputs, selects, textareas, labels, each group in
/// document order. Every node gets its own ancestor walk. An enumeration
/// failure fails the whole batch.
pub fn collect<D: DocumentHandle + ?Sized>(doc: &D) -> Result<Vec<FormRecord>, EnumerationError> {
    let mut controls: Vec<NodeId> = Vec::new();
    for kind in ControlKind::ALL {
        controls.extend(doc.elements_by_tag(kind.tag_name())?);
    }

    debug!(controls = controls.len(), "collecting form controls");

    Ok(controls
        .into_iter()
        .map(|node| to_record(doc, node))
        .collect())
}

fn to_record<D: DocumentHandle + ?Sized>(doc: &D, node: NodeId) -> FormRecord {
    let owner = resolve_owner(doc, node);
    let attr = |name: &str| doc.attribute(node, name).map(str::to_string);

    FormRecord {
        id: attr("id"),
        element_type: doc.node_name(node).to_string(),
        name: attr("name"),
        parent_form: owner.label,
        parent_form_identified: owner.identified,
        place_holder: attr("placeholder"),
        autocomplete: attr("autocomplete"),
        for_id: attr("for"),
    }
}
