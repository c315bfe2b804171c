use serde::{Deserialize, Serialize};

/// Control element kinds, in the order the collector enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Input,
    Select,
    Textarea,
    Label,
}

impl ControlKind {
    pub const ALL: [ControlKind; 4] = [
        ControlKind::Input,
        ControlKind::Select,
        ControlKind::Textarea,
        ControlKind::Label,
    ];

    pub fn tag_name(&self) -> &'static str {
        match self {
            ControlKind::Input => "input",
            ControlKind::Select => "select",
            ControlKind::Textarea => "textarea",
            ControlKind::Label => "label",
        }
    }

    /// Kind for a DOM node name such as `INPUT`. Case-insensitive.
    pub fn from_node_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag_name().eq_ignore_ascii_case(name))
    }
}

/// One collected form control.
///
/// Field names on the wire match the artifact consumed by the audit pipeline
/// (`elementType`, `parentForm`, `placeHolder`, ...). Absent attributes are
/// `None` and omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "elementType")]
    pub element_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "parentForm", default, skip_serializing_if = "Option::is_none")]
    pub parent_form: Option<String>,

    #[serde(rename = "parentFormIdentified")]
    pub parent_form_identified: bool,

    #[serde(rename = "placeHolder", default, skip_serializing_if = "Option::is_none")]
    pub place_holder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,

    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_id: Option<String>,
}

impl FormRecord {
    pub fn kind(&self) -> Option<ControlKind> {
        ControlKind::from_node_name(&self.element_type)
    }
}

/// Owning form of a single control.
///
/// `identified` is true only when `label` is the form's `id` or `name`.
/// Otherwise `label` is a structural path (which changes when the document
/// does) or `None` when the walk left the document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OwnerResult {
    pub label: Option<String>,
    pub identified: bool,
}

impl OwnerResult {
    pub fn identified(label: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            identified: true,
        }
    }

    pub fn positional(path: String) -> Self {
        Self {
            label: Some(path),
            identified: false,
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }
}
