//! JavaScript functions shipped into the page.
//!
//! Each function is a standalone declaration with no free variables other than
//! browser built-ins and the page functions it lists as dependencies. The
//! sources are embedded at compile time and stitched together by
//! [`PageScript`](crate::page::expression::PageScript).

/// A named JavaScript function declaration with its in-page dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFunction {
    pub name: &'static str,
    pub source: &'static str,
    pub dependencies: &'static [&'static str],
}

pub const GET_ELEMENTS_IN_DOCUMENT: PageFunction = PageFunction {
    name: "getElementsInDocument",
    source: include_str!("js/get_elements_in_document.js"),
    dependencies: &[],
};

pub const GET_NODE_PATH: PageFunction = PageFunction {
    name: "getNodePath",
    source: include_str!("js/get_node_path.js"),
    dependencies: &[],
};

pub const GET_OUTER_HTML_SNIPPET: PageFunction = PageFunction {
    name: "getOuterHTMLSnippet",
    source: include_str!("js/get_outer_html_snippet.js"),
    dependencies: &[],
};

pub const IS_POSITION_FIXED: PageFunction = PageFunction {
    name: "isPositionFixed",
    source: include_str!("js/is_position_fixed.js"),
    dependencies: &[],
};

pub const GET_PARENT_FORM: PageFunction = PageFunction {
    name: "getParentForm",
    source: include_str!("js/get_parent_form.js"),
    dependencies: &["getNodePath"],
};

pub const COLLECT_FORM_ELEMENTS: PageFunction = PageFunction {
    name: "collectFormElements",
    source: include_str!("js/collect_form_elements.js"),
    dependencies: &["getElementsInDocument", "getParentForm"],
};

/// Helpers bundled with [`COLLECT_FORM_ELEMENTS`]. `getOuterHTMLSnippet` and
/// `isPositionFixed` are unused by the collector but belong to the declared
/// helper set every gatherer unit carries.
pub const FORM_ELEMENTS_HELPERS: [PageFunction; 5] = [
    GET_PARENT_FORM,
    GET_OUTER_HTML_SNIPPET,
    GET_ELEMENTS_IN_DOCUMENT,
    IS_POSITION_FIXED,
    GET_NODE_PATH,
];

pub fn lookup(name: &str) -> Option<PageFunction> {
    [
        GET_ELEMENTS_IN_DOCUMENT,
        GET_NODE_PATH,
        GET_OUTER_HTML_SNIPPET,
        IS_POSITION_FIXED,
        GET_PARENT_FORM,
        COLLECT_FORM_ELEMENTS,
    ]
    .into_iter()
    .find(|f| f.name == name)
}
