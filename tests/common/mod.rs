#![allow(dead_code)]

use form_snapshot::document::tree::{DocumentTree, DomSnapshot};

pub fn el(name: &str, attributes: &[(&str, &str)], children: Vec<DomSnapshot>) -> DomSnapshot {
    DomSnapshot::element(name, attributes, children)
}

pub fn text(content: &str) -> DomSnapshot {
    DomSnapshot::text(content)
}

/// `<!DOCTYPE html><html><head></head><body>...</body></html>`
pub fn page(body_children: Vec<DomSnapshot>) -> DocumentTree {
    DocumentTree::from_snapshot(&page_snapshot(body_children))
}

pub fn page_snapshot(body_children: Vec<DomSnapshot>) -> DomSnapshot {
    DomSnapshot::document(vec![
        DomSnapshot::doctype(),
        el(
            "html",
            &[],
            vec![el("head", &[], vec![el("title", &[], vec![text("Fixture")])]), el("body", &[], body_children)],
        ),
    ])
}

/// A login form, a search box outside any form, an unnamed newsletter form
/// and a select/textarea pair inside a form known only by name.
pub fn mixed_page() -> DocumentTree {
    DocumentTree::from_snapshot(&mixed_page_snapshot())
}

pub fn mixed_page_snapshot() -> DomSnapshot {
    page_snapshot(vec![
        el(
            "form",
            &[("id", "login"), ("name", "login-form")],
            vec![
                el("label", &[("for", "email")], vec![text("Email")]),
                el(
                    "input",
                    &[("id", "email"), ("name", "email"), ("autocomplete", "username")],
                    vec![],
                ),
                el("div", &[], vec![el("input", &[("id", "pw"), ("type", "password")], vec![])]),
            ],
        ),
        el("input", &[("name", "q"), ("placeholder", "Search")], vec![]),
        el(
            "section",
            &[],
            vec![el(
                "form",
                &[],
                vec![el("input", &[("name", "newsletter"), ("type", "email")], vec![])],
            )],
        ),
        el(
            "form",
            &[("name", "feedback")],
            vec![
                el("select", &[("name", "topic")], vec![el("option", &[], vec![text("Bug")])]),
                el("textarea", &[("name", "body"), ("placeholder", "Tell us more")], vec![]),
                el("label", &[], vec![text("Topic")]),
            ],
        ),
    ])
}
