mod common;

use common::{el, mixed_page, page};
use form_snapshot::document::dom::DocumentHandle;
use form_snapshot::document::tree::DocumentTree;
use form_snapshot::form::form_model::OwnerResult;
use form_snapshot::form::owner::resolve_owner;

fn owner_of(doc: &DocumentTree, id: &str) -> OwnerResult {
    let node = doc.element_by_id(id).expect("fixture element");
    resolve_owner(doc, node)
}

// =========================================================================
// Identified owners
// =========================================================================

#[test]
fn id_wins_over_name() {
    let doc = mixed_page();
    assert_eq!(owner_of(&doc, "email"), OwnerResult::identified("login"));
}

#[test]
fn name_used_when_id_missing_or_empty() {
    let doc = page(vec![
        el("form", &[("name", "signup")], vec![el("input", &[("id", "a")], vec![])]),
        el("form", &[("id", ""), ("name", "billing")], vec![el("input", &[("id", "b")], vec![])]),
    ]);

    assert_eq!(owner_of(&doc, "a"), OwnerResult::identified("signup"));
    assert_eq!(owner_of(&doc, "b"), OwnerResult::identified("billing"));
}

#[test]
fn nearest_form_ancestor_wins() {
    let doc = page(vec![el(
        "form",
        &[("id", "outer")],
        vec![el(
            "div",
            &[],
            vec![el(
                "form",
                &[("id", "inner")],
                vec![el("fieldset", &[], vec![el("input", &[("id", "deep")], vec![])])],
            )],
        )],
    )]);

    assert_eq!(owner_of(&doc, "deep"), OwnerResult::identified("inner"));
}

// =========================================================================
// Positional fallbacks
// =========================================================================

#[test]
fn unnamed_form_falls_back_to_its_path() {
    let doc = page(vec![el(
        "form",
        &[("id", ""), ("name", "")],
        vec![el("input", &[("id", "x")], vec![])],
    )]);

    let owner = owner_of(&doc, "x");
    assert!(!owner.identified);
    assert_eq!(owner.label.as_deref(), Some("1,HTML,1,BODY,0,FORM"));
}

#[test]
fn no_form_falls_back_to_body_path() {
    let doc = page(vec![el("div", &[], vec![el("input", &[("id", "orphan")], vec![])])]);

    let body = doc.elements_by_tag("body").unwrap()[0];
    let owner = owner_of(&doc, "orphan");
    assert_eq!(owner, OwnerResult::positional(doc.node_path(body)));
    assert_eq!(owner.label.as_deref(), Some("1,HTML,1,BODY"));
}

#[test]
fn unnamed_form_and_no_form_share_a_shape() {
    let doc = mixed_page();
    let search = doc.elements_by_tag("input").unwrap()[2];
    let newsletter = doc.elements_by_tag("input").unwrap()[3];

    let a = resolve_owner(&doc, search);
    let b = resolve_owner(&doc, newsletter);
    assert!(!a.identified && !b.identified);
    assert!(a.label.is_some() && b.label.is_some());
}

#[test]
fn control_outside_body_is_unresolved() {
    let doc = DocumentTree::from_snapshot(&el(
        "html",
        &[],
        vec![el("head", &[], vec![el("input", &[("id", "stray")], vec![])])],
    ));

    assert_eq!(owner_of(&doc, "stray"), OwnerResult::unresolved());
}

#[test]
fn resolution_is_repeatable() {
    let doc = mixed_page();
    for node in doc.elements_by_tag("*").unwrap() {
        assert_eq!(resolve_owner(&doc, node), resolve_owner(&doc, node));
    }
}
