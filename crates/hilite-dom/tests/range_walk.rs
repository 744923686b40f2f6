use hilite_dom::{
    Document, FilterResult, NodeId, Range, Selection, ShadowRootMode, TreeWalker, WhatToShow,
};

/// <body><p id="a">Alpha beta.</p><p id="b">Gamma <em>delta</em>.</p></body>
fn build() -> (Document, NodeId, NodeId) {
    let mut doc = Document::new("test");
    let body = doc.body().unwrap();
    let tree = &mut doc.tree;

    let a = tree.create_element("p");
    tree.set_attribute(a, "id", "a").unwrap();
    let alpha = tree.create_text("Alpha beta.");
    tree.append_child(a, alpha).unwrap();

    let b = tree.create_element("p");
    tree.set_attribute(b, "id", "b").unwrap();
    let gamma = tree.create_text("Gamma ");
    let em = tree.create_element("em");
    let delta = tree.create_text("delta");
    let dot = tree.create_text(".");
    tree.append_child(b, gamma).unwrap();
    tree.append_child(b, em).unwrap();
    tree.append_child(em, delta).unwrap();
    tree.append_child(b, dot).unwrap();

    tree.append_child(body, a).unwrap();
    tree.append_child(body, b).unwrap();
    (doc, alpha, delta)
}

fn texts_in_range(doc: &Document, range: &Range) -> Vec<String> {
    let filter = |tree: &hilite_dom::DomTree, node: NodeId| {
        if range.intersects_node(tree, node) {
            FilterResult::Accept
        } else {
            FilterResult::Reject
        }
    };
    TreeWalker::inclusive(&doc.tree, range.common_ancestor_container(), WhatToShow::TEXT, filter)
        .map(|n| doc.tree.text(n).unwrap_or_default().to_string())
        .collect()
}

#[test]
fn range_across_paragraphs_visits_intersecting_text() {
    let (doc, alpha, delta) = build();
    let range = Range::between(&doc.tree, alpha, 6, delta, 2).unwrap();

    assert_eq!(range.common_ancestor_container(), doc.body().unwrap());
    assert_eq!(texts_in_range(&doc, &range), vec!["Alpha beta.", "Gamma ", "delta"]);
    assert_eq!(range.text(&doc.tree), "beta.Gamma de");
}

#[test]
fn range_inside_one_text_node() {
    let (doc, alpha, _) = build();
    let range = Range::between(&doc.tree, alpha, 0, alpha, 5).unwrap();

    assert_eq!(range.common_ancestor_container(), alpha);
    assert_eq!(texts_in_range(&doc, &range), vec!["Alpha beta."]);
}

#[test]
fn select_node_contents_covers_element() {
    let (doc, _, _) = build();
    let b = doc.get_element_by_id("b").unwrap();
    let range = Range::select_node_contents(&doc.tree, b).unwrap();

    assert_eq!(range.start_offset(), 0);
    assert_eq!(range.end_offset(), 3);
    assert_eq!(range.text(&doc.tree), "Gamma delta.");
}

#[test]
fn shadow_content_never_intersects_light_range() {
    let (mut doc, alpha, delta) = build();
    let host = doc.get_element_by_id("a").unwrap();
    let shadow = doc.tree.attach_shadow(host, ShadowRootMode::Closed).unwrap();
    let inner = doc.tree.create_text("Hidden text.");
    doc.tree.append_child(shadow, inner).unwrap();

    let range = Range::between(&doc.tree, alpha, 0, delta, 5).unwrap();
    assert!(!range.intersects_node(&doc.tree, inner));
    assert!(!range.intersects_node(&doc.tree, shadow));

    let inside = Range::select_node_contents(&doc.tree, shadow).unwrap();
    assert!(inside.intersects_node(&doc.tree, inner));
    assert_eq!(inside.root(), shadow);
}

#[test]
fn ranges_across_roots_are_rejected() {
    let (mut doc, alpha, _) = build();
    let host = doc.get_element_by_id("b").unwrap();
    let shadow = doc.tree.attach_shadow(host, ShadowRootMode::Open).unwrap();
    let inner = doc.tree.create_text("x");
    doc.tree.append_child(shadow, inner).unwrap();

    assert!(Range::between(&doc.tree, alpha, 0, inner, 1).is_err());
}

#[test]
fn selection_tracks_collapse() {
    let (doc, alpha, _) = build();
    let mut selection = Selection::from_range(Range::collapsed_at(&doc.tree, alpha, 3).unwrap());
    assert!(selection.is_collapsed());

    selection.remove_all_ranges();
    selection.add_range(Range::between(&doc.tree, alpha, 0, alpha, 11).unwrap());
    assert!(!selection.is_collapsed());
    assert_eq!(selection.get_range_at(0).unwrap().text(&doc.tree), "Alpha beta.");
}
