//! Comprehensive tests for formbind-dom
//!
//! Tree building, attribute access and scoped queries working together.

use formbind_dom::{Document, ElementQuery, NodeData, NodeId};

fn form_document() -> (Document, NodeId, Vec<NodeId>) {
    let mut doc = Document::new();
    let body = doc.body();
    let tree = doc.tree_mut();

    let mut controls = Vec::new();
    for (tag, name) in [("input", "title"), ("textarea", "body"), ("select", "color"), ("input", "")] {
        let id = tree.create_element(tag);
        if !name.is_empty() {
            tree.set_attr(id, "name", name);
        }
        tree.append_child(body, id);
        controls.push(id);
    }
    (doc, body, controls)
}

#[test]
fn test_named_controls_in_document_order() {
    let (doc, _, controls) = form_document();
    let mut query = ElementQuery::new();

    let found = query
        .select_all(doc.tree(), doc.tree().root(), "input[name], textarea[name], select[name]")
        .unwrap();
    assert_eq!(found, controls[..3].to_vec());
}

#[test]
fn test_nested_option_lookup() {
    let (mut doc, _, controls) = form_document();
    let select = controls[2];
    let tree = doc.tree_mut();
    let group = tree.create_element("optgroup");
    let red = tree.create_element("option");
    let green = tree.create_element("option");
    tree.append_child(select, red);
    tree.append_child(select, group);
    tree.append_child(group, green);

    let mut query = ElementQuery::new();
    let options = query.select_all(doc.tree(), select, "option").unwrap();
    assert_eq!(options, vec![red, green]);
}

#[test]
fn test_text_content_spans_descendants() {
    let (mut doc, body, _) = form_document();
    let tree = doc.tree_mut();
    let p = tree.create_element("p");
    let b = tree.create_element("b");
    let hello = tree.create_text("Hello, ");
    let world = tree.create_text("world");
    tree.append_child(body, p);
    tree.append_child(p, hello);
    tree.append_child(p, b);
    tree.append_child(b, world);

    assert_eq!(doc.tree().text_content(p), "Hello, world");
}

#[test]
fn test_detached_nodes_keep_their_ids() {
    let (mut doc, body, controls) = form_document();
    let before = doc.tree().len();
    doc.tree_mut().remove_children(body);

    assert_eq!(doc.tree().len(), before);
    assert_eq!(doc.tree().children(body).count(), 0);
    assert!(matches!(doc.tree().get(controls[0]).map(|n| &n.data), Some(NodeData::Element(_))));
}
