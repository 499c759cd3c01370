//! Tests for building document trees from nested descriptions.

use telegraph_dom::{DomError, DomTree, ElementSpec, NodeId};

#[test]
fn test_from_spec_text_and_tail_become_text_nodes() {
    let json = r#"{
        "tag": "P",
        "attrs": {"Class": "note"},
        "text": "Time: ",
        "children": [
            {"tag": "b", "text": "noon", "tail": " sharp"}
        ]
    }"#;
    let spec: ElementSpec = serde_json::from_str(json).unwrap();
    let tree = DomTree::from_spec(&spec).unwrap();

    let p = tree.document_element().unwrap();
    let p_data = tree.as_element(p).unwrap();
    assert_eq!(p_data.tag_name, "p");
    assert_eq!(p_data.attrs.get("class").map(String::as_str), Some("note"));

    let children = tree.children(p);
    assert_eq!(children.len(), 3);
    assert_eq!(tree.as_text(children[0]), Some("Time: "));
    assert_eq!(tree.as_element(children[1]).unwrap().tag_name, "b");
    assert_eq!(tree.as_text(children[2]), Some(" sharp"));

    let b_children = tree.children(children[1]);
    assert_eq!(b_children.len(), 1);
    assert_eq!(tree.as_text(b_children[0]), Some("noon"));
}

#[test]
fn test_from_spec_skips_empty_runs() {
    let mut root = ElementSpec::new("div");
    root.text = Some(String::new());
    let mut child = ElementSpec::new("span");
    child.tail = Some(String::new());
    root.children.push(child);

    let tree = DomTree::from_spec(&root).unwrap();
    let div = tree.document_element().unwrap();
    assert_eq!(tree.children(div).len(), 1);
}

#[test]
fn test_from_spec_rejects_blank_tag() {
    let mut root = ElementSpec::new("div");
    root.children.push(ElementSpec::new("p"));
    root.children.push(ElementSpec::new("  "));

    let err = DomTree::from_spec(&root).unwrap_err();
    assert_eq!(
        err,
        DomError::EmptyTagName {
            path: "/1".to_string()
        }
    );
}

#[test]
fn test_from_spec_root_is_child_of_document() {
    let tree = DomTree::from_spec(&ElementSpec::new("html")).unwrap();
    let html = tree.document_element().unwrap();
    assert_eq!(tree.parent(html), Some(NodeId::ROOT));
    assert_eq!(tree.len(), 2);
}

#[test]
fn test_unknown_fields_are_rejected() {
    let result: Result<ElementSpec, _> = serde_json::from_str(r#"{"tag": "p", "colour": "red"}"#);
    assert!(result.is_err());
}
