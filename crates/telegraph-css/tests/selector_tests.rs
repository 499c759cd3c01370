//! Selector parsing, specificity and matching tests.

use telegraph_css::{SelectorError, Specificity, parse_selector};
use telegraph_dom::{DomTree, NodeId};

/// `<div id="receipt" class="paper"><h1>..</h1>text<p class="line total" data-kind="sum-due">..</p><p>..</p></div>`
fn receipt() -> (DomTree, [NodeId; 4]) {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, "div", &[("id", "receipt"), ("class", "paper")]);
    let h1 = tree.append_element(div, "h1", &[]);
    let _ = tree.append_text(div, "between");
    let total = tree.append_element(
        div,
        "p",
        &[("class", "line total"), ("data-kind", "sum-due")],
    );
    let last = tree.append_element(div, "p", &[]);
    (tree, [div, h1, total, last])
}

fn matches(selector: &str, tree: &DomTree, id: NodeId) -> bool {
    parse_selector(selector).unwrap().matches_in_tree(tree, id)
}

#[test]
fn test_specificity_counts() {
    let cases = [
        ("*", Specificity(0, 0, 0)),
        ("p", Specificity(0, 0, 1)),
        ("p.total", Specificity(0, 1, 1)),
        ("#receipt p", Specificity(1, 0, 1)),
        ("div > p[data-kind]", Specificity(0, 1, 2)),
        ("#a#b .c", Specificity(2, 1, 0)),
    ];
    for (selector, expected) in cases {
        assert_eq!(parse_selector(selector).unwrap().specificity, expected, "{selector}");
    }
}

#[test]
fn test_specificity_orders_lexicographically() {
    assert!(Specificity(1, 0, 0) > Specificity(0, 9, 9));
    assert!(Specificity(0, 1, 0) > Specificity(0, 0, 9));
    assert!(Specificity(0, 0, 2) > Specificity(0, 0, 1));
}

#[test]
fn test_simple_selectors_match() {
    let (tree, [div, h1, total, _]) = receipt();
    assert!(matches("div", &tree, div));
    assert!(matches("DIV", &tree, div));
    assert!(matches("#receipt.paper", &tree, div));
    assert!(matches(".total", &tree, total));
    assert!(matches("p.line.total", &tree, total));
    assert!(!matches("p.missing", &tree, total));
    assert!(matches("*", &tree, h1));
}

#[test]
fn test_attribute_selectors_match() {
    let (tree, [_, _, total, last]) = receipt();
    assert!(matches("[data-kind]", &tree, total));
    assert!(!matches("[data-kind]", &tree, last));
    assert!(matches("[data-kind=sum-due]", &tree, total));
    assert!(matches("[class~=total]", &tree, total));
    assert!(!matches("[class~=tot]", &tree, total));
    assert!(matches("[data-kind|=sum]", &tree, total));
}

#[test]
fn test_combinators_match() {
    let (tree, [_, h1, total, last]) = receipt();
    assert!(matches("#receipt p", &tree, total));
    assert!(matches("div > p", &tree, last));
    assert!(!matches("h1 > p", &tree, total));
    // The text run between them does not break adjacency.
    assert!(matches("h1 + p", &tree, total));
    assert!(!matches("h1 + p", &tree, last));
    assert!(matches("h1 ~ p", &tree, last));
    assert!(!matches("p ~ h1", &tree, h1));
}

#[test]
fn test_text_nodes_never_match() {
    let (tree, [div, ..]) = receipt();
    let text = tree.children(div)[1];
    assert!(tree.as_text(text).is_some());
    assert!(!matches("*", &tree, text));
}

#[test]
fn test_invalid_selectors() {
    assert_eq!(parse_selector(""), Err(SelectorError::Empty));
    assert_eq!(parse_selector("p >> a"), Err(SelectorError::DanglingCombinator));
    assert_eq!(parse_selector("[data-kind"), Err(SelectorError::MalformedAttribute));
    assert!(matches!(
        parse_selector("a:hover"),
        Err(SelectorError::UnsupportedPseudo(_))
    ));
    assert!(matches!(
        parse_selector("p::before"),
        Err(SelectorError::UnsupportedPseudo(_))
    ));
    assert!(matches!(
        parse_selector("p."),
        Err(SelectorError::UnexpectedToken(_))
    ));
}
