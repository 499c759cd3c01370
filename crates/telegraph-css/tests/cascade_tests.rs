//! Rule collection, cascade and styled tree tests.

use telegraph_css::{
    Display, LayoutOptions, Property, PropertyDeclaration, RuleSet, StyledNode, Value, resolve,
    style_document,
};
use telegraph_dom::{DomTree, ElementSpec};

fn document(json: &str) -> DomTree {
    let spec: ElementSpec = serde_json::from_str(json).unwrap();
    DomTree::from_spec(&spec).unwrap()
}

const AUTHOR_ONLY: LayoutOptions = LayoutOptions {
    viewport_width: 384.0,
    user_agent_styles: false,
};

fn styled<'a>(tree: &'a DomTree, css: &str) -> StyledNode<'a> {
    style_document(tree, &AUTHOR_ONLY, &[css]).unwrap()
}

#[test]
fn test_higher_specificity_wins_regardless_of_order() {
    let tree = document(r#"{"tag": "p", "attrs": {"class": "total"}}"#);
    let root = styled(
        &tree,
        "p.total { font-weight: normal } p { font-weight: bold }",
    );
    assert_eq!(root.value(Property::FontWeight), &Value::keyword("normal"));
}

#[test]
fn test_equal_specificity_later_rule_wins() {
    let tree = document(r#"{"tag": "p"}"#);
    let root = styled(&tree, "p { color: red } p { color: blue }");
    assert_eq!(root.value(Property::Color), &Value::keyword("blue"));
}

#[test]
fn test_important_beats_more_specific_normal() {
    let tree = document(r#"{"tag": "p", "attrs": {"class": "total", "id": "t"}}"#);
    let root = styled(
        &tree,
        "p { color: red !important } #t.total { color: blue }",
    );
    assert_eq!(root.value(Property::Color), &Value::keyword("red"));
}

#[test]
fn test_inline_style_outranks_rules() {
    let tree = document(r#"{"tag": "p", "attrs": {"id": "x", "style": "color: green"}}"#);
    let root = styled(&tree, "#x { color: red }");
    assert_eq!(root.value(Property::Color), &Value::keyword("green"));
}

#[test]
fn test_important_rule_outranks_inline_style() {
    let tree = document(r#"{"tag": "p", "attrs": {"style": "color: green"}}"#);
    let root = styled(&tree, "p { color: red !important }");
    assert_eq!(root.value(Property::Color), &Value::keyword("red"));
}

#[test]
fn test_inherited_and_non_inherited_properties() {
    let tree = document(r#"{"tag": "div", "children": [{"tag": "span"}]}"#);
    let root = styled(&tree, "div { color: red; width: 50px }");
    let span = &root.children[0];
    assert_eq!(span.value(Property::Color), &Value::keyword("red"));
    assert_eq!(span.value(Property::Width), &Value::Auto);
}

#[test]
fn test_text_runs_inherit_from_their_element() {
    let tree = document(r#"{"tag": "p", "text": "total"}"#);
    let root = styled(&tree, "p { display: block; font-size: 12px; margin-left: 3px }");
    let text = &root.children[0];
    assert_eq!(text.text(), Some("total"));
    assert_eq!(text.value(Property::FontSize), &Value::Length(12.0));
    assert_eq!(text.value(Property::MarginLeft), &Value::Length(0.0));
    assert_eq!(text.display(), Display::Inline);
}

#[test]
fn test_display_classification() {
    let tree = document(
        r#"{"tag": "div", "children": [
            {"tag": "a", "attrs": {"style": "display: none"}},
            {"tag": "b", "attrs": {"style": "display: block"}},
            {"tag": "i", "attrs": {"style": "display: inline-block"}},
            {"tag": "u", "attrs": {"style": "display: block inline"}}
        ]}"#,
    );
    let root = styled(&tree, "");
    let displays: Vec<Display> = root.children.iter().map(StyledNode::display).collect();
    assert_eq!(
        displays,
        vec![Display::None, Display::Block, Display::Inline, Display::Inline]
    );
}

#[test]
fn test_shorthand_from_stylesheet() {
    let tree = document(r#"{"tag": "p"}"#);
    let root = styled(&tree, "p { margin: 1px 2px 3px 4px; padding: 5px }");
    assert_eq!(root.value(Property::MarginTop), &Value::Length(1.0));
    assert_eq!(root.value(Property::MarginRight), &Value::Length(2.0));
    assert_eq!(root.value(Property::MarginBottom), &Value::Length(3.0));
    assert_eq!(root.value(Property::MarginLeft), &Value::Length(4.0));
    assert_eq!(root.value(Property::PaddingLeft), &Value::Length(5.0));
}

#[test]
fn test_unknown_property_is_dropped() {
    let tree = document(r#"{"tag": "p"}"#);
    let root = styled(&tree, "p { colour: red; color: blue }");
    assert_eq!(root.value(Property::Color), &Value::keyword("blue"));
}

#[test]
fn test_bad_selector_keeps_the_rest_of_its_group() {
    let tree = document(r#"{"tag": "p", "attrs": {"class": "x"}}"#);
    let root = styled(&tree, "p:hover, p.x { color: red }");
    assert_eq!(root.value(Property::Color), &Value::keyword("red"));
}

#[test]
fn test_base_stylesheet_and_style_elements() {
    let tree = document(
        r#"{"tag": "html", "children": [
            {"tag": "head", "children": [
                {"tag": "style", "text": "p { color: red } .due { font-weight: normal }"}
            ]},
            {"tag": "body", "children": [
                {"tag": "p", "children": [{"tag": "b", "text": "total"}]},
                {"tag": "p", "children": [{"tag": "b", "attrs": {"class": "due"}}]}
            ]}
        ]}"#,
    );
    let root = style_document(&tree, &LayoutOptions::default(), &[]).unwrap();
    assert_eq!(root.tag_name(), Some("html"));

    let head = &root.children[0];
    let body = &root.children[1];
    assert_eq!(head.display(), Display::None);
    assert_eq!(body.display(), Display::Block);

    let first = &body.children[0];
    assert_eq!(first.value(Property::Color), &Value::keyword("red"));
    assert_eq!(first.display(), Display::Block);
    let bold = &first.children[0];
    assert_eq!(bold.value(Property::FontWeight), &Value::keyword("bold"));
    assert_eq!(bold.value(Property::Color), &Value::keyword("red"));

    let due = &body.children[1].children[0];
    assert_eq!(due.value(Property::FontWeight), &Value::keyword("normal"));
}

#[test]
fn test_extra_stylesheet_follows_document_rules() {
    let tree = document(
        r#"{"tag": "div", "children": [
            {"tag": "style", "text": "p { color: red }"},
            {"tag": "p"}
        ]}"#,
    );
    let root = style_document(&tree, &AUTHOR_ONLY, &["p { color: blue }"]).unwrap();
    assert_eq!(root.children[1].value(Property::Color), &Value::keyword("blue"));
}

#[test]
fn test_rule_set_collects_every_style_element() {
    let tree = document(
        r#"{"tag": "div", "children": [
            {"tag": "style", "text": "p, span { color: red }"},
            {"tag": "section", "children": [{"tag": "style", "text": "@media print { p {} } b {}"}]}
        ]}"#,
    );
    let rules = RuleSet::collect(&tree);
    assert_eq!(rules.len(), 3);
    assert!(RuleSet::collect_with_user_agent(&tree).len() > rules.len());
}

#[test]
fn test_resolve_with_parent_context() {
    let parent = resolve(
        [PropertyDeclaration::parse_list("color: red; font-size: 20px").as_slice()],
        &[],
        None,
    );
    let child = resolve(
        [PropertyDeclaration::parse_list("font-size: initial; color: inherit").as_slice()],
        &[],
        Some(&parent),
    );
    assert_eq!(child.get(Property::FontSize), &Value::Length(16.0));
    assert_eq!(child.get(Property::Color), &Value::keyword("red"));
}
