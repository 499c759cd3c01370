//! Rule collection
//!
//! [§ 6.1 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
//!
//! Gathers every style rule reachable from a document, splits selector groups
//! into one rule per selector, and keeps the result stably sorted by
//! ascending specificity so the cascade can apply rules in order and let the
//! most specific win.

use std::rc::Rc;

use telegraph_common::warning::warn_once;
use telegraph_dom::{DomTree, NodeId};

use crate::parser::{CSSParser, Stylesheet};
use crate::selector::{ParsedSelector, parse_selector};
use crate::style::PropertyDeclaration;
use crate::ua_stylesheet::ua_stylesheet;

/// One selector paired with the declarations of the rule it came from.
///
/// Members of the same selector group share one declaration list.
#[derive(Debug, Clone)]
pub struct CollectedRule {
    /// The parsed selector.
    pub selector: ParsedSelector,
    /// Declarations, shorthands not yet expanded.
    pub declarations: Rc<[PropertyDeclaration]>,
}

/// Collected rules in ascending specificity order; ties keep discovery order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<CollectedRule>,
}

impl RuleSet {
    /// An empty rule set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the rules of every `<style>` element in document order.
    #[must_use]
    pub fn collect(tree: &DomTree) -> Self {
        let mut set = Self::new();
        set.collect_from(tree, tree.root());
        set.sort();
        set
    }

    /// Like [`RuleSet::collect`], with the base stylesheet discovered first.
    #[must_use]
    pub fn collect_with_user_agent(tree: &DomTree) -> Self {
        let mut set = Self::new();
        set.add_stylesheet(ua_stylesheet());
        set.collect_from(tree, tree.root());
        set.sort();
        set
    }

    /// Append the rules of a stylesheet supplied outside the document.
    pub fn extend_from_css(&mut self, css: &str) {
        self.add_stylesheet(&CSSParser::from_source(css).parse_stylesheet());
        self.sort();
    }

    /// The rules, sorted.
    #[must_use]
    pub fn rules(&self) -> &[CollectedRule] {
        &self.rules
    }

    /// Number of collected (selector, declarations) pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if no rule was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules whose selector matches the element at `node_id`, in cascade order.
    pub fn matching<'s>(
        &'s self,
        tree: &'s DomTree,
        node_id: NodeId,
    ) -> impl Iterator<Item = &'s CollectedRule> {
        self.rules
            .iter()
            .filter(move |rule| rule.selector.matches_in_tree(tree, node_id))
    }

    fn collect_from(&mut self, tree: &DomTree, id: NodeId) {
        if tree.as_element(id).is_some_and(|e| e.tag_name == "style") {
            let css: String = tree
                .children(id)
                .iter()
                .filter_map(|&child| tree.as_text(child))
                .collect();
            self.add_stylesheet(&CSSParser::from_source(&css).parse_stylesheet());
        }

        for &child in tree.children(id) {
            self.collect_from(tree, child);
        }
    }

    /// Expand each rule's selector group; a selector that fails to parse is
    /// reported and dropped without affecting its siblings.
    fn add_stylesheet(&mut self, sheet: &Stylesheet) {
        for rule in &sheet.rules {
            let declarations: Rc<[PropertyDeclaration]> = rule
                .declarations
                .iter()
                .filter_map(PropertyDeclaration::from_parsed)
                .collect();

            for text in &rule.selectors {
                match parse_selector(text) {
                    Ok(selector) => self.rules.push(CollectedRule {
                        selector,
                        declarations: Rc::clone(&declarations),
                    }),
                    Err(err) => {
                        warn_once("CSS", &format!("dropping selector '{text}': {err}"));
                    }
                }
            }
        }
    }

    fn sort(&mut self) {
        // `sort_by_key` is stable.
        self.rules.sort_by_key(|rule| rule.selector.specificity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::Specificity;

    #[test]
    fn test_selector_group_shares_declarations() {
        let mut set = RuleSet::new();
        set.extend_from_css("h1, h2 { color: red; margin: 0 }");
        assert_eq!(set.len(), 2);
        assert!(Rc::ptr_eq(
            &set.rules()[0].declarations,
            &set.rules()[1].declarations
        ));
        assert_eq!(set.rules()[0].declarations.len(), 2);
    }

    #[test]
    fn test_bad_selector_only_drops_itself() {
        let mut set = RuleSet::new();
        set.extend_from_css("p, a::before, div { color: red } span { color: blue }");
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_sort_is_stable_by_specificity() {
        let mut set = RuleSet::new();
        set.extend_from_css("#x { color: red } p { color: blue } b { color: green } .y { color: black }");
        let specs: Vec<Specificity> = set.rules().iter().map(|r| r.selector.specificity).collect();
        assert_eq!(
            specs,
            vec![
                Specificity(0, 0, 1),
                Specificity(0, 0, 1),
                Specificity(0, 1, 0),
                Specificity(1, 0, 0)
            ]
        );
        let first = &set.rules()[0].selector.complex.subject.simple_selectors;
        assert_eq!(first, &vec![crate::selector::SimpleSelector::Type("p".to_string())]);
    }
}
