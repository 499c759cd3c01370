//! Style resolution and box layout for Telegraph.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Style rules with selector groups; at-rules are skipped
//!   - Declaration lists for `style` attributes
//! - **CSS Selectors** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal, class, ID and attribute selectors, combinators
//!   - Specificity
//! - **Rule collection** from `<style>` elements, sorted by specificity
//! - **CSS Cascade** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - `!important`, inheritance, `inherit` and `initial`
//!   - `margin` and `padding` shorthands
//! - **Box tree** ([CSS 2.1 § 9.2](https://www.w3.org/TR/CSS2/visuren.html#box-gen))
//!   - Block, inline, anonymous and line boxes in an arena
//! - **Layout** ([CSS 2.1 § 10](https://www.w3.org/TR/CSS2/visudet.html))
//!   - Block width solving, vertical margin collapsing, auto heights
//!   - Inline boxes sized by text measurement, grouped into line boxes
//!
//! # Not Implemented
//!
//! - Line breaking: a line box is one line however wide its content
//! - Floats, positioning, tables, flex and grid
//! - Percentages and relative units in lengths (they lay out as 0)
//! - Pseudo-classes and pseudo-elements

/// Cascade and styled tree per [CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/).
pub mod cascade;
/// Rule collection and specificity ordering.
pub mod collector;
/// Box tree and layout per [CSS 2.1 § 9-10](https://www.w3.org/TR/CSS2/visuren.html).
pub mod layout;
/// CSS parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
pub mod parser;
/// CSS selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
pub mod selector;
/// Property registry, values and resolved property maps.
pub mod style;
/// CSS tokenizer per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
pub mod tokenizer;
/// Base stylesheet applied before the document's own rules.
pub mod ua_stylesheet;

use telegraph_dom::DomTree;

// Re-exports for convenience
pub use cascade::{StyledNode, resolve};
pub use collector::{CollectedRule, RuleSet};
pub use layout::{
    ApproximateFontMetrics, AutoOr, BoxId, BoxKind, BoxSnapshot, Dimensions, EdgeSizes, Font,
    FontMetrics, LayoutBox, LayoutTree, Rect, resolve_length,
};
pub use parser::{CSSParser, ComponentValue, Declaration, StyleRule, Stylesheet};
pub use selector::{ParsedSelector, SelectorError, Specificity, parse_selector};
pub use style::{Display, Priority, Property, PropertyDeclaration, PropertyMap, Value};
pub use tokenizer::{CSSToken, CSSTokenizer};

/// Width of the printable area of the receipt printer, in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 384.0;

/// Options for one styling and layout request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutOptions {
    /// Width of the initial containing block.
    pub viewport_width: f32,
    /// Apply the base stylesheet before the document's rules.
    pub user_agent_styles: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            user_agent_styles: true,
        }
    }
}

/// Collect the document's rules, plus `extra_css` stylesheets in order, and
/// build the styled tree from its document element.
///
/// Returns `None` for a tree with no document element.
#[must_use]
pub fn style_document<'a>(
    tree: &'a DomTree,
    options: &LayoutOptions,
    extra_css: &[&str],
) -> Option<StyledNode<'a>> {
    let mut rules = if options.user_agent_styles {
        RuleSet::collect_with_user_agent(tree)
    } else {
        RuleSet::collect(tree)
    };
    for css in extra_css {
        rules.extend_from_css(css);
    }
    StyledNode::build(tree, tree.root(), &rules)
}

/// Style and lay out a document, returning the laid-out box tree.
///
/// Returns `None` when there is nothing to display: no document element, or
/// a `display: none` root.
#[must_use]
pub fn layout_document(
    tree: &DomTree,
    options: &LayoutOptions,
    extra_css: &[&str],
    metrics: &dyn FontMetrics,
) -> Option<BoxSnapshot> {
    let styled = style_document(tree, options, extra_css)?;
    let mut boxes = LayoutTree::build(&styled)?;
    boxes.layout(options.viewport_width, metrics);
    Some(boxes.snapshot())
}
