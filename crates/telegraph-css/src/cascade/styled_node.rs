//! The styled tree: document nodes paired with their resolved properties.

use telegraph_dom::{DomTree, Node, NodeId, NodeType};

use crate::collector::RuleSet;
use crate::style::{Display, Property, PropertyDeclaration, PropertyMap, Value};

/// A document node with its fully resolved property map.
///
/// Elements and text runs get styled nodes; comments do not. A text run has
/// no rules of its own, so its map holds only what it inherits.
#[derive(Debug, Clone)]
pub struct StyledNode<'a> {
    /// The node's id in the document tree.
    pub node_id: NodeId,
    /// The document node.
    pub node: &'a Node,
    /// Resolved value of every registry property.
    pub properties: PropertyMap,
    /// Styled children in document order.
    pub children: Vec<StyledNode<'a>>,
}

impl<'a> StyledNode<'a> {
    /// Style the subtree rooted at `root`. A Document root starts from its
    /// document element. Returns `None` if there is nothing to style.
    ///
    /// The root's parent context is the registry defaults.
    #[must_use]
    pub fn build(tree: &'a DomTree, root: NodeId, rules: &RuleSet) -> Option<Self> {
        let root = match tree.get(root)?.node_type {
            NodeType::Document => tree.document_element()?,
            _ => root,
        };
        Self::build_node(tree, root, rules, None)
    }

    fn build_node(
        tree: &'a DomTree,
        id: NodeId,
        rules: &RuleSet,
        parent: Option<&PropertyMap>,
    ) -> Option<Self> {
        let node = tree.get(id)?;
        let properties = match &node.node_type {
            NodeType::Element(element) => {
                let inline = element
                    .inline_style()
                    .map(PropertyDeclaration::parse_list)
                    .unwrap_or_default();
                super::resolve(
                    rules
                        .matching(tree, id)
                        .map(|rule| &*rule.declarations),
                    &inline,
                    parent,
                )
            }
            NodeType::Text(_) => super::resolve(core::iter::empty(), &[], parent),
            NodeType::Document => return None,
        };

        let children = tree
            .children(id)
            .iter()
            .filter_map(|&child| Self::build_node(tree, child, rules, Some(&properties)))
            .collect();

        Some(Self {
            node_id: id,
            node,
            properties,
            children,
        })
    }

    /// [§ 9.2.4 The display property](https://www.w3.org/TR/CSS21/visuren.html#display-prop)
    #[must_use]
    pub fn display(&self) -> Display {
        Display::from_value(self.properties.get(Property::Display))
    }

    /// The resolved value of `property`.
    #[must_use]
    pub fn value(&self, property: Property) -> &Value {
        self.properties.get(property)
    }

    /// The text content if this node is a text run.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        self.node.as_text()
    }

    /// The tag name if this node is an element.
    #[must_use]
    pub fn tag_name(&self) -> Option<&'a str> {
        self.node.as_element().map(|e| e.tag_name.as_str())
    }
}
