//! Document tree for the Telegraph layout core.
//!
//! Markup parsing happens upstream; this crate only holds its result, a
//! read-only tree of elements and text runs. Nodes live in one arena and
//! refer to each other by [`NodeId`], so the styled tree can borrow nodes
//! for as long as the tree lives.
//!
//! Documents usually arrive as nested [`ElementSpec`] values (element,
//! leading text, trailing text) and are converted with
//! [`DomTree::from_spec`].

use std::collections::HashMap;

mod spec;

pub use spec::{DomError, ElementSpec};

/// Attribute names (lower-cased) to values.
pub type AttributesMap = HashMap<String, String>;

/// Index of a node in its [`DomTree`].
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The Document node, parent of the document element.
    pub const ROOT: Self = Self(0);
}

/// One arena slot: what the node is, and where it hangs.
#[derive(Debug, Clone)]
pub struct Node {
    /// Document, element or text.
    pub node_type: NodeType,
    /// `None` only for the Document node and nodes not yet appended.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

impl Node {
    /// Element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&ElementData> {
        match &self.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Contents of a text run.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.node_type {
            NodeType::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Node kinds a receipt document is made of.
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
}

/// Tag name and attributes of an element.
#[derive(Debug, Clone, Default)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Attributes keyed by lower-cased name.
    pub attrs: AttributesMap,
}

impl ElementData {
    /// An element with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: AttributesMap::new(),
        }
    }

    /// Value of the attribute `name`, which must be lower-case.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whether `class` lists `name` among its whitespace-separated tokens.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == name))
    }

    /// The `style` attribute, a declaration list.
    ///
    /// [CSS Style Attributes](https://www.w3.org/TR/css-style-attr/)
    #[must_use]
    pub fn inline_style(&self) -> Option<&str> {
        self.attribute("style")
    }
}

/// Arena holding every node of one document.
///
/// Slot 0 is always the Document node. Nodes are only ever appended, so an
/// id stays valid for the life of the tree.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// A tree holding only the Document node.
    #[must_use]
    pub fn new() -> Self {
        let mut tree = Self { nodes: Vec::new() };
        let _ = tree.alloc(NodeType::Document);
        tree
    }

    /// The Document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The node at `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, the Document node included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true for a tree made by [`DomTree::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a node without attaching it anywhere.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// Attach `child` after the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0].parent.is_none(), "node appended twice");
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Append a new element to `parent`. Names are lower-cased.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let data = ElementData {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|&(name, value)| (name.to_ascii_lowercase(), value.to_string()))
                .collect(),
        };
        let id = self.alloc(NodeType::Element(data));
        self.append_child(parent, id);
        id
    }

    /// Append a new text run to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
        id
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id` in document order; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Siblings of `id` before it, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let siblings = self.parent(id).map_or(&[][..], |parent| self.children(parent));
        let position = siblings.iter().position(|&sibling| sibling == id).unwrap_or(0);
        siblings[..position].iter().rev().copied()
    }

    /// The sibling immediately before `id`.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.preceding_siblings(id).next()
    }

    /// The sibling immediately after `id`.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let position = siblings.iter().position(|&sibling| sibling == id)?;
        siblings.get(position + 1).copied()
    }

    /// Parent, grandparent and so on up to the Document node.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&ancestor| self.parent(ancestor))
    }

    /// Element data of `id`, if it is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Text of `id`, if it is a text run.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::as_text)
    }

    /// The first element child of the Document node.
    ///
    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_element(id).is_some())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_siblings_follow_child_order() {
        let mut tree = DomTree::new();
        let receipt = tree.append_element(NodeId::ROOT, "div", &[]);
        let header = tree.append_element(receipt, "h1", &[]);
        let note = tree.append_text(receipt, "thanks");
        let total = tree.append_element(receipt, "p", &[]);

        assert_eq!(tree.children(receipt), &[header, note, total]);
        assert_eq!(tree.next_sibling(header), Some(note));
        assert_eq!(tree.prev_sibling(note), Some(header));
        assert_eq!(tree.prev_sibling(header), None);
        assert_eq!(tree.next_sibling(total), None);
        assert_eq!(tree.preceding_siblings(total).collect::<Vec<_>>(), vec![note, header]);
        assert_eq!(tree.as_text(note), Some("thanks"));
    }

    #[test]
    fn test_ancestors_stop_at_the_document() {
        let mut tree = DomTree::new();
        let html = tree.append_element(NodeId::ROOT, "html", &[]);
        let body = tree.append_element(html, "body", &[]);
        let p = tree.append_element(body, "p", &[]);

        let chain: Vec<NodeId> = tree.ancestors(p).collect();
        assert_eq!(chain, vec![body, html, NodeId::ROOT]);
        assert_eq!(tree.ancestors(NodeId::ROOT).count(), 0);
    }

    #[test]
    fn test_element_attributes() {
        let mut tree = DomTree::new();
        let div = tree.append_element(
            NodeId::ROOT,
            "DIV",
            &[("CLASS", "line  total\tdue"), ("id", "sum")],
        );
        let data = tree.as_element(div).unwrap();
        assert_eq!(data.tag_name, "div");
        assert!(data.has_class("total"));
        assert!(data.has_class("due"));
        assert!(!data.has_class("tot"));
        assert_eq!(data.id(), Some("sum"));
        assert_eq!(data.inline_style(), None);
    }
}
