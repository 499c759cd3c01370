//! The box tree.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! "The following sections describe the types of boxes that may be generated
//! in CSS 2.1. A box's type affects, in part, its behavior in the visual
//! formatting model."
//!
//! Boxes live in an arena owned by [`LayoutTree`]; children and parents are
//! stored as [`BoxId`] indices.

use serde::Serialize;

use crate::cascade::StyledNode;
use crate::style::{Display, PropertyMap};

use super::box_model::Dimensions;
use super::inline::is_collapsible_whitespace;

/// Index of a box in its [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoxId(pub usize);

/// [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoxKind {
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    Block,
    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    Inline,
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    ///
    /// "if a block container box has a block-level box inside it, then we
    /// force it to have only block-level boxes inside it."
    Anonymous,
    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// "The rectangular area that contains the boxes that form a line is
    /// called a line box."
    Line,
}

impl BoxKind {
    /// Block and anonymous boxes stack their children vertically.
    #[must_use]
    pub const fn is_block_container(self) -> bool {
        matches!(self, Self::Block | Self::Anonymous)
    }
}

/// One box in the arena.
#[derive(Debug, Clone)]
pub struct LayoutBox<'s> {
    /// What kind of box this is.
    pub kind: BoxKind,
    /// Geometry, written by layout.
    pub dimensions: Dimensions,
    /// Children in flow order.
    pub children: Vec<BoxId>,
    /// Containing box, `None` for the root.
    pub parent: Option<BoxId>,
    /// The styled node that generated this box. Anonymous and line boxes
    /// have none.
    pub styled: Option<&'s StyledNode<'s>>,
}

/// An arena of boxes generated from a styled tree.
#[derive(Debug, Clone)]
pub struct LayoutTree<'s> {
    pub(super) boxes: Vec<LayoutBox<'s>>,
    pub(super) root: BoxId,
    /// Properties read by boxes without a styled node.
    initial: PropertyMap,
}

impl<'s> LayoutTree<'s> {
    /// Generate the box tree for `styled`.
    ///
    /// [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS2/visuren.html#display-prop)
    ///
    /// "none: This value causes an element to not appear in the formatting
    /// structure (i.e., in visual media the element generates no boxes and
    /// has no effect on layout)."
    ///
    /// Returns `None` when the root is `display: none`.
    #[must_use]
    pub fn build(styled: &'s StyledNode<'s>) -> Option<Self> {
        let kind = match styled.display() {
            Display::None => return None,
            Display::Block => BoxKind::Block,
            Display::Inline => BoxKind::Inline,
        };
        let mut tree = Self {
            boxes: Vec::new(),
            root: BoxId(0),
            initial: PropertyMap::initial(),
        };
        tree.root = tree.alloc(kind, Some(styled), None);
        tree.build_children(tree.root, styled);
        Some(tree)
    }

    fn build_children(&mut self, parent: BoxId, styled: &'s StyledNode<'s>) {
        // [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
        let wrap_inline = styled
            .children
            .iter()
            .any(|child| child.display() == Display::Block);

        let mut after_hidden = false;
        for child in &styled.children {
            let kind = match child.display() {
                Display::None => {
                    after_hidden = true;
                    continue;
                }
                Display::Block => BoxKind::Block,
                Display::Inline => BoxKind::Inline,
            };

            match child.text() {
                // Text trailing a hidden element goes with it.
                Some(_) if after_hidden => continue,
                Some(text) if text.chars().all(is_collapsible_whitespace) => continue,
                Some(_) => {}
                None => after_hidden = false,
            }

            let container = if wrap_inline && kind == BoxKind::Inline {
                self.anonymous_container(parent)
            } else {
                parent
            };
            let id = self.alloc(kind, Some(child), Some(container));
            self.build_children(id, child);
        }
    }

    /// The trailing anonymous box of `parent`, created if the last child is
    /// anything else.
    fn anonymous_container(&mut self, parent: BoxId) -> BoxId {
        match self.boxes[parent.0].children.last() {
            Some(&last) if self.boxes[last.0].kind == BoxKind::Anonymous => last,
            _ => self.alloc(BoxKind::Anonymous, None, Some(parent)),
        }
    }

    /// Push a new box, appending it to `parent`'s children.
    pub(super) fn alloc(
        &mut self,
        kind: BoxKind,
        styled: Option<&'s StyledNode<'s>>,
        parent: Option<BoxId>,
    ) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox {
            kind,
            dimensions: Dimensions::default(),
            children: Vec::new(),
            parent,
            styled,
        });
        if let Some(parent) = parent {
            self.boxes[parent.0].children.push(id);
        }
        id
    }

    /// The root box.
    #[must_use]
    pub const fn root(&self) -> BoxId {
        self.root
    }

    /// The box at `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    #[must_use]
    pub fn get(&self, id: BoxId) -> &LayoutBox<'s> {
        &self.boxes[id.0]
    }

    /// Children of `id` in flow order.
    #[must_use]
    pub fn children(&self, id: BoxId) -> &[BoxId] {
        &self.boxes[id.0].children
    }

    /// Number of boxes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Always false: a tree has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Resolved properties of `id`. Boxes without a styled node read
    /// initial values.
    pub(super) fn properties(&self, id: BoxId) -> &PropertyMap {
        self.boxes[id.0]
            .styled
            .map_or(&self.initial, |styled| &styled.properties)
    }

    /// Copy the tree into an owned, serializable form.
    #[must_use]
    pub fn snapshot(&self) -> BoxSnapshot {
        self.snapshot_box(self.root)
    }

    fn snapshot_box(&self, id: BoxId) -> BoxSnapshot {
        let layout_box = &self.boxes[id.0];
        BoxSnapshot {
            kind: layout_box.kind,
            tag: layout_box
                .styled
                .and_then(StyledNode::tag_name)
                .map(str::to_string),
            text: layout_box
                .styled
                .and_then(StyledNode::text)
                .map(str::to_string),
            dimensions: layout_box.dimensions,
            children: layout_box
                .children
                .iter()
                .map(|&child| self.snapshot_box(child))
                .collect(),
        }
    }
}

/// An owned copy of a laid-out box and its descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSnapshot {
    /// Box kind.
    pub kind: BoxKind,
    /// Tag name of the generating element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Text of the generating text run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Geometry.
    pub dimensions: Dimensions,
    /// Children in flow order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoxSnapshot>,
}
