//! Block formatting.
//!
//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

use crate::style::{Property, Shorthand};

use super::box_model::Rect;
use super::inline::FontMetrics;
use super::layout_box::{BoxId, BoxKind, LayoutTree};
use super::values::{AutoOr, BORDER_WIDTHS, resolve_edges, resolve_length, resolve_px};

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

#[cfg(feature = "layout-trace")]
struct DepthGuard;

#[cfg(feature = "layout-trace")]
impl DepthGuard {
    fn enter() -> Self {
        LAYOUT_DEPTH.with(|d| d.set(d.get() + 1));
        Self
    }
}

#[cfg(feature = "layout-trace")]
impl Drop for DepthGuard {
    fn drop(&mut self) {
        LAYOUT_DEPTH.with(|d| d.set(d.get() - 1));
    }
}

#[cfg(feature = "layout-trace")]
pub(super) fn trace_box(kind: BoxKind, content: Rect) {
    let depth = LAYOUT_DEPTH.with(Cell::get);
    eprintln!(
        "{:indent$}[LAYOUT] {kind:?} x={} y={} w={} h={}",
        "",
        content.x,
        content.y,
        content.width,
        content.height,
        indent = depth * 2
    );
}

impl LayoutTree<'_> {
    /// Lay out the whole tree in a viewport `viewport_width` pixels wide.
    ///
    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// "The containing block in which the root element lives is a rectangle
    /// called the initial containing block."
    ///
    /// An inline root is first given an anonymous block parent. Layout may be
    /// repeated; each pass rewrites every box's dimensions.
    pub fn layout(&mut self, viewport_width: f32, metrics: &dyn FontMetrics) {
        self.ensure_block_root();
        let initial_containing_block = Rect {
            width: viewport_width,
            ..Rect::default()
        };
        self.layout_block(self.root, initial_containing_block, None, metrics);
    }

    fn ensure_block_root(&mut self) {
        if self.boxes[self.root.0].kind != BoxKind::Inline {
            return;
        }
        let inline_root = self.root;
        let anonymous = self.alloc(BoxKind::Anonymous, None, None);
        self.boxes[anonymous.0].children.push(inline_root);
        self.boxes[inline_root.0].parent = Some(anonymous);
        self.root = anonymous;
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// `containing_block` is the parent's content area, its height being what
    /// earlier siblings have stacked so far. `previous_margin_bottom` is the
    /// bottom margin of the previous sibling, if there is one.
    fn layout_block(
        &mut self,
        id: BoxId,
        containing_block: Rect,
        previous_margin_bottom: Option<f32>,
        metrics: &dyn FontMetrics,
    ) {
        #[cfg(feature = "layout-trace")]
        let _depth = DepthGuard::enter();

        // STEP 1: Width and horizontal edges depend on the containing block.
        self.calculate_block_width(id, containing_block);

        // STEP 2: Position below the content already in the containing block.
        self.calculate_block_position(id, containing_block, previous_margin_bottom);

        // STEP 3: Children, which accumulate this box's content height.
        self.layout_block_children(id, metrics);

        // STEP 4: An explicit height wins over the accumulated one.
        self.calculate_block_height(id);

        #[cfg(feature = "layout-trace")]
        trace_box(self.boxes[id.0].kind, self.boxes[id.0].dimensions.content);
    }

    /// [§ 10.3.3](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    ///
    /// "The following constraints must hold among the used values of the
    /// other properties:
    ///
    ///   'margin-left' + 'border-left-width' + 'padding-left' + 'width' +
    ///   'padding-right' + 'border-right-width' + 'margin-right'
    ///   = width of containing block"
    fn calculate_block_width(&mut self, id: BoxId, containing_block: Rect) {
        // STEP 1: Read the used values. Border and padding cannot be 'auto'.
        let properties = self.properties(id);
        let width = resolve_length(properties, Property::Width);
        let mut margin_left = resolve_length(properties, Property::MarginLeft);
        let mut margin_right = resolve_length(properties, Property::MarginRight);
        let padding_left = resolve_px(properties, Property::PaddingLeft);
        let padding_right = resolve_px(properties, Property::PaddingRight);
        let border_left = resolve_px(properties, Property::BorderLeftWidth);
        let border_right = resolve_px(properties, Property::BorderRightWidth);

        let fixed = |width: AutoOr, margin_left: AutoOr, margin_right: AutoOr| {
            margin_left.to_px_or(0.0)
                + border_left
                + padding_left
                + width.to_px_or(0.0)
                + padding_right
                + border_right
                + margin_right.to_px_or(0.0)
        };

        // STEP 2: Over-constrained boxes.
        //
        // "If 'width' is not 'auto' and 'border-left-width' + 'padding-left' +
        // 'width' + 'padding-right' + 'border-right-width' (plus any of
        // 'margin-left' or 'margin-right' that are not 'auto') is larger than
        // the width of the containing block, then any 'auto' values for
        // 'margin-left' or 'margin-right' are, for the following rules,
        // treated as zero."
        if !width.is_auto() && fixed(width, margin_left, margin_right) > containing_block.width {
            if margin_left.is_auto() {
                margin_left = AutoOr::Length(0.0);
            }
            if margin_right.is_auto() {
                margin_right = AutoOr::Length(0.0);
            }
        }

        // STEP 3: Apply the constraint rules.
        let underflow = containing_block.width - fixed(width, margin_left, margin_right);
        let (used_width, used_margin_left, used_margin_right) =
            match (width, margin_left, margin_right) {
                // RULE A: "If 'width' is set to 'auto', any other 'auto' values
                // become '0' and 'width' follows from the resulting equality."
                //
                // A negative remainder goes to 'margin-right' instead.
                (AutoOr::Auto, left, right) => {
                    let left = left.to_px_or(0.0);
                    let right = right.to_px_or(0.0);
                    if underflow >= 0.0 {
                        (underflow, left, right)
                    } else {
                        (0.0, left, right + underflow)
                    }
                }
                // RULE B: "If both 'margin-left' and 'margin-right' are 'auto',
                // their used values are equal."
                (AutoOr::Length(w), AutoOr::Auto, AutoOr::Auto) => {
                    (w, underflow / 2.0, underflow / 2.0)
                }
                // RULE C: "If there is exactly one value specified as 'auto',
                // its used value follows from the equality."
                (AutoOr::Length(w), AutoOr::Auto, AutoOr::Length(right)) => (w, underflow, right),
                (AutoOr::Length(w), AutoOr::Length(left), AutoOr::Auto) => (w, left, underflow),
                // "If all of the above have a computed value other than 'auto',
                // the values are said to be "over-constrained" and one of the
                // used values will have to be different from its computed
                // value. If the 'direction' property of the containing block
                // has the value 'ltr', the specified value of 'margin-right'
                // is ignored and the value is calculated so as to make the
                // equality true."
                (AutoOr::Length(w), AutoOr::Length(left), AutoOr::Length(right)) => {
                    (w, left, right + underflow)
                }
            };

        let dimensions = &mut self.boxes[id.0].dimensions;
        dimensions.content.width = used_width;
        dimensions.padding.left = padding_left;
        dimensions.padding.right = padding_right;
        dimensions.border.left = border_left;
        dimensions.border.right = border_right;
        dimensions.margin.left = used_margin_left;
        dimensions.margin.right = used_margin_right;
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "The vertical distance between two sibling boxes is determined by the
    /// 'margin' properties. Vertical margins between adjacent block-level
    /// boxes in a block formatting context collapse."
    fn calculate_block_position(
        &mut self,
        id: BoxId,
        containing_block: Rect,
        previous_margin_bottom: Option<f32>,
    ) {
        let properties = self.properties(id);
        let margin = resolve_edges(properties, Shorthand::Margin.longhands());
        let padding = resolve_edges(properties, Shorthand::Padding.longhands());
        let border = resolve_edges(properties, BORDER_WIDTHS);

        // [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
        //
        // The gap between siblings is the larger of the two margins. The
        // previous margin is already in the containing block's height, so
        // back it out and store the collapsed value as this box's top margin.
        let (margin_top, already_stacked) = match previous_margin_bottom {
            Some(previous) => (margin.top.max(previous), previous),
            None => (margin.top, 0.0),
        };

        let dimensions = &mut self.boxes[id.0].dimensions;
        dimensions.margin.top = margin_top;
        dimensions.margin.bottom = margin.bottom;
        dimensions.border.top = border.top;
        dimensions.border.bottom = border.bottom;
        dimensions.padding.top = padding.top;
        dimensions.padding.bottom = padding.bottom;

        dimensions.content.x = containing_block.x
            + dimensions.margin.left
            + dimensions.border.left
            + dimensions.padding.left;
        dimensions.content.y = containing_block.y + containing_block.height - already_stacked
            + margin_top
            + border.top
            + padding.top;
    }

    /// Lay out the children of a box whose content x, y and width are set,
    /// leaving the stacked height in its content height.
    pub(super) fn layout_block_children(&mut self, id: BoxId, metrics: &dyn FontMetrics) {
        self.group_lines(id);

        let mut content = self.boxes[id.0].dimensions.content;
        content.height = 0.0;
        let mut previous_margin_bottom = None;

        for child in self.boxes[id.0].children.clone() {
            let kind = self.boxes[child.0].kind;
            debug_assert_ne!(kind, BoxKind::Inline, "inline box outside a line");

            if kind.is_block_container() {
                self.layout_block(child, content, previous_margin_bottom, metrics);
                let dimensions = self.boxes[child.0].dimensions;
                // The collapsed top margin replaced the previous bottom margin.
                content.height +=
                    dimensions.margin_box().height - previous_margin_bottom.unwrap_or(0.0);
                previous_margin_bottom = Some(dimensions.margin.bottom);
            } else {
                self.layout_line(child, content, metrics);
                content.height += self.boxes[child.0].dimensions.margin_box().height;
                previous_margin_bottom = None;
            }
        }

        self.boxes[id.0].dimensions.content.height = content.height;
    }

    /// [§ 10.6.3 Block-level non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#normal-block)
    ///
    /// "If 'height' is 'auto', the height depends on whether the element has
    /// any block-level children..."
    fn calculate_block_height(&mut self, id: BoxId) {
        if let AutoOr::Length(height) = resolve_length(self.properties(id), Property::Height) {
            self.boxes[id.0].dimensions.content.height = height;
        }
    }

    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Move each run of consecutive inline children of `container` into one
    /// line box standing in their place, together with their inline
    /// descendants. A run that follows an existing line box joins it.
    fn group_lines(&mut self, container: BoxId) {
        let children = std::mem::take(&mut self.boxes[container.0].children);
        let mut grouped = Vec::with_capacity(children.len());

        for child in children {
            if self.boxes[child.0].kind != BoxKind::Inline {
                grouped.push(child);
                continue;
            }
            let line = match grouped.last() {
                Some(&last) if self.boxes[last.0].kind == BoxKind::Line => last,
                _ => {
                    let line = self.alloc(BoxKind::Line, None, None);
                    self.boxes[line.0].parent = Some(container);
                    grouped.push(line);
                    line
                }
            };
            self.append_to_line(line, child);
        }

        self.boxes[container.0].children = grouped;
    }

    /// Append `inline` to `line`, then its inline descendants in document
    /// order. The nearest block container owns the line, so every inline box
    /// below it sits directly in the line. An inline box whose children are
    /// block-level keeps them.
    fn append_to_line(&mut self, line: BoxId, inline: BoxId) {
        self.boxes[inline.0].parent = Some(line);
        self.boxes[line.0].children.push(inline);

        let inline_only = self.boxes[inline.0]
            .children
            .iter()
            .all(|&child| self.boxes[child.0].kind == BoxKind::Inline);
        if inline_only {
            for child in std::mem::take(&mut self.boxes[inline.0].children) {
                self.append_to_line(line, child);
            }
        }
    }
}
