//! Box dimensions.
//!
//! [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
//!
//! "Each box has a content area (e.g., text, an image, etc.) and optional
//! surrounding padding, border, and margin areas; the size of each area is
//! specified by properties defined below."

use serde::Serialize;

/// Geometry of one box: its content rectangle and the three edge rings
/// around it. Only `content` carries a position; the outer boxes are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Dimensions {
    /// Content area in page coordinates, y growing down the receipt.
    pub content: Rect,
    /// Padding ring.
    pub padding: EdgeSizes,
    /// Border ring.
    pub border: EdgeSizes,
    /// Margin ring. `top` holds the collapsed margin for block boxes.
    pub margin: EdgeSizes,
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

/// Widths of the four sides of a padding, border or margin ring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EdgeSizes {
    /// Top side.
    pub top: f32,
    /// Right side.
    pub right: f32,
    /// Bottom side.
    pub bottom: f32,
    /// Left side.
    pub left: f32,
}

impl EdgeSizes {
    /// `left + right`.
    #[must_use]
    pub fn horizontal(self) -> f32 {
        self.left + self.right
    }
}

impl Rect {
    /// This rectangle grown by `edge` on each side.
    #[must_use]
    pub fn expanded_by(self, edge: EdgeSizes) -> Self {
        Self {
            x: self.x - edge.left,
            y: self.y - edge.top,
            width: self.width + edge.horizontal(),
            height: self.height + edge.top + edge.bottom,
        }
    }
}

impl Dimensions {
    /// "The padding edge surrounds the box padding."
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.content.expanded_by(self.padding)
    }

    /// "The border edge surrounds the box's border."
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.padding_box().expanded_by(self.border)
    }

    /// "The margin edge surrounds the box margin." This is the rectangle
    /// siblings stack against.
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.border_box().expanded_by(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_rings_grow_outward() {
        let ring = |size| EdgeSizes {
            top: size,
            right: size,
            bottom: size,
            left: size,
        };
        let dims = Dimensions {
            content: Rect {
                x: 10.0,
                y: 20.0,
                width: 100.0,
                height: 50.0,
            },
            padding: ring(1.0),
            border: ring(2.0),
            margin: ring(3.0),
        };
        assert_eq!(dims.padding_box().width, 102.0);
        assert_eq!(dims.border_box().x, 7.0);
        assert_eq!(
            dims.margin_box(),
            Rect {
                x: 4.0,
                y: 14.0,
                width: 112.0,
                height: 62.0,
            }
        );
        assert_eq!(dims.margin.horizontal(), 6.0);
    }
}
