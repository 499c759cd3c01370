//! CSS Layout
//!
//! Box generation and the normal-flow layout of the box tree:
//!
//! - [CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 § 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)

mod block;
/// Box model types.
pub mod box_model;
/// Inline layout, line boxes and text measurement.
pub mod inline;
mod layout_box;
/// Lengths as layout reads them.
pub mod values;

pub use box_model::{Dimensions, EdgeSizes, Rect};
pub use inline::{ApproximateFontMetrics, Font, FontMetrics, FontStyle, FontWeight};
pub use layout_box::{BoxId, BoxKind, BoxSnapshot, LayoutBox, LayoutTree};
pub use values::{AutoOr, resolve_length};
