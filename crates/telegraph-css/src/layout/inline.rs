//! CSS Inline Layout and Line Box Model.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! "In an inline formatting context, boxes are laid out horizontally, one
//! after the other, beginning at the top of a containing block. Horizontal
//! margins, borders, and padding are respected between these boxes."
//!
//! [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
//!
//! "The height of the line box is determined by the rules given in the
//! section on line height calculations."

use crate::cascade::StyledNode;
use crate::style::{Property, PropertyMap, Shorthand, Value};

use super::box_model::{Dimensions, Rect};
use super::layout_box::{BoxId, BoxKind, LayoutTree};
use super::values::{BORDER_WIDTHS, resolve_edges};

/// Used when `font-size` is not a pixel length.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// [§ 15.6 Font boldness](https://www.w3.org/TR/CSS21/fonts.html#font-boldness)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    /// 'normal', and numeric weights below 600.
    #[default]
    Normal,
    /// 'bold', 'bolder', and numeric weights of 600 and above.
    Bold,
}

/// [§ 15.4 Font styling](https://www.w3.org/TR/CSS21/fonts.html#font-styling)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    /// Upright glyphs.
    #[default]
    Normal,
    /// 'italic' or 'oblique'.
    Italic,
}

/// The font a run of text is measured with.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// First family named by `font-family`.
    pub family: String,
    /// Size in pixels.
    pub size: f32,
    /// Weight class.
    pub weight: FontWeight,
    /// Slant.
    pub style: FontStyle,
}

impl Font {
    /// Select the font described by a box's resolved properties.
    #[must_use]
    pub fn from_properties(properties: &PropertyMap) -> Self {
        let family = match properties.get(Property::FontFamily).components().first() {
            Some(Value::Keyword(name) | Value::Str(name)) => name.clone(),
            _ => "sans-serif".to_string(),
        };
        let size = match properties.get(Property::FontSize) {
            Value::Length(px) => *px,
            _ => DEFAULT_FONT_SIZE,
        };
        let weight = match properties.get(Property::FontWeight) {
            Value::Keyword(k) if k == "bold" || k == "bolder" => FontWeight::Bold,
            Value::Number { value, .. } if *value >= 600.0 => FontWeight::Bold,
            _ => FontWeight::Normal,
        };
        let style = match properties.get(Property::FontStyle).as_keyword() {
            Some("italic" | "oblique") => FontStyle::Italic,
            _ => FontStyle::Normal,
        };
        Self {
            family,
            size,
            weight,
            style,
        }
    }
}

/// Text measurement used during inline layout.
///
/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// "CSS assumes that every font has font metrics that specify a
/// characteristic height above the baseline and a depth below it."
///
/// Implementations must be deterministic: layout may measure the same run
/// more than once.
pub trait FontMetrics {
    /// Width and height of `text` set in `font`.
    fn measure(&self, text: &str, font: &Font) -> (f32, f32);
}

/// Approximate font metrics using fixed ratios.
///
/// Without font data, the average advance of Latin glyphs in a proportional
/// font is taken as 0.6 of the font size, and a line as 1.2 of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn measure(&self, text: &str, font: &Font) -> (f32, f32) {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        (
            text.chars().count() as f32 * font.size * CHAR_WIDTH_RATIO,
            font.size * LINE_HEIGHT_RATIO,
        )
    }
}

/// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
///
/// The document white space characters: space, tab, line feed, carriage
/// return and form feed.
#[must_use]
pub const fn is_collapsible_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Collapse white space and apply `text-transform` to a text run.
///
/// "any sequence of collapsible spaces and tabs immediately following
/// another collapsible space is removed", so each run becomes one space.
/// Leading and trailing spaces are kept; they separate adjacent runs.
#[must_use]
pub fn prepare_text(text: &str, transform: &Value) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if is_collapsible_whitespace(c) {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    // [§ 2.1 Case Transforms](https://www.w3.org/TR/css-text-3/#text-transform-property)
    match transform.as_keyword() {
        Some("uppercase") => collapsed.to_uppercase(),
        Some("lowercase") => collapsed.to_lowercase(),
        Some("capitalize") => capitalize(&collapsed),
        _ => collapsed,
    }
}

/// "Puts the first typographic letter unit of each word, if lowercase, in
/// titlecase; other characters are unaffected."
fn capitalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word_start = true;
    for c in text.chars() {
        if word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
            word_start = c == ' ';
        }
    }
    out
}

/// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS2/visudet.html#leading)
///
/// "normal: Tells user agents to set the used value to a 'reasonable'
/// value based on the font of the element."
fn used_line_height(properties: &PropertyMap, font: &Font, normal: f32) -> f32 {
    match properties.get(Property::LineHeight) {
        Value::Length(px) => *px,
        // "The used value of the property is this number multiplied by the
        // element's font size."
        Value::Number { value, .. } => value * font.size,
        Value::Percentage(percent) => percent / 100.0 * font.size,
        _ => normal,
    }
}

impl LayoutTree<'_> {
    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Lay out one line box directly below the content already stacked in
    /// `container`. Its inline children are placed left to right; the line
    /// is as tall as the tallest child margin box.
    pub(super) fn layout_line(&mut self, line: BoxId, container: Rect, metrics: &dyn FontMetrics) {
        debug_assert_eq!(self.boxes[line.0].kind, BoxKind::Line);
        debug_assert!(
            self.boxes[line.0]
                .parent
                .is_some_and(|parent| self.boxes[parent.0].kind.is_block_container()),
            "line box outside a block container"
        );

        let x = container.x;
        let y = container.y + container.height;
        let right_edge = x + container.width;

        let mut cursor = x;
        let mut height = 0.0_f32;
        for child in self.boxes[line.0].children.clone() {
            self.layout_inline(child, cursor, y, right_edge - cursor, metrics);
            let margin_box = self.boxes[child.0].dimensions.margin_box();
            cursor += margin_box.width;
            height = height.max(margin_box.height);
        }

        self.boxes[line.0].dimensions = Dimensions {
            content: Rect {
                x,
                y,
                width: container.width,
                height,
            },
            ..Dimensions::default()
        };
    }

    /// Place an inline box with its margin box's top-left corner at
    /// (`x`, `y`), with `available` pixels left on the line.
    ///
    /// A text run is sized by measurement. An inline element's own inline
    /// content already sits beside it in the line, so it only has its edges,
    /// unless it holds block-level boxes, which stack across the rest of the
    /// line.
    fn layout_inline(
        &mut self,
        id: BoxId,
        x: f32,
        y: f32,
        available: f32,
        metrics: &dyn FontMetrics,
    ) {
        let properties = self.properties(id);
        let margin = resolve_edges(properties, Shorthand::Margin.longhands());
        let padding = resolve_edges(properties, Shorthand::Padding.longhands());
        let border = resolve_edges(properties, BORDER_WIDTHS);
        let content_x = x + margin.left + border.left + padding.left;
        let content_y = y + margin.top + border.top + padding.top;

        // [§ 10.3.1 Inline, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#inline-width)
        //
        // "The 'width' property does not apply."
        let text = self.boxes[id.0].styled.and_then(StyledNode::text);
        let measured = text.map(|text| {
            let font = Font::from_properties(properties);
            let run = prepare_text(text, properties.get(Property::TextTransform));
            let (width, normal) = metrics.measure(&run, &font);
            (width, used_line_height(properties, &font, normal))
        });

        self.boxes[id.0].dimensions = Dimensions {
            content: Rect {
                x: content_x,
                y: content_y,
                width: 0.0,
                height: 0.0,
            },
            padding,
            border,
            margin,
        };

        let (width, height) = if let Some(size) = measured {
            size
        } else if self.boxes[id.0].children.is_empty() {
            (0.0, 0.0)
        } else {
            let inner =
                (available - margin.horizontal() - border.horizontal() - padding.horizontal())
                    .max(0.0);
            self.boxes[id.0].dimensions.content.width = inner;
            self.layout_block_children(id, metrics);
            (inner, self.boxes[id.0].dimensions.content.height)
        };

        let content = &mut self.boxes[id.0].dimensions.content;
        content.width = width;
        content.height = height;

        #[cfg(feature = "layout-trace")]
        super::block::trace_box(BoxKind::Inline, *content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Priority;

    #[test]
    fn test_whitespace_collapses_but_is_not_trimmed() {
        let none = Value::keyword("none");
        assert_eq!(prepare_text("  Time:\n\t ", &none), " Time: ");
        assert_eq!(prepare_text("a  b", &none), "a b");
    }

    #[test]
    fn test_text_transform() {
        assert_eq!(prepare_text("total due", &Value::keyword("uppercase")), "TOTAL DUE");
        assert_eq!(prepare_text("TOTAL", &Value::keyword("lowercase")), "total");
        assert_eq!(prepare_text("total due", &Value::keyword("capitalize")), "Total Due");
    }

    #[test]
    fn test_font_from_properties() {
        let mut map = PropertyMap::initial();
        map.apply(Property::FontWeight, Value::keyword("bold"), Priority::Normal);
        map.apply(Property::FontSize, Value::Length(12.0), Priority::Normal);
        map.apply(
            Property::FontFamily,
            Value::List(vec![
                Value::Str("Courier New".to_string()),
                Value::keyword("monospace"),
            ]),
            Priority::Normal,
        );
        let font = Font::from_properties(&map);
        assert_eq!(font.weight, FontWeight::Bold);
        assert_eq!(font.style, FontStyle::Normal);
        assert_eq!(font.size, 12.0);
        assert_eq!(font.family, "Courier New");
    }

    #[test]
    fn test_approximate_metrics() {
        let font = Font::from_properties(&PropertyMap::initial());
        let (width, height) = ApproximateFontMetrics.measure("abcde", &font);
        assert!((width - 48.0).abs() < 1e-4);
        assert!((height - 19.2).abs() < 1e-4);
    }
}
