//! The property registry.
//!
//! Every property the layout core understands, with its initial value and
//! whether it inherits, per the property definition tables of
//! [CSS 2.1 Appendix F](https://www.w3.org/TR/CSS21/propidx.html).
//! The table is a `match`, so it is immutable and needs no initialization.

use strum_macros::{Display, EnumCount, EnumIter, EnumString, IntoStaticStr};

use super::value::Value;

/// A longhand property known to the registry.
///
/// Names parse from and print as their CSS spelling (`margin-top`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Property {
    /// [§ 14.1 Foreground color](https://www.w3.org/TR/CSS21/colors.html#propdef-color)
    Color,
    /// [§ 15.3 Font family](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-family)
    FontFamily,
    /// [§ 15.7 Font size](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-size)
    FontSize,
    /// [§ 15.6 Font boldness](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-weight)
    FontWeight,
    /// [§ 15.4 Font styling](https://www.w3.org/TR/CSS21/fonts.html#propdef-font-style)
    FontStyle,
    /// [§ 10.8.1 Leading and half-leading](https://www.w3.org/TR/CSS21/visudet.html#propdef-line-height)
    LineHeight,
    /// [§ 16.3.1 Underlining, overlining, striking](https://www.w3.org/TR/CSS21/text.html#propdef-text-decoration)
    TextDecoration,
    /// [§ 16.5 Capitalization](https://www.w3.org/TR/CSS21/text.html#propdef-text-transform)
    TextTransform,
    /// [§ 16.2 Alignment](https://www.w3.org/TR/CSS21/text.html#propdef-text-align)
    TextAlign,
    /// [§ 9.2.4 The display property](https://www.w3.org/TR/CSS21/visuren.html#propdef-display)
    Display,
    /// [§ 11.2 Visibility](https://www.w3.org/TR/CSS21/visufx.html#propdef-visibility)
    Visibility,
    /// [§ 10.2 Content width](https://www.w3.org/TR/CSS21/visudet.html#propdef-width)
    Width,
    /// [§ 10.5 Content height](https://www.w3.org/TR/CSS21/visudet.html#propdef-height)
    Height,
    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS21/visudet.html#propdef-min-width)
    MinWidth,
    /// [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS21/visudet.html#propdef-min-height)
    MinHeight,
    /// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS21/visudet.html#propdef-max-width)
    MaxWidth,
    /// [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS21/visudet.html#propdef-max-height)
    MaxHeight,
    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS21/visuren.html#propdef-top)
    Top,
    /// Box offset, right edge.
    Right,
    /// Box offset, bottom edge.
    Bottom,
    /// Box offset, left edge.
    Left,
    /// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS21/box.html#margin-properties)
    MarginTop,
    /// Right margin.
    MarginRight,
    /// Bottom margin.
    MarginBottom,
    /// Left margin.
    MarginLeft,
    /// [§ 8.4 Padding properties](https://www.w3.org/TR/CSS21/box.html#padding-properties)
    PaddingTop,
    /// Right padding.
    PaddingRight,
    /// Bottom padding.
    PaddingBottom,
    /// Left padding.
    PaddingLeft,
    /// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS21/box.html#border-width-properties)
    BorderTopWidth,
    /// Right border width.
    BorderRightWidth,
    /// Bottom border width.
    BorderBottomWidth,
    /// Left border width.
    BorderLeftWidth,
}

impl Property {
    /// The value a property takes when nothing in the cascade sets it.
    #[must_use]
    pub fn initial_value(self) -> Value {
        match self {
            Self::Color => Value::keyword("black"),
            Self::FontFamily => Value::keyword("sans-serif"),
            Self::FontSize => Value::Length(16.0),
            Self::FontWeight
            | Self::FontStyle
            | Self::LineHeight => Value::keyword("normal"),
            Self::TextDecoration | Self::TextTransform | Self::MaxWidth | Self::MaxHeight => {
                Value::keyword("none")
            }
            Self::TextAlign => Value::keyword("left"),
            Self::Display => Value::keyword("inline"),
            Self::Visibility => Value::keyword("visible"),
            Self::Width
            | Self::Height
            | Self::Top
            | Self::Right
            | Self::Bottom
            | Self::Left => Value::Auto,
            Self::MinWidth
            | Self::MinHeight
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth => Value::Length(0.0),
        }
    }

    /// Whether a child takes its parent's value when nothing sets it.
    #[must_use]
    pub const fn is_inherited(self) -> bool {
        matches!(
            self,
            Self::Color
                | Self::FontFamily
                | Self::FontSize
                | Self::FontWeight
                | Self::FontStyle
                | Self::LineHeight
                | Self::TextTransform
                | Self::TextAlign
                | Self::Visibility
        )
    }

    /// The CSS name of the property.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The shorthands the cascade expands into four edge longhands.
///
/// [§ 8.3 `margin`](https://www.w3.org/TR/CSS21/box.html#propdef-margin),
/// [§ 8.4 `padding`](https://www.w3.org/TR/CSS21/box.html#propdef-padding)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Shorthand {
    /// `margin`
    Margin,
    /// `padding`
    Padding,
}

impl Shorthand {
    /// Longhands in edge order: top, right, bottom, left.
    #[must_use]
    pub const fn longhands(self) -> [Property; 4] {
        match self {
            Self::Margin => [
                Property::MarginTop,
                Property::MarginRight,
                Property::MarginBottom,
                Property::MarginLeft,
            ],
            Self::Padding => [
                Property::PaddingTop,
                Property::PaddingRight,
                Property::PaddingBottom,
                Property::PaddingLeft,
            ],
        }
    }
}
