//! Lengths as layout reads them.
//!
//! [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
//!
//! Layout is lenient: a value it cannot use never fails, it is coerced.

use crate::style::{Property, PropertyMap, Value};

use super::box_model::EdgeSizes;

/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// "Some properties can take the keyword 'auto' as a value. This keyword
/// allows the user agent to compute the value based on other properties."
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AutoOr {
    /// The value is 'auto' and must be resolved during layout.
    Auto,
    /// The value is a specific length in pixels.
    Length(f32),
}

impl AutoOr {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Get the length value, or a default if 'auto'.
    #[must_use]
    pub const fn to_px_or(self, default: f32) -> f32 {
        match self {
            Self::Length(v) => v,
            Self::Auto => default,
        }
    }
}

/// Read `property` from a resolved map as pixels or `auto`.
///
/// - `px` dimensions are used as-is; every other unit, and percentages, give 0.
/// - A unitless number is accepted only when it is exactly 0. Any other
///   unitless number is invalid and the property's initial value is used.
/// - `auto` gives [`AutoOr::Auto`]; any other keyword gives 0.
/// - Multi-valued and other kinds of value fall back to the initial value.
#[must_use]
pub fn resolve_length(properties: &PropertyMap, property: Property) -> AutoOr {
    coerce(properties.get(property))
        .or_else(|| coerce(&property.initial_value()))
        .unwrap_or(AutoOr::Length(0.0))
}

/// `None` means "use the initial value".
fn coerce(value: &Value) -> Option<AutoOr> {
    match value {
        Value::Length(px) => Some(AutoOr::Length(*px)),
        Value::Number { value, .. } if *value == 0.0 => Some(AutoOr::Length(0.0)),
        Value::Auto => Some(AutoOr::Auto),
        Value::Dimension { .. } | Value::Percentage(_) | Value::Keyword(_) => {
            Some(AutoOr::Length(0.0))
        }
        Value::Number { .. }
        | Value::Str(_)
        | Value::Hash(_)
        | Value::Other(_)
        | Value::List(_) => None,
    }
}

/// Read `property` as pixels, treating `auto` as 0.
#[must_use]
pub fn resolve_px(properties: &PropertyMap, property: Property) -> f32 {
    resolve_length(properties, property).to_px_or(0.0)
}

/// Border width longhands in top, right, bottom, left order.
pub const BORDER_WIDTHS: [Property; 4] = [
    Property::BorderTopWidth,
    Property::BorderRightWidth,
    Property::BorderBottomWidth,
    Property::BorderLeftWidth,
];

/// Read four edge longhands, given in top, right, bottom, left order, as
/// pixels with `auto` treated as 0.
#[must_use]
pub fn resolve_edges(properties: &PropertyMap, sides: [Property; 4]) -> EdgeSizes {
    let [top, right, bottom, left] = sides.map(|side| resolve_px(properties, side));
    EdgeSizes {
        top,
        right,
        bottom,
        left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Priority;

    fn with(property: Property, value: Value) -> PropertyMap {
        let mut map = PropertyMap::initial();
        map.apply(property, value, Priority::Normal);
        map
    }

    #[test]
    fn test_nonzero_unitless_number_falls_back_to_initial() {
        let map = with(
            Property::Width,
            Value::Number {
                value: 7.0,
                integer: true,
            },
        );
        assert_eq!(resolve_length(&map, Property::Width), AutoOr::Auto);

        let map = with(
            Property::MarginTop,
            Value::Number {
                value: 7.5,
                integer: false,
            },
        );
        assert_eq!(resolve_length(&map, Property::MarginTop), AutoOr::Length(0.0));
    }

    #[test]
    fn test_zero_unitless_number_is_accepted() {
        let map = with(
            Property::Width,
            Value::Number {
                value: 0.0,
                integer: true,
            },
        );
        assert_eq!(resolve_length(&map, Property::Width), AutoOr::Length(0.0));
    }

    #[test]
    fn test_units_and_keywords() {
        let em = Value::Dimension {
            value: 2.0,
            unit: "em".to_string(),
        };
        assert_eq!(resolve_length(&with(Property::Width, em), Property::Width), AutoOr::Length(0.0));
        assert_eq!(
            resolve_length(&with(Property::Width, Value::Length(12.0)), Property::Width),
            AutoOr::Length(12.0)
        );
        assert_eq!(
            resolve_length(&with(Property::MarginLeft, Value::Auto), Property::MarginLeft),
            AutoOr::Auto
        );
        assert_eq!(
            resolve_length(&with(Property::Width, Value::keyword("thin")), Property::Width),
            AutoOr::Length(0.0)
        );
    }

    #[test]
    fn test_multi_valued_falls_back_to_initial() {
        let list = Value::List(vec![Value::Length(1.0), Value::Length(2.0)]);
        assert_eq!(resolve_length(&with(Property::Height, list), Property::Height), AutoOr::Auto);
        assert_eq!(
            resolve_length(&with(Property::Height, Value::Str("x".to_string())), Property::Height),
            AutoOr::Auto
        );
    }
}
