//! CSS Cascading and Style Computation
//!
//! This module implements the cascade per
//! [CSS Cascading and Inheritance Level 4](https://www.w3.org/TR/css-cascade-4/),
//! restricted to a single origin with `!important` and keyword inheritance.

mod styled_node;

pub use styled_node::StyledNode;

use strum::IntoEnumIterator;
use telegraph_common::warning::warn_once;

use crate::style::{DeclarationName, Priority, Property, PropertyDeclaration, PropertyMap, Value};

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// "The cascade takes an unordered list of declared values for a given property
/// on a given element, sorts them by their declaration's precedence..."
///
/// Resolve one element's properties. `matched` yields the declaration lists
/// of the element's matching rules in ascending specificity; `inline` holds
/// its `style` attribute; `parent` is the parent's resolved map, or `None`
/// at the root.
///
/// Once an entry holds an `!important` value nothing later replaces it, so
/// among important declarations the first in cascade order wins.
pub fn resolve<'d>(
    matched: impl IntoIterator<Item = &'d [PropertyDeclaration]>,
    inline: &[PropertyDeclaration],
    parent: Option<&PropertyMap>,
) -> PropertyMap {
    // STEP 1: Seed every property with its initial value.
    let mut resolved = PropertyMap::initial();

    // STEP 2: [§ 7 Inheritance](https://www.w3.org/TR/css-cascade-4/#inheriting)
    // "Some properties are inherited from an ancestor element to its descendants."
    //
    // Inherited values arrive at normal priority: a parent's `!important`
    // does not lock the property for the child's own rules.
    if let Some(parent) = parent {
        for (property, entry) in parent.iter() {
            if property.is_inherited() {
                resolved.apply(property, entry.value.clone(), Priority::Normal);
            }
        }
    }

    // STEP 3: [§ 6.4 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    // Rules from least to most specific, then the style attribute.
    for declarations in matched {
        for declaration in declarations {
            apply_declaration(&mut resolved, declaration);
        }
    }
    for declaration in inline {
        apply_declaration(&mut resolved, declaration);
    }

    // STEP 4: [§ 7.3 Explicit Defaulting](https://www.w3.org/TR/css-cascade-4/#defaulting-keywords)
    for property in Property::iter() {
        let value = resolved.get(property);
        if value.is_keyword("inherit") {
            // "the inherited value is the initial value" at the root
            let inherited =
                parent.map_or_else(|| property.initial_value(), |p| p.get(property).clone());
            resolved.replace_value(property, inherited);
        } else if value.is_keyword("initial") {
            resolved.replace_value(property, property.initial_value());
        }
    }

    resolved
}

fn apply_declaration(resolved: &mut PropertyMap, declaration: &PropertyDeclaration) {
    match declaration.name {
        DeclarationName::Longhand(property) => {
            resolved.apply(property, declaration.value.clone(), declaration.priority);
        }
        DeclarationName::Shorthand(shorthand) => match expand_edges(&declaration.value) {
            Some(sides) => {
                for (property, value) in shorthand.longhands().into_iter().zip(sides) {
                    resolved.apply(property, value, declaration.priority);
                }
            }
            None => warn_once(
                "CSS",
                &format!(
                    "ignoring malformed {shorthand} shorthand '{}'",
                    declaration.value
                ),
            ),
        },
    }
}

/// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS21/box.html#margin-properties)
///
/// "If there is only one component value, it applies to all sides. If there
/// are two values, the top and bottom margins are set to the first value and
/// the right and left margins are set to the second. If there are three
/// values, the top is set to the first value, the left and right are set to
/// the second, and the bottom is set to the third. If there are four values,
/// they apply to the top, right, bottom, and left, respectively."
///
/// Returns the four edge values in top, right, bottom, left order, or `None`
/// for anything other than one to four single-token components.
#[must_use]
pub fn expand_edges(value: &Value) -> Option<[Value; 4]> {
    let parts = value.components();
    if !parts.iter().all(is_edge_component) {
        return None;
    }
    let [top, right, bottom, left] = match parts {
        [all] => [all, all, all, all],
        [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
        [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
        [top, right, bottom, left] => [top, right, bottom, left],
        _ => return None,
    };
    Some([top.clone(), right.clone(), bottom.clone(), left.clone()])
}

const fn is_edge_component(value: &Value) -> bool {
    matches!(
        value,
        Value::Length(_)
            | Value::Percentage(_)
            | Value::Number { .. }
            | Value::Dimension { .. }
            | Value::Auto
            | Value::Keyword(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(css: &str) -> Vec<PropertyDeclaration> {
        PropertyDeclaration::parse_list(css)
    }

    fn number(value: f32) -> Value {
        Value::Number {
            value,
            integer: true,
        }
    }

    #[test]
    fn test_seeded_with_initial_values() {
        let none: [&[PropertyDeclaration]; 0] = [];
        let map = resolve(none, &[], None);
        assert_eq!(map, PropertyMap::initial());
    }

    #[test]
    fn test_important_beats_later_normal() {
        let low = decls("color: red !important");
        let high = decls("color: blue");
        let map = resolve([low.as_slice(), high.as_slice()], &[], None);
        assert_eq!(map.get(Property::Color), &Value::keyword("red"));
    }

    #[test]
    fn test_first_important_wins_among_important() {
        let low = decls("color: red !important");
        let inline = decls("color: blue !important");
        let map = resolve([low.as_slice()], &inline, None);
        assert_eq!(map.get(Property::Color), &Value::keyword("red"));
    }

    #[test]
    fn test_inline_beats_rules() {
        let rule = decls("width: 10px");
        let inline = decls("width: 20px");
        let map = resolve([rule.as_slice()], &inline, None);
        assert_eq!(map.get(Property::Width), &Value::Length(20.0));
    }

    #[test]
    fn test_parent_important_does_not_lock_child() {
        let parent = resolve([decls("color: red !important").as_slice()], &[], None);
        let child = resolve([decls("color: blue").as_slice()], &[], Some(&parent));
        assert_eq!(child.get(Property::Color), &Value::keyword("blue"));
    }

    #[test]
    fn test_inherit_and_initial_keywords() {
        let parent = resolve([decls("width: 50px; color: red").as_slice()], &[], None);
        let child = resolve(
            [decls("width: inherit; color: initial").as_slice()],
            &[],
            Some(&parent),
        );
        assert_eq!(child.get(Property::Width), &Value::Length(50.0));
        assert_eq!(child.get(Property::Color), &Value::keyword("black"));

        let root = resolve([decls("font-size: inherit").as_slice()], &[], None);
        assert_eq!(root.get(Property::FontSize), &Value::Length(16.0));
    }

    #[test]
    fn test_shorthand_expansion() {
        let map = resolve([decls("margin: 4").as_slice()], &[], None);
        for side in [
            Property::MarginTop,
            Property::MarginRight,
            Property::MarginBottom,
            Property::MarginLeft,
        ] {
            assert_eq!(map.get(side), &number(4.0));
        }

        let map = resolve([decls("margin: 4 8").as_slice()], &[], None);
        assert_eq!(map.get(Property::MarginTop), &number(4.0));
        assert_eq!(map.get(Property::MarginBottom), &number(4.0));
        assert_eq!(map.get(Property::MarginLeft), &number(8.0));
        assert_eq!(map.get(Property::MarginRight), &number(8.0));

        let map = resolve([decls("padding: 1 2 3 4").as_slice()], &[], None);
        assert_eq!(map.get(Property::PaddingTop), &number(1.0));
        assert_eq!(map.get(Property::PaddingRight), &number(2.0));
        assert_eq!(map.get(Property::PaddingBottom), &number(3.0));
        assert_eq!(map.get(Property::PaddingLeft), &number(4.0));
    }

    #[test]
    fn test_three_value_shorthand_mirrors_right_to_left() {
        let sides = expand_edges(&Value::List(vec![
            Value::Length(1.0),
            Value::Length(2.0),
            Value::Length(3.0),
        ]))
        .unwrap();
        assert_eq!(sides[3], Value::Length(2.0));
    }

    #[test]
    fn test_longhand_after_shorthand_overrides() {
        let low = decls("margin: 5px");
        let high = decls("margin-left: 1px");
        let map = resolve([low.as_slice(), high.as_slice()], &[], None);
        assert_eq!(map.get(Property::MarginLeft), &Value::Length(1.0));
        assert_eq!(map.get(Property::MarginTop), &Value::Length(5.0));
    }

    #[test]
    fn test_malformed_shorthand_is_ignored() {
        let map = resolve(
            [
                decls("margin-top: 9px").as_slice(),
                decls("margin: 1px 2px 3px 4px 5px").as_slice(),
            ],
            &[],
            None,
        );
        assert_eq!(map.get(Property::MarginTop), &Value::Length(9.0));
        assert_eq!(map.get(Property::MarginLeft), &Value::Length(0.0));
    }
}
