//! Declarations typed against the property registry.

use std::str::FromStr;

use serde::Serialize;
use telegraph_common::warning::warn_once;

use super::properties::{Property, Shorthand};
use super::value::Value;
use crate::parser::{self, CSSParser};

/// [§ 6.4.1 Cascade Sorting Order: Origin and Importance](https://www.w3.org/TR/css-cascade-4/#cascade-origin)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Priority {
    /// An ordinary declaration.
    #[default]
    Normal,
    /// A declaration marked `!important`.
    Important,
}

/// What a declaration sets: one longhand, or a shorthand expanded later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationName {
    /// A registry property.
    Longhand(Property),
    /// `margin` or `padding`.
    Shorthand(Shorthand),
}

impl FromStr for DeclarationName {
    type Err = strum::ParseError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Property::from_str(name)
            .map(Self::Longhand)
            .or_else(|_| Shorthand::from_str(name).map(Self::Shorthand))
    }
}

/// A declaration whose property is known to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDeclaration {
    /// The property or shorthand being set.
    pub name: DeclarationName,
    /// The specified value.
    pub value: Value,
    /// Normal or `!important`.
    pub priority: Priority,
}

impl PropertyDeclaration {
    /// Type a parsed declaration. Unknown property names are reported once
    /// and dropped.
    #[must_use]
    pub fn from_parsed(declaration: &parser::Declaration) -> Option<Self> {
        let Ok(name) = declaration.name.parse::<DeclarationName>() else {
            warn_once(
                "CSS",
                &format!("ignoring unknown property '{}'", declaration.name),
            );
            return None;
        };
        Some(Self {
            name,
            value: Value::from_components(&declaration.value),
            priority: if declaration.important {
                Priority::Important
            } else {
                Priority::Normal
            },
        })
    }

    /// Parse the contents of a `style` attribute.
    ///
    /// [CSS Style Attributes § 3](https://www.w3.org/TR/css-style-attr/#syntax)
    #[must_use]
    pub fn parse_list(css: &str) -> Vec<Self> {
        CSSParser::from_source(css)
            .parse_declaration_list()
            .iter()
            .filter_map(Self::from_parsed)
            .collect()
    }

    /// True if the declaration is marked `!important`.
    #[must_use]
    pub fn is_important(&self) -> bool {
        self.priority == Priority::Important
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_drops_unknown_properties() {
        let decls = PropertyDeclaration::parse_list("colour: red; margin: 0; width: 5px !important");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].name, DeclarationName::Shorthand(Shorthand::Margin));
        assert_eq!(decls[1].name, DeclarationName::Longhand(Property::Width));
        assert!(decls[1].is_important());
    }
}
