//! Specified property values.
//!
//! [§ 4 Component Value Types](https://www.w3.org/TR/css-values-4/#component-types)
//!
//! Values are kept close to their token form: the cascade only needs to tell
//! keywords (`inherit`, `initial`, `auto`, `none`...) from numbers, and layout
//! does its own coercion of whatever survives.

use core::fmt;

use serde::Serialize;

use crate::parser::ComponentValue;
use crate::tokenizer::{CSSToken, NumericType};

/// A property value with whitespace and comma separators removed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    /// A `px` dimension.
    Length(f32),
    /// A `<percentage>` (50 for `50%`).
    Percentage(f32),
    /// A unitless `<number>` or `<integer>`.
    Number {
        /// The numeric value.
        value: f32,
        /// Whether the token was written as an integer.
        integer: bool,
    },
    /// A dimension in any unit other than `px`.
    Dimension {
        /// The numeric value.
        value: f32,
        /// The lower-cased unit.
        unit: String,
    },
    /// An identifier other than `auto`, lower-cased.
    Keyword(String),
    /// The `auto` identifier.
    Auto,
    /// A quoted string.
    Str(String),
    /// A hash such as `#333`.
    Hash(String),
    /// Anything else (functions, blocks, delimiters), serialized.
    Other(String),
    /// More than one component, as in `margin: 4px 8px`.
    List(Vec<Value>),
}

impl Value {
    /// Create a keyword value.
    #[must_use]
    pub fn keyword(name: &str) -> Self {
        Self::Keyword(name.to_ascii_lowercase())
    }

    /// Build a value from a declaration's component values.
    ///
    /// One meaningful component yields that component's value; several yield
    /// a [`Value::List`]; none yields an empty [`Value::Other`].
    #[must_use]
    pub fn from_components(components: &[ComponentValue]) -> Self {
        let mut values: Vec<Self> = components
            .iter()
            .filter(|c| {
                !matches!(
                    c,
                    ComponentValue::Token(CSSToken::Whitespace | CSSToken::Comma)
                )
            })
            .map(Self::from_component)
            .collect();

        match values.len() {
            0 => Self::Other(String::new()),
            1 => values.remove(0),
            _ => Self::List(values),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_component(component: &ComponentValue) -> Self {
        match component {
            ComponentValue::Token(token) => match token {
                CSSToken::Ident(name) if name.eq_ignore_ascii_case("auto") => Self::Auto,
                CSSToken::Ident(name) => Self::keyword(name),
                CSSToken::Dimension { value, unit, .. } if unit == "px" => {
                    Self::Length(*value as f32)
                }
                CSSToken::Dimension { value, unit, .. } => Self::Dimension {
                    value: *value as f32,
                    unit: unit.clone(),
                },
                CSSToken::Percentage { value, .. } => Self::Percentage(*value as f32),
                CSSToken::Number {
                    value,
                    numeric_type,
                } => Self::Number {
                    value: *value as f32,
                    integer: *numeric_type == NumericType::Integer,
                },
                CSSToken::String(s) => Self::Str(s.clone()),
                CSSToken::Hash { value, .. } => Self::Hash(value.clone()),
                other => Self::Other(other.to_string()),
            },
            other => Self::Other(other.to_string()),
        }
    }

    /// The keyword name, if this is a single keyword.
    #[must_use]
    pub fn as_keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(name) => Some(name),
            _ => None,
        }
    }

    /// True for the given single keyword.
    #[must_use]
    pub fn is_keyword(&self, name: &str) -> bool {
        self.as_keyword() == Some(name)
    }

    /// The components of a list, or this value as a one-element slice.
    #[must_use]
    pub fn components(&self) -> &[Self] {
        match self {
            Self::List(items) => items,
            single => core::slice::from_ref(single),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(v) => write!(f, "{v}px"),
            Self::Percentage(v) => write!(f, "{v}%"),
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Dimension { value, unit } => write!(f, "{value}{unit}"),
            Self::Keyword(s) | Self::Other(s) => write!(f, "{s}"),
            Self::Auto => write!(f, "auto"),
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Hash(s) => write!(f, "#{s}"),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}
