//! Display classification.
//!
//! [§ 9.2.4 The 'display' property](https://www.w3.org/TR/CSS21/visuren.html#display-prop)
//!
//! Only three outcomes matter to box generation. Every value other than
//! `none` and `block` (including `list-item`, `inline-block`, malformed and
//! multi-token values) generates an inline box.

use serde::Serialize;

use super::value::Value;

/// How an element takes part in box generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Display {
    /// "This value causes an element to not appear in the formatting structure."
    None,
    /// "This value causes an element to generate one or more inline boxes."
    Inline,
    /// "This value causes an element to generate a block box."
    Block,
}

impl Display {
    /// Classify a resolved `display` value.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        match value.as_keyword() {
            Some("none") => Self::None,
            Some("block") => Self::Block,
            _ => Self::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anything_unrecognised_is_inline() {
        assert_eq!(Display::from_value(&Value::keyword("block")), Display::Block);
        assert_eq!(Display::from_value(&Value::keyword("none")), Display::None);
        assert_eq!(Display::from_value(&Value::keyword("list-item")), Display::Inline);
        assert_eq!(
            Display::from_value(&Value::List(vec![Value::keyword("block"), Value::keyword("flow")])),
            Display::Inline
        );
        assert_eq!(Display::from_value(&Value::Length(3.0)), Display::Inline);
    }
}
