//! CSS Token types per [§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization).
//!
//! This is the subset of the CSS Syntax Level 3 token set that style rules and
//! `style` attributes need. `url(...)` is surfaced as an ordinary function
//! token; nothing in the layout core consumes URLs.

use core::fmt;

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<hash-token>` with the type flag set to 'id'... or 'unrestricted'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashType {
    /// The hash token's value is a valid identifier.
    Id,
    /// The hash token's value is not a valid identifier (e.g. `#333`).
    Unrestricted,
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#token-diagrams)
///
/// "A `<number-token>` has a type flag set to either 'integer' or 'number'."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericType {
    /// Written without a decimal point or exponent.
    Integer,
    /// Written with a decimal point or exponent.
    Number,
}

/// A single CSS token.
#[derive(Debug, Clone, PartialEq)]
pub enum CSSToken {
    /// `<ident-token>`
    Ident(String),
    /// `<function-token>`: the name, the `(` already consumed.
    Function(String),
    /// `<at-keyword-token>`: the name without `@`.
    AtKeyword(String),
    /// `<hash-token>`
    Hash {
        /// The value without the leading `#`.
        value: String,
        /// Whether the value is a valid identifier.
        hash_type: HashType,
    },
    /// `<string-token>`
    String(String),
    /// `<bad-string-token>`: an unterminated string broken by a newline.
    BadString,
    /// `<delim-token>`
    Delim(char),
    /// `<number-token>`
    Number {
        /// The numeric value.
        value: f64,
        /// Integer or number type flag.
        numeric_type: NumericType,
    },
    /// `<percentage-token>`
    Percentage {
        /// The numeric value (50 for `50%`).
        value: f64,
        /// Integer or number type flag.
        numeric_type: NumericType,
    },
    /// `<dimension-token>`
    Dimension {
        /// The numeric value.
        value: f64,
        /// Integer or number type flag.
        numeric_type: NumericType,
        /// The unit, lower-cased.
        unit: String,
    },
    /// `<whitespace-token>`
    Whitespace,
    /// `<CDO-token>` (`<!--`)
    CDO,
    /// `<CDC-token>` (`-->`)
    CDC,
    /// `<colon-token>`
    Colon,
    /// `<semicolon-token>`
    Semicolon,
    /// `<comma-token>`
    Comma,
    /// `<[-token>`
    LeftBracket,
    /// `<]-token>`
    RightBracket,
    /// `<(-token>`
    LeftParen,
    /// `<)-token>`
    RightParen,
    /// `<{-token>`
    LeftBrace,
    /// `<}-token>`
    RightBrace,
    /// End of input.
    EOF,
}

impl CSSToken {
    /// Create a new ident token.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Ident(value.into())
    }

    /// Create an integer number token.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn integer(value: i64) -> Self {
        Self::Number {
            value: value as f64,
            numeric_type: NumericType::Integer,
        }
    }

    /// Create a non-integer number token.
    #[must_use]
    pub const fn number(value: f64) -> Self {
        Self::Number {
            value,
            numeric_type: NumericType::Number,
        }
    }

    /// Create a dimension token, inferring the type flag from the value.
    #[must_use]
    pub fn dimension(value: f64, unit: impl Into<String>) -> Self {
        Self::Dimension {
            value,
            numeric_type: if value.fract() == 0.0 {
                NumericType::Integer
            } else {
                NumericType::Number
            },
            unit: unit.into(),
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self, Self::EOF)
    }

    /// Returns true if this is a whitespace token.
    #[must_use]
    pub const fn is_whitespace(&self) -> bool {
        matches!(self, Self::Whitespace)
    }
}

impl fmt::Display for CSSToken {
    /// Serializes the token back to CSS source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(v) => write!(f, "{v}"),
            Self::Function(v) => write!(f, "{v}("),
            Self::AtKeyword(v) => write!(f, "@{v}"),
            Self::Hash { value, .. } => write!(f, "#{value}"),
            Self::String(v) => write!(f, "\"{v}\""),
            Self::BadString | Self::EOF => Ok(()),
            Self::Delim(c) => write!(f, "{c}"),
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Percentage { value, .. } => write!(f, "{value}%"),
            Self::Dimension { value, unit, .. } => write!(f, "{value}{unit}"),
            Self::Whitespace => write!(f, " "),
            Self::CDO => write!(f, "<!--"),
            Self::CDC => write!(f, "-->"),
            Self::Colon => write!(f, ":"),
            Self::Semicolon => write!(f, ";"),
            Self::Comma => write!(f, ","),
            Self::LeftBracket => write!(f, "["),
            Self::RightBracket => write!(f, "]"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::LeftBrace => write!(f, "{{"),
            Self::RightBrace => write!(f, "}}"),
        }
    }
}
