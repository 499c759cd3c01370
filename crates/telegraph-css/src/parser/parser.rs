//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//! Only style rules survive; at-rules are consumed and dropped with a warning.

use core::fmt;

use telegraph_common::warning::warn_once;

use crate::tokenizer::{CSSToken, CSSTokenizer};

static EOF: CSSToken = CSSToken::EOF;

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`) before property-specific parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, ASCII lower-cased.
    pub name: String,
    /// The property value as component values, without `!important`.
    pub value: Vec<ComponentValue>,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

/// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(CSSToken),
    /// A function with its contents.
    Function {
        /// The function name.
        name: String,
        /// The function arguments.
        value: Vec<ComponentValue>,
    },
    /// A simple block.
    Block {
        /// The opening token character.
        token: char,
        /// The block contents.
        value: Vec<ComponentValue>,
    },
}

impl fmt::Display for ComponentValue {
    /// Serializes the component value back to CSS source text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{token}"),
            Self::Function { name, value } => {
                write!(f, "{name}(")?;
                for component in value {
                    write!(f, "{component}")?;
                }
                write!(f, ")")
            }
            Self::Block { token, value } => {
                write!(f, "{token}")?;
                for component in value {
                    write!(f, "{component}")?;
                }
                let closing = match token {
                    '{' => '}',
                    '[' => ']',
                    _ => ')',
                };
                write!(f, "{closing}")
            }
        }
    }
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A style rule: a selector group and its declaration block.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    /// Raw text of each selector in the group, split on top-level commas.
    pub selectors: Vec<String>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    /// Style rules in source order.
    pub rules: Vec<StyleRule>,
}

/// CSS parser over a token list ending in [`CSSToken::EOF`].
pub struct CSSParser {
    tokens: Vec<CSSToken>,
    position: usize,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub const fn new(tokens: Vec<CSSToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Tokenize `source` and create a parser for it.
    #[must_use]
    pub fn from_source(source: &str) -> Self {
        let mut tokenizer = CSSTokenizer::new(source);
        tokenizer.run();
        Self::new(tokenizer.into_tokens())
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        Stylesheet {
            rules: self.consume_list_of_rules(),
        }
    }

    /// [§ 5.3.8 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or a rule's block contents.
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        self.consume_list_of_declarations()
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    fn consume_list_of_rules(&mut self) -> Vec<StyleRule> {
        let mut rules = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>: Do nothing."
                // "<CDO-token> <CDC-token>: If the top-level flag is set, do nothing."
                CSSToken::Whitespace | CSSToken::CDO | CSSToken::CDC => self.position += 1,
                CSSToken::EOF => return rules,
                CSSToken::AtKeyword(name) => {
                    warn_once("CSS", &format!("ignoring unsupported @{name} rule"));
                    self.skip_at_rule();
                }
                _ => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(rule);
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    ///
    /// Consumes the at-rule's prelude and optional block without keeping them.
    fn skip_at_rule(&mut self) {
        self.position += 1;
        loop {
            match self.peek() {
                CSSToken::Semicolon => {
                    self.position += 1;
                    return;
                }
                CSSToken::EOF => return,
                CSSToken::LeftBrace => {
                    self.position += 1;
                    let _ = self.consume_block_tokens(&CSSToken::RightBrace);
                    return;
                }
                _ => {
                    let _ = self.consume_component_value();
                }
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        let mut prelude: Vec<CSSToken> = Vec::new();

        loop {
            match self.peek() {
                // "This is a parse error. Return nothing."
                CSSToken::EOF => return None,
                CSSToken::LeftBrace => {
                    self.position += 1;
                    let mut block = self.consume_block_tokens(&CSSToken::RightBrace);
                    block.push(CSSToken::EOF);
                    let declarations = Self::new(block).consume_list_of_declarations();
                    return Some(StyleRule {
                        selectors: split_selector_group(&prelude),
                        declarations,
                    });
                }
                token => {
                    prelude.push(token.clone());
                    self.position += 1;
                }
            }
        }
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                CSSToken::Whitespace | CSSToken::Semicolon => self.position += 1,
                CSSToken::EOF => return declarations,
                CSSToken::Ident(_) => {
                    // "Consume a component value and append it to the temporary
                    // list... as long as the next input token is anything other
                    // than a <semicolon-token> or <EOF-token>."
                    let mut temp = Vec::new();
                    while !matches!(self.peek(), CSSToken::Semicolon | CSSToken::EOF) {
                        temp.push(self.consume_component_value());
                    }
                    if let Some(declaration) = consume_declaration(temp) {
                        declarations.push(declaration);
                    }
                }
                _ => {
                    // "This is a parse error. ... consume a component value and
                    // throw away the returned value."
                    while !matches!(self.peek(), CSSToken::Semicolon | CSSToken::EOF) {
                        let _ = self.consume_component_value();
                    }
                }
            }
        }
    }

    /// [§ 5.4.7 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    fn consume_component_value(&mut self) -> ComponentValue {
        let token = self.peek().clone();
        self.position += 1;
        match token {
            CSSToken::LeftBrace => self.consume_simple_block('{', &CSSToken::RightBrace),
            CSSToken::LeftBracket => self.consume_simple_block('[', &CSSToken::RightBracket),
            CSSToken::LeftParen => self.consume_simple_block('(', &CSSToken::RightParen),
            CSSToken::Function(name) => {
                let mut value = Vec::new();
                loop {
                    match self.peek() {
                        CSSToken::RightParen => {
                            self.position += 1;
                            break;
                        }
                        CSSToken::EOF => break,
                        _ => value.push(self.consume_component_value()),
                    }
                }
                ComponentValue::Function { name, value }
            }
            token => ComponentValue::Token(token),
        }
    }

    /// [§ 5.4.8 Consume a simple block](https://www.w3.org/TR/css-syntax-3/#consume-simple-block)
    fn consume_simple_block(&mut self, token: char, ending: &CSSToken) -> ComponentValue {
        let mut value = Vec::new();
        loop {
            let next = self.peek();
            if next == ending {
                self.position += 1;
                break;
            }
            if next.is_eof() {
                break;
            }
            value.push(self.consume_component_value());
        }
        ComponentValue::Block { token, value }
    }

    /// Collect the raw tokens of a block up to its matching `ending` token,
    /// which is consumed but not returned.
    fn consume_block_tokens(&mut self, ending: &CSSToken) -> Vec<CSSToken> {
        let mut depth = 0usize;
        let mut tokens = Vec::new();
        loop {
            let token = self.peek().clone();
            match token {
                CSSToken::EOF => return tokens,
                CSSToken::LeftBrace | CSSToken::LeftBracket | CSSToken::LeftParen => depth += 1,
                CSSToken::Function(_) => depth += 1,
                ref t if t == ending && depth == 0 => {
                    self.position += 1;
                    return tokens;
                }
                CSSToken::RightBrace | CSSToken::RightBracket | CSSToken::RightParen => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            tokens.push(token);
            self.position += 1;
        }
    }

    fn peek(&self) -> &CSSToken {
        self.tokens.get(self.position).unwrap_or(&EOF)
    }
}

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
fn consume_declaration(values: Vec<ComponentValue>) -> Option<Declaration> {
    let mut iter = values.into_iter();
    let name = match iter.next() {
        Some(ComponentValue::Token(CSSToken::Ident(name))) => name.to_ascii_lowercase(),
        _ => return None,
    };

    // "While the next input token is a <whitespace-token>, consume the next input token."
    let mut rest = iter.skip_while(is_whitespace_value);

    // "If the next input token is anything other than a <colon-token>, this is
    // a parse error. Return nothing."
    if !matches!(rest.next(), Some(ComponentValue::Token(CSSToken::Colon))) {
        return None;
    }

    let mut value: Vec<ComponentValue> = rest.skip_while(is_whitespace_value).collect();
    let important = check_important(&mut value);
    trim_trailing_whitespace(&mut value);

    Some(Declaration {
        name,
        value,
        important,
    })
}

/// "If the last two non-<whitespace-token>s in the declaration's value are a
/// <delim-token> with the value "!" followed by an <ident-token> with a value
/// that is an ASCII case-insensitive match for "important", remove them from
/// the declaration's value and set the declaration's important flag to true."
fn check_important(value: &mut Vec<ComponentValue>) -> bool {
    trim_trailing_whitespace(value);
    let Some(ComponentValue::Token(CSSToken::Ident(last))) = value.last() else {
        return false;
    };
    if !last.eq_ignore_ascii_case("important") {
        return false;
    }

    let mut bang = value.len() - 1;
    while bang > 0 && is_whitespace_value(&value[bang - 1]) {
        bang -= 1;
    }
    if bang == 0 || value[bang - 1] != ComponentValue::Token(CSSToken::Delim('!')) {
        return false;
    }
    value.truncate(bang - 1);
    true
}

fn trim_trailing_whitespace(value: &mut Vec<ComponentValue>) {
    while value.last().is_some_and(is_whitespace_value) {
        let _ = value.pop();
    }
}

const fn is_whitespace_value(value: &ComponentValue) -> bool {
    matches!(value, ComponentValue::Token(CSSToken::Whitespace))
}

/// Split a rule prelude into selector texts on commas outside brackets and
/// parentheses. Empty members are kept so the selector parser can reject them.
fn split_selector_group(prelude: &[CSSToken]) -> Vec<String> {
    let mut selectors = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for token in prelude {
        match token {
            CSSToken::Comma if depth == 0 => {
                selectors.push(current.trim().to_string());
                current.clear();
                continue;
            }
            CSSToken::LeftBracket | CSSToken::LeftParen | CSSToken::Function(_) => depth += 1,
            CSSToken::RightBracket | CSSToken::RightParen => depth = depth.saturating_sub(1),
            _ => {}
        }
        current.push_str(&token.to_string());
    }
    selectors.push(current.trim().to_string());
    selectors
}
