//! CSS Selector parsing and matching per [Selectors Level 4](https://www.w3.org/TR/selectors-4/).
//!
//! Selectors are parsed from the raw text of one member of a selector group,
//! so a single bad selector can be dropped without losing its siblings.

use std::iter::Peekable;

use telegraph_dom::{DomTree, ElementData, NodeId};
use thiserror::Error;

use crate::tokenizer::{CSSToken, CSSTokenizer, HashType};

/// [§ 3 Selector Syntax and Structure](https://www.w3.org/TR/selectors-4/#syntax)
///
/// A simple selector: one condition on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    Type(String),
    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    Class(String),
    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    Id(String),
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,
    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]`
    Exists(String),
    /// `[attr=value]`
    Equals(String, String),
    /// `[attr~=value]`: one of the whitespace-separated words is `value`.
    Includes(String, String),
    /// `[attr|=value]`: exactly `value`, or `value` followed by `-`.
    DashMatch(String, String),
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors that must all match.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `A B`: B is an arbitrary descendant of A.
    Descendant,
    /// `A > B`: B is a child of A.
    Child,
    /// `A + B`: B immediately follows A.
    NextSibling,
    /// `A ~ B`: B follows A, not necessarily immediately.
    SubsequentSibling,
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// Stored right to left: `A > B C` has subject `C` and combinators
/// `[(Descendant, B), (Child, A)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    /// The rightmost compound selector.
    pub subject: CompoundSelector,
    /// (combinator, compound) pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
///
/// (ids, classes and attributes, types), compared component by component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// A parsed selector ready for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSelector {
    /// The complex selector.
    pub complex: ComplexSelector,
    /// The specificity of this selector.
    pub specificity: Specificity,
}

/// Why a selector could not be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// Nothing but whitespace.
    #[error("empty selector")]
    Empty,
    /// A token that cannot appear at this point.
    #[error("unexpected '{0}' in selector")]
    UnexpectedToken(String),
    /// A combinator with no compound selector on one side.
    #[error("combinator without a selector on both sides")]
    DanglingCombinator,
    /// An attribute selector that is not closed or has no name.
    #[error("malformed attribute selector")]
    MalformedAttribute,
    /// Pseudo-classes and pseudo-elements never match a static document here.
    #[error("unsupported pseudo-class or pseudo-element ':{0}'")]
    UnsupportedPseudo(String),
}

impl ParsedSelector {
    /// [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
    ///
    /// Match against the element at `node_id`, walking the tree right to left
    /// through the combinator chain.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &DomTree, node_id: NodeId) -> bool {
        if !compound_matches(&self.complex.subject, tree, node_id) {
            return false;
        }

        let mut current = node_id;
        for (combinator, compound) in &self.complex.combinators {
            let next = match combinator {
                Combinator::Descendant => tree
                    .ancestors(current)
                    .find(|&id| compound_matches(compound, tree, id)),
                Combinator::Child => tree
                    .parent(current)
                    .filter(|&id| compound_matches(compound, tree, id)),
                Combinator::NextSibling => tree
                    .preceding_siblings(current)
                    .find(|&id| tree.as_element(id).is_some())
                    .filter(|&id| compound_matches(compound, tree, id)),
                Combinator::SubsequentSibling => tree
                    .preceding_siblings(current)
                    .find(|&id| compound_matches(compound, tree, id)),
            };
            match next {
                Some(id) => current = id,
                None => return false,
            }
        }

        true
    }
}

fn compound_matches(compound: &CompoundSelector, tree: &DomTree, node_id: NodeId) -> bool {
    tree.as_element(node_id).is_some_and(|element| {
        compound
            .simple_selectors
            .iter()
            .all(|simple| simple.matches(element))
    })
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Class(class_name) => element.has_class(class_name),
            Self::Id(id) => element.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::Attribute(selector) => {
                let attr = |name: &String| element.attribute(name);
                match selector {
                    AttributeSelector::Exists(name) => attr(name).is_some(),
                    AttributeSelector::Equals(name, val) => attr(name).is_some_and(|v| v == val),
                    AttributeSelector::Includes(name, val) => attr(name)
                        .is_some_and(|v| v.split_ascii_whitespace().any(|w| w == val)),
                    AttributeSelector::DashMatch(name, val) => attr(name).is_some_and(|v| {
                        v == val || v.strip_prefix(val.as_str()).is_some_and(|r| r.starts_with('-'))
                    }),
                }
            }
        }
    }
}

impl ComplexSelector {
    /// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
    #[must_use]
    pub fn calculate_specificity(&self) -> Specificity {
        let compounds =
            core::iter::once(&self.subject).chain(self.combinators.iter().map(|(_, c)| c));
        let mut spec = Specificity::default();
        for simple in compounds.flat_map(|c| &c.simple_selectors) {
            match simple {
                // "count the number of ID selectors in the selector (= A)"
                SimpleSelector::Id(_) => spec.0 += 1,
                // "count the number of class selectors, attributes selectors,
                // and pseudo-classes in the selector (= B)"
                SimpleSelector::Class(_) | SimpleSelector::Attribute(_) => spec.1 += 1,
                // "count the number of type selectors and pseudo-elements
                // in the selector (= C)"
                SimpleSelector::Type(_) => spec.2 += 1,
                // "ignore the universal selector"
                SimpleSelector::Universal => {}
            }
        }
        spec
    }
}

/// Parse one selector (not a comma-separated group).
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Supports type, universal, class, id and attribute selectors combined into
/// compounds, joined by descendant, child, next-sibling and
/// subsequent-sibling combinators.
///
/// # Errors
///
/// Returns a [`SelectorError`] for empty input, stray tokens, dangling
/// combinators, malformed attribute selectors and any pseudo-class or
/// pseudo-element.
pub fn parse_selector(raw: &str) -> Result<ParsedSelector, SelectorError> {
    let mut tokenizer = CSSTokenizer::new(raw);
    tokenizer.run();
    let mut tokens = tokenizer
        .into_tokens()
        .into_iter()
        .filter(|t| !t.is_eof())
        .peekable();

    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators: Vec<Combinator> = Vec::new();
    let mut current: Vec<SimpleSelector> = Vec::new();
    let mut pending: Option<Combinator> = None;

    while let Some(token) = tokens.next() {
        let simple = match token {
            CSSToken::Whitespace => {
                if !current.is_empty() {
                    flush(&mut current, &mut compounds);
                    pending = Some(Combinator::Descendant);
                }
                continue;
            }
            CSSToken::Delim(c @ ('>' | '+' | '~')) => {
                if !current.is_empty() {
                    flush(&mut current, &mut compounds);
                }
                let explicit_pending = pending.is_some_and(|p| p != Combinator::Descendant);
                if compounds.is_empty() || explicit_pending {
                    return Err(SelectorError::DanglingCombinator);
                }
                pending = Some(match c {
                    '>' => Combinator::Child,
                    '+' => Combinator::NextSibling,
                    _ => Combinator::SubsequentSibling,
                });
                continue;
            }
            // A type selector can only lead its compound.
            CSSToken::Ident(name) if current.is_empty() => {
                SimpleSelector::Type(name.to_ascii_lowercase())
            }
            CSSToken::Delim('*') if current.is_empty() => SimpleSelector::Universal,
            CSSToken::Delim('.') => match tokens.next() {
                Some(CSSToken::Ident(class)) => SimpleSelector::Class(class),
                other => return Err(unexpected(other)),
            },
            CSSToken::Hash {
                value,
                hash_type: HashType::Id,
            } => SimpleSelector::Id(value),
            CSSToken::LeftBracket => SimpleSelector::Attribute(parse_attribute(&mut tokens)?),
            CSSToken::Colon => {
                let name = match tokens.next() {
                    Some(CSSToken::Colon) => tokens.next(),
                    other => other,
                };
                return Err(SelectorError::UnsupportedPseudo(
                    name.as_ref().map_or_else(String::new, ToString::to_string),
                ));
            }
            other => return Err(unexpected(Some(other))),
        };

        if let Some(combinator) = pending.take() {
            combinators.push(combinator);
        }
        current.push(simple);
    }

    if !current.is_empty() {
        flush(&mut current, &mut compounds);
    }
    if pending.is_some_and(|p| p != Combinator::Descendant) {
        return Err(SelectorError::DanglingCombinator);
    }

    // Reverse so the subject comes first and combinators run right to left.
    let mut compounds = compounds.into_iter().rev();
    let subject = compounds.next().ok_or(SelectorError::Empty)?;
    let complex = ComplexSelector {
        subject,
        combinators: combinators.into_iter().rev().zip(compounds).collect(),
    };
    let specificity = complex.calculate_specificity();

    Ok(ParsedSelector {
        complex,
        specificity,
    })
}

fn flush(current: &mut Vec<SimpleSelector>, compounds: &mut Vec<CompoundSelector>) {
    compounds.push(CompoundSelector {
        simple_selectors: core::mem::take(current),
    });
}

fn unexpected(token: Option<CSSToken>) -> SelectorError {
    SelectorError::UnexpectedToken(token.as_ref().map_or_else(String::new, ToString::to_string))
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
///
/// Parses everything after the opening `[`, including the closing `]`.
fn parse_attribute<I>(tokens: &mut Peekable<I>) -> Result<AttributeSelector, SelectorError>
where
    I: Iterator<Item = CSSToken>,
{
    skip_whitespace(tokens);
    let Some(CSSToken::Ident(name)) = tokens.next() else {
        return Err(SelectorError::MalformedAttribute);
    };
    let name = name.to_ascii_lowercase();
    skip_whitespace(tokens);

    let operator = match tokens.next() {
        Some(CSSToken::RightBracket) => return Ok(AttributeSelector::Exists(name)),
        Some(CSSToken::Delim('=')) => '=',
        Some(CSSToken::Delim(op @ ('~' | '|'))) => {
            if tokens.next() != Some(CSSToken::Delim('=')) {
                return Err(SelectorError::MalformedAttribute);
            }
            op
        }
        _ => return Err(SelectorError::MalformedAttribute),
    };

    skip_whitespace(tokens);
    let value = match tokens.next() {
        Some(CSSToken::Ident(v) | CSSToken::String(v)) => v,
        _ => return Err(SelectorError::MalformedAttribute),
    };
    skip_whitespace(tokens);
    if tokens.next() != Some(CSSToken::RightBracket) {
        return Err(SelectorError::MalformedAttribute);
    }

    Ok(match operator {
        '~' => AttributeSelector::Includes(name, value),
        '|' => AttributeSelector::DashMatch(name, value),
        _ => AttributeSelector::Equals(name, value),
    })
}

fn skip_whitespace<I>(tokens: &mut Peekable<I>)
where
    I: Iterator<Item = CSSToken>,
{
    while tokens.next_if(CSSToken::is_whitespace).is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_specificity() {
        let sel = parse_selector("p.note#main").unwrap();
        assert_eq!(sel.specificity, Specificity(1, 1, 1));
        assert!(sel.complex.combinators.is_empty());
        assert_eq!(sel.complex.subject.simple_selectors.len(), 3);
    }

    #[test]
    fn test_combinators_are_stored_right_to_left() {
        let sel = parse_selector("div > ul li").unwrap();
        assert_eq!(
            sel.complex.subject.simple_selectors,
            vec![SimpleSelector::Type("li".to_string())]
        );
        let kinds: Vec<Combinator> = sel.complex.combinators.iter().map(|(c, _)| *c).collect();
        assert_eq!(kinds, vec![Combinator::Descendant, Combinator::Child]);
        assert_eq!(sel.specificity, Specificity(0, 0, 3));
    }

    #[test]
    fn test_attribute_forms() {
        let sel = parse_selector("a[ rel ~= \"next\" ]").unwrap();
        assert_eq!(
            sel.complex.subject.simple_selectors[1],
            SimpleSelector::Attribute(AttributeSelector::Includes(
                "rel".to_string(),
                "next".to_string()
            ))
        );
        assert_eq!(sel.specificity, Specificity(0, 1, 1));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_selector("   "), Err(SelectorError::Empty));
        assert_eq!(parse_selector("> p"), Err(SelectorError::DanglingCombinator));
        assert_eq!(parse_selector("p >"), Err(SelectorError::DanglingCombinator));
        assert_eq!(parse_selector("p > > a"), Err(SelectorError::DanglingCombinator));
        assert_eq!(parse_selector("[href"), Err(SelectorError::MalformedAttribute));
        assert_eq!(
            parse_selector("a:hover"),
            Err(SelectorError::UnsupportedPseudo("hover".to_string()))
        );
        assert!(matches!(
            parse_selector("p.1"),
            Err(SelectorError::UnexpectedToken(_))
        ));
    }
}
