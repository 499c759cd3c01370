//! Tokenizer and rule parser tests.

use telegraph_css::tokenizer::{HashType, NumericType};
use telegraph_css::{CSSParser, CSSToken, CSSTokenizer};

fn tokenize(input: &str) -> Vec<CSSToken> {
    let mut tokenizer = CSSTokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

fn without_whitespace(input: &str) -> Vec<CSSToken> {
    tokenize(input)
        .into_iter()
        .filter(|t| !t.is_whitespace() && !t.is_eof())
        .collect()
}

#[test]
fn test_declaration_tokens() {
    assert_eq!(
        without_whitespace("margin: 4px auto;"),
        vec![
            CSSToken::ident("margin"),
            CSSToken::Colon,
            CSSToken::dimension(4.0, "px"),
            CSSToken::ident("auto"),
            CSSToken::Semicolon,
        ]
    );
}

#[test]
fn test_numeric_type_flags() {
    assert_eq!(
        without_whitespace("7 7.5 1e2 .5 +3"),
        vec![
            CSSToken::integer(7),
            CSSToken::number(7.5),
            CSSToken::number(100.0),
            CSSToken::number(0.5),
            CSSToken::integer(3),
        ]
    );
}

#[test]
fn test_percentage_and_negative_dimension() {
    assert_eq!(
        without_whitespace("50% -2.5em"),
        vec![
            CSSToken::Percentage {
                value: 50.0,
                numeric_type: NumericType::Integer,
            },
            CSSToken::Dimension {
                value: -2.5,
                numeric_type: NumericType::Number,
                unit: "em".to_string(),
            },
        ]
    );
}

#[test]
fn test_hash_types() {
    assert_eq!(
        without_whitespace("#main #333"),
        vec![
            CSSToken::Hash {
                value: "main".to_string(),
                hash_type: HashType::Id,
            },
            CSSToken::Hash {
                value: "333".to_string(),
                hash_type: HashType::Unrestricted,
            },
        ]
    );
}

#[test]
fn test_strings_and_bad_strings() {
    assert_eq!(
        without_whitespace(r#""Courier New" 'it\'s'"#),
        vec![
            CSSToken::String("Courier New".to_string()),
            CSSToken::String("it's".to_string()),
        ]
    );
    assert_eq!(tokenize("\"open\nx")[0], CSSToken::BadString);
}

#[test]
fn test_functions_and_at_keywords() {
    assert_eq!(
        without_whitespace("@media rgb(1)"),
        vec![
            CSSToken::AtKeyword("media".to_string()),
            CSSToken::Function("rgb".to_string()),
            CSSToken::integer(1),
            CSSToken::RightParen,
        ]
    );
}

#[test]
fn test_stylesheet_rules_and_selector_groups() {
    let sheet = CSSParser::from_source(
        "/* receipt */ h1, .total > b { font-weight: bold; margin: 0 4px !important }",
    )
    .parse_stylesheet();
    assert_eq!(sheet.rules.len(), 1);

    let rule = &sheet.rules[0];
    assert_eq!(rule.selectors, vec!["h1".to_string(), ".total > b".to_string()]);
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations[0].name, "font-weight");
    assert!(!rule.declarations[0].important);
    assert_eq!(rule.declarations[1].name, "margin");
    assert!(rule.declarations[1].important);
}

#[test]
fn test_declaration_list_names_are_lowercased() {
    let declarations = CSSParser::from_source("COLOR: Red; ; width:10px").parse_declaration_list();
    assert_eq!(declarations.len(), 2);
    assert_eq!(declarations[0].name, "color");
    assert_eq!(declarations[1].name, "width");
}

#[test]
fn test_unclosed_rule_still_parses() {
    let sheet = CSSParser::from_source("p { color: red").parse_stylesheet();
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].declarations.len(), 1);
}
