//! Unit tests for the lexer module.

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.tl".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("int float string if else while do for switch case default break printf scanf");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::String,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::For,
            TokenKind::Switch,
            TokenKind::Case,
            TokenKind::Default,
            TokenKind::Break,
            TokenKind::Printf,
            TokenKind::Scanf,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore integer", Some("test.tl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "baz_123");
    assert_eq!(tokens[2].value, "_underscore");
    // Keyword prefixes do not split identifiers
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "integer");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5", Some("test.tl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].value, "100.5");
}

#[test]
fn test_tokenize_strings_verbatim() {
    let tokens = tokenize(r#""hello" "two words" "back\nslash""#, Some("test.tl".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "two words");
    assert_eq!(tokens[2].value, "back\\nslash");
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("+ - * / == != < > <= >= = && || !");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    let tokens = kinds("int x = 5; // trailing\n/* block\n comment */ x = 6;");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::IntLiteral,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_tracks_lines() {
    let tokens = tokenize("int x;\n\n  x = 1;", Some("test.tl".to_string())).unwrap();

    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[3].value, "x");
    assert_eq!(tokens[3].line(), 3);
    assert_eq!(tokens[3].span.start.column, 3);
}

#[test]
fn test_tokenize_unrecognised() {
    let error = tokenize("int x = 5 @ 3;", Some("test.tl".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().offset, 10);
}

#[test]
fn test_tokenize_unterminated_string() {
    let error = tokenize("string s = \"open;\nprintf(s);", Some("test.tl".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_position().line, 1);
    assert_eq!(error.get_position().column, 12);
    assert_eq!(error.get_error().to_string(), "unterminated string literal: \"\\\"open;\"");
}

#[test]
fn test_token_kind_describes_itself() {
    assert_eq!(TokenKind::Semicolon.to_string(), "`;`");
    assert_eq!(TokenKind::EOF.to_string(), "end of file");
}
