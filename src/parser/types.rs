//! Type parsing.
//!
//! Only the three scalar keywords `int`, `float` and `string` can appear
//! in a declaration; `bool` has no syntax.

use crate::{ast::types::Type, errors::errors::Error, lexer::tokens::TokenKind};

use super::parser::Parser;

pub fn is_type_keyword(kind: TokenKind) -> bool {
    Type::from_keyword(kind).is_some()
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    match Type::from_keyword(parser.current_token_kind()) {
        Some(declared) => {
            parser.advance();
            Ok(declared)
        }
        None => Err(parser.unexpected_detailed("expected one of int, float or string")),
    }
}
