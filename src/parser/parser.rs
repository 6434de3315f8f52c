//! The TomLang parser.
//!
//! Statements dispatch on their leading keyword through `stmt_lookup`.
//! Expressions are parsed by precedence climbing: `nud_lookup` holds the
//! handlers for tokens that begin an expression, `led_lookup` the handlers
//! for binary operators, and `binding_power_lookup` how tightly each
//! operator binds.

use std::{collections::HashMap, rc::Rc};

use log::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span, MK_TOKEN,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Cursor over a token stream that always ends in `EOF`.
///
/// The cursor can sit on `EOF` but never moves past it, so every accessor
/// is total.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    file: Rc<String>,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Wraps `tokens`, appending an `EOF` token when the stream lacks one.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = match tokens.last() {
                Some(token) => token.span.end.clone(),
                None => Position::new(0, 1, 1, Rc::clone(&file)),
            };
            let span = Span { start: end.clone(), end };
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
        }

        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.last_index())]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Kind of the token one past the cursor, `EOF` at the end.
    pub fn peek_kind(&self) -> TokenKind {
        match self.tokens.get(self.pos + 1) {
            Some(token) => token.kind,
            None => TokenKind::EOF,
        }
    }

    /// Consumes the current token and returns it.
    pub fn advance(&mut self) -> &Token {
        let consumed = self.pos.min(self.last_index());
        if self.pos < self.last_index() {
            self.pos += 1;
        }
        &self.tokens[consumed]
    }

    /// Consumes a token of kind `expected`, or fails with `error`.
    ///
    /// Without a custom error the failure names the expected token.
    pub fn expect_error(&mut self, expected: TokenKind, error: Option<Error>) -> Result<Token, Error> {
        if self.current_token_kind() == expected {
            return Ok(self.advance().clone());
        }

        Err(error.unwrap_or_else(|| self.expected(expected)))
    }

    pub fn expect(&mut self, expected: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected, None)
    }

    fn expected(&self, expected: TokenKind) -> Error {
        let found = self.current_token();
        let found = match found.kind {
            TokenKind::EOF => String::from("end of file"),
            _ => found.value.clone(),
        };

        Error::new(
            ErrorImpl::ExpectedToken {
                expected: expected.to_string(),
                found,
            },
            self.get_position(),
        )
    }

    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    /// Like [`Parser::unexpected`], with a note on what was wrong.
    pub fn unexpected_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers a binary operator.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a token that can begin an expression.
    ///
    /// `+` and `-` are both prefix and binary, so an existing binding
    /// power is left alone.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Primary);
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers the keyword that begins a statement.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.binding_power_lookup
            .entry(kind)
            .or_insert(BindingPower::Default);
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn get_position(&self) -> Position {
        self.current_token().span.start.clone()
    }

    /// End of the last consumed token, used to close statement spans.
    pub fn get_previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.end.clone(),
            None => Position::new(0, 1, 1, Rc::clone(&self.file)),
        }
    }
}

/// Parses a whole token stream into a [`Program`], stopping at the first
/// syntax error.
///
/// The parser is handed back as well so callers can inspect where it stopped.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(tokens, Rc::clone(&file));
    create_token_lookups(&mut parser);

    let start = Position::new(0, 1, 1, file);
    let mut body = vec![];

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => return (parser, Err(error)),
        }
    }

    debug!("parsed {} top-level statements", body.len());

    let span = Span {
        start,
        end: parser.get_position(),
    };

    (parser, Ok(Program { body, span }))
}
