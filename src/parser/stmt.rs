use crate::{
    ast::{
        ast::{Expr, ExprWrapper, StmtWrapper},
        statements::{
            AssignStmt, BlockStmt, BreakStmt, DoWhileStmt, ForStmt, IfStmt, PrintArg, PrintStmt,
            ReadStmt, SwitchLabel, SwitchSection, SwitchStmt, VarDeclStmt, WhileStmt,
        },
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::{parser::Parser, types::{is_type_keyword, parse_type}};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return stmt_fn(parser);
    }

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected());
    }

    let assignment = parse_assignment(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(assignment))
}

/// `name = expr`, without the trailing semicolon.
pub fn parse_assignment(parser: &mut Parser) -> Result<AssignStmt, Error> {
    let identifier = parser.expect(TokenKind::Identifier)?;
    let error = parser.unexpected_detailed("expected '=' after identifier");
    parser.expect_error(TokenKind::Assignment, Some(error))?;
    let value = parse_expr(parser, BindingPower::Default)?;

    Ok(AssignStmt {
        span: Span {
            start: identifier.span.start.clone(),
            end: value.get_span().end.clone(),
        },
        identifier: identifier.value,
        value,
    })
}

/// `type name (= expr)?`, without the trailing semicolon.
pub fn parse_var_decl(parser: &mut Parser) -> Result<VarDeclStmt, Error> {
    let start = parser.get_position();
    let declared_type = parse_type(parser)?;

    let error = parser.unexpected_detailed("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let assigned_value = if parser.current_token_kind() == TokenKind::Assignment {
        parser.advance();
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(VarDeclStmt {
        identifier,
        declared_type,
        assigned_value,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let declaration = parse_var_decl(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(declaration))
}

/// `( expr )` as used by every conditional construct.
fn parse_condition(parser: &mut Parser) -> Result<ExprWrapper, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let then_body = parse_block(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(StmtWrapper::new(IfStmt {
        condition,
        then_body,
        else_body,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_condition(parser)?;
    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(WhileStmt {
        condition,
        body,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let body = parse_block(parser)?;
    let error = parser.unexpected_detailed("expected 'while' after do block");
    parser.expect_error(TokenKind::While, Some(error))?;
    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(DoWhileStmt {
        body,
        condition,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenParen)?;

    let init = if is_type_keyword(parser.current_token_kind()) {
        Some(StmtWrapper::new(parse_var_decl(parser)?))
    } else if parser.current_token_kind() == TokenKind::Identifier {
        Some(StmtWrapper::new(parse_assignment(parser)?))
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon)?;

    let update = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_assignment(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;

    Ok(StmtWrapper::new(ForStmt {
        init,
        condition,
        update,
        body,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

fn parse_switch_label(parser: &mut Parser) -> Result<SwitchLabel, Error> {
    match parser.current_token_kind() {
        TokenKind::IntLiteral => {
            let token = parser.current_token().clone();
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(ErrorImpl::NumberParseError { token: token.value.clone() }, token.span.start.clone())
            })?;
            parser.advance();
            Ok(SwitchLabel::Int(value))
        }
        TokenKind::StringLiteral => Ok(SwitchLabel::String(parser.advance().value.clone())),
        TokenKind::Identifier => Ok(SwitchLabel::Symbol(parser.advance().value.clone())),
        _ => Err(parser.unexpected_detailed("expected integer, string or identifier as case label")),
    }
}

/// Statements of one switch section, up to the next label or the closing brace.
fn parse_section_body(parser: &mut Parser) -> Result<Vec<StmtWrapper>, Error> {
    let mut body = vec![];
    while !parser.current_token().is_one_of_many(&[
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::CloseCurly,
        TokenKind::EOF,
    ]) {
        body.push(parse_stmt(parser)?);
    }

    Ok(body)
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();

    let discriminant = parse_condition(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut sections = vec![];
    let mut default = None;

    loop {
        match parser.current_token_kind() {
            TokenKind::Case if default.is_some() => {
                return Err(parser.unexpected_detailed("'default' must be the last section of a switch"));
            }
            TokenKind::Case => {
                let section_start = parser.advance().span.start.clone();
                let label = parse_switch_label(parser)?;
                parser.expect(TokenKind::Colon)?;
                let body = parse_section_body(parser)?;

                sections.push(SwitchSection {
                    label,
                    body,
                    span: Span {
                        start: section_start,
                        end: parser.get_previous_end(),
                    },
                });
            }
            TokenKind::Default if default.is_none() => {
                parser.advance();
                parser.expect(TokenKind::Colon)?;
                default = Some(parse_section_body(parser)?);
            }
            TokenKind::CloseCurly => break,
            _ => return Err(parser.unexpected()),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(StmtWrapper::new(SwitchStmt {
        discriminant,
        sections,
        default,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let span = parser.advance().span.clone();
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(BreakStmt { span }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenParen)?;

    // A lone string literal prints as written; anything longer is an expression
    let argument = if parser.current_token_kind() == TokenKind::StringLiteral
        && parser.peek_kind() == TokenKind::CloseParen
    {
        PrintArg::Literal(parser.advance().value.clone())
    } else {
        PrintArg::Expr(parse_expr(parser, BindingPower::Default)?)
    };

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(PrintStmt {
        argument,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenParen)?;

    let error = parser.unexpected_detailed("scanf expects a variable name");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Semicolon)?;

    Ok(StmtWrapper::new(ReadStmt {
        identifier,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    }))
}

pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start.clone();

    let mut statements = Vec::new();
    while !parser.current_token().is_one_of_many(&[TokenKind::CloseCurly, TokenKind::EOF]) {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt {
        body: statements,
        span: Span {
            start,
            end: parser.get_previous_end(),
        },
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<StmtWrapper, Error> {
    Ok(StmtWrapper::new(parse_block(parser)?))
}
