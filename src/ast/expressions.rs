use crate::{lexer::tokens::Token, Span};

use super::ast::{Expr, ExprType, ExprWrapper};

// LITERALS

/// Integer literal. Out-of-range literals are rejected by the parser.
#[derive(Debug, Clone)]
pub struct IntExpr {
    pub value: i64,
    pub span: Span,
}

impl Expr for IntExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Int(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

impl Expr for FloatExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Float(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// String literal, contents verbatim without the quotes.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for StringExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::String(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Reference to a variable by name.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for SymbolExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Symbol(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

// COMPLEX

#[derive(Debug)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: Token,
    pub right: ExprWrapper,
    pub span: Span,
}

impl Expr for BinaryExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Binary(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Unary `+`, `-` or `!`.
#[derive(Debug)]
pub struct PrefixExpr {
    pub operator: Token,
    pub right_expr: ExprWrapper,
    pub span: Span,
}

impl Expr for PrefixExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Prefix(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// A parenthesised expression. Its span includes the parentheses.
#[derive(Debug)]
pub struct GroupingExpr {
    pub inner: ExprWrapper,
    pub span: Span,
}

impl Expr for GroupingExpr {
    fn get_expr_type(&self) -> ExprType<'_> {
        ExprType::Grouping(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
