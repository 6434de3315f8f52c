use std::fmt::Debug;

use crate::Span;

use super::{
    expressions::{
        BinaryExpr, FloatExpr, GroupingExpr, IntExpr, PrefixExpr, StringExpr, SymbolExpr,
    },
    statements::{
        AssignStmt, BlockStmt, BreakStmt, DoWhileStmt, ForStmt, IfStmt, PrintStmt, ReadStmt,
        SwitchStmt, VarDeclStmt, WhileStmt,
    },
};

/// Statement Types
///
/// Each variant borrows the concrete statement, so passes can `match` on
/// the kind and get the node in one step.
#[derive(Debug, Clone, Copy)]
pub enum StmtType<'a> {
    Block(&'a BlockStmt),
    VarDecl(&'a VarDeclStmt),
    Assign(&'a AssignStmt),
    If(&'a IfStmt),
    While(&'a WhileStmt),
    DoWhile(&'a DoWhileStmt),
    For(&'a ForStmt),
    Switch(&'a SwitchStmt),
    Break(&'a BreakStmt),
    Print(&'a PrintStmt),
    Read(&'a ReadStmt),
}

/// Statement Trait
///
/// Defines the behavior of all statement types in the AST.
pub trait Stmt: Debug {
    /// Returns the kind of the statement together with the node itself.
    fn get_stmt_type(&self) -> StmtType<'_>;
    /// Returns the span of the statement.
    fn get_span(&self) -> &Span;
    /// Line diagnostics for this statement are reported on.
    fn line(&self) -> u32 {
        self.get_span().line()
    }
}

/// Statement Wrapper
///
/// A wrapper that allows for any statement kind to be stored with helper methods
#[derive(Debug)]
pub struct StmtWrapper(Box<dyn Stmt>);

impl StmtWrapper {
    pub fn new<T: Stmt + 'static>(stmt: T) -> Self {
        StmtWrapper(Box::new(stmt))
    }
}

impl Stmt for StmtWrapper {
    fn get_stmt_type(&self) -> StmtType<'_> {
        self.0.get_stmt_type()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(Debug, Clone, Copy)]
pub enum ExprType<'a> {
    Int(&'a IntExpr),
    Float(&'a FloatExpr),
    String(&'a StringExpr),
    Symbol(&'a SymbolExpr),
    Binary(&'a BinaryExpr),
    Prefix(&'a PrefixExpr),
    Grouping(&'a GroupingExpr),
}

pub trait Expr: Debug {
    /// Returns the kind of the expression together with the node itself.
    fn get_expr_type(&self) -> ExprType<'_>;
    /// Returns the span of the expression.
    fn get_span(&self) -> &Span;
    fn line(&self) -> u32 {
        self.get_span().line()
    }
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }
}

impl Expr for ExprWrapper {
    fn get_expr_type(&self) -> ExprType<'_> {
        self.0.get_expr_type()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
}

/// A parsed source file.
///
/// The top level is the global scope itself, not a block inside it.
#[derive(Debug)]
pub struct Program {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, StmtWrapper> {
        self.body.iter()
    }
}
