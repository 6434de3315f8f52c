use std::slice::Iter;

use crate::Span;

use super::{
    ast::{ExprWrapper, Stmt, StmtType, StmtWrapper},
    types::Type,
};

#[derive(Debug)]
pub struct BlockStmt {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
}

impl Stmt for BlockStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Block(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `int x = 1;` or `string s;`
#[derive(Debug)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub declared_type: Type,
    pub assigned_value: Option<ExprWrapper>,
    pub span: Span,
}

impl Stmt for VarDeclStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::VarDecl(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub struct AssignStmt {
    pub identifier: String,
    pub value: ExprWrapper,
    pub span: Span,
}

impl Stmt for AssignStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Assign(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

impl Stmt for IfStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::If(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub struct WhileStmt {
    pub condition: ExprWrapper,
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for WhileStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::While(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub struct DoWhileStmt {
    pub body: BlockStmt,
    pub condition: ExprWrapper,
    pub span: Span,
}

impl Stmt for DoWhileStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::DoWhile(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `for (init; condition; update) body`
///
/// `init` is a declaration or an assignment, `update` is always an
/// assignment. A missing condition loops forever.
#[derive(Debug)]
pub struct ForStmt {
    pub init: Option<StmtWrapper>,
    pub condition: Option<ExprWrapper>,
    pub update: Option<AssignStmt>,
    pub body: BlockStmt,
    pub span: Span,
}

impl Stmt for ForStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::For(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchLabel {
    Int(i64),
    String(String),
    Symbol(String),
}

/// One `case label:` and the statements up to the next label.
#[derive(Debug)]
pub struct SwitchSection {
    pub label: SwitchLabel,
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

#[derive(Debug)]
pub struct SwitchStmt {
    pub discriminant: ExprWrapper,
    pub sections: Vec<SwitchSection>,
    pub default: Option<Vec<StmtWrapper>>,
    pub span: Span,
}

impl Stmt for SwitchStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Switch(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub struct BreakStmt {
    pub span: Span,
}

impl Stmt for BreakStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Break(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

#[derive(Debug)]
pub enum PrintArg {
    /// `printf("text")`: printed exactly as written.
    Literal(String),
    Expr(ExprWrapper),
}

#[derive(Debug)]
pub struct PrintStmt {
    pub argument: PrintArg,
    pub span: Span,
}

impl Stmt for PrintStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Print(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// `scanf(name)`: reads one line into an existing variable.
#[derive(Debug)]
pub struct ReadStmt {
    pub identifier: String,
    pub span: Span,
}

impl Stmt for ReadStmt {
    fn get_stmt_type(&self) -> StmtType<'_> {
        StmtType::Read(self)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Kind of construct a `break` leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakTarget {
    Loop,
    Switch,
}
