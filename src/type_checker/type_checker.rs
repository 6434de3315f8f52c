use log::{debug, info};

use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper, Program, Stmt, StmtType, StmtWrapper},
        expressions::{BinaryExpr, PrefixExpr},
        statements::{
            AssignStmt, BlockStmt, BreakTarget, PrintArg, SwitchLabel, SwitchStmt, VarDeclStmt,
        },
        types::{assignable, case_compatible, promote, Type},
    },
    errors::diagnostics::{Diagnostic, DiagnosticKind},
    lexer::tokens::TokenKind,
    scope::scope::ScopeStack,
};

/// State of one static pass: the declared type of every visible name,
/// the diagnostics found so far and the enclosing breakable constructs.
#[derive(Debug, Default)]
pub struct SemanticChecker {
    pub scopes: ScopeStack<Type>,
    pub diagnostics: Vec<Diagnostic>,
    pub breakable: Vec<BreakTarget>,
}

impl SemanticChecker {
    pub fn new() -> Self {
        SemanticChecker::default()
    }

    pub fn report(&mut self, line: u32, kind: DiagnosticKind) {
        debug!("line {}: {}", line, kind);
        self.diagnostics.push(Diagnostic::new(line, kind));
    }

    /// Checks the whole program and returns every diagnostic, in the order found.
    pub fn check(mut self, program: &Program) -> Vec<Diagnostic> {
        info!("checking {} top-level statements", program.body.len());

        for stmt in program.iter() {
            check_stmt(&mut self, stmt);
        }

        info!("check finished with {} diagnostic(s)", self.diagnostics.len());
        self.diagnostics
    }
}

pub fn check_stmt(checker: &mut SemanticChecker, ast: &StmtWrapper) {
    match ast.get_stmt_type() {
        StmtType::Block(block) => check_block(checker, block),
        StmtType::VarDecl(decl) => check_var_decl(checker, decl),
        StmtType::Assign(assign) => check_assignment(checker, assign),
        StmtType::If(if_stmt) => {
            check_condition(checker, &if_stmt.condition, "if", if_stmt.line());
            check_block(checker, &if_stmt.then_body);
            if let Some(else_body) = &if_stmt.else_body {
                check_block(checker, else_body);
            }
        }
        StmtType::While(while_stmt) => {
            check_condition(checker, &while_stmt.condition, "while", while_stmt.line());
            check_loop_body(checker, &while_stmt.body);
        }
        StmtType::DoWhile(do_while) => {
            check_loop_body(checker, &do_while.body);
            check_condition(checker, &do_while.condition, "do-while", do_while.line());
        }
        StmtType::For(for_stmt) => {
            // The initializer's variable lives in a scope around the whole loop
            checker.scopes.push_scope();

            if let Some(init) = &for_stmt.init {
                check_stmt(checker, init);
            }
            if let Some(condition) = &for_stmt.condition {
                check_condition(checker, condition, "for", for_stmt.line());
            }
            if let Some(update) = &for_stmt.update {
                check_assignment(checker, update);
            }
            check_loop_body(checker, &for_stmt.body);

            checker.scopes.pop_scope();
        }
        StmtType::Switch(switch) => check_switch(checker, switch),
        StmtType::Break(break_stmt) => {
            if checker.breakable.is_empty() {
                checker.report(break_stmt.line(), DiagnosticKind::BreakOutsideLoopOrSwitch);
            }
        }
        StmtType::Print(print) => {
            if let PrintArg::Expr(expr) = &print.argument {
                check_expr(checker, expr);
            }
        }
        StmtType::Read(read) => {
            if !checker.scopes.contains(&read.identifier) {
                checker.report(
                    read.line(),
                    DiagnosticKind::UndeclaredVariable { name: read.identifier.clone() },
                );
            }
        }
    }
}

pub fn check_block(checker: &mut SemanticChecker, block: &BlockStmt) {
    checker.scopes.push_scope();
    for stmt in block.iter() {
        check_stmt(checker, stmt);
    }
    checker.scopes.pop_scope();
}

fn check_loop_body(checker: &mut SemanticChecker, body: &BlockStmt) {
    checker.breakable.push(BreakTarget::Loop);
    check_block(checker, body);
    checker.breakable.pop();
}

fn check_var_decl(checker: &mut SemanticChecker, decl: &VarDeclStmt) {
    if checker.scopes.declare(&decl.identifier, decl.declared_type).is_err() {
        checker.report(
            decl.line(),
            DiagnosticKind::DuplicateDeclaration { name: decl.identifier.clone() },
        );
    }

    if let Some(value) = &decl.assigned_value {
        let value_type = check_expr(checker, value);
        if !assignable(decl.declared_type, value_type) {
            checker.report(
                decl.line(),
                DiagnosticKind::IncompatibleAssignment { target: decl.declared_type, value: value_type },
            );
        }
    }
}

fn check_assignment(checker: &mut SemanticChecker, assign: &AssignStmt) {
    let declared = match checker.scopes.lookup(&assign.identifier) {
        Some(declared) => *declared,
        None => {
            checker.report(
                assign.line(),
                DiagnosticKind::UndeclaredVariable { name: assign.identifier.clone() },
            );
            Type::Unknown
        }
    };

    let value_type = check_expr(checker, &assign.value);
    if !assignable(declared, value_type) {
        checker.report(
            assign.line(),
            DiagnosticKind::IncompatibleAssignment { target: declared, value: value_type },
        );
    }
}

fn check_condition(checker: &mut SemanticChecker, condition: &ExprWrapper, construct: &str, line: u32) {
    if check_expr(checker, condition) == Type::String {
        checker.report(line, DiagnosticKind::InvalidCondition { construct: String::from(construct) });
    }
}

fn check_switch(checker: &mut SemanticChecker, switch: &SwitchStmt) {
    let switch_type = check_expr(checker, &switch.discriminant);

    // All sections share one scope
    checker.breakable.push(BreakTarget::Switch);
    checker.scopes.push_scope();

    for section in &switch.sections {
        let label_type = match &section.label {
            SwitchLabel::Int(_) => Type::Int,
            SwitchLabel::String(_) => Type::String,
            // An undeclared label is Unknown, which matches any switch
            SwitchLabel::Symbol(name) => checker.scopes.lookup(name).copied().unwrap_or(Type::Unknown),
        };

        if !case_compatible(switch_type, label_type) {
            checker.report(
                section.span.line(),
                DiagnosticKind::InvalidSwitchCaseType { label: label_type, switch: switch_type },
            );
        }

        for stmt in &section.body {
            check_stmt(checker, stmt);
        }
    }

    if let Some(default) = &switch.default {
        for stmt in default {
            check_stmt(checker, stmt);
        }
    }

    checker.scopes.pop_scope();
    checker.breakable.pop();
}

/// Infers the static type of an expression, reporting errors inside it.
///
/// Returns `Unknown` for an expression that already produced a diagnostic.
pub fn check_expr(checker: &mut SemanticChecker, ast: &ExprWrapper) -> Type {
    match ast.get_expr_type() {
        ExprType::Int(_) => Type::Int,
        ExprType::Float(_) => Type::Float,
        ExprType::String(_) => Type::String,
        ExprType::Symbol(symbol) => match checker.scopes.lookup(&symbol.value) {
            Some(declared) => *declared,
            None => {
                checker.report(
                    symbol.line(),
                    DiagnosticKind::UndeclaredVariable { name: symbol.value.clone() },
                );
                Type::Unknown
            }
        },
        ExprType::Binary(binary) => check_binary_expr(checker, binary),
        ExprType::Prefix(prefix) => check_prefix_expr(checker, prefix),
        ExprType::Grouping(grouping) => check_expr(checker, &grouping.inner),
    }
}

fn check_binary_expr(checker: &mut SemanticChecker, binary: &BinaryExpr) -> Type {
    let left = check_expr(checker, &binary.left);
    let right = check_expr(checker, &binary.right);
    let operator = binary.operator.kind;

    let result = promote(left, right, operator);
    if result == Type::Unknown && !chain_already_failed(binary, left) {
        checker.report(
            binary.line(),
            DiagnosticKind::InvalidOperation { operator: binary.operator.value.clone() },
        );
    }

    result
}

/// Whether `binary` continues a chain like `a + b - c` whose earlier link
/// already reported. A chain reports its first failing operator only.
fn chain_already_failed(binary: &BinaryExpr, left: Type) -> bool {
    if left != Type::Unknown {
        return false;
    }

    match binary.left.get_expr_type() {
        ExprType::Binary(inner) => same_level(inner.operator.kind, binary.operator.kind),
        _ => false,
    }
}

fn same_level(a: TokenKind, b: TokenKind) -> bool {
    let additive = |kind: TokenKind| matches!(kind, TokenKind::Plus | TokenKind::Dash);
    let multiplicative = |kind: TokenKind| matches!(kind, TokenKind::Star | TokenKind::Slash);

    (additive(a) && additive(b)) || (multiplicative(a) && multiplicative(b))
}

fn check_prefix_expr(checker: &mut SemanticChecker, prefix: &PrefixExpr) -> Type {
    let inner = check_expr(checker, &prefix.right_expr);

    match prefix.operator.kind {
        TokenKind::Not => Type::Bool,
        _ if inner == Type::String => {
            checker.report(
                prefix.line(),
                DiagnosticKind::InvalidOperation { operator: prefix.operator.value.clone() },
            );
            Type::Unknown
        }
        _ => inner,
    }
}
