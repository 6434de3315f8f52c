use std::io::{BufRead, Write};

use log::{debug, info};

use crate::{
    ast::{
        ast::{Expr, ExprType, ExprWrapper, Program, Stmt, StmtType, StmtWrapper},
        expressions::{BinaryExpr, PrefixExpr},
        statements::{
            AssignStmt, BlockStmt, BreakTarget, DoWhileStmt, ForStmt, PrintArg, ReadStmt,
            SwitchLabel, SwitchStmt, VarDeclStmt, WhileStmt,
        },
        types::{default_value, Type},
    },
    errors::runtime::RuntimeError,
    lexer::tokens::TokenKind,
    scope::scope::ScopeStack,
};

use super::value::Value;

/// A runtime binding: the type the name was declared with and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub declared: Type,
    pub value: Value,
}

/// How a statement finished.
///
/// `Break` travels up through every enclosing block until it reaches the
/// construct of the matching kind, which stops and completes normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Normal,
    Break(BreakTarget),
}

pub struct Interpreter<R: BufRead, W: Write> {
    scopes: ScopeStack<Slot>,
    breakable: Vec<BreakTarget>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Interpreter {
            scopes: ScopeStack::new(),
            breakable: vec![],
            input,
            output,
        }
    }

    /// Runs a checked program to completion or to its first runtime error.
    ///
    /// Output written before a failure is still flushed.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        info!("executing {} top-level statements", program.body.len());

        let result = self.execute_statements(&program.body).map(|_| ());
        self.output.flush()?;

        match &result {
            Ok(()) => info!("execution finished"),
            Err(error) => info!("execution stopped: {}", error),
        }
        result
    }

    /// Runs statements in order, stopping at the first `break`.
    fn execute_statements(&mut self, body: &[StmtWrapper]) -> Result<Flow, RuntimeError> {
        for stmt in body {
            if let Flow::Break(target) = self.execute_stmt(stmt)? {
                return Ok(Flow::Break(target));
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_block(&mut self, block: &BlockStmt) -> Result<Flow, RuntimeError> {
        self.scopes.push_scope();
        let flow = self.execute_statements(&block.body);
        self.scopes.pop_scope();
        flow
    }

    pub fn execute_stmt(&mut self, stmt: &StmtWrapper) -> Result<Flow, RuntimeError> {
        debug!("line {}: executing statement", stmt.line());

        match stmt.get_stmt_type() {
            StmtType::Block(block) => self.execute_block(block),
            StmtType::VarDecl(decl) => self.execute_var_decl(decl).map(|_| Flow::Normal),
            StmtType::Assign(assign) => self.execute_assignment(assign).map(|_| Flow::Normal),
            StmtType::If(if_stmt) => {
                if self.evaluate(&if_stmt.condition)?.truthy() {
                    self.execute_block(&if_stmt.then_body)
                } else if let Some(else_body) = &if_stmt.else_body {
                    self.execute_block(else_body)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtType::While(while_stmt) => self.execute_while(while_stmt),
            StmtType::DoWhile(do_while) => self.execute_do_while(do_while),
            StmtType::For(for_stmt) => self.execute_for(for_stmt),
            StmtType::Switch(switch) => self.execute_switch(switch),
            StmtType::Break(_) => match self.breakable.last() {
                Some(target) => {
                    debug!("break out of {:?}", target);
                    Ok(Flow::Break(*target))
                }
                None => Ok(Flow::Normal),
            },
            StmtType::Print(print) => {
                match &print.argument {
                    PrintArg::Literal(text) => writeln!(self.output, "{}", text)?,
                    PrintArg::Expr(expr) => {
                        let value = self.evaluate(expr)?;
                        writeln!(self.output, "{}", value)?;
                    }
                }
                Ok(Flow::Normal)
            }
            StmtType::Read(read) => self.execute_read(read).map(|_| Flow::Normal),
        }
    }

    fn execute_var_decl(&mut self, decl: &VarDeclStmt) -> Result<(), RuntimeError> {
        let value = match &decl.assigned_value {
            Some(expr) => self.evaluate(expr)?,
            None => default_value(decl.declared_type),
        };
        let slot = Slot {
            declared: decl.declared_type,
            value: cast(value, decl.declared_type, decl.line())?,
        };

        // A checked program never redeclares in one scope; the later binding wins
        if self.scopes.declare(&decl.identifier, slot.clone()).is_err() {
            self.scopes.assign(&decl.identifier, slot).ok();
        }
        Ok(())
    }

    fn execute_assignment(&mut self, assign: &AssignStmt) -> Result<(), RuntimeError> {
        let value = self.evaluate(&assign.value)?;

        let Some(slot) = self.scopes.lookup_mut(&assign.identifier) else {
            return Err(RuntimeError::UndeclaredVariable {
                line: assign.line(),
                name: assign.identifier.clone(),
            });
        };

        slot.value = cast(value, slot.declared, assign.line())?;
        Ok(())
    }

    fn execute_while(&mut self, while_stmt: &WhileStmt) -> Result<Flow, RuntimeError> {
        self.breakable.push(BreakTarget::Loop);
        let result = self.run_while(while_stmt);
        self.breakable.pop();
        result
    }

    fn run_while(&mut self, while_stmt: &WhileStmt) -> Result<Flow, RuntimeError> {
        while self.evaluate(&while_stmt.condition)?.truthy() {
            match self.execute_block(&while_stmt.body)? {
                Flow::Normal => {}
                Flow::Break(BreakTarget::Loop) => break,
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_do_while(&mut self, do_while: &DoWhileStmt) -> Result<Flow, RuntimeError> {
        self.breakable.push(BreakTarget::Loop);
        let result = self.run_do_while(do_while);
        self.breakable.pop();
        result
    }

    fn run_do_while(&mut self, do_while: &DoWhileStmt) -> Result<Flow, RuntimeError> {
        loop {
            match self.execute_block(&do_while.body)? {
                Flow::Normal => {}
                Flow::Break(BreakTarget::Loop) => break,
                flow => return Ok(flow),
            }

            if !self.evaluate(&do_while.condition)?.truthy() {
                break;
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_for(&mut self, for_stmt: &ForStmt) -> Result<Flow, RuntimeError> {
        // Scope for the initializer's variable, around the whole loop
        self.scopes.push_scope();
        self.breakable.push(BreakTarget::Loop);
        let result = self.run_for(for_stmt);
        self.breakable.pop();
        self.scopes.pop_scope();
        result
    }

    fn run_for(&mut self, for_stmt: &ForStmt) -> Result<Flow, RuntimeError> {
        if let Some(init) = &for_stmt.init {
            self.execute_stmt(init)?;
        }

        loop {
            if let Some(condition) = &for_stmt.condition {
                if !self.evaluate(condition)?.truthy() {
                    break;
                }
            }

            // A break skips the update step
            match self.execute_block(&for_stmt.body)? {
                Flow::Normal => {}
                Flow::Break(BreakTarget::Loop) => break,
                flow => return Ok(flow),
            }

            if let Some(update) = &for_stmt.update {
                self.execute_assignment(update)?;
            }
        }

        Ok(Flow::Normal)
    }

    fn execute_switch(&mut self, switch: &SwitchStmt) -> Result<Flow, RuntimeError> {
        let key = self.evaluate(&switch.discriminant)?;

        self.breakable.push(BreakTarget::Switch);
        self.scopes.push_scope();
        let result = self.run_switch(switch, &key);
        self.scopes.pop_scope();
        self.breakable.pop();

        match result? {
            Flow::Break(BreakTarget::Switch) => Ok(Flow::Normal),
            flow => Ok(flow),
        }
    }

    fn run_switch(&mut self, switch: &SwitchStmt, key: &Value) -> Result<Flow, RuntimeError> {
        let mut matched = false;

        for section in &switch.sections {
            // Once a section matches, every later one runs too
            if !matched {
                let label = self.evaluate_label(&section.label);
                matched = key.loosely_equals(&label);
            }

            if matched {
                if let Flow::Break(target) = self.execute_statements(&section.body)? {
                    return Ok(Flow::Break(target));
                }
            }
        }

        match &switch.default {
            Some(default) if !matched => self.execute_statements(default),
            _ => Ok(Flow::Normal),
        }
    }

    fn evaluate_label(&self, label: &SwitchLabel) -> Value {
        match label {
            SwitchLabel::Int(value) => Value::Int(*value),
            SwitchLabel::String(value) => Value::String(value.clone()),
            SwitchLabel::Symbol(name) => match self.scopes.lookup(name) {
                Some(slot) => slot.value.clone(),
                None => Value::Absent,
            },
        }
    }

    fn execute_read(&mut self, read: &ReadStmt) -> Result<(), RuntimeError> {
        let declared = match self.scopes.lookup(&read.identifier) {
            Some(slot) => slot.declared,
            None => {
                return Err(RuntimeError::UndeclaredVariable {
                    line: read.line(),
                    name: read.identifier.clone(),
                })
            }
        };

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RuntimeError::MissingInput {
                line: read.line(),
                name: read.identifier.clone(),
            });
        }

        let text = line.strip_suffix('\n').unwrap_or(&line);
        let text = text.strip_suffix('\r').unwrap_or(text);
        let value = parse_input(text, declared, read.line())?;
        debug!("scanf({}) read {:?}", read.identifier, value);

        if let Some(slot) = self.scopes.lookup_mut(&read.identifier) {
            slot.value = value;
        }
        Ok(())
    }

    fn read_variable(&self, name: &str, line: u32) -> Result<Value, RuntimeError> {
        match self.scopes.lookup(name) {
            Some(slot) => Ok(slot.value.clone()),
            None => Err(RuntimeError::UndeclaredVariable {
                line,
                name: name.to_string(),
            }),
        }
    }

    /// Evaluates an expression. Both operands of every binary operator are
    /// evaluated, left first, including for `&&` and `||`.
    pub fn evaluate(&mut self, expr: &ExprWrapper) -> Result<Value, RuntimeError> {
        match expr.get_expr_type() {
            ExprType::Int(int) => Ok(Value::Int(int.value)),
            ExprType::Float(float) => Ok(Value::Float(float.value)),
            ExprType::String(string) => Ok(Value::String(string.value.clone())),
            ExprType::Symbol(symbol) => self.read_variable(&symbol.value, symbol.line()),
            ExprType::Binary(binary) => self.evaluate_binary(binary),
            ExprType::Prefix(prefix) => self.evaluate_prefix(prefix),
            ExprType::Grouping(grouping) => self.evaluate(&grouping.inner),
        }
    }

    fn evaluate_binary(&mut self, binary: &BinaryExpr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        apply_binary(binary.operator.kind, &binary.operator.value, left, right, binary.line())
    }

    fn evaluate_prefix(&mut self, prefix: &PrefixExpr) -> Result<Value, RuntimeError> {
        let value = self.evaluate(&prefix.right_expr)?;

        match (prefix.operator.kind, value) {
            (TokenKind::Not, value) => Ok(Value::Bool(!value.truthy())),
            (TokenKind::Plus, Value::Int(value)) => Ok(Value::Int(value)),
            (TokenKind::Plus, Value::Float(value)) => Ok(Value::Float(value)),
            (TokenKind::Dash, Value::Int(value)) => Ok(Value::Int(value.wrapping_neg())),
            (TokenKind::Dash, Value::Float(value)) => Ok(Value::Float(-value)),
            (_, value) => Err(RuntimeError::InvalidOperation {
                line: prefix.line(),
                operator: prefix.operator.value.clone(),
                operands: String::from(value.type_name()),
            }),
        }
    }
}

fn cast(value: Value, target: Type, line: u32) -> Result<Value, RuntimeError> {
    let shown = value.to_string();
    value.cast(target).ok_or_else(|| RuntimeError::InvalidCast {
        line,
        value: shown,
        target,
    })
}

/// Parses one line of input as a value of the declared type.
pub fn parse_input(text: &str, declared: Type, line: u32) -> Result<Value, RuntimeError> {
    let invalid = || RuntimeError::InvalidInput {
        line,
        input: text.to_string(),
        expected: declared,
    };

    match declared {
        Type::Int => text.trim().parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        Type::Float => text.trim().parse::<f64>().map(Value::Float).map_err(|_| invalid()),
        Type::Bool => Ok(Value::Bool(matches!(text.trim(), "1" | "true" | "TRUE" | "True"))),
        Type::String | Type::Unknown => Ok(Value::String(text.to_string())),
    }
}

/// Computes `left <operator> right` on runtime values.
pub fn apply_binary(
    operator: TokenKind,
    symbol: &str,
    left: Value,
    right: Value,
    line: u32,
) -> Result<Value, RuntimeError> {
    let invalid = |left: &Value, right: &Value| RuntimeError::InvalidOperation {
        line,
        operator: symbol.to_string(),
        operands: format!("{} and {}", left.type_name(), right.type_name()),
    };

    match operator {
        TokenKind::Or => Ok(Value::Bool(left.truthy() || right.truthy())),
        TokenKind::And => Ok(Value::Bool(left.truthy() && right.truthy())),
        TokenKind::Equals => Ok(Value::Bool(left.loosely_equals(&right))),
        TokenKind::NotEquals => Ok(Value::Bool(!left.loosely_equals(&right))),
        TokenKind::Less | TokenKind::LessEquals | TokenKind::Greater | TokenKind::GreaterEquals => {
            let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
                return Err(invalid(&left, &right));
            };

            Ok(Value::Bool(match operator {
                TokenKind::Less => a < b,
                TokenKind::LessEquals => a <= b,
                TokenKind::Greater => a > b,
                _ => a >= b,
            }))
        }
        TokenKind::Plus => match (&left, &right) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(*b))),
            _ => match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => Ok(Value::Float(a + b)),
                _ => Err(invalid(&left, &right)),
            },
        },
        TokenKind::Dash | TokenKind::Star => match (&left, &right) {
            (Value::Int(a), Value::Int(b)) if operator == TokenKind::Dash => Ok(Value::Int(a.wrapping_sub(*b))),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_mul(*b))),
            _ => match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) if operator == TokenKind::Dash => Ok(Value::Float(a - b)),
                (Some(a), Some(b)) => Ok(Value::Float(a * b)),
                _ => Err(invalid(&left, &right)),
            },
        },
        // Division is always floating point, even for two ints
        TokenKind::Slash => match (left.as_number(), right.as_number()) {
            (Some(a), Some(b)) => Ok(Value::Float(a / b)),
            _ => Err(invalid(&left, &right)),
        },
        _ => Err(invalid(&left, &right)),
    }
}
