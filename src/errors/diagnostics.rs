use std::fmt::Display;

use thiserror::Error;

use crate::ast::types::Type;

/// A single static error, tied to the source line of the construct that raised it.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: u32,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(line: u32, kind: DiagnosticKind) -> Self {
        Diagnostic { line, kind }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.kind {
            DiagnosticKind::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            DiagnosticKind::UndeclaredVariable { .. } => "UndeclaredVariable",
            DiagnosticKind::IncompatibleAssignment { .. } => "IncompatibleAssignment",
            DiagnosticKind::InvalidCondition { .. } => "InvalidCondition",
            DiagnosticKind::InvalidOperation { .. } => "InvalidOperation",
            DiagnosticKind::InvalidSwitchCaseType { .. } => "InvalidSwitchCaseType",
            DiagnosticKind::BreakOutsideLoopOrSwitch => "BreakOutsideLoopOrSwitch",
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {} - {}", self.line, self.kind)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    #[error("variable '{name}' already declared in this scope")]
    DuplicateDeclaration { name: String },
    #[error("variable '{name}' not declared")]
    UndeclaredVariable { name: String },
    #[error("incompatible assignment: {target} = {value}")]
    IncompatibleAssignment { target: Type, value: Type },
    #[error("{construct} condition cannot be a string")]
    InvalidCondition { construct: String },
    #[error("invalid operation with '{operator}'")]
    InvalidOperation { operator: String },
    #[error("'case' label type ({label}) incompatible with 'switch' ({switch})")]
    InvalidSwitchCaseType { label: Type, switch: Type },
    #[error("'break' used outside of a loop or switch")]
    BreakOutsideLoopOrSwitch,
}
