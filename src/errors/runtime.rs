use std::io;

use thiserror::Error;

use crate::ast::types::Type;

/// Fatal failures raised while executing a program. There is no recovery:
/// execution stops at the failing statement.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("line {line}: operator '{operator}' is invalid for {operands}")]
    InvalidOperation {
        line: u32,
        operator: String,
        operands: String,
    },
    #[error("line {line}: cannot read {input:?} as {expected}")]
    InvalidInput {
        line: u32,
        input: String,
        expected: Type,
    },
    #[error("line {line}: input ended before scanf({name})")]
    MissingInput { line: u32, name: String },
    #[error("line {line}: cannot convert {value} to {target}")]
    InvalidCast { line: u32, value: String, target: Type },
    #[error("line {line}: variable '{name}' not declared")]
    UndeclaredVariable { line: u32, name: String },
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
}

impl RuntimeError {
    pub fn get_error_name(&self) -> &str {
        match self {
            RuntimeError::InvalidOperation { .. } => "InvalidOperation",
            RuntimeError::InvalidInput { .. } => "InvalidInput",
            RuntimeError::MissingInput { .. } => "MissingInput",
            RuntimeError::InvalidCast { .. } => "InvalidCast",
            RuntimeError::UndeclaredVariable { .. } => "UndeclaredVariable",
            RuntimeError::Io(_) => "Io",
        }
    }
}
