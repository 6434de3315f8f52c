//! Scalar types and the rules that relate them.
//!
//! Both the semantic checker and the interpreter consult these functions:
//! the checker to infer and validate static types, the interpreter to
//! give declarations their default value.

use std::fmt::Display;

use crate::{interpreter::value::Value, lexer::tokens::TokenKind};

/// Static type of a binding or expression.
///
/// `Unknown` marks both "not yet determined" and "an error was already
/// reported here". `Bool` only arises from comparisons and logical
/// operators; no declaration can produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Float,
    String,
    Bool,
    Unknown,
}

impl Type {
    /// Maps a declaration keyword to its type.
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::Int => Some(Type::Int),
            TokenKind::Float => Some(Type::Float),
            TokenKind::String => Some(Type::String),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::Bool => "bool",
            Type::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Value a declaration without initializer starts with.
pub fn default_value(ty: Type) -> Value {
    match ty {
        Type::Int => Value::Int(0),
        Type::Float => Value::Float(0.0),
        Type::String => Value::String(String::new()),
        Type::Bool => Value::Bool(false),
        Type::Unknown => Value::Absent,
    }
}

/// Whether a value of type `value` may be stored into a binding of type `target`.
///
/// Equal types and int-to-float widening are allowed. `Unknown` on either
/// side is never assignable.
pub fn assignable(target: Type, value: Type) -> bool {
    if target == Type::Unknown || value == Type::Unknown {
        return false;
    }

    target == value || (target == Type::Float && value == Type::Int)
}

pub fn is_comparison(operator: TokenKind) -> bool {
    matches!(
        operator,
        TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
    )
}

pub fn is_logical(operator: TokenKind) -> bool {
    matches!(operator, TokenKind::And | TokenKind::Or)
}

/// Result type of `a <operator> b`, or `Unknown` if the combination is invalid.
pub fn promote(a: Type, b: Type, operator: TokenKind) -> Type {
    if is_comparison(operator) || is_logical(operator) {
        return Type::Bool;
    }

    match (a, b) {
        (Type::Float, Type::Float) | (Type::Float, Type::Int) | (Type::Int, Type::Float) => {
            Type::Float
        }
        (Type::Int, Type::Int) => Type::Int,
        (Type::String, _) | (_, Type::String) if operator == TokenKind::Plus => Type::String,
        _ => Type::Unknown,
    }
}

/// Whether a `case` label of type `label` can be matched against a `switch` on `switch`.
pub fn case_compatible(switch: Type, label: Type) -> bool {
    switch == Type::Unknown
        || label == Type::Unknown
        || switch == label
        || (switch == Type::Float && label == Type::Int)
}
