use std::fmt::Display;

use crate::ast::types::Type;

/// A runtime value. `Absent` is what an undeclared name evaluates to and
/// never shows up in a checked program.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Absent,
}

impl Value {
    /// Zero, empty strings, `false` and `Absent` are false. Everything else is true.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Int(value) => *value != 0,
            Value::Float(value) => *value != 0.0,
            Value::String(value) => !value.is_empty(),
            Value::Bool(value) => *value,
            Value::Absent => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(value) => Some(*value as f64),
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Equality used by `==`, `!=` and `case` matching.
    ///
    /// Two numbers compare by value, so `1 == 1.0`. Anything else compares
    /// by its printed form.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self.as_number(), other.as_number()) {
            (Some(left), Some(right)) => left == right,
            _ => self.to_string() == other.to_string(),
        }
    }

    /// Converts a value for storage in a binding of type `target`.
    ///
    /// Returns `None` when there is no conversion, which is the case for
    /// strings and booleans going into numeric bindings.
    pub fn cast(self, target: Type) -> Option<Value> {
        match (target, self) {
            (_, Value::Absent) => Some(Value::Absent),
            (Type::Int, Value::Int(value)) => Some(Value::Int(value)),
            // Truncates toward zero and saturates at the i64 bounds
            (Type::Int, Value::Float(value)) => Some(Value::Int(value as i64)),
            (Type::Float, Value::Int(value)) => Some(Value::Float(value as f64)),
            (Type::Float, Value::Float(value)) => Some(Value::Float(value)),
            (Type::String, value) => Some(Value::String(value.to_string())),
            (Type::Bool, value) => Some(Value::Bool(value.truthy())),
            (Type::Unknown, value) => Some(value),
            (Type::Int | Type::Float, Value::String(_) | Value::Bool(_)) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Absent => "null",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", format_float(*value)),
            Value::String(value) => write!(f, "{}", value),
            Value::Bool(value) => write!(f, "{}", value),
            Value::Absent => write!(f, "null"),
        }
    }
}

/// Formats a float the way the language prints it: always with a fractional
/// part, and in `1.0E10` notation outside `[1e-3, 1e7)`.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("NaN");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        let plain = format!("{}", value);
        return if plain.contains('.') { plain } else { format!("{}.0", plain) };
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{}E{}", mantissa, exponent),
        Some((mantissa, exponent)) => format!("{}.0E{}", mantissa, exponent),
        None => scientific,
    }
}
