use std::io::Cursor;

use crate::{ast::types::Type, errors::runtime::RuntimeError, execute, lexer::tokens::TokenKind, parse_source};

use super::{
    interpreter::{apply_binary, parse_input},
    value::{format_float, Value},
};

/// Parses and runs `source` without the static pass, returning what it printed.
fn run(source: &str, input: &str) -> Result<String, RuntimeError> {
    let program = parse_source(source, "test.tl").unwrap();
    let mut output = Vec::new();
    execute(&program, Cursor::new(input.as_bytes()), &mut output)?;
    Ok(String::from_utf8(output).unwrap())
}

#[test]
fn test_float_formatting() {
    assert_eq!(format_float(2.0), "2.0");
    assert_eq!(format_float(3.5), "3.5");
    assert_eq!(format_float(-0.25), "-0.25");
    assert_eq!(format_float(0.0), "0.0");
    assert_eq!(format_float(1234567.0), "1234567.0");
    assert_eq!(format_float(1e10), "1.0E10");
    assert_eq!(format_float(1.5e-5), "1.5E-5");
    assert_eq!(format_float(f64::INFINITY), "Infinity");
    assert_eq!(format_float(f64::NAN), "NaN");
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Int(-7).to_string(), "-7");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::String(String::from("hi")).to_string(), "hi");
    assert_eq!(Value::Absent.to_string(), "null");
}

#[test]
fn test_truthiness() {
    assert!(Value::Int(3).truthy());
    assert!(!Value::Int(0).truthy());
    assert!(!Value::Float(0.0).truthy());
    assert!(!Value::String(String::new()).truthy());
    assert!(Value::String(String::from("0")).truthy());
    assert!(!Value::Absent.truthy());
}

#[test]
fn test_loose_equality() {
    assert!(Value::Int(1).loosely_equals(&Value::Float(1.0)));
    assert!(Value::String(String::from("1")).loosely_equals(&Value::Int(1)));
    assert!(!Value::String(String::from("a")).loosely_equals(&Value::String(String::from("b"))));
}

#[test]
fn test_casts() {
    assert_eq!(Value::Float(2.9).cast(Type::Int), Some(Value::Int(2)));
    assert_eq!(Value::Float(-2.9).cast(Type::Int), Some(Value::Int(-2)));
    assert_eq!(Value::Int(2).cast(Type::Float), Some(Value::Float(2.0)));
    assert_eq!(Value::Float(1.5).cast(Type::String), Some(Value::String(String::from("1.5"))));
    assert_eq!(Value::Int(0).cast(Type::Bool), Some(Value::Bool(false)));
    assert_eq!(Value::Bool(true).cast(Type::Int), None);
    assert_eq!(Value::String(String::from("3")).cast(Type::Float), None);
}

#[test]
fn test_division_is_always_float() {
    let result = apply_binary(TokenKind::Slash, "/", Value::Int(7), Value::Int(2), 1).unwrap();
    assert_eq!(result, Value::Float(3.5));
}

#[test]
fn test_addition_promotes_and_concatenates() {
    assert_eq!(apply_binary(TokenKind::Plus, "+", Value::Int(1), Value::Int(2), 1).unwrap(), Value::Int(3));
    assert_eq!(apply_binary(TokenKind::Plus, "+", Value::Int(1), Value::Float(0.5), 1).unwrap(), Value::Float(1.5));
    assert_eq!(
        apply_binary(TokenKind::Plus, "+", Value::String(String::from("n=")), Value::Float(2.0), 1).unwrap(),
        Value::String(String::from("n=2.0"))
    );
}

#[test]
fn test_integer_arithmetic_wraps() {
    let result = apply_binary(TokenKind::Plus, "+", Value::Int(i64::MAX), Value::Int(1), 1).unwrap();
    assert_eq!(result, Value::Int(i64::MIN));
}

#[test]
fn test_string_arithmetic_fails() {
    let error = apply_binary(TokenKind::Star, "*", Value::String(String::from("a")), Value::Int(2), 4).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidOperation");
    assert_eq!(error.to_string(), "line 4: operator '*' is invalid for string and int");
}

#[test]
fn test_parse_input() {
    assert_eq!(parse_input(" 42 ", Type::Int, 1).unwrap(), Value::Int(42));
    assert_eq!(parse_input("2.5", Type::Float, 1).unwrap(), Value::Float(2.5));
    assert_eq!(parse_input("  keep spaces ", Type::String, 1).unwrap(), Value::String(String::from("  keep spaces ")));
    assert_eq!(parse_input("True", Type::Bool, 1).unwrap(), Value::Bool(true));
    assert_eq!(parse_input("yes", Type::Bool, 1).unwrap(), Value::Bool(false));
    assert!(matches!(parse_input("4x", Type::Int, 3), Err(RuntimeError::InvalidInput { line: 3, .. })));
}

#[test]
fn test_break_leaves_only_the_switch() {
    let source = r#"
        int i = 0;
        while (i < 2) {
            switch (i) { case 0: printf("zero"); break; default: printf("other"); }
            i = i + 1;
        }
    "#;

    assert_eq!(run(source, "").unwrap(), "zero\nother\n");
}

#[test]
fn test_break_skips_rest_of_nested_blocks() {
    let source = r#"
        int i = 0;
        while (1) {
            { if (i == 2) { break; } printf(i); }
            i = i + 1;
        }
        printf("done");
    "#;

    assert_eq!(run(source, "").unwrap(), "0\n1\ndone\n");
}

#[test]
fn test_for_break_skips_update() {
    let source = r#"
        int last = 0;
        for (last = 0; last < 10; last = last + 1) { if (last == 3) { break; } }
        printf(last);
    "#;

    assert_eq!(run(source, "").unwrap(), "3\n");
}

#[test]
fn test_do_while_runs_body_first() {
    assert_eq!(run("int n = 5; do { printf(n); } while (n < 0);", "").unwrap(), "5\n");
}

#[test]
fn test_shadowed_binding_is_restored() {
    let source = "int x = 1; { int x = 2; printf(x); } printf(x);";
    assert_eq!(run(source, "").unwrap(), "2\n1\n");
}

#[test]
fn test_assignment_casts_to_declared_type() {
    assert_eq!(run("int n; n = 7 / 2; printf(n);", "").unwrap(), "3\n");
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let source = "int a; int b; if (0 && a == 0) { } printf(1 || 0);";
    assert_eq!(run(source, "").unwrap(), "true\n");
}

#[test]
fn test_read_missing_input() {
    let error = run("int n;\nscanf(n);", "").unwrap_err();
    assert!(matches!(error, RuntimeError::MissingInput { line: 2, .. }));
}

#[test]
fn test_read_windows_line_ending() {
    assert_eq!(run("string s; scanf(s); printf(s + \"|\");", "abc\r\n").unwrap(), "abc|\n");
}

#[test]
fn test_undeclared_assignment_is_fatal() {
    let error = run("ghost = 1;", "").unwrap_err();
    assert!(matches!(error, RuntimeError::UndeclaredVariable { .. }));
}

#[test]
fn test_bool_into_int_is_invalid_cast() {
    let error = run("int n; n = 1 < 2;", "").unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidCast");
}

#[test]
fn test_output_before_failure_is_kept() {
    let program = parse_source("printf(\"before\"); string s = \"a\"; printf(s - 1);", "test.tl").unwrap();
    let mut output = Vec::new();

    let result = execute(&program, Cursor::new(Vec::new()), &mut output);

    assert!(result.is_err());
    assert_eq!(String::from_utf8(output).unwrap(), "before\n");
}

#[test]
fn test_undeclared_case_label_falls_to_default() {
    let source = "int x = 1; switch (x) { case nope: printf(\"label\"); default: printf(\"default\"); }";
    assert_eq!(run(source, "").unwrap(), "default\n");
}

#[test]
fn test_negating_bool_fails_at_runtime() {
    let error = run("int n;\nn = -(1 < 2);", "").unwrap_err();
    assert_eq!(error.to_string(), "line 2: operator '-' is invalid for bool");
}
