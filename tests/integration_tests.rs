//! End-to-end tests running TomLang programs from source text to printed output.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use tomlang::{check, errors::runtime::RuntimeError, format_error, parse_source, run_source, TomError};

fn run(source: &str, input: &str) -> Result<String, TomError> {
    let mut output = Vec::new();
    run_source(source, "test.tl", Cursor::new(input.as_bytes()), &mut output)?;
    Ok(String::from_utf8(output).unwrap())
}

/// Returns `(line, error name)` for every static diagnostic of `source`.
fn diagnostics(source: &str) -> Vec<(u32, String)> {
    let program = parse_source(source, "test.tl").unwrap();
    check(&program)
        .iter()
        .map(|diagnostic| (diagnostic.line, diagnostic.get_error_name().to_string()))
        .collect()
}

#[test]
fn test_division_prints_float() {
    assert_eq!(run("printf(7 / 2);", "").unwrap(), "3.5\n");
}

#[test]
fn test_int_widened_into_float_binding() {
    assert_eq!(run("float f = 2; printf(f);", "").unwrap(), "2.0\n");
}

#[test]
fn test_for_loop_counts() {
    let source = "for (int i = 0; i < 3; i = i + 1) { printf(i); }";
    assert_eq!(run(source, "").unwrap(), "0\n1\n2\n");
}

#[test]
fn test_switch_falls_through_without_break() {
    let source = r#"
        int x = 1;
        switch (x) {
            case 1: printf("one");
            case 2: printf("two");
            case 3: printf("three");
            default: printf("other");
        }
    "#;

    // Fallthrough covers the later cases, never the default
    assert_eq!(run(source, "").unwrap(), "one\ntwo\nthree\n");
}

#[test]
fn test_switch_break_stops_fallthrough() {
    let source = r#"
        int x = 2;
        switch (x) {
            case 1: printf("one"); break;
            case 2: printf("two"); break;
            default: printf("other");
        }
    "#;

    assert_eq!(run(source, "").unwrap(), "two\n");
}

#[test]
fn test_switch_default_when_nothing_matches() {
    let source = r#"
        string s = "c";
        switch (s) {
            case "a": printf("a");
            case "b": printf("b");
            default: printf("fallback");
        }
    "#;

    assert_eq!(run(source, "").unwrap(), "fallback\n");
}

#[test]
fn test_undeclared_case_label_is_accepted() {
    let source = "int x; switch (x) { case nope: printf(1); }";
    assert_eq!(diagnostics(source), vec![]);
    assert_eq!(run(source, "").unwrap(), "");
}

#[test]
fn test_undeclared_operand_reports_operator() {
    assert_eq!(
        diagnostics("int z = nope + 1;"),
        vec![
            (1, String::from("UndeclaredVariable")),
            (1, String::from("InvalidOperation")),
            (1, String::from("IncompatibleAssignment")),
        ]
    );
}

#[test]
fn test_break_in_switch_inside_loop_keeps_looping() {
    let source = r#"
        int i = 0;
        while (i < 3) {
            switch (i) {
                case 1: printf("hit"); break;
                default: printf(i);
            }
            i = i + 1;
        }
        printf("end");
    "#;

    assert_eq!(run(source, "").unwrap(), "0\nhit\n2\nend\n");
}

#[test]
fn test_read_integer() {
    assert_eq!(run("int n; scanf(n); printf(n + 1);", "42\n").unwrap(), "43\n");
}

#[test]
fn test_read_string_and_concatenate() {
    let source = "string name; scanf(name); printf(\"hello \" + name);";
    assert_eq!(run(source, "tom\n").unwrap(), "hello tom\n");
}

#[test]
fn test_incompatible_assignment_line() {
    let source = "int a;\nstring s = \"x\";\na = s;";
    assert_eq!(diagnostics(source), vec![(3, String::from("IncompatibleAssignment"))]);
}

#[test]
fn test_duplicate_declaration_but_shadowing_allowed() {
    let source = "int a;\n{ int a; }\nint a;";
    assert_eq!(diagnostics(source), vec![(3, String::from("DuplicateDeclaration"))]);
}

#[test]
fn test_break_outside_loop_or_switch() {
    let source = "int a;\nif (a) { break; }";
    assert_eq!(diagnostics(source), vec![(2, String::from("BreakOutsideLoopOrSwitch"))]);
}

#[test]
fn test_semantic_errors_prevent_execution() {
    let mut output = Vec::new();
    let result = run_source(
        "printf(\"never\");\nint a = \"x\";",
        "test.tl",
        Cursor::new(Vec::new()),
        &mut output,
    );

    match result {
        Err(TomError::Semantic(diagnostics)) => {
            assert_eq!(diagnostics.len(), 1);
            assert_eq!(diagnostics[0].to_string(), "line 2 - incompatible assignment: int = string");
        }
        other => panic!("expected semantic errors, got {:?}", other),
    }
    assert!(output.is_empty());
}

#[test]
fn test_runtime_error_after_output() {
    let source = "printf(\"start\");\nint n;\nscanf(n);";
    let mut output = Vec::new();

    let result = run_source(source, "test.tl", Cursor::new("abc\n".as_bytes()), &mut output);

    assert!(matches!(
        result,
        Err(TomError::Runtime(RuntimeError::InvalidInput { line: 3, .. }))
    ));
    assert_eq!(String::from_utf8(output).unwrap(), "start\n");
}

#[test]
fn test_syntax_error_is_rendered_with_source_line() {
    let source = "int a = 1;\nint b = ;";

    let error = match parse_source(source, "test.tl") {
        Err(TomError::Syntax(error)) => error,
        other => panic!("expected a syntax error, got {:?}", other.map(|_| ())),
    };

    let rendered = format_error(&error, source);
    assert!(rendered.starts_with("Error: "));
    assert!(rendered.contains("-> test.tl:2:"));
    assert!(rendered.contains("2 | int b = ;"));
}

#[test]
fn test_sample_program_runs() {
    let source = include_str!("programs/ok.tl");
    assert_eq!(diagnostics(source), vec![]);
    assert_eq!(run(source, "4\n5\n6\n0\n").unwrap(), "total\n15\n5.0\nthree\nfour or fewer\n");
}

#[test]
fn test_sample_program_with_errors() {
    let source = include_str!("programs/error.tl");

    let names: Vec<(u32, String)> = diagnostics(source);
    assert_eq!(
        names,
        vec![
            (5, String::from("IncompatibleAssignment")),
            (6, String::from("DuplicateDeclaration")),
            (7, String::from("InvalidCondition")),
            (10, String::from("BreakOutsideLoopOrSwitch")),
            (11, String::from("InvalidOperation")),
        ]
    );
}
