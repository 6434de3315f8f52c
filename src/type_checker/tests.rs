use crate::{
    ast::types::Type,
    check,
    errors::diagnostics::{Diagnostic, DiagnosticKind},
    parse_source,
};

fn diagnostics(source: &str) -> Vec<Diagnostic> {
    let program = parse_source(source, "test.tl").unwrap();
    check(&program)
}

fn names(source: &str) -> Vec<String> {
    diagnostics(source)
        .iter()
        .map(|diagnostic| diagnostic.get_error_name().to_string())
        .collect()
}

#[test]
fn test_well_typed_program_has_no_diagnostics() {
    let source = r#"
        int n = 3;
        float f = n;
        string s = "total: " + f;
        while (n > 0) { n = n - 1; }
        for (int i = 0; i < 3; i = i + 1) { printf(i); }
        switch (n) { case 0: printf("zero"); break; default: printf(s); }
        do { n = n + 1; } while (n < 2);
        scanf(n);
    "#;

    assert!(diagnostics(source).is_empty());
}

#[test]
fn test_duplicate_declaration_in_same_scope() {
    let found = diagnostics("int x;\nfloat x;");

    assert_eq!(
        found,
        vec![Diagnostic::new(2, DiagnosticKind::DuplicateDeclaration { name: String::from("x") })]
    );
}

#[test]
fn test_shadowing_in_nested_scope_is_allowed() {
    assert!(diagnostics("int x; { string x = \"inner\"; { float x = 1.5; } }").is_empty());
}

#[test]
fn test_block_bindings_do_not_escape() {
    // The unknown target type also fails the assignment check
    assert_eq!(
        names("{ int inner = 1; }\ninner = 2;"),
        vec!["UndeclaredVariable", "IncompatibleAssignment"]
    );
}

#[test]
fn test_incompatible_assignment_reports_statement_line() {
    let found = diagnostics("int x;\nx = \"a\";");

    assert_eq!(
        found,
        vec![Diagnostic::new(
            2,
            DiagnosticKind::IncompatibleAssignment { target: Type::Int, value: Type::String }
        )]
    );
}

#[test]
fn test_incompatible_initializer() {
    let found = diagnostics("int x = 1.5;");

    assert_eq!(
        found,
        vec![Diagnostic::new(
            1,
            DiagnosticKind::IncompatibleAssignment { target: Type::Int, value: Type::Float }
        )]
    );
}

#[test]
fn test_int_widens_to_float() {
    assert!(diagnostics("int x = 2; float y = x; y = 3;").is_empty());
}

#[test]
fn test_comparison_cannot_be_stored() {
    assert_eq!(names("int x = 1 < 2;"), vec!["IncompatibleAssignment"]);
}

#[test]
fn test_undeclared_reference() {
    let found = diagnostics("int x;\nx = y + 1;");

    assert_eq!(found[0], Diagnostic::new(2, DiagnosticKind::UndeclaredVariable { name: String::from("y") }));
}

#[test]
fn test_undeclared_scanf_target() {
    assert_eq!(names("scanf(missing);"), vec!["UndeclaredVariable"]);
}

#[test]
fn test_string_conditions() {
    let source = r#"
        string s = "x";
        if (s) { }
        while (s) { }
        do { } while (s);
        for (; s; ) { }
    "#;

    let constructs: Vec<_> = diagnostics(source)
        .into_iter()
        .map(|diagnostic| match diagnostic.kind {
            DiagnosticKind::InvalidCondition { construct } => construct,
            other => panic!("unexpected diagnostic {:?}", other),
        })
        .collect();

    assert_eq!(constructs, vec!["if", "while", "do-while", "for"]);
}

#[test]
fn test_numeric_and_comparison_conditions_are_fine() {
    assert!(diagnostics("int n = 1; float f = 0.5; if (n) { } while (f) { } if (n == 1 && f < 2) { }").is_empty());
}

#[test]
fn test_invalid_string_arithmetic() {
    let found = diagnostics("string s = \"a\";\nstring t = s - 1;");

    assert_eq!(
        found,
        vec![Diagnostic::new(2, DiagnosticKind::InvalidOperation { operator: String::from("-") })]
    );
}

#[test]
fn test_undeclared_operand_reports_operator() {
    assert_eq!(
        names("int z = nope + 1;"),
        vec!["UndeclaredVariable", "InvalidOperation", "IncompatibleAssignment"]
    );
}

#[test]
fn test_operator_chain_reports_first_failure_per_level() {
    // `*` fails, then `+` on its result, but `-` continues the failed `+` chain
    let found = diagnostics("string s = \"a\";\nint n = s * 2 + 1 - 3;");
    let operators: Vec<_> = found
        .iter()
        .filter_map(|diagnostic| match &diagnostic.kind {
            DiagnosticKind::InvalidOperation { operator } => Some(operator.as_str()),
            _ => None,
        })
        .collect();

    assert_eq!(operators, vec!["*", "+"]);
    assert_eq!(found.len(), 3);
    assert!(found.iter().all(|diagnostic| diagnostic.line == 2));
}

#[test]
fn test_parenthesised_failure_reported_again_outside() {
    assert_eq!(
        names("int z = (nope + 1) + 2;"),
        vec!["UndeclaredVariable", "InvalidOperation", "InvalidOperation", "IncompatibleAssignment"]
    );
}

#[test]
fn test_unary_minus_on_string() {
    assert_eq!(names("string s = \"a\"; string t = -s;"), vec!["InvalidOperation", "IncompatibleAssignment"]);
}

#[test]
fn test_unary_minus_on_bool_is_left_to_runtime() {
    assert_eq!(names("int n = -(1 < 2);"), vec!["IncompatibleAssignment"]);
}

#[test]
fn test_not_yields_bool() {
    assert_eq!(names("string s = \"a\"; if (!s) { }"), Vec::<String>::new());
}

#[test]
fn test_break_outside_loop_or_switch() {
    let found = diagnostics("int x;\nbreak;");
    assert_eq!(found, vec![Diagnostic::new(2, DiagnosticKind::BreakOutsideLoopOrSwitch)]);
}

#[test]
fn test_break_inside_if_inside_loop() {
    assert!(diagnostics("while (1) { if (1) { break; } }").is_empty());
}

#[test]
fn test_break_after_loop_is_rejected() {
    assert_eq!(names("while (1) { break; } break;"), vec!["BreakOutsideLoopOrSwitch"]);
}

#[test]
fn test_switch_case_types() {
    let source = "int n;\nswitch (n) {\ncase 1:\ncase \"one\":\n}";
    let found = diagnostics(source);

    assert_eq!(
        found,
        vec![Diagnostic::new(
            4,
            DiagnosticKind::InvalidSwitchCaseType { label: Type::String, switch: Type::Int }
        )]
    );
}

#[test]
fn test_float_switch_accepts_int_labels() {
    assert!(diagnostics("float f; int k; switch (f) { case 1: case k: }").is_empty());
}

#[test]
fn test_switch_sections_share_one_scope() {
    assert!(diagnostics("switch (1) { case 1: int a = 1; case 2: a = 2; default: a = 3; }").is_empty());
    assert_eq!(
        names("switch (1) { case 1: int a; } a = 1;"),
        vec!["UndeclaredVariable", "IncompatibleAssignment"]
    );
}

#[test]
fn test_undeclared_case_label() {
    // The label is Unknown, which fits any switch
    assert!(diagnostics("int x; switch (x) { case nope: printf(1); }").is_empty());
}

#[test]
fn test_for_variable_is_scoped_to_loop() {
    assert_eq!(
        names("for (int i = 0; i < 2; i = i + 1) { }\ni = 5;"),
        vec!["UndeclaredVariable", "IncompatibleAssignment"]
    );
}

#[test]
fn test_all_errors_are_collected() {
    let source = "int x;\nint x;\nx = \"s\";\nbreak;\nprintf(y);";
    assert_eq!(
        names(source),
        vec!["DuplicateDeclaration", "IncompatibleAssignment", "BreakOutsideLoopOrSwitch", "UndeclaredVariable"]
    );
}

#[test]
fn test_diagnostic_display() {
    let found = diagnostics("int x;\nx = \"a\";");
    assert_eq!(found[0].to_string(), "line 2 - incompatible assignment: int = string");
}
