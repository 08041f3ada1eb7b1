// End-to-end tests for expression evaluation and program interpretation.

use spi::{evaluate, interpret, ErrorKind, GlobalScope, Interpreter, Lexer, Parser};

fn scope_of(pairs: &[(&str, i64)]) -> GlobalScope {
    pairs.iter().map(|&(name, value)| (name, value)).collect()
}

#[test]
fn binary_operators_on_non_negative_operands() {
    let operands = [0_i64, 1, 2, 7, 10, 13, 100];
    for &a in &operands {
        for &b in &operands {
            assert_eq!(evaluate(&format!("{} + {}", a, b)).unwrap(), (a + b).to_string());
            assert_eq!(evaluate(&format!("{} - {}", a, b)).unwrap(), (a - b).to_string());
            assert_eq!(evaluate(&format!("{} * {}", a, b)).unwrap(), (a * b).to_string());
            if b != 0 {
                assert_eq!(
                    evaluate(&format!("{} / {}", a, b)).unwrap(),
                    a.div_euclid(b).to_string()
                );
            }
        }
    }
}

#[test]
fn division_floors_negative_quotients() {
    assert_eq!(evaluate("-7/2").unwrap(), "-4");
    assert_eq!(evaluate("7 / -2").unwrap(), "-4");
    assert_eq!(evaluate("-7 / -2").unwrap(), "3");
    assert_eq!(evaluate("-8 / 2").unwrap(), "-4");
}

#[test]
fn arithmetic_expressions() {
    let cases = [
        ("7*8", "56"),
        (" 12 + 12 ", "24"),
        ("1 + 32 / 11", "3"),
        ("3 / 2 * 4 * 8 / 7", "4"),
        ("14 + 2 * 3 - 6 / 2", "17"),
        ("3 / (2 * 4)", "0"),
        ("5 - - - + - 3", "8"),
        ("5 - - - + - (3 + 4) - +2", "10"),
        ("2 * (3 + (4 - 1)) / 4", "3"),
        ("10 - 3 - 2", "5"),
        ("64 / 4 / 2", "8"),
    ];

    for (source, expected) in cases {
        assert_eq!(evaluate(source).unwrap(), expected, "evaluating {:?}", source);
    }
}

#[test]
fn expression_errors_identify_their_stage() {
    assert_eq!(evaluate(")").unwrap_err().kind, ErrorKind::ParseError);
    assert_eq!(evaluate("3 & 4").unwrap_err().kind, ErrorKind::LexicalError);
    assert_eq!(evaluate("(3*4(").unwrap_err().kind, ErrorKind::ParseError);
    assert_eq!(evaluate("3 // 4").unwrap_err().kind, ErrorKind::ParseError);
}

#[test]
fn nested_blocks_populate_global_scope() {
    let scope = interpret(
        "
        BEGIN
          BEGIN
            number := 2;
            a := number;
            b := 10 * a + 10 * number / 4;
            c := a - - b
          END;
          x := 11;
        END.
        ",
    )
    .unwrap();

    assert_eq!(
        scope,
        scope_of(&[("number", 2), ("a", 2), ("b", 25), ("c", 27), ("x", 11)])
    );
}

#[test]
fn layered_construction_matches_convenience_function() {
    let source = "BEGIN a := 3; b := a * a END.";
    let parser = Parser::new(Lexer::new(source)).unwrap();
    let mut interpreter = Interpreter::new(parser);
    interpreter.interpret().unwrap();

    assert_eq!(interpreter.into_scope(), interpret(source).unwrap());
}

#[test]
fn independent_runs_do_not_share_scope() {
    let mut first = Interpreter::from_source("BEGIN shared := 1; onlyfirst := 5 END.").unwrap();
    let mut second = Interpreter::from_source("BEGIN shared := 2 END.").unwrap();

    first.interpret().unwrap();
    second.interpret().unwrap();

    assert_eq!(first.scope(), &scope_of(&[("shared", 1), ("onlyfirst", 5)]));
    assert_eq!(second.scope(), &scope_of(&[("shared", 2)]));

    // A later program cannot read what an earlier one assigned.
    let error = interpret("BEGIN x := onlyfirst END.").unwrap_err();
    assert_eq!(error.kind, ErrorKind::EvaluationError);
}

#[test]
fn reassignment_overwrites_previous_value() {
    let scope = interpret("BEGIN x := 1; x := x + 41; BEGIN x := x * 2 END END.").unwrap();
    assert_eq!(scope.get("x"), Some(84));
    assert_eq!(scope.len(), 1);
}

#[test]
fn undefined_variable_names_the_variable() {
    let error = interpret("BEGIN a := 1; b := a + missing END.").unwrap_err();
    assert_eq!(error.kind, ErrorKind::EvaluationError);
    assert!(error.message.contains("missing"), "message: {}", error.message);
}

#[test]
fn failed_run_keeps_earlier_assignments() {
    let mut interpreter =
        Interpreter::from_source("BEGIN a := 1; b := 2; c := a / (b - 2); d := 4 END.").unwrap();

    let error = interpreter.interpret().unwrap_err();
    assert_eq!(error.kind, ErrorKind::EvaluationError);
    assert_eq!(interpreter.scope(), &scope_of(&[("a", 1), ("b", 2)]));
}

#[test]
fn parse_failure_runs_nothing() {
    let mut interpreter = Interpreter::from_source("BEGIN a := 1; b := 2 END").unwrap();

    assert_eq!(interpreter.interpret().unwrap_err().kind, ErrorKind::ParseError);
    assert!(interpreter.scope().is_empty());
}

#[test]
fn lexical_failure_is_reported_from_construction() {
    let error = Interpreter::from_source("# comment").err().unwrap();
    assert_eq!(error.kind, ErrorKind::LexicalError);
    assert!(error.message.contains('#'));
}

#[test]
fn identifiers_are_case_sensitive() {
    let scope = interpret("BEGIN Abc := 1; abc := 2; ABC := Abc + abc END.").unwrap();
    assert_eq!(scope, scope_of(&[("Abc", 1), ("abc", 2), ("ABC", 3)]));
}

#[test]
fn sorted_view_orders_by_name() {
    let scope = interpret("BEGIN z := 1; a := 2; m := 3 END.").unwrap();
    let names: Vec<String> = scope.to_sorted().into_keys().collect();
    assert_eq!(names, vec!["a", "m", "z"]);
}

#[test]
fn error_spans_point_at_the_offending_text() {
    let error = interpret("BEGIN x := 1 + y END.").unwrap_err();
    assert_eq!(error.span.start, 15);
    assert_eq!(error.span.end, 16);

    let error = evaluate("12 $").unwrap_err();
    assert_eq!(error.span.start, 3);
}
