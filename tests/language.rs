use std::fs;

use geoscript::{Limits, RunReport, error::RuntimeError, run_program};
use walkdir::WalkDir;

fn run_with_limits(source: &str, limits: &Limits) -> (String, RunReport) {
    let mut output = Vec::new();
    let report = run_program(source, limits, &mut output);
    (String::from_utf8(output).expect("print output is valid utf-8"), report)
}

fn run(source: &str) -> (String, RunReport) {
    run_with_limits(source, &Limits::default())
}

fn run_ok(source: &str) -> String {
    let (output, report) = run(source);
    assert!(report.is_clean(), "unexpected diagnostics: {report:?}");
    output
}

fn runtime_error(source: &str) -> RuntimeError {
    let (_, report) = run(source);
    report.runtime_error
          .unwrap_or_else(|| panic!("expected a runtime error, got none"))
}

#[test]
fn demo_scripts_run_clean() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "geo")
                                      })
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("failed to read {path:?}: {e}"));

        count += 1;
        let (_, report) = run(&source);
        assert!(report.is_clean(), "demo {path:?} failed: {report:?}");
    }

    assert!(count > 0, "no demo scripts found in demos/");
}

#[test]
fn print_writes_one_line() {
    assert_eq!(run_ok("def main() { print(\"WORKS\"); }"), "WORKS\n");
}

#[test]
fn print_concatenates_without_separators() {
    assert_eq!(run_ok("def main() { print(\"a\", 1, True); }"), "a1True\n");
}

#[test]
fn if_else_takes_the_right_branch() {
    let source = "def main() { if (1 == 1) { print(\"1\"); } else { print(\"2\"); } }";
    assert_eq!(run_ok(source), "1\n");

    let source = "def main() { if (1 == 2) { print(\"1\"); } else { print(\"2\"); } }";
    assert_eq!(run_ok(source), "2\n");
}

#[test]
fn user_functions_return_values() {
    let source = "def int add(int a, int b) { return a + b; } \
                  def main() { print(add(1, 2)); }";
    assert_eq!(run_ok(source), "3\n");
}

#[test]
fn declaration_type_must_match_exactly() {
    let error = runtime_error("def main() { int a = 1.0; }");
    assert!(matches!(error, RuntimeError::InvalidDeclarationType { .. }), "{error:?}");
}

#[test]
fn iterating_a_non_canvas_is_a_typed_error() {
    let source = "def main() { int c = 1; for (Shape s : c) { print(1); } }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::InvalidIterableType { .. }), "{error:?}");
}

#[test]
fn iterate_element_type_must_be_shape() {
    let source = "def main() { Canvas c = Canvas(); for (int s : c) { print(1); } }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::InvalidIterableType { .. }), "{error:?}");
}

#[test]
fn integer_division_is_true_division() {
    assert_eq!(run_ok("def main() { print(1 / 2); }"), "0.5\n");
    assert_eq!(run_ok("def main() { print(4 / 2); }"), "2.0\n");
}

#[test]
fn division_by_zero_is_an_error() {
    let error = runtime_error("def main() { print(1 / 0); }");
    assert!(matches!(error, RuntimeError::DivisionByZero { .. }), "{error:?}");

    let error = runtime_error("def main() { print(1.0 / 0.0); }");
    assert!(matches!(error, RuntimeError::DivisionByZero { .. }), "{error:?}");
}

#[test]
fn casts_round_trip_and_truncate() {
    assert_eq!(run_ok("def main() { print((dec) (int) 5); }"), "5.0\n");
    assert_eq!(run_ok("def main() { print((int) 2.9); }"), "2\n");
    assert_eq!(run_ok("def main() { print((int) -2.9); }"), "-2\n");
}

#[test]
fn cast_operand_extends_to_the_following_expression() {
    // The operand of a cast is the whole expression after the closing
    // parenthesis, so the addition happens before the truncation.
    assert_eq!(run_ok("def main() { print((int) 2.5 + 1.0); }"), "3\n");
}

#[test]
fn redeclaration_fails_on_the_second_occurrence() {
    assert_eq!(run_ok("def main() { int a = 1; print(a); }"), "1\n");

    let error = runtime_error("def main() { int a = 1; int a = 1; }");
    assert!(matches!(error, RuntimeError::Redeclaration { .. }), "{error:?}");
}

#[test]
fn shadowing_an_outer_scope_is_redeclaration() {
    let source = "def main() { int a = 1; if (True) { int a = 2; } }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::Redeclaration { .. }), "{error:?}");
}

#[test]
fn block_declarations_die_with_their_scope() {
    let source = "def main() { if (True) { int a = 1; } print(a); }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::MissingVariableDeclaration { .. }), "{error:?}");
}

#[test]
fn callee_does_not_see_caller_locals() {
    let source = "def f() { print(a); } \
                  def main() { int a = 1; f(); }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::MissingVariableDeclaration { .. }), "{error:?}");
}

#[test]
fn recursion_ceiling_fires_exactly_past_the_limit() {
    let limits = Limits { max_recursion_depth: 3,
                          ..Limits::default() };

    // main is depth 1, f(1) is 2, f(0) is 3: just inside the ceiling.
    let source = "def f(int n) { if (n > 0) { f(n - 1); } } \
                  def main() { f(1); }";
    let (_, report) = run_with_limits(source, &limits);
    assert!(report.is_clean(), "{report:?}");

    // One call deeper crosses it.
    let source = "def f(int n) { if (n > 0) { f(n - 1); } } \
                  def main() { f(2); }";
    let (_, report) = run_with_limits(source, &limits);
    assert!(matches!(report.runtime_error,
                     Some(RuntimeError::MaximumRecursionDepth { depth: 3, .. })),
            "{report:?}");
}

#[test]
fn unconditional_recursion_is_caught() {
    let error = runtime_error("def r() { r(); } def main() { r(); }");
    assert!(matches!(error, RuntimeError::MaximumRecursionDepth { .. }), "{error:?}");
}

#[test]
fn missing_main_is_reported_before_execution() {
    let (_, report) = run("def helper() { print(1); }");
    assert!(matches!(report.runtime_error, Some(RuntimeError::MissingMain)), "{report:?}");

    let (_, report) = run("");
    assert!(matches!(report.runtime_error, Some(RuntimeError::MissingMain)), "{report:?}");
}

#[test]
fn while_loops_run_and_stop() {
    let source = "def main() { int i = 0; while (i < 3) { print(i); i = i + 1; } }";
    assert_eq!(run_ok(source), "0\n1\n2\n");
}

#[test]
fn return_stops_the_enclosing_call() {
    // Nothing after the return executes, not even in an enclosing loop.
    let source = "def int f() { while (True) { return 7; } return 8; } \
                  def main() { print(f()); }";
    assert_eq!(run_ok(source), "7\n");

    let source = "def int g() { return 1; print(\"side\"); return 2; } \
                  def main() { print(g()); }";
    assert_eq!(run_ok(source), "1\n");
}

#[test]
fn operator_precedence_and_associativity() {
    assert_eq!(run_ok("def main() { print(1 + 2 * 3); }"), "7\n");
    assert_eq!(run_ok("def main() { print((1 + 2) * 3); }"), "9\n");
    assert_eq!(run_ok("def main() { print(2 - 3 - 4); }"), "-5\n");
    assert_eq!(run_ok("def main() { print(True or False and False); }"), "True\n");
}

#[test]
fn unary_operators() {
    assert_eq!(run_ok("def main() { print(-3); }"), "-3\n");
    assert_eq!(run_ok("def main() { print(not False); }"), "True\n");

    let error = runtime_error("def main() { print(not 1); }");
    assert!(matches!(error, RuntimeError::InvalidUnaryOperator { .. }), "{error:?}");

    let error = runtime_error("def main() { print(-True); }");
    assert!(matches!(error, RuntimeError::InvalidUnaryOperator { .. }), "{error:?}");
}

#[test]
fn strings_concatenate_and_compare() {
    assert_eq!(run_ok("def main() { print(\"foo\" + \"bar\"); }"), "foobar\n");
    assert_eq!(run_ok("def main() { print(\"a\" < \"b\"); }"), "True\n");
}

#[test]
fn string_escapes_are_preserved_literally() {
    let source = r#"def main() { print("a\nb"); }"#;
    assert_eq!(run_ok(source), "a\\nb\n");

    let source = r#"def main() { print("a\\b"); }"#;
    assert_eq!(run_ok(source), "a\\b\n");
}

#[test]
fn mismatched_operand_types_are_an_error() {
    let error = runtime_error("def main() { print(1 + 1.0); }");
    assert!(matches!(error, RuntimeError::MismatchedTypes { .. }), "{error:?}");

    let error = runtime_error("def main() { print(1 == True); }");
    assert!(matches!(error, RuntimeError::MismatchedTypes { .. }), "{error:?}");
}

#[test]
fn conditions_must_be_boolean() {
    let error = runtime_error("def main() { if (1) { print(1); } }");
    assert!(matches!(error, RuntimeError::ExpectedBoolean { .. }), "{error:?}");
}

#[test]
fn assignment_requires_declaration_and_type_agreement() {
    let error = runtime_error("def main() { a = 1; }");
    assert!(matches!(error, RuntimeError::MissingVariableDeclaration { .. }), "{error:?}");

    let error = runtime_error("def main() { int a = 1; a = 1.5; }");
    assert!(matches!(error, RuntimeError::InvalidAssignmentType { .. }), "{error:?}");
}

#[test]
fn unknown_calls_are_missing_function_declarations() {
    let error = runtime_error("def main() { frobnicate(); }");
    assert!(matches!(error, RuntimeError::MissingFunctionDeclaration { .. }), "{error:?}");
}

#[test]
fn call_argument_count_is_checked() {
    let source = "def f(int a) { print(a); } def main() { f(); }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::NumberOfArguments { expected: 1, found: 0, .. }),
            "{error:?}");
}

#[test]
fn call_arguments_are_not_type_checked_at_bind_time() {
    // Reference behavior, preserved deliberately: binding a decimal to an
    // int parameter succeeds; only later declaration/assignment/return
    // sites check.
    let source = "def f(int a) { print(a); } def main() { f(1.5); }";
    assert_eq!(run_ok(source), "1.5\n");
}

#[test]
fn return_types_are_checked_at_the_call_site() {
    let error = runtime_error("def int f() { return 1.5; } def main() { f(); }");
    assert!(matches!(error, RuntimeError::InvalidReturnType { .. }), "{error:?}");

    let error = runtime_error("def int f() { } def main() { f(); }");
    assert!(matches!(error, RuntimeError::MissingReturnType { .. }), "{error:?}");

    // A void function may return a value; nothing checks it.
    let source = "def f() { return 1; } def main() { f(); print(2); }";
    assert_eq!(run_ok(source), "2\n");
}

#[test]
fn functions_and_variables_live_in_separate_tables() {
    let source = "def int f() { return 1; } \
                  def main() { int f = 2; print(f + f()); }";
    assert_eq!(run_ok(source), "3\n");
}

#[test]
fn shapes_expose_area_and_perimeter() {
    let source = "def main() { Square s = Square(2.0); print(s.area()); }";
    assert_eq!(run_ok(source), "4.0\n");

    let source = "def main() { Rectangle r = Rectangle(1.5, 2.5); print(r.perimeter()); }";
    assert_eq!(run_ok(source), "8.0\n");

    let source = "def main() { Triangle t = Triangle(3.0, 4.0, 5.0); print(t.area()); }";
    assert_eq!(run_ok(source), "6.0\n");
}

#[test]
fn shape_accessors_work_without_parentheses() {
    let source = "def main() { Square s = Square(2.0); print(s.side); }";
    assert_eq!(run_ok(source), "2.0\n");
}

#[test]
fn shape_declarations_are_nominal() {
    // `Shape` is not a supertype: a concrete circle cannot initialize a
    // variable declared `Shape`.
    let error = runtime_error("def main() { Shape s = Circle(1.0); }");
    assert!(matches!(error, RuntimeError::InvalidDeclarationType { .. }), "{error:?}");
}

#[test]
fn shape_equality_is_identity() {
    let source = "def main() { Square a = Square(1.0); Square b = Square(1.0); print(a == b); }";
    assert_eq!(run_ok(source), "False\n");

    let source = "def main() { Square a = Square(1.0); Square b = Square(2.0); b = a; \
                  print(a == b); }";
    assert_eq!(run_ok(source), "True\n");
}

#[test]
fn moving_a_shape_is_visible_through_every_alias() {
    let source = "def main() { \
                      Canvas c = Canvas(); \
                      Square s = Square(1.0); \
                      c.push(s); \
                      s.move(2.0, 3.0); \
                      for (Shape e : c) { print(e.x(), \" \", e.y()); } \
                  }";
    assert_eq!(run_ok(source), "2.0 3.0\n");
}

#[test]
fn canvas_push_pop_size_and_iteration() {
    let source = "def main() { \
                      Canvas c = Canvas(); \
                      c.push(Square(2.0)); \
                      c.push(Square(3.0)); \
                      print(c.size()); \
                      for (Shape s : c) { print(s.area()); } \
                      print(c.pop().area()); \
                      print(c.size()); \
                  }";
    assert_eq!(run_ok(source), "2\n4.0\n9.0\n9.0\n1\n");
}

#[test]
fn popping_an_empty_canvas_is_an_error() {
    let error = runtime_error("def main() { Canvas c = Canvas(); c.pop(); }");
    assert!(matches!(error, RuntimeError::EmptyCanvas { .. }), "{error:?}");
}

#[test]
fn constructors_check_arity_and_arguments() {
    let error = runtime_error("def main() { Circle c = Circle(1.0, 2.0); }");
    assert!(matches!(error, RuntimeError::NumberOfArguments { expected: 1, found: 2, .. }),
            "{error:?}");

    let error = runtime_error("def main() { Circle c = Circle(True); }");
    assert!(matches!(error, RuntimeError::InvalidArgument { .. }), "{error:?}");

    let error = runtime_error("def main() { Triangle t = Triangle(1.0, 1.0, 5.0); }");
    assert!(matches!(error, RuntimeError::InvalidArgument { .. }), "{error:?}");
}

#[test]
fn unknown_methods_are_missing_function_declarations() {
    let error = runtime_error("def main() { Square s = Square(1.0); s.frob(); }");
    assert!(matches!(error, RuntimeError::MissingFunctionDeclaration { .. }), "{error:?}");
}

#[test]
fn integer_arithmetic_overflow_is_an_error() {
    let source = "def main() { print(2000000000 * 2000000000 * 3); }";
    let error = runtime_error(source);
    assert!(matches!(error, RuntimeError::Overflow { .. }), "{error:?}");
}

#[test]
fn comments_are_invisible_to_programs() {
    let source = "# leading comment\n\
                  def main() { # trailing comment\n\
                      print(1); # another\n\
                  }\n";
    assert_eq!(run_ok(source), "1\n");
}

#[test]
fn duplicate_functions_are_reported_and_first_wins() {
    let source = "def main() { print(1); } def main() { print(2); }";
    let (output, report) = run(source);
    assert_eq!(report.syntax_errors.len(), 1, "{report:?}");
    assert!(report.runtime_error.is_none(), "{report:?}");
    assert_eq!(output, "1\n");
}

#[test]
fn lexical_errors_do_not_abort_the_pipeline() {
    let limits = Limits { max_int: 100,
                          ..Limits::default() };

    let (_, report) = run_with_limits("def main() { print(101); }", &limits);
    assert!(!report.lexical_errors.is_empty(), "{report:?}");

    let (output, report) = run_with_limits("def main() { print(100); }", &limits);
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(output, "100\n");
}
