use geoscript::{
    ast::{BinaryOperator, Expr, Statement, Type},
    error::SyntaxError,
    interpreter::{
        lexer::{FilteredLexer, Lexer},
        parser::Parser,
    },
};

fn parse(source: &str) -> (geoscript::ast::Program, Vec<SyntaxError>) {
    let mut parser = Parser::new(FilteredLexer::new(Lexer::new(source)));
    let program = parser.parse_program();
    let errors = parser.errors().to_vec();
    (program, errors)
}

#[test]
fn function_signatures_are_parsed() {
    let (program, errors) = parse("def int add(int a, dec b) { return a; }");
    assert!(errors.is_empty(), "{errors:?}");

    let function = &program.functions[0];
    assert_eq!(function.name, "add");
    assert_eq!(function.return_type, Some(Type::Int));
    assert_eq!(function.parameters.len(), 2);
    assert_eq!(function.parameters[0].ty, Type::Int);
    assert_eq!(function.parameters[0].name, "a");
    assert_eq!(function.parameters[1].ty, Type::Dec);
    assert_eq!(function.parameters[1].name, "b");
}

#[test]
fn void_functions_have_no_return_type() {
    let (program, errors) = parse("def main() { }");
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(program.functions[0].return_type, None);
}

#[test]
fn binary_operators_are_left_associative() {
    let (program, errors) = parse("def main() { int x = 2 - 3 - 4; }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Declaration { initializer: Some(expr), .. } =
        &program.functions[0].body.statements[0]
    else {
        panic!("expected a declaration");
    };
    // (2 - 3) - 4: the left child is itself the inner subtraction.
    let Expr::Binary { left, op, .. } = expr else {
        panic!("expected a binary expression");
    };
    assert_eq!(*op, BinaryOperator::Subtract);
    assert!(matches!(**left, Expr::Binary { op: BinaryOperator::Subtract, .. }));
}

#[test]
fn call_chains_nest_through_roots() {
    let (program, errors) = parse("def main() { x.area().y(); }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Expression(Expr::Call { root: Some(outer_root),
                                           name: outer_name,
                                           .. }) = &program.functions[0].body.statements[0]
    else {
        panic!("expected a call statement");
    };
    assert_eq!(outer_name, "y");

    let Expr::Call { root: Some(inner_root),
                     name: inner_name,
                     .. } = &**outer_root
    else {
        panic!("expected a nested call");
    };
    assert_eq!(inner_name, "area");
    assert!(matches!(**inner_root, Expr::Identifier { .. }));
}

#[test]
fn method_calls_without_parentheses_take_zero_arguments() {
    let (program, errors) = parse("def main() { s.side; }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Expression(Expr::Call { name, arguments, .. }) =
        &program.functions[0].body.statements[0]
    else {
        panic!("expected a call statement");
    };
    assert_eq!(name, "side");
    assert!(arguments.is_empty());
}

#[test]
fn cast_operand_is_the_whole_following_expression() {
    let (program, errors) = parse("def main() { int a = (int) 2.5 + 1.0; }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Declaration { initializer: Some(Expr::Cast { target, operand, .. }),
                                 .. } = &program.functions[0].body.statements[0]
    else {
        panic!("expected a cast initializer");
    };
    assert_eq!(*target, Type::Int);
    assert!(matches!(**operand, Expr::Binary { op: BinaryOperator::Add, .. }));
}

#[test]
fn constructor_calls_use_the_type_name() {
    let (program, errors) = parse("def main() { Circle c = Circle(1.0); }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Declaration { ty,
                                 initializer: Some(Expr::Call { root, name, .. }),
                                 .. } = &program.functions[0].body.statements[0]
    else {
        panic!("expected a declaration with a call initializer");
    };
    assert_eq!(*ty, Type::Circle);
    assert!(root.is_none());
    assert_eq!(name, "Circle");
}

#[test]
fn missing_semicolon_is_reported_and_parsing_continues() {
    let (program, errors) = parse("def main() { int a = 1 }");
    assert_eq!(program.functions.len(), 1);
    assert!(errors.iter()
                  .any(|error| matches!(error, SyntaxError::UnexpectedToken { .. })),
            "{errors:?}");
}

#[test]
fn several_diagnostics_survive_one_run() {
    let (program, errors) = parse("def main() { int = 1; dec d = ; }");
    assert_eq!(program.functions.len(), 1);
    assert!(errors.len() >= 2, "{errors:?}");
}

#[test]
fn duplicate_functions_keep_the_first() {
    let (program, errors) = parse("def f() { } def f() { return 1; }");
    assert_eq!(program.functions.len(), 1);
    assert!(program.functions[0].body.statements.is_empty());
    assert!(errors.iter()
                  .any(|error| matches!(error, SyntaxError::DuplicateFunction { .. })),
            "{errors:?}");
}

#[test]
fn duplicate_parameters_are_reported_and_dropped() {
    let (program, errors) = parse("def f(int a, int a) { } def main() { }");
    assert_eq!(program.functions[0].parameters.len(), 1);
    assert!(errors.iter()
                  .any(|error| matches!(error, SyntaxError::DuplicateArgument { .. })),
            "{errors:?}");
}

#[test]
fn missing_condition_is_reported_but_statement_survives() {
    let (program, errors) = parse("def main() { if () { } }");
    assert!(errors.iter()
                  .any(|error| matches!(error, SyntaxError::MissingExpression { .. })),
            "{errors:?}");

    let Statement::If { condition, .. } = &program.functions[0].body.statements[0] else {
        panic!("expected an if statement");
    };
    assert!(condition.is_none());
}

#[test]
fn iterate_statements_carry_their_declaration() {
    let (program, errors) = parse("def main() { for (Shape s : c) { } }");
    assert!(errors.is_empty(), "{errors:?}");

    let Statement::Iterate { element_type,
                             element_name,
                             source,
                             .. } = &program.functions[0].body.statements[0]
    else {
        panic!("expected a for statement");
    };
    assert_eq!(*element_type, Type::Shape);
    assert_eq!(element_name, "s");
    assert!(matches!(source, Some(Expr::Identifier { .. })));
}

#[test]
fn top_level_parsing_stops_at_the_first_stray_token() {
    let (program, errors) = parse("def main() { } stray tokens here");
    assert_eq!(program.functions.len(), 1);
    // The reference behavior: trailing garbage ends the program quietly.
    assert!(errors.is_empty(), "{errors:?}");
}
