use std::{io::Write, rc::Rc};

use crate::{
    Limits,
    ast::{Expr, Position, Program, Type},
    error::{LexicalError, RuntimeError, SyntaxError},
    interpreter::{environment::Environment, parser::Parser, value::Value},
    util::num::{f64_to_i64_truncated, i64_to_f64_checked},
};

/// Result type used throughout evaluation.
///
/// Runtime errors are fatal: the first one unwinds the whole tree-walk and
/// ends the run.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The control-flow signal threaded through statement execution.
///
/// A `return` statement produces `Return`; every enclosing block and loop
/// stops executing (without re-evaluating loop conditions) and hands the
/// signal up until the function-call evaluator consumes it.
#[derive(Debug)]
pub enum Flow {
    /// Execution continues with the next statement.
    Normal,
    /// A `return` is pending, carrying the returned value if any.
    Return(Option<Value>),
}

/// The tree-walking interpreter.
///
/// Owns the parser (invoked exactly once per run), the [`Environment`] and
/// the output writer `print` lines go to. Program execution starts at the
/// function named `main`.
///
/// # Example
/// ```
/// use geoscript::interpreter::{
///     evaluator::Interpreter,
///     lexer::{FilteredLexer, Lexer},
///     parser::Parser,
/// };
///
/// let lexer = FilteredLexer::new(Lexer::new("def main() { print(1 + 2); }"));
/// let mut output = Vec::new();
/// let mut interpreter = Interpreter::with_output(Parser::new(lexer), &mut output, 100);
///
/// interpreter.interpret().unwrap();
/// assert_eq!(output, b"3\n");
/// ```
pub struct Interpreter<'src, W: Write> {
    pub(in crate::interpreter::evaluator) parser: Parser<'src>,
    pub(in crate::interpreter::evaluator) environment: Environment,
    pub(in crate::interpreter::evaluator) output: W,
    pub(in crate::interpreter::evaluator) max_recursion_depth: usize,
}

impl<'src> Interpreter<'src, std::io::Stdout> {
    /// Creates an interpreter printing to stdout with the default
    /// recursion ceiling.
    #[must_use]
    pub fn new(parser: Parser<'src>) -> Self {
        Self::with_output(parser, std::io::stdout(), Limits::default().max_recursion_depth)
    }
}

impl<'src, W: Write> Interpreter<'src, W> {
    /// Creates an interpreter with an explicit output writer and recursion
    /// ceiling.
    pub fn with_output(parser: Parser<'src>, output: W, max_recursion_depth: usize) -> Self {
        Self { parser,
               environment: Environment::new(),
               output,
               max_recursion_depth }
    }

    /// Runs the program: parses it, registers every function and evaluates
    /// a call to `main`.
    ///
    /// # Errors
    /// Returns the first runtime error encountered, or the missing-main
    /// error when no `main` function is declared. Lexical and syntax
    /// diagnostics are not errors here; collect them afterwards via
    /// [`Interpreter::take_diagnostics`].
    pub fn interpret(&mut self) -> Result<(), RuntimeError> {
        let program = self.parser.parse_program();
        self.environment = Environment::new();
        self.run(&program)
    }

    fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for function in &program.functions {
            self.environment.add_function(Rc::new(function.clone()));
        }

        if !self.environment.has_function("main") {
            return Err(RuntimeError::MissingMain);
        }

        self.call_user_function("main", &[], Position::start())?;
        Ok(())
    }

    /// Takes the lexical and syntax diagnostics collected while parsing.
    pub fn take_diagnostics(&mut self) -> (Vec<LexicalError>, Vec<SyntaxError>) {
        self.parser.take_diagnostics()
    }

    /// Evaluates an expression.
    ///
    /// Returns `None` only for calls that produce no value (a void user
    /// function, `print`, or a void method such as `move`).
    pub(in crate::interpreter::evaluator) fn eval_expression(&mut self,
                                                            expression: &Expr)
                                                            -> EvalResult<Option<Value>> {
        match expression {
            Expr::Integer { value, .. } => Ok(Some(Value::Int(*value))),
            Expr::Decimal { value, .. } => Ok(Some(Value::Dec(*value))),
            Expr::Str { value, .. } => Ok(Some(Value::Str(value.clone()))),
            Expr::Bool { value, .. } => Ok(Some(Value::Bool(*value))),
            Expr::Identifier { name, position } => {
                self.eval_identifier(name, *position).map(Some)
            },
            Expr::Binary { left,
                           op,
                           right,
                           position, } => {
                self.eval_binary(left, *op, right, *position).map(Some)
            },
            Expr::Unary { op, operand, position } => {
                self.eval_unary(*op, operand, *position).map(Some)
            },
            Expr::Cast { target,
                         operand,
                         position, } => {
                self.eval_cast(*target, operand, *position).map(Some)
            },
            Expr::Call { root,
                         name,
                         arguments,
                         position, } => {
                self.eval_call(root.as_deref(), name, arguments, *position)
            },
        }
    }

    /// Evaluates an expression that must produce a value.
    ///
    /// # Errors
    /// Raises the missing-value error when the expression evaluates to
    /// nothing, which only void calls can do.
    pub(in crate::interpreter::evaluator) fn eval_value(&mut self,
                                                        expression: &Expr)
                                                        -> EvalResult<Value> {
        self.eval_expression(expression)?
            .ok_or(RuntimeError::MissingValue { position: expression.position() })
    }

    /// Looks a variable up in the scope chain and copies its value out.
    /// Scalars copy; shape and canvas values alias.
    fn eval_identifier(&mut self, name: &str, position: Position) -> EvalResult<Value> {
        self.environment
            .variable(name)
            .map(|variable| variable.value.clone())
            .ok_or_else(|| RuntimeError::MissingVariableDeclaration { name: name.to_owned(),
                                                                      position })
    }

    /// Evaluates a cast. Only `int` ⇄ `dec` conversions exist: widening to
    /// `dec`, truncation toward zero to `int`, and the identity casts.
    fn eval_cast(&mut self, target: Type, operand: &Expr, position: Position) -> EvalResult<Value> {
        let value = self.eval_value(operand)?;
        match (target, value) {
            (Type::Int, Value::Int(value)) => Ok(Value::Int(value)),
            (Type::Int, Value::Dec(value)) => {
                f64_to_i64_truncated(value, RuntimeError::Overflow { position }).map(Value::Int)
            },
            (Type::Dec, Value::Int(value)) => {
                i64_to_f64_checked(value, RuntimeError::Overflow { position }).map(Value::Dec)
            },
            (Type::Dec, Value::Dec(value)) => Ok(Value::Dec(value)),
            (_, value) => Err(RuntimeError::InvalidCastType { found: value.type_of(),
                                                              position }),
        }
    }
}
