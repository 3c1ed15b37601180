use std::io::Write;

use crate::{
    ast::{Expr, Position},
    error::RuntimeError,
    geometry::{self, canvas, shape},
    interpreter::{
        environment::Variable,
        evaluator::{
            Interpreter,
            core::{EvalResult, Flow},
        },
        value::Value,
    },
};

impl<W: Write> Interpreter<'_, W> {
    /// Evaluates a call expression.
    ///
    /// Without a receiver the name resolves against, in order: the user
    /// function table, the `print` builtin, and the object constructor
    /// table; anything else is the missing-function-declaration error.
    /// With a receiver, the root expression is evaluated and the name is
    /// looked up in the receiver type's capability table.
    pub(in crate::interpreter::evaluator) fn eval_call(&mut self,
                                                       root: Option<&Expr>,
                                                       name: &str,
                                                       arguments: &[Expr],
                                                       position: Position)
                                                       -> EvalResult<Option<Value>> {
        let Some(root) = root else {
            return self.eval_unqualified_call(name, arguments, position);
        };

        let receiver = self.eval_value(root)?;
        let values = self.eval_arguments(arguments)?;

        match receiver {
            Value::Shape(shape) => shape::call_method(&shape, name, &values, position),
            Value::Canvas(canvas) => canvas::call_method(&canvas, name, &values, position),
            _ => Err(RuntimeError::MissingFunctionDeclaration { name: name.to_owned(),
                                                                position }),
        }
    }

    fn eval_unqualified_call(&mut self,
                             name: &str,
                             arguments: &[Expr],
                             position: Position)
                             -> EvalResult<Option<Value>> {
        if self.environment.has_function(name) {
            return self.call_user_function(name, arguments, position);
        }

        if name == "print" {
            self.eval_print(arguments)?;
            return Ok(None);
        }

        if let Some(constructor) = geometry::constructor(name) {
            let values = self.eval_arguments(arguments)?;
            return constructor.construct(&values, position).map(Some);
        }

        Err(RuntimeError::MissingFunctionDeclaration { name: name.to_owned(),
                                                       position })
    }

    /// Calls a registered user function.
    ///
    /// Arguments are evaluated in the caller's scope and bound under the
    /// parameter's declared type, deliberately without a bind-time type
    /// check. The callee runs in a fresh isolated chain; the recursion
    /// guard fires right after the new scope is established, before the
    /// body executes. After the body finishes the pending return value is
    /// checked against the declared return type; void functions are
    /// unchecked.
    pub(in crate::interpreter::evaluator) fn call_user_function(&mut self,
                                                               name: &str,
                                                               arguments: &[Expr],
                                                               position: Position)
                                                               -> EvalResult<Option<Value>> {
        let Some(function) = self.environment.function(name).cloned() else {
            return Err(RuntimeError::MissingFunctionDeclaration { name: name.to_owned(),
                                                                  position });
        };

        if arguments.len() != function.parameters.len() {
            return Err(RuntimeError::NumberOfArguments { name: name.to_owned(),
                                                         expected: function.parameters.len(),
                                                         found: arguments.len(),
                                                         position });
        }

        let mut bound = Vec::with_capacity(arguments.len());
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            let value = self.eval_value(argument)?;
            bound.push((parameter.name.clone(), Variable { ty: parameter.ty, value }));
        }

        self.environment.enter_function(bound);
        let result = if self.environment.recursion_depth() > self.max_recursion_depth {
            Err(RuntimeError::MaximumRecursionDepth { depth: self.max_recursion_depth,
                                                      name: name.to_owned(),
                                                      position })
        } else {
            self.exec_block(&function.body)
        };
        self.environment.exit_function();

        let value = match result? {
            Flow::Return(value) => value,
            Flow::Normal => None,
        };

        match (&value, function.return_type) {
            (None, Some(expected)) => Err(RuntimeError::MissingReturnType { expected, position }),
            (Some(actual), Some(expected)) if actual.type_of() != expected => {
                Err(RuntimeError::InvalidReturnType { found: actual.type_of(),
                                                      expected,
                                                      position })
            },
            _ => Ok(value),
        }
    }

    fn eval_arguments(&mut self, arguments: &[Expr]) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.eval_value(argument)?);
        }
        Ok(values)
    }

    /// The `print` builtin: concatenates the display form of every argument
    /// with no separator and writes one line to the configured output.
    fn eval_print(&mut self, arguments: &[Expr]) -> EvalResult<()> {
        let mut line = String::new();
        for argument in arguments {
            let value = self.eval_value(argument)?;
            line.push_str(&value.to_string());
        }
        let _ = writeln!(self.output, "{line}");
        Ok(())
    }
}
