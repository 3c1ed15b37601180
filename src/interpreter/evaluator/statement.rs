use std::io::Write;

use crate::{
    ast::{Block, Expr, Position, Statement, Type},
    error::RuntimeError,
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
    /// Executes a block in a fresh child scope.
    ///
    /// Statements run in order until one produces the `Return` signal;
    /// declarations made inside the block die with the scope on exit.
    pub(in crate::interpreter::evaluator) fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        self.environment.push_scope();

        let mut flow = Flow::Normal;
        for statement in &block.statements {
            flow = self.exec_statement(statement)?;
            if matches!(flow, Flow::Return(_)) {
                break;
            }
        }

        self.environment.pop_scope();
        Ok(flow)
    }

    /// Executes one statement, returning the control-flow signal.
    fn exec_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::If { condition,
                            body,
                            else_body,
                            position, } => {
                let condition = condition.as_ref()
                                         .ok_or(RuntimeError::MissingCondition {
                                             construct: "if",
                                             position: *position,
                                         })?;
                if self.eval_condition(condition)? {
                    self.exec_block(body)
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body)
                } else {
                    Ok(Flow::Normal)
                }
            },
            Statement::While { condition,
                               body,
                               position, } => {
                let condition = condition.as_ref()
                                         .ok_or(RuntimeError::MissingCondition {
                                             construct: "while",
                                             position: *position,
                                         })?;
                while self.eval_condition(condition)? {
                    // A pending return leaves the loop without touching the
                    // condition again.
                    if let Flow::Return(value) = self.exec_block(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            },
            Statement::Iterate { element_type,
                                 element_name,
                                 source,
                                 body,
                                 position, } => {
                self.exec_iterate(*element_type, element_name, source.as_ref(), body, *position)
            },
            Statement::Return { value, position } => {
                let expression = value.as_ref()
                                      .ok_or(RuntimeError::MissingReturnValue {
                                          position: *position,
                                      })?;
                let value = self.eval_expression(expression)?;
                Ok(Flow::Return(value))
            },
            Statement::Declaration { ty,
                                     name,
                                     initializer,
                                     position, } => {
                self.exec_declaration(*ty, name, initializer.as_ref(), *position)?;
                Ok(Flow::Normal)
            },
            Statement::Assignment { name,
                                    value,
                                    position, } => {
                self.exec_assignment(name, value.as_ref(), *position)?;
                Ok(Flow::Normal)
            },
            Statement::Expression(expression) => {
                self.eval_expression(expression)?;
                Ok(Flow::Normal)
            },
        }
    }

    /// Evaluates an `if`/`while` condition, which must be a boolean.
    fn eval_condition(&mut self, condition: &Expr) -> EvalResult<bool> {
        match self.eval_value(condition)? {
            Value::Bool(value) => Ok(value),
            other => Err(RuntimeError::ExpectedBoolean { found:    other.type_of(),
                                                         position: condition.position(), }),
        }
    }

    /// Executes a declaration: the initializer must be present, its type
    /// must equal the declared type exactly, and the name must be fresh in
    /// the whole current scope chain.
    fn exec_declaration(&mut self,
                        ty: Type,
                        name: &str,
                        initializer: Option<&Expr>,
                        position: Position)
                        -> EvalResult<()> {
        let initializer =
            initializer.ok_or(RuntimeError::MissingDeclarationValue { position })?;
        let value = self.eval_value(initializer)?;

        if value.type_of() != ty {
            return Err(RuntimeError::InvalidDeclarationType { found: value.type_of(),
                                                              expected: ty,
                                                              position });
        }
        if self.environment.has_variable(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_owned(),
                                                     position });
        }

        self.environment
            .declare(name.to_owned(), Variable { ty, value });
        Ok(())
    }

    /// Executes an assignment: the target must already be declared and the
    /// new value's type must equal the variable's declared type exactly.
    fn exec_assignment(&mut self,
                       name: &str,
                       value: Option<&Expr>,
                       position: Position)
                       -> EvalResult<()> {
        let expression = value.ok_or(RuntimeError::MissingAssignmentValue { position })?;
        let value = self.eval_value(expression)?;

        let Some(declared) = self.environment.variable(name).map(|variable| variable.ty) else {
            return Err(RuntimeError::MissingVariableDeclaration { name: name.to_owned(),
                                                                  position });
        };
        if declared != value.type_of() {
            return Err(RuntimeError::InvalidAssignmentType { found: value.type_of(),
                                                             expected: declared,
                                                             position });
        }

        self.environment.assign(name, value);
        Ok(())
    }

    /// Executes a `for` statement over a canvas.
    ///
    /// The declared element type must be exactly `Shape` and the iterated
    /// value exactly a canvas. The loop walks the live shape list by index,
    /// so pushes and pops made inside the body are observed, and rebinds
    /// the loop variable's value cell once per shape.
    fn exec_iterate(&mut self,
                    element_type: Type,
                    element_name: &str,
                    source: Option<&Expr>,
                    body: &Block,
                    position: Position)
                    -> EvalResult<Flow> {
        let source = source.ok_or(RuntimeError::MissingCondition { construct: "for",
                                                                   position })?;
        if element_type != Type::Shape {
            return Err(RuntimeError::InvalidIterableType { found: element_type,
                                                           expected: Type::Shape,
                                                           position });
        }

        let value = self.eval_value(source)?;
        let Value::Canvas(canvas) = value else {
            return Err(RuntimeError::InvalidIterableType { found: value.type_of(),
                                                           expected: Type::Canvas,
                                                           position });
        };

        self.environment.push_scope();

        let mut flow = Flow::Normal;
        let mut index = 0;
        loop {
            let Some(shape) = canvas.borrow().get(index) else {
                break;
            };
            self.environment.declare(element_name.to_owned(),
                                     Variable { ty:    Type::Shape,
                                                value: Value::Shape(shape), });
            flow = self.exec_block(body)?;
            if matches!(flow, Flow::Return(_)) {
                break;
            }
            index += 1;
        }

        self.environment.pop_scope();
        Ok(flow)
    }
}
