use std::io::Write;

use crate::{
    ast::{Expr, Position, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::{Interpreter, core::EvalResult},
        value::Value,
    },
};

impl<W: Write> Interpreter<'_, W> {
    /// Evaluates a unary operation: `not` on booleans, `-` on numbers.
    /// Every other operator/operand pairing is the invalid-unary-operator
    /// error.
    pub(in crate::interpreter::evaluator) fn eval_unary(&mut self,
                                                        op: UnaryOperator,
                                                        operand: &Expr,
                                                        position: Position)
                                                        -> EvalResult<Value> {
        let value = self.eval_value(operand)?;
        match (op, value) {
            (UnaryOperator::Not, Value::Bool(value)) => Ok(Value::Bool(!value)),
            (UnaryOperator::Negate, Value::Int(value)) => {
                value.checked_neg()
                     .map(Value::Int)
                     .ok_or(RuntimeError::Overflow { position })
            },
            (UnaryOperator::Negate, Value::Dec(value)) => Ok(Value::Dec(-value)),
            (op, value) => Err(RuntimeError::InvalidUnaryOperator { operator: op.symbol(),
                                                                    found: value.type_of(),
                                                                    position }),
        }
    }
}
