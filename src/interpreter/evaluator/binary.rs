use std::{cmp::Ordering, io::Write, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, Position, Type},
    error::RuntimeError,
    interpreter::{
        evaluator::{Interpreter, core::EvalResult},
        value::Value,
    },
    util::num::i64_to_f64_checked,
};

impl<W: Write> Interpreter<'_, W> {
    /// Evaluates a binary operation.
    ///
    /// Both operands are evaluated first and must have identical runtime
    /// types; the mismatched-types error names both types and the operator.
    /// Operator applicability is then checked per type class: `and`/`or`
    /// need booleans, ordering needs integers, decimals or strings,
    /// equality works on every type (by identity for shapes and canvases),
    /// and arithmetic needs numbers — except `+`, which also concatenates
    /// strings.
    pub(in crate::interpreter::evaluator) fn eval_binary(&mut self,
                                                        left: &Expr,
                                                        op: BinaryOperator,
                                                        right: &Expr,
                                                        position: Position)
                                                        -> EvalResult<Value> {
        let lhs = self.eval_value(left)?;
        let rhs = self.eval_value(right)?;

        if lhs.type_of() != rhs.type_of() {
            return Err(RuntimeError::MismatchedTypes { left: lhs.type_of(),
                                                       right: rhs.type_of(),
                                                       operator: op.symbol(),
                                                       position });
        }

        match op {
            BinaryOperator::Or | BinaryOperator::And => eval_logical(op, &lhs, &rhs, position),
            BinaryOperator::Equal | BinaryOperator::NotEqual => {
                Ok(Value::Bool(eval_equality(op, &lhs, &rhs)))
            },
            BinaryOperator::Greater
            | BinaryOperator::Less
            | BinaryOperator::GreaterEqual
            | BinaryOperator::LessEqual => eval_ordering(op, &lhs, &rhs, position),
            BinaryOperator::Add
            | BinaryOperator::Subtract
            | BinaryOperator::Multiply
            | BinaryOperator::Divide => eval_arithmetic(op, lhs, rhs, position),
        }
    }
}

fn eval_logical(op: BinaryOperator,
                lhs: &Value,
                rhs: &Value,
                position: Position)
                -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Bool(left), Value::Bool(right)) => {
            let value = if op == BinaryOperator::Or {
                *left || *right
            } else {
                *left && *right
            };
            Ok(Value::Bool(value))
        },
        _ => Err(RuntimeError::InvalidOperandType { operator: op.symbol(),
                                                    found: lhs.type_of(),
                                                    position }),
    }
}

/// Equality is defined for every type of the language: by value for the
/// scalars, by object identity for shapes and canvases.
fn eval_equality(op: BinaryOperator, lhs: &Value, rhs: &Value) -> bool {
    let equal = match (lhs, rhs) {
        (Value::Int(left), Value::Int(right)) => left == right,
        (Value::Dec(left), Value::Dec(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Str(left), Value::Str(right)) => left == right,
        (Value::Shape(left), Value::Shape(right)) => Rc::ptr_eq(left, right),
        (Value::Canvas(left), Value::Canvas(right)) => Rc::ptr_eq(left, right),
        // Operand types were checked for equality before dispatch.
        _ => false,
    };

    if op == BinaryOperator::Equal { equal } else { !equal }
}

fn eval_ordering(op: BinaryOperator,
                 lhs: &Value,
                 rhs: &Value,
                 position: Position)
                 -> EvalResult<Value> {
    let holds = match (lhs, rhs) {
        (Value::Int(left), Value::Int(right)) => ordering_holds(op, left.cmp(right)),
        (Value::Dec(left), Value::Dec(right)) => {
            left.partial_cmp(right)
                .is_some_and(|ordering| ordering_holds(op, ordering))
        },
        (Value::Str(left), Value::Str(right)) => ordering_holds(op, left.cmp(right)),
        _ => {
            return Err(RuntimeError::InvalidOperandType { operator: op.symbol(),
                                                          found: lhs.type_of(),
                                                          position });
        },
    };
    Ok(Value::Bool(holds))
}

const fn ordering_holds(op: BinaryOperator, ordering: Ordering) -> bool {
    match op {
        BinaryOperator::Greater => ordering.is_gt(),
        BinaryOperator::Less => ordering.is_lt(),
        BinaryOperator::GreaterEqual => ordering.is_ge(),
        BinaryOperator::LessEqual => ordering.is_le(),
        _ => false,
    }
}

fn eval_arithmetic(op: BinaryOperator,
                   lhs: Value,
                   rhs: Value,
                   position: Position)
                   -> EvalResult<Value> {
    match (lhs, rhs) {
        (Value::Int(left), Value::Int(right)) => match op {
            BinaryOperator::Add => left.checked_add(right)
                                       .map(Value::Int)
                                       .ok_or(RuntimeError::Overflow { position }),
            BinaryOperator::Subtract => left.checked_sub(right)
                                            .map(Value::Int)
                                            .ok_or(RuntimeError::Overflow { position }),
            BinaryOperator::Multiply => left.checked_mul(right)
                                            .map(Value::Int)
                                            .ok_or(RuntimeError::Overflow { position }),
            BinaryOperator::Divide => {
                // `/` is true division: two integers divide to a decimal.
                if right == 0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                let left = i64_to_f64_checked(left, RuntimeError::Overflow { position })?;
                let right = i64_to_f64_checked(right, RuntimeError::Overflow { position })?;
                Ok(Value::Dec(left / right))
            },
            _ => unreachable!(),
        },
        (Value::Dec(left), Value::Dec(right)) => match op {
            BinaryOperator::Add => Ok(Value::Dec(left + right)),
            BinaryOperator::Subtract => Ok(Value::Dec(left - right)),
            BinaryOperator::Multiply => Ok(Value::Dec(left * right)),
            BinaryOperator::Divide => {
                if right == 0.0 {
                    return Err(RuntimeError::DivisionByZero { position });
                }
                Ok(Value::Dec(left / right))
            },
            _ => unreachable!(),
        },
        (Value::Str(left), Value::Str(right)) => {
            if op == BinaryOperator::Add {
                Ok(Value::Str(left + &right))
            } else {
                Err(RuntimeError::InvalidOperandType { operator: op.symbol(),
                                                       found: Type::Str,
                                                       position })
            }
        },
        (lhs, _) => Err(RuntimeError::InvalidOperandType { operator: op.symbol(),
                                                           found: lhs.type_of(),
                                                           position }),
    }
}
