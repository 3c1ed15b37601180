/// Evaluator state and expression dispatch.
///
/// Holds the `Interpreter` type, the `interpret()` entry point, the single
/// exhaustive expression dispatch and the evaluation of identifiers, casts
/// and literals.
pub mod core;

/// Statement execution.
///
/// Executes blocks and every statement form, threading the explicit
/// control-flow signal that implements `return` semantics.
pub mod statement;

/// Binary operator evaluation.
///
/// Type agreement checks, logical and relational operators, arithmetic and
/// the true-division rule.
pub mod binary;

/// Unary operator evaluation.
pub mod unary;

/// Call resolution.
///
/// User function calls with scope isolation and the recursion guard, the
/// `print` builtin, object construction and method dispatch on receivers.
pub mod call;

pub use core::{EvalResult, Flow, Interpreter};
