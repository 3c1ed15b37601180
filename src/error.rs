/// Lexical errors.
///
/// Defines the recoverable errors the lexer collects while tokenizing:
/// overflows of the configured limits, unterminated strings, newline
/// convention violations and unexpected characters. Lexing always continues
/// after one of these.
pub mod lexical_error;
/// Syntax errors.
///
/// Defines the recoverable errors the parser collects while building the
/// AST: unexpected tokens, missing identifiers or expressions, and duplicate
/// declarations. Parsing continues best-effort after each.
pub mod syntax_error;
/// Runtime errors.
///
/// Defines the fatal errors the interpreter can raise while evaluating a
/// program: type rule violations, missing declarations, division by zero,
/// recursion overflow and friends. Exactly one of these is visible per run.
pub mod runtime_error;

pub use lexical_error::{LexicalError, LexicalErrorKind};
pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;
