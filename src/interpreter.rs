/// The lexer module tokenizes source code.
///
/// Reads the raw source text and produces a stream of tokens with source
/// positions, one per `next_token` call, terminated by an end-of-input
/// token. Lexical failures are collected — never thrown — and replaced by
/// sentinel tokens so downstream stages always see a well-shaped stream.
///
/// # Responsibilities
/// - Converts the character stream into typed tokens with positions.
/// - Enforces the configured limits on literals, identifiers and comments.
/// - Detects the newline convention and reports violations of it.
pub mod lexer;
/// The parser module builds the abstract syntax tree from tokens.
///
/// A recursive-descent parser with one token of lookahead: every grammar
/// rule either returns its node or signals that the alternative does not
/// start here. Syntax errors are collected and parsing continues with
/// placeholders, so one run can report several diagnostics.
///
/// # Responsibilities
/// - Converts tokens into the typed AST (program, functions, statements,
///   expressions).
/// - Encodes operator precedence and associativity in the rule chain.
/// - Collects syntax diagnostics with positions, recovering best-effort.
pub mod parser;
/// The evaluator module executes the AST.
///
/// A tree-walking evaluator with a single exhaustive dispatch per node
/// kind. It owns the runtime environment, enforces the type rules at the
/// point of use, guards against runaway recursion and drives execution
/// starting at `main`.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements with scoped state.
/// - Raises typed runtime errors; the first one terminates the run.
/// - Threads the explicit control-flow signal implementing `return`.
pub mod evaluator;
/// The environment module holds the interpreter's runtime state.
///
/// Nested lexical scopes for variables, the flat global function table and
/// the recursion-depth bookkeeping, with call isolation implemented by
/// stashing the caller's scope chain.
pub mod environment;
/// The value module defines the runtime values.
///
/// The `Value` enum covers the four scalar types plus shape and canvas
/// objects. Scalars copy on assignment; objects are reference values shared
/// through aliases.
pub mod value;
