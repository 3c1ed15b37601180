use crate::ast::{Position, Type};

/// A fatal evaluation error.
///
/// Unlike lexical and syntax diagnostics these are not collected: the first
/// runtime error terminates the run and is the only one reported.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// No function named `main` was declared.
    MissingMain,
    /// An identifier was read or assigned before being declared.
    MissingVariableDeclaration {
        /// The undeclared name.
        name:     String,
        /// Position of the use.
        position: Position,
    },
    /// A call named neither a user function, a builtin, a constructor nor a
    /// method of the receiver.
    MissingFunctionDeclaration {
        /// The unresolved name.
        name:     String,
        /// Position of the call.
        position: Position,
    },
    /// A name was declared twice in the same scope chain.
    Redeclaration {
        /// The redeclared name.
        name:     String,
        /// Position of the second declaration.
        position: Position,
    },
    /// A declaration initializer had a different type than declared.
    InvalidDeclarationType {
        /// The initializer's runtime type.
        found:    Type,
        /// The declared type.
        expected: Type,
        /// Position of the declaration.
        position: Position,
    },
    /// A declaration had no initializer expression.
    MissingDeclarationValue {
        /// Position of the declaration.
        position: Position,
    },
    /// An assigned value had a different type than the variable.
    InvalidAssignmentType {
        /// The value's runtime type.
        found:    Type,
        /// The variable's declared type.
        expected: Type,
        /// Position of the assignment.
        position: Position,
    },
    /// An assignment had no value expression.
    MissingAssignmentValue {
        /// Position of the assignment.
        position: Position,
    },
    /// A function with a declared return type finished without returning.
    MissingReturnType {
        /// The declared return type.
        expected: Type,
        /// Position of the call.
        position: Position,
    },
    /// A returned value had a different type than declared.
    InvalidReturnType {
        /// The returned value's runtime type.
        found:    Type,
        /// The declared return type.
        expected: Type,
        /// Position of the call.
        position: Position,
    },
    /// A `return` statement had no expression.
    MissingReturnValue {
        /// Position of the `return`.
        position: Position,
    },
    /// A call supplied the wrong number of arguments.
    NumberOfArguments {
        /// The called function, constructor or method.
        name:     String,
        /// The declared parameter count.
        expected: usize,
        /// The supplied argument count.
        found:    usize,
        /// Position of the call.
        position: Position,
    },
    /// A binary operator was applied to operands of two different types.
    MismatchedTypes {
        /// Type of the left operand.
        left:     Type,
        /// Type of the right operand.
        right:    Type,
        /// The operator.
        operator: &'static str,
        /// Position of the operator.
        position: Position,
    },
    /// A binary operator was applied to a type it is not defined for.
    InvalidOperandType {
        /// The operator.
        operator: &'static str,
        /// The operand type.
        found:    Type,
        /// Position of the operator.
        position: Position,
    },
    /// A unary operator was applied to a type it is not defined for.
    InvalidUnaryOperator {
        /// The operator.
        operator: &'static str,
        /// The operand type.
        found:    Type,
        /// Position of the operator.
        position: Position,
    },
    /// Division by zero, of either numeric type.
    DivisionByZero {
        /// Position of the division.
        position: Position,
    },
    /// A cast was applied to a non-numeric operand.
    InvalidCastType {
        /// The operand type.
        found:    Type,
        /// Position of the cast.
        position: Position,
    },
    /// An `if`, `while` or `for` statement was missing its header
    /// expression (a parser placeholder was executed).
    MissingCondition {
        /// The statement keyword, `"if"`, `"while"` or `"for"`.
        construct: &'static str,
        /// Position of the statement.
        position:  Position,
    },
    /// A condition evaluated to something other than a boolean.
    ExpectedBoolean {
        /// The condition's runtime type.
        found:    Type,
        /// Position of the condition.
        position: Position,
    },
    /// A `for` statement declared a non-`Shape` element or iterated a
    /// non-`Canvas` value.
    InvalidIterableType {
        /// The type found.
        found:    Type,
        /// The type required.
        expected: Type,
        /// Position of the statement.
        position: Position,
    },
    /// The recursion-depth ceiling was exceeded.
    MaximumRecursionDepth {
        /// The configured ceiling.
        depth:    usize,
        /// The function whose call crossed the ceiling.
        name:     String,
        /// Position of the call.
        position: Position,
    },
    /// An expression that produces no value was used where one is required.
    MissingValue {
        /// Position of the expression.
        position: Position,
    },
    /// An arithmetic operation or numeric conversion left the representable
    /// range.
    Overflow {
        /// Position of the operation.
        position: Position,
    },
    /// A constructor or method argument was rejected.
    InvalidArgument {
        /// What was wrong with it.
        details:  String,
        /// Position of the call.
        position: Position,
    },
    /// `pop()` was called on a canvas holding no shapes.
    EmptyCanvas {
        /// Position of the call.
        position: Position,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMain => write!(f, "Runtime error: missing main function."),
            Self::MissingVariableDeclaration { name, position } => {
                write!(f, "Runtime error at {position}: missing variable declaration: [{name}].")
            },
            Self::MissingFunctionDeclaration { name, position } => {
                write!(f, "Runtime error at {position}: missing function declaration: [{name}].")
            },
            Self::Redeclaration { name, position } => {
                write!(f, "Runtime error at {position}: redeclaration of variable: [{name}].")
            },
            Self::InvalidDeclarationType { found,
                                           expected,
                                           position, } => {
                write!(f,
                       "Runtime error at {position}: invalid declaration type: [{found}] \
                        expected: [{expected}].")
            },
            Self::MissingDeclarationValue { position } => {
                write!(f, "Runtime error at {position}: missing declaration value.")
            },
            Self::InvalidAssignmentType { found,
                                          expected,
                                          position, } => {
                write!(f,
                       "Runtime error at {position}: invalid assignment type: [{found}] expected: \
                        [{expected}].")
            },
            Self::MissingAssignmentValue { position } => {
                write!(f, "Runtime error at {position}: missing assignment value.")
            },
            Self::MissingReturnType { expected, position } => {
                write!(f, "Runtime error at {position}: missing return value, expected: \
                           [{expected}].")
            },
            Self::InvalidReturnType { found,
                                      expected,
                                      position, } => {
                write!(f,
                       "Runtime error at {position}: invalid return type: [{found}] expected: \
                        [{expected}].")
            },
            Self::MissingReturnValue { position } => {
                write!(f, "Runtime error at {position}: missing return value.")
            },
            Self::NumberOfArguments { name,
                                      expected,
                                      found,
                                      position, } => {
                write!(f,
                       "Runtime error at {position}: '{name}' takes {expected} arguments but \
                        {found} were given.")
            },
            Self::MismatchedTypes { left,
                                    right,
                                    operator,
                                    position, } => {
                write!(f,
                       "Runtime error at {position}: mismatched types: [{left}] {operator} \
                        [{right}].")
            },
            Self::InvalidOperandType { operator,
                                       found,
                                       position, } => {
                write!(f,
                       "Runtime error at {position}: operator '{operator}' is not defined for \
                        type [{found}].")
            },
            Self::InvalidUnaryOperator { operator,
                                         found,
                                         position, } => {
                write!(f,
                       "Runtime error at {position}: invalid unary operator: ['{operator}' on \
                        {found}].")
            },
            Self::DivisionByZero { position } => {
                write!(f, "Runtime error at {position}: division by zero.")
            },
            Self::InvalidCastType { found, position } => {
                write!(f, "Runtime error at {position}: cannot cast type [{found}].")
            },
            Self::MissingCondition { construct, position } => {
                write!(f, "Runtime error at {position}: missing {construct} condition.")
            },
            Self::ExpectedBoolean { found, position } => {
                write!(f, "Runtime error at {position}: condition must be [bool], found \
                           [{found}].")
            },
            Self::InvalidIterableType { found,
                                        expected,
                                        position, } => {
                write!(f,
                       "Runtime error at {position}: invalid iterable type: [{found}] expected: \
                        [{expected}].")
            },
            Self::MaximumRecursionDepth { depth,
                                          name,
                                          position, } => {
                write!(f,
                       "Runtime error at {position}: maximum recursion depth [{depth}] exceeded \
                        in function [{name}].")
            },
            Self::MissingValue { position } => {
                write!(f, "Runtime error at {position}: expression produces no value.")
            },
            Self::Overflow { position } => {
                write!(f, "Runtime error at {position}: numeric overflow.")
            },
            Self::InvalidArgument { details, position } => {
                write!(f, "Runtime error at {position}: invalid argument: {details}.")
            },
            Self::EmptyCanvas { position } => {
                write!(f, "Runtime error at {position}: pop from an empty canvas.")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
