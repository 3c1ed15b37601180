use crate::ast::Position;

/// A collected syntax diagnostic.
///
/// The parser never aborts on one of these: it records the error, patches
/// the tree with a placeholder and keeps going, so a single run can surface
/// several diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// A required token was not found at the current position.
    UnexpectedToken {
        /// Description of the expected token.
        expected: String,
        /// Description of the token actually found.
        found:    String,
        /// Position of the found token.
        position: Position,
    },
    /// An identifier was required but something else was found.
    MissingIdentifier {
        /// Description of the token actually found.
        found:    String,
        /// Position of the found token.
        position: Position,
    },
    /// An expression was required but could not be parsed.
    MissingExpression {
        /// Position where the expression should have started.
        position: Position,
    },
    /// A parameter declaration was required but could not be parsed.
    MissingArgument {
        /// Position where the declaration should have started.
        position: Position,
    },
    /// A parameter name appeared twice in the same parameter list.
    DuplicateArgument {
        /// The repeated name.
        name:     String,
        /// Position of the repeated declaration.
        position: Position,
    },
    /// A function name appeared twice at the top level. The first
    /// declaration wins.
    DuplicateFunction {
        /// The repeated name.
        name:     String,
        /// Position reported for the repeated declaration.
        position: Position,
    },
}

impl SyntaxError {
    /// The position the diagnostic points at.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::MissingIdentifier { position, .. }
            | Self::MissingExpression { position }
            | Self::MissingArgument { position }
            | Self::DuplicateArgument { position, .. }
            | Self::DuplicateFunction { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken { expected,
                                    found,
                                    position, } => {
                write!(f,
                       "Syntax error at {position}: unexpected token: [{found}] expected: \
                        [{expected}].")
            },
            Self::MissingIdentifier { found, position } => {
                write!(f, "Syntax error at {position}: missing identifier, found [{found}].")
            },
            Self::MissingExpression { position } => {
                write!(f, "Syntax error at {position}: missing expression.")
            },
            Self::MissingArgument { position } => {
                write!(f, "Syntax error at {position}: missing argument declaration.")
            },
            Self::DuplicateArgument { name, position } => {
                write!(f, "Syntax error at {position}: argument already exists: [{name}].")
            },
            Self::DuplicateFunction { name, position } => {
                write!(f, "Syntax error at {position}: function already exists: [{name}].")
            },
        }
    }
}

impl std::error::Error for SyntaxError {}
