use crate::ast::Position;

/// The category of a lexical failure.
///
/// This enum doubles as the error type of the generated lexer: token
/// callbacks return one of these when a lexeme violates a configured limit,
/// and the default variant is produced for characters no rule matches. The
/// wrapper attaches the source position and the offending lexeme to build a
/// full [`LexicalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalErrorKind {
    /// An integer literal grew past the configured maximum value.
    IntegerOverflow,
    /// A decimal literal grew past the configured maximum value.
    DecimalOverflow,
    /// A string literal grew past the configured maximum length.
    StringOverflow,
    /// An identifier grew past the configured maximum length.
    IdentifierOverflow,
    /// A comment grew past the configured maximum length.
    CommentOverflow,
    /// A string literal was closed by neither `"` nor anything before the
    /// end of the line or file.
    UnterminatedString,
    /// A newline sequence differed from the convention established by the
    /// first newline in the stream.
    NewLineMismatch,
    /// A character no lexer rule recognizes.
    #[default]
    UnexpectedCharacter,
}

/// A collected lexical diagnostic: what went wrong, where, and the raw
/// source text involved.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalError {
    /// The failure category.
    pub kind:     LexicalErrorKind,
    /// Position of the offending lexeme.
    pub position: Position,
    /// The offending source text.
    pub lexeme:   String,
}

impl std::fmt::Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self { position, lexeme, .. } = self;
        match self.kind {
            LexicalErrorKind::IntegerOverflow => {
                write!(f, "Lexical error at {position}: type 'int' value out of range: [{lexeme}].")
            },
            LexicalErrorKind::DecimalOverflow => {
                write!(f, "Lexical error at {position}: type 'dec' value out of range: [{lexeme}].")
            },
            LexicalErrorKind::StringOverflow => {
                write!(f, "Lexical error at {position}: string literal too long: [{lexeme}].")
            },
            LexicalErrorKind::IdentifierOverflow => {
                write!(f, "Lexical error at {position}: identifier too long: [{lexeme}].")
            },
            LexicalErrorKind::CommentOverflow => {
                write!(f, "Lexical error at {position}: comment too long.")
            },
            LexicalErrorKind::UnterminatedString => {
                write!(f, "Lexical error at {position}: unterminated string: [{lexeme}].")
            },
            LexicalErrorKind::NewLineMismatch => {
                write!(f,
                       "Lexical error at {position}: newline sequence {:?} differs from the one \
                        established earlier in the file.",
                       lexeme)
            },
            LexicalErrorKind::UnexpectedCharacter => {
                write!(f, "Lexical error at {position}: unexpected character: [{lexeme}].")
            },
        }
    }
}

impl std::error::Error for LexicalError {}
