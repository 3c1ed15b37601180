use logos::Logos;

use crate::{
    Limits,
    ast::Position,
    error::{LexicalError, LexicalErrorKind},
};

/// State threaded through the generated lexer.
///
/// Carries the configured [`Limits`] so token callbacks can validate
/// lexemes, plus the line bookkeeping needed to turn byte spans into
/// line/column positions.
#[derive(Debug, Clone)]
pub struct LexerExtras {
    /// The configured lexing limits.
    pub limits:     Limits,
    /// 1-based line of the current position.
    pub line:       usize,
    /// Byte offset at which the current line starts.
    pub line_start: usize,
    /// The newline sequence established by the first newline in the stream.
    pub newline:    Option<String>,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { limits:     Limits::default(),
               line:       1,
               line_start: 0,
               newline:    None, }
    }
}

/// The closed set of token kinds.
///
/// One-or-two character operators resolve by maximal munch (`>=` beats `>`),
/// keywords beat the identifier rule, and a decimal literal beats an integer
/// followed by a dot. `Undefined` and `Eof` carry no pattern: they are
/// produced only by [`Lexer`], at failure points and at end of input.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalErrorKind)]
#[logos(skip r"[ \t\f]+")]
pub enum TokenKind {
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `=`
    #[token("=")]
    Assign,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `<`
    #[token("<")]
    Less,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`, also written `!`
    #[token("not")]
    #[token("!")]
    Not,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `def`
    #[token("def")]
    Def,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `int`
    #[token("int")]
    TyInt,
    /// `dec`
    #[token("dec")]
    TyDec,
    /// `bool`
    #[token("bool")]
    TyBool,
    /// `String`
    #[token("String")]
    TyString,
    /// `Shape`
    #[token("Shape")]
    TyShape,
    /// `Circle`
    #[token("Circle")]
    TyCircle,
    /// `Square`
    #[token("Square")]
    TySquare,
    /// `Rectangle`
    #[token("Rectangle")]
    TyRectangle,
    /// `Triangle`
    #[token("Triangle")]
    TyTriangle,
    /// `Rhomb`
    #[token("Rhomb")]
    TyRhomb,
    /// `Trapeze`
    #[token("Trapeze")]
    TyTrapeze,
    /// `Polygon`
    #[token("Polygon")]
    TyPolygon,
    /// `Canvas`
    #[token("Canvas")]
    TyCanvas,
    /// `True`
    #[token("True")]
    True,
    /// `False`
    #[token("False")]
    False,
    /// An integer literal, bounded by the configured maximum value.
    #[regex(r"[0-9]+", lex_integer)]
    Integer(i64),
    /// A decimal literal; both the whole and the fractional accumulator are
    /// bounded by the configured maximum value.
    #[regex(r"[0-9]+\.[0-9]+", lex_decimal)]
    Decimal(f64),
    /// A string literal with escapes preserved literally (`\\` collapses).
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*""#, lex_string)]
    #[regex(r#""([^"\\\n\r]|\\[^\n\r])*\\?"#, lex_unterminated_string)]
    Str(String),
    /// An identifier, bounded by the configured maximum length.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*", lex_identifier)]
    Identifier(String),
    /// A `#` comment running to the end of the line. Produced by the plain
    /// lexer and filtered out by [`FilteredLexer`] before parsing.
    #[regex(r"#[^\n\r]*", lex_comment)]
    Comment,
    /// A newline sequence. Never surfaced by [`Lexer::next_token`]: the
    /// callback records line bookkeeping (or reports a convention mismatch)
    /// and the wrapper swallows the token.
    #[regex(r"\r\n|\r|\n", lex_newline)]
    Newline,
    /// Sentinel emitted in place of a failed lexeme.
    Undefined,
    /// End-of-input marker, repeated on every call past the end.
    Eof,
}

impl TokenKind {
    /// A short human-readable description used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Plus => "'+'".to_owned(),
            Self::Minus => "'-'".to_owned(),
            Self::Star => "'*'".to_owned(),
            Self::Slash => "'/'".to_owned(),
            Self::Assign => "'='".to_owned(),
            Self::EqualEqual => "'=='".to_owned(),
            Self::BangEqual => "'!='".to_owned(),
            Self::Greater => "'>'".to_owned(),
            Self::Less => "'<'".to_owned(),
            Self::GreaterEqual => "'>='".to_owned(),
            Self::LessEqual => "'<='".to_owned(),
            Self::And => "'and'".to_owned(),
            Self::Or => "'or'".to_owned(),
            Self::Not => "'not'".to_owned(),
            Self::Semicolon => "';'".to_owned(),
            Self::Colon => "':'".to_owned(),
            Self::Comma => "','".to_owned(),
            Self::Dot => "'.'".to_owned(),
            Self::LBrace => "'{'".to_owned(),
            Self::RBrace => "'}'".to_owned(),
            Self::LParen => "'('".to_owned(),
            Self::RParen => "')'".to_owned(),
            Self::LBracket => "'['".to_owned(),
            Self::RBracket => "']'".to_owned(),
            Self::Def => "'def'".to_owned(),
            Self::Return => "'return'".to_owned(),
            Self::If => "'if'".to_owned(),
            Self::Else => "'else'".to_owned(),
            Self::While => "'while'".to_owned(),
            Self::For => "'for'".to_owned(),
            Self::TyInt => "'int'".to_owned(),
            Self::TyDec => "'dec'".to_owned(),
            Self::TyBool => "'bool'".to_owned(),
            Self::TyString => "'String'".to_owned(),
            Self::TyShape => "'Shape'".to_owned(),
            Self::TyCircle => "'Circle'".to_owned(),
            Self::TySquare => "'Square'".to_owned(),
            Self::TyRectangle => "'Rectangle'".to_owned(),
            Self::TyTriangle => "'Triangle'".to_owned(),
            Self::TyRhomb => "'Rhomb'".to_owned(),
            Self::TyTrapeze => "'Trapeze'".to_owned(),
            Self::TyPolygon => "'Polygon'".to_owned(),
            Self::TyCanvas => "'Canvas'".to_owned(),
            Self::True => "'True'".to_owned(),
            Self::False => "'False'".to_owned(),
            Self::Integer(value) => format!("integer {value}"),
            Self::Decimal(value) => format!("decimal {value}"),
            Self::Str(_) => "string literal".to_owned(),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::Comment => "comment".to_owned(),
            Self::Newline => "newline".to_owned(),
            Self::Undefined => "undefined token".to_owned(),
            Self::Eof => "end of input".to_owned(),
        }
    }
}

/// A lexed token: a kind plus the position its lexeme started at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind, possibly carrying a literal value.
    pub kind:     TokenKind,
    /// The 1-based source position of the first character.
    pub position: Position,
}

fn lex_integer(lex: &mut logos::Lexer<TokenKind>) -> Result<i64, LexicalErrorKind> {
    bounded_integer(lex.slice(), lex.extras.limits.max_int).ok_or(LexicalErrorKind::IntegerOverflow)
}

/// Accumulates decimal digits, rejecting the first digit that would push the
/// value past `max`.
fn bounded_integer(digits: &str, max: i64) -> Option<i64> {
    let mut value: i64 = 0;
    for byte in digits.bytes() {
        value = value.checked_mul(10)?
                     .checked_add(i64::from(byte - b'0'))?;
        if value > max {
            return None;
        }
    }
    Some(value)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn lex_decimal(lex: &mut logos::Lexer<TokenKind>) -> Result<f64, LexicalErrorKind> {
    let max = lex.extras.limits.max_int;
    let Some((whole, fraction)) = lex.slice().split_once('.') else {
        // The pattern guarantees a dot; this branch never runs.
        return Err(LexicalErrorKind::DecimalOverflow);
    };

    let whole = bounded_integer(whole, max).ok_or(LexicalErrorKind::DecimalOverflow)?;
    let fraction_value =
        bounded_integer(fraction, max).ok_or(LexicalErrorKind::DecimalOverflow)?;

    let scale = 10f64.powi(fraction.len() as i32);
    Ok(whole as f64 + fraction_value as f64 / scale)
}

fn lex_string(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexicalErrorKind> {
    let raw = lex.slice();
    let body = &raw[1..raw.len() - 1];

    let mut value = String::with_capacity(body.len());
    let mut characters = body.chars();
    while let Some(character) = characters.next() {
        if character == '\\' {
            match characters.next() {
                // Only a doubled backslash collapses; every other escape is
                // kept literally, two characters long.
                Some('\\') => value.push('\\'),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                },
                None => value.push('\\'),
            }
        } else {
            value.push(character);
        }
    }

    if value.chars().count() > lex.extras.limits.max_string_length {
        return Err(LexicalErrorKind::StringOverflow);
    }
    Ok(value)
}

fn lex_unterminated_string(
    _lex: &mut logos::Lexer<TokenKind>)
    -> Result<String, LexicalErrorKind> {
    Err(LexicalErrorKind::UnterminatedString)
}

fn lex_identifier(lex: &mut logos::Lexer<TokenKind>) -> Result<String, LexicalErrorKind> {
    let slice = lex.slice();
    if slice.len() > lex.extras.limits.max_identifier_length {
        return Err(LexicalErrorKind::IdentifierOverflow);
    }
    Ok(slice.to_owned())
}

fn lex_comment(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexicalErrorKind> {
    if lex.slice().chars().count() - 1 > lex.extras.limits.max_string_length {
        return Err(LexicalErrorKind::CommentOverflow);
    }
    Ok(())
}

/// Establishes the newline convention on first sight and enforces it
/// afterwards; a mismatch surfaces as a lexical error at the newline's
/// position.
fn lex_newline(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexicalErrorKind> {
    let sequence = lex.slice();
    let mismatch = match &lex.extras.newline {
        None => {
            lex.extras.newline = Some(sequence.to_owned());
            false
        },
        Some(expected) => expected != sequence,
    };

    lex.extras.line += 1;
    lex.extras.line_start = lex.span().end;

    if mismatch {
        Err(LexicalErrorKind::NewLineMismatch)
    } else {
        Ok(())
    }
}

/// The character-stream lexer.
///
/// `next_token` is the only way to traverse the input: a finite lazy token
/// sequence terminated by [`TokenKind::Eof`]. Lexical failures are appended
/// to the internal error collector and replaced by [`TokenKind::Undefined`]
/// tokens, so the parser always receives a stream of the same shape as
/// well-formed input.
///
/// # Example
/// ```
/// use geoscript::interpreter::lexer::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("int a = 5;");
/// assert_eq!(lexer.next_token().kind, TokenKind::TyInt);
/// assert_eq!(lexer.next_token().kind, TokenKind::Identifier("a".to_owned()));
/// assert_eq!(lexer.next_token().kind, TokenKind::Assign);
/// assert_eq!(lexer.next_token().kind, TokenKind::Integer(5));
/// assert_eq!(lexer.next_token().kind, TokenKind::Semicolon);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'src> {
    inner:  logos::Lexer<'src, TokenKind>,
    errors: Vec<LexicalError>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source` with the default [`Limits`].
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::with_limits(source, Limits::default())
    }

    /// Creates a lexer over `source` with explicit [`Limits`].
    #[must_use]
    pub fn with_limits(source: &'src str, limits: Limits) -> Self {
        let extras = LexerExtras { limits, ..LexerExtras::default() };
        Self { inner:  TokenKind::lexer_with_extras(source, extras),
               errors: Vec::new(), }
    }

    fn position(&self) -> Position {
        let span = self.inner.span();
        Position { line:   self.inner.extras.line,
                   column: span.start.saturating_sub(self.inner.extras.line_start) + 1, }
    }

    /// Returns the next token, advancing exactly past its lexeme.
    ///
    /// Never fails: errors are collected and an `Undefined` token stands in
    /// for the broken lexeme. After the input is exhausted every call
    /// returns an `Eof` token.
    pub fn next_token(&mut self) -> Token {
        loop {
            match self.inner.next() {
                // Newlines only feed the line bookkeeping.
                Some(Ok(TokenKind::Newline)) => {},
                Some(Ok(kind)) => return Token { kind, position: self.position() },
                Some(Err(kind)) => {
                    let position = self.position();
                    self.errors.push(LexicalError { kind,
                                                    position,
                                                    lexeme: self.inner.slice().to_owned() });
                    return Token { kind: TokenKind::Undefined,
                                   position };
                },
                None => {
                    let end = self.inner.span().end;
                    return Token { kind:     TokenKind::Eof,
                                   position: Position {
                                       line:   self.inner.extras.line,
                                       column: end.saturating_sub(self.inner.extras.line_start)
                                               + 1,
                                   }, };
                },
            }
        }
    }

    /// The lexical diagnostics collected so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }

    /// Takes ownership of the collected diagnostics.
    pub fn take_errors(&mut self) -> Vec<LexicalError> {
        std::mem::take(&mut self.errors)
    }
}

/// The parser-facing token stream: identical to [`Lexer`] except that
/// comment tokens are skipped transparently and never surface.
pub struct FilteredLexer<'src> {
    lexer: Lexer<'src>,
}

impl<'src> FilteredLexer<'src> {
    /// Wraps a plain lexer.
    #[must_use]
    pub fn new(lexer: Lexer<'src>) -> Self {
        Self { lexer }
    }

    /// Returns the next non-comment token.
    pub fn next_token(&mut self) -> Token {
        loop {
            let token = self.lexer.next_token();
            if token.kind != TokenKind::Comment {
                return token;
            }
        }
    }

    /// The lexical diagnostics collected so far, in source order.
    #[must_use]
    pub fn errors(&self) -> &[LexicalError] {
        self.lexer.errors()
    }

    /// Takes ownership of the collected diagnostics.
    pub fn take_errors(&mut self) -> Vec<LexicalError> {
        self.lexer.take_errors()
    }
}
