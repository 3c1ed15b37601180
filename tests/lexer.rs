use geoscript::{
    Limits,
    error::LexicalErrorKind,
    interpreter::lexer::{FilteredLexer, Lexer, TokenKind},
};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(source);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        kinds.push(token.kind);
        if done {
            break;
        }
    }
    kinds
}

fn kinds_with_limits(source: &str, limits: Limits) -> (Vec<TokenKind>, Vec<LexicalErrorKind>) {
    let mut lexer = Lexer::with_limits(source, limits);
    let mut kinds = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::Eof;
        kinds.push(token.kind);
        if done {
            break;
        }
    }
    let errors = lexer.errors().iter().map(|error| error.kind).collect();
    (kinds, errors)
}

#[test]
fn declaration_tokens_in_order() {
    assert_eq!(kinds("int a = 5;"),
               vec![TokenKind::TyInt,
                    TokenKind::Identifier("a".to_owned()),
                    TokenKind::Assign,
                    TokenKind::Integer(5),
                    TokenKind::Semicolon,
                    TokenKind::Eof]);
}

#[test]
fn one_and_two_character_operators() {
    assert_eq!(kinds("> >= < <= = == ! !="),
               vec![TokenKind::Greater,
                    TokenKind::GreaterEqual,
                    TokenKind::Less,
                    TokenKind::LessEqual,
                    TokenKind::Assign,
                    TokenKind::EqualEqual,
                    TokenKind::Not,
                    TokenKind::BangEqual,
                    TokenKind::Eof]);
}

#[test]
fn keywords_beat_identifiers_only_on_exact_match() {
    assert_eq!(kinds("if iffy"),
               vec![TokenKind::If,
                    TokenKind::Identifier("iffy".to_owned()),
                    TokenKind::Eof]);
}

#[test]
fn numbers_and_dots() {
    assert_eq!(kinds("1.5"), vec![TokenKind::Decimal(1.5), TokenKind::Eof]);
    // A dot without fractional digits is not part of the number.
    assert_eq!(kinds("1."),
               vec![TokenKind::Integer(1), TokenKind::Dot, TokenKind::Eof]);
}

#[test]
fn positions_are_one_based_lines_and_columns() {
    let mut lexer = Lexer::new("a\n  b");

    let a = lexer.next_token();
    assert_eq!((a.position.line, a.position.column), (1, 1));

    let b = lexer.next_token();
    assert_eq!((b.position.line, b.position.column), (2, 3));
}

#[test]
fn string_escapes_are_kept_literally() {
    let mut lexer = Lexer::new(r#""a\nb""#);
    assert_eq!(lexer.next_token().kind, TokenKind::Str("a\\nb".to_owned()));
    assert!(lexer.errors().is_empty());
}

#[test]
fn doubled_backslashes_collapse() {
    let mut lexer = Lexer::new(r#""a\\b""#);
    assert_eq!(lexer.next_token().kind, TokenKind::Str("a\\b".to_owned()));
}

#[test]
fn escaped_quotes_do_not_terminate_strings() {
    let mut lexer = Lexer::new(r#""a\"b""#);
    assert_eq!(lexer.next_token().kind, TokenKind::Str("a\\\"b".to_owned()));
    assert!(lexer.errors().is_empty());
}

#[test]
fn unterminated_strings_are_collected_and_lexing_continues() {
    let (kinds, errors) = kinds_with_limits("\"abc\n1", Limits::default());
    assert_eq!(errors, vec![LexicalErrorKind::UnterminatedString]);
    assert_eq!(kinds,
               vec![TokenKind::Undefined, TokenKind::Integer(1), TokenKind::Eof]);
}

#[test]
fn integer_overflow_yields_an_undefined_token() {
    let limits = Limits { max_int: 100, ..Limits::default() };

    let (kinds, errors) = kinds_with_limits("101", limits.clone());
    assert_eq!(errors, vec![LexicalErrorKind::IntegerOverflow]);
    assert_eq!(kinds, vec![TokenKind::Undefined, TokenKind::Eof]);

    let (kinds, errors) = kinds_with_limits("100", limits);
    assert!(errors.is_empty());
    assert_eq!(kinds, vec![TokenKind::Integer(100), TokenKind::Eof]);
}

#[test]
fn decimal_fraction_accumulation_is_bounded() {
    let limits = Limits { max_int: 100, ..Limits::default() };

    let (_, errors) = kinds_with_limits("1.12345", limits.clone());
    assert_eq!(errors, vec![LexicalErrorKind::DecimalOverflow]);

    let (kinds, errors) = kinds_with_limits("1.25", limits);
    assert!(errors.is_empty());
    assert_eq!(kinds, vec![TokenKind::Decimal(1.25), TokenKind::Eof]);
}

#[test]
fn identifier_length_is_bounded() {
    let limits = Limits { max_identifier_length: 3,
                          ..Limits::default() };

    let (kinds, errors) = kinds_with_limits("abcd", limits.clone());
    assert_eq!(errors, vec![LexicalErrorKind::IdentifierOverflow]);
    assert_eq!(kinds, vec![TokenKind::Undefined, TokenKind::Eof]);

    let (_, errors) = kinds_with_limits("abc", limits);
    assert!(errors.is_empty());
}

#[test]
fn unexpected_characters_are_collected() {
    let (kinds, errors) = kinds_with_limits("a @ b", Limits::default());
    assert_eq!(errors, vec![LexicalErrorKind::UnexpectedCharacter]);
    assert_eq!(kinds,
               vec![TokenKind::Identifier("a".to_owned()),
                    TokenKind::Undefined,
                    TokenKind::Identifier("b".to_owned()),
                    TokenKind::Eof]);
}

#[test]
fn newline_convention_is_established_by_the_first_newline() {
    let (_, errors) = kinds_with_limits("a\nb\nc\n", Limits::default());
    assert!(errors.is_empty());

    let (_, errors) = kinds_with_limits("a\nb\r\nc", Limits::default());
    assert_eq!(errors, vec![LexicalErrorKind::NewLineMismatch]);
}

#[test]
fn comments_surface_from_the_plain_lexer_but_not_the_filtered_one() {
    assert_eq!(kinds("1 # note\n2"),
               vec![TokenKind::Integer(1),
                    TokenKind::Comment,
                    TokenKind::Integer(2),
                    TokenKind::Eof]);

    let mut filtered = FilteredLexer::new(Lexer::new("1 # note\n2"));
    assert_eq!(filtered.next_token().kind, TokenKind::Integer(1));
    assert_eq!(filtered.next_token().kind, TokenKind::Integer(2));
    assert_eq!(filtered.next_token().kind, TokenKind::Eof);
}

#[test]
fn comment_length_is_bounded_by_the_string_limit() {
    let limits = Limits { max_string_length: 4,
                          ..Limits::default() };

    let (_, errors) = kinds_with_limits("# abcdef", limits.clone());
    assert_eq!(errors, vec![LexicalErrorKind::CommentOverflow]);

    let (_, errors) = kinds_with_limits("# ab", limits);
    assert!(errors.is_empty());
}

#[test]
fn bang_is_the_not_operator() {
    assert_eq!(kinds("!True"),
               vec![TokenKind::Not, TokenKind::True, TokenKind::Eof]);
}

#[test]
fn eof_repeats_once_reached() {
    let mut lexer = Lexer::new("a");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier("a".to_owned()));
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    assert_eq!(lexer.next_token().kind, TokenKind::Eof);
}
