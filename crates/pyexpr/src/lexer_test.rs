use super::{tokenize, LexError, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .expect("tokenize")
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn single_string(input: &str) -> String {
    let tokens = tokenize(input).expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::String);
    tokens[0].lexeme.clone()
}

#[test]
fn tokenizes_composite_expression() {
    assert_eq!(
        kinds("a.b[0] >= 10 and f(name, 'x', k=1.5)"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dot,
            TokenKind::Identifier,
            TokenKind::LBracket,
            TokenKind::Integer,
            TokenKind::RBracket,
            TokenKind::Ge,
            TokenKind::Integer,
            TokenKind::And,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::Comma,
            TokenKind::String,
            TokenKind::Comma,
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Float,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn merges_two_word_operators() {
    let tokens = tokenize("a not in b is not c").expect("tokenize");
    let summary = tokens
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str(), token.pos))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Identifier, "a", 0),
            (TokenKind::NotIn, "not in", 2),
            (TokenKind::Identifier, "b", 9),
            (TokenKind::IsNot, "is not", 11),
            (TokenKind::Identifier, "c", 18),
            (TokenKind::Eof, "", 19),
        ]
    );
    assert_eq!(
        kinds("not a in b"),
        vec![
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::In,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn recognizes_literal_words_in_both_spellings() {
    assert_eq!(
        kinds("True true False false None null"),
        vec![
            TokenKind::True,
            TokenKind::True,
            TokenKind::False,
            TokenKind::False,
            TokenKind::None,
            TokenKind::None,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_forms() {
    let tokens = tokenize("12 3L .5 1. 2.5e-3 7E2 x.y").expect("tokenize");
    let summary = tokens
        .iter()
        .map(|token| (token.kind, token.lexeme.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Integer, "12"),
            (TokenKind::Integer, "3"),
            (TokenKind::Float, ".5"),
            (TokenKind::Float, "1."),
            (TokenKind::Float, "2.5e-3"),
            (TokenKind::Float, "7E2"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Dot, "."),
            (TokenKind::Identifier, "y"),
            (TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn multi_character_operators() {
    assert_eq!(
        kinds("a ** b // c << d >> e <> f != g == h"),
        vec![
            TokenKind::Identifier,
            TokenKind::StarStar,
            TokenKind::Identifier,
            TokenKind::SlashSlash,
            TokenKind::Identifier,
            TokenKind::Shl,
            TokenKind::Identifier,
            TokenKind::Shr,
            TokenKind::Identifier,
            TokenKind::NotEq,
            TokenKind::Identifier,
            TokenKind::NotEq,
            TokenKind::Identifier,
            TokenKind::EqEq,
            TokenKind::Identifier,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn decodes_escape_sequences() {
    assert_eq!(single_string(r#"'a\nb\t\\\'\"'"#), "a\nb\t\\'\"");
    assert_eq!(single_string(r"'\x41é\U0001F600'"), "A\u{e9}\u{1F600}");
    assert_eq!(single_string(r"'\101\0'"), "A\0");
    assert_eq!(single_string("'ab\\\ncd'"), "abcd");
    assert_eq!(single_string(r"'\q'"), "\\q");
    assert_eq!(single_string(r#"u"unicode""#), "unicode");
}

#[test]
fn reports_lexing_failures_with_positions() {
    assert_eq!(
        tokenize("'open"),
        Err(LexError::UnterminatedString { pos: 0 })
    );
    assert_eq!(
        tokenize("x = 'a\nb'"),
        Err(LexError::UnterminatedString { pos: 4 })
    );
    assert_eq!(tokenize(r"'\x4'"), Err(LexError::InvalidEscape { pos: 1 }));
    assert_eq!(
        tokenize("a $ b"),
        Err(LexError::UnexpectedCharacter { ch: '$', pos: 2 })
    );
    assert_eq!(
        tokenize("a ! b"),
        Err(LexError::UnexpectedCharacter { ch: '!', pos: 2 })
    );
}
