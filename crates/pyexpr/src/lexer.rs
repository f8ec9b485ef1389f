#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Integer,
    Float,
    String,
    True,
    False,
    None,
    And,
    Or,
    Not,
    In,
    NotIn,
    Is,
    IsNot,
    If,
    Else,
    Dot,
    Comma,
    Colon,
    Semicolon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Assign,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,
    Eof,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LexError {
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },
    #[error("unterminated string at {pos}")]
    UnterminatedString { pos: usize },
    #[error("invalid escape sequence at {pos}")]
    InvalidEscape { pos: usize },
}

impl LexError {
    pub fn pos(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { pos, .. }
            | LexError::UnterminatedString { pos }
            | LexError::InvalidEscape { pos } => *pos,
        }
    }
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = input.chars().collect();
    let mut index = 0usize;
    let mut tokens: Vec<Token> = Vec::new();

    while index < chars.len() {
        let ch = chars[index];
        if ch.is_whitespace() {
            index += 1;
            continue;
        }

        if (ch == 'u' || ch == 'U') && matches!(chars.get(index + 1), Some('\'' | '"')) {
            index += 1;
            let mut token = consume_string(&chars, &mut index)?;
            token.pos -= 1;
            tokens.push(token);
            continue;
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let token = consume_identifier(&chars, &mut index);
            push_word(&mut tokens, token);
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && next_is_digit(&chars, index)) {
            tokens.push(consume_number(&chars, &mut index));
            continue;
        }

        if ch == '\'' || ch == '"' {
            tokens.push(consume_string(&chars, &mut index)?);
            continue;
        }

        let token = tokenize_symbol(&chars, &mut index)?;
        tokens.push(token);
        index += 1;
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        pos: chars.len(),
    });

    Ok(tokens)
}

/// Appends a word token, folding `not in` and `is not` into one token.
fn push_word(tokens: &mut Vec<Token>, token: Token) {
    let merged = match (tokens.last().map(|last| last.kind), token.kind) {
        (Some(TokenKind::Not), TokenKind::In) => Some((TokenKind::NotIn, "not in")),
        (Some(TokenKind::Is), TokenKind::Not) => Some((TokenKind::IsNot, "is not")),
        _ => None,
    };
    match (merged, tokens.last_mut()) {
        (Some((kind, lexeme)), Some(last)) => {
            last.kind = kind;
            last.lexeme = lexeme.to_string();
        }
        _ => tokens.push(token),
    }
}

fn consume_identifier(chars: &[char], index: &mut usize) -> Token {
    let start = *index;
    *index += 1;
    while *index < chars.len() && (chars[*index].is_ascii_alphanumeric() || chars[*index] == '_') {
        *index += 1;
    }
    let lexeme: String = chars[start..*index].iter().collect();
    let kind = match lexeme.as_str() {
        "True" | "true" => TokenKind::True,
        "False" | "false" => TokenKind::False,
        "None" | "null" => TokenKind::None,
        "and" => TokenKind::And,
        "or" => TokenKind::Or,
        "not" => TokenKind::Not,
        "in" => TokenKind::In,
        "is" => TokenKind::Is,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        _ => TokenKind::Identifier,
    };
    Token {
        kind,
        lexeme,
        pos: start,
    }
}

fn consume_number(chars: &[char], index: &mut usize) -> Token {
    let start = *index;
    consume_digits(chars, index);

    let mut kind = TokenKind::Integer;
    if matches!(chars.get(*index), Some('l' | 'L')) {
        let lexeme: String = chars[start..*index].iter().collect();
        *index += 1;
        return Token {
            kind,
            lexeme,
            pos: start,
        };
    }

    if chars.get(*index) == Some(&'.') {
        kind = TokenKind::Float;
        *index += 1;
        consume_digits(chars, index);
    }

    if matches!(chars.get(*index), Some('e' | 'E')) {
        let mut cursor = *index + 1;
        if matches!(chars.get(cursor), Some('+' | '-')) {
            cursor += 1;
        }
        if chars.get(cursor).is_some_and(char::is_ascii_digit) {
            kind = TokenKind::Float;
            *index = cursor;
            consume_digits(chars, index);
        }
    }

    let lexeme: String = chars[start..*index].iter().collect();
    Token {
        kind,
        lexeme,
        pos: start,
    }
}

fn consume_digits(chars: &[char], index: &mut usize) {
    while *index < chars.len() && chars[*index].is_ascii_digit() {
        *index += 1;
    }
}

fn next_is_digit(chars: &[char], index: usize) -> bool {
    chars.get(index + 1).is_some_and(char::is_ascii_digit)
}

fn consume_string(chars: &[char], index: &mut usize) -> Result<Token, LexError> {
    let quote = chars[*index];
    let start = *index;
    *index += 1;
    let mut out = String::new();
    let mut terminated = false;

    while *index < chars.len() {
        let current = chars[*index];
        if current == quote {
            *index += 1;
            terminated = true;
            break;
        }
        if current == '\n' {
            break;
        }
        if current == '\\' {
            *index += 1;
            if *index >= chars.len() {
                return Err(LexError::UnterminatedString { pos: start });
            }
            decode_escape(chars, index, &mut out)?;
            continue;
        }
        out.push(current);
        *index += 1;
    }

    if !terminated {
        return Err(LexError::UnterminatedString { pos: start });
    }

    Ok(Token {
        kind: TokenKind::String,
        lexeme: out,
        pos: start,
    })
}

/// Decodes the escape whose first character is at `index` and leaves
/// `index` past it.
fn decode_escape(chars: &[char], index: &mut usize, out: &mut String) -> Result<(), LexError> {
    let pos = *index - 1;
    let escaped = chars[*index];
    *index += 1;
    let decoded = match escaped {
        '\n' => return Ok(()),
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'v' => '\u{0b}',
        '\\' => '\\',
        '\'' => '\'',
        '"' => '"',
        'x' => hex_escape(chars, index, 2, pos)?,
        'u' => hex_escape(chars, index, 4, pos)?,
        'U' => hex_escape(chars, index, 8, pos)?,
        '0'..='7' => {
            let mut value = escaped.to_digit(8).unwrap_or_default();
            let mut taken = 1;
            while taken < 3 {
                let Some(digit) = chars.get(*index).and_then(|ch| ch.to_digit(8)) else {
                    break;
                };
                value = value * 8 + digit;
                *index += 1;
                taken += 1;
            }
            char::from_u32(value).ok_or(LexError::InvalidEscape { pos })?
        }
        other => {
            out.push('\\');
            other
        }
    };
    out.push(decoded);
    Ok(())
}

fn hex_escape(chars: &[char], index: &mut usize, width: usize, pos: usize) -> Result<char, LexError> {
    let digits = chars
        .get(*index..*index + width)
        .ok_or(LexError::InvalidEscape { pos })?;
    let mut value = 0u32;
    for digit in digits {
        let digit = digit.to_digit(16).ok_or(LexError::InvalidEscape { pos })?;
        value = value * 16 + digit;
    }
    *index += width;
    char::from_u32(value).ok_or(LexError::InvalidEscape { pos })
}

fn tokenize_symbol(chars: &[char], index: &mut usize) -> Result<Token, LexError> {
    let ch = chars[*index];
    let pos = *index;
    if let Some(token) = two_char_op(chars, index, ch, pos)? {
        return Ok(token);
    }
    one_char_op(ch, pos).ok_or(LexError::UnexpectedCharacter { ch, pos })
}

fn simple(kind: TokenKind, ch: char, pos: usize) -> Token {
    Token {
        kind,
        lexeme: ch.to_string(),
        pos,
    }
}

fn token_pair(kind: TokenKind, lexeme: &str, pos: usize) -> Token {
    Token {
        kind,
        lexeme: lexeme.to_string(),
        pos,
    }
}

fn two_char_op(chars: &[char], index: &mut usize, ch: char, pos: usize) -> Result<Option<Token>, LexError> {
    let token = match ch {
        '!' if matches_next(chars, pos, '=') => Some((TokenKind::NotEq, "!=")),
        '<' if matches_next(chars, pos, '>') => Some((TokenKind::NotEq, "<>")),
        '=' if matches_next(chars, pos, '=') => Some((TokenKind::EqEq, "==")),
        '<' if matches_next(chars, pos, '=') => Some((TokenKind::Le, "<=")),
        '>' if matches_next(chars, pos, '=') => Some((TokenKind::Ge, ">=")),
        '<' if matches_next(chars, pos, '<') => Some((TokenKind::Shl, "<<")),
        '>' if matches_next(chars, pos, '>') => Some((TokenKind::Shr, ">>")),
        '*' if matches_next(chars, pos, '*') => Some((TokenKind::StarStar, "**")),
        '/' if matches_next(chars, pos, '/') => Some((TokenKind::SlashSlash, "//")),
        '!' => return Err(LexError::UnexpectedCharacter { ch, pos }),
        _ => None,
    };
    if let Some((kind, lexeme)) = token {
        *index += 1;
        return Ok(Some(token_pair(kind, lexeme, pos)));
    }
    Ok(None)
}

fn one_char_op(ch: char, pos: usize) -> Option<Token> {
    let kind = match ch {
        '.' => TokenKind::Dot,
        ',' => TokenKind::Comma,
        ':' => TokenKind::Colon,
        ';' => TokenKind::Semicolon,
        '(' => TokenKind::LParen,
        ')' => TokenKind::RParen,
        '[' => TokenKind::LBracket,
        ']' => TokenKind::RBracket,
        '{' => TokenKind::LBrace,
        '}' => TokenKind::RBrace,
        '=' => TokenKind::Assign,
        '<' => TokenKind::Lt,
        '>' => TokenKind::Gt,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '&' => TokenKind::Amp,
        '|' => TokenKind::Pipe,
        '^' => TokenKind::Caret,
        '~' => TokenKind::Tilde,
        _ => return None,
    };
    Some(simple(kind, ch, pos))
}

fn matches_next(chars: &[char], index: usize, expected: char) -> bool {
    chars.get(index + 1).copied() == Some(expected)
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
