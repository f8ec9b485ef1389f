use crate::ast::{precedence, AstNode, BinaryOp, BoolOp, CompareOp, UnaryOp};
use crate::lexer::{tokenize, LexError, Token, TokenKind};
use num_bigint::BigInt;

pub const DEFAULT_MAX_DEPTH: usize = 100;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("unexpected token at {pos}: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: usize,
    },
    #[error("invalid number literal at {pos}: {literal}")]
    InvalidNumber { literal: String, pos: usize },
    #[error("keyword argument at {pos} must be a plain name")]
    InvalidKeywordTarget { pos: usize },
    #[error("keyword argument '{name}' repeated at {pos}")]
    DuplicateKeyword { name: String, pos: usize },
    #[error("positional argument follows keyword argument at {pos}")]
    PositionalAfterKeyword { pos: usize },
    #[error("expression nested deeper than {max_depth} levels at {pos}")]
    NestingTooDeep { max_depth: usize, pos: usize },
}

impl ParseError {
    pub fn pos(&self) -> usize {
        match self {
            ParseError::Lex(err) => err.pos(),
            ParseError::UnexpectedToken { pos, .. }
            | ParseError::InvalidNumber { pos, .. }
            | ParseError::InvalidKeywordTarget { pos }
            | ParseError::DuplicateKeyword { pos, .. }
            | ParseError::PositionalAfterKeyword { pos }
            | ParseError::NestingTooDeep { pos, .. } => *pos,
        }
    }
}

/// Precedence-climbing parser over a token stream ending in `Eof`.
pub struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
    max_depth: usize,
}

pub fn parse_expression(input: &str) -> Result<AstNode, ParseError> {
    parse_expression_with_depth(input, DEFAULT_MAX_DEPTH)
}

pub fn parse_expression_with_depth(input: &str, max_depth: usize) -> Result<AstNode, ParseError> {
    let tokens = tokenize(input)?;
    Parser::with_max_depth(tokens, max_depth).parse()
}

pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse()
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(mut tokens: Vec<Token>, max_depth: usize) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let pos = tokens.last().map(|token| token.pos + token.lexeme.chars().count());
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                pos: pos.unwrap_or(0),
            });
        }
        Self {
            tokens,
            index: 0,
            depth: 0,
            max_depth,
        }
    }

    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        let expression = self.parse_expr(0)?;
        self.expect(TokenKind::Eof)?;
        Ok(expression)
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<AstNode, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.max_depth,
                pos: self.peek().pos,
            });
        }
        self.depth += 1;
        let result = self.parse_expr_inner(min_bp);
        self.depth -= 1;
        result
    }

    fn parse_expr_inner(&mut self, min_bp: u8) -> Result<AstNode, ParseError> {
        let mut left = self.parse_prefix()?;

        loop {
            let kind = self.peek().kind;

            if kind == TokenKind::If {
                if precedence::CONDITIONAL <= min_bp {
                    break;
                }
                self.advance();
                let condition = self.parse_expr(precedence::CONDITIONAL)?;
                self.expect(TokenKind::Else)?;
                let if_false = self.parse_expr(precedence::CONDITIONAL - 1)?;
                left = AstNode::Conditional {
                    condition: Box::new(condition),
                    if_true: Box::new(left),
                    if_false: Box::new(if_false),
                };
                continue;
            }

            if let Some(op) = bool_op(kind) {
                let bp = precedence::boolean(op);
                if bp <= min_bp {
                    break;
                }
                self.advance();
                let right = self.parse_expr(bp)?;
                left = AstNode::BoolOp {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                };
                continue;
            }

            if compare_op(kind).is_some() {
                if precedence::COMPARISON <= min_bp {
                    break;
                }
                let mut comparisons = Vec::new();
                while let Some(op) = compare_op(self.peek().kind) {
                    self.advance();
                    comparisons.push((op, self.parse_expr(precedence::COMPARISON)?));
                }
                left = AstNode::Compare {
                    left: Box::new(left),
                    comparisons,
                };
                continue;
            }

            if let Some(op) = binary_op(kind) {
                let bp = precedence::binary(op);
                if bp <= min_bp {
                    break;
                }
                self.advance();
                // `**` is right-associative: its right side may hold another `**`.
                let right_bp = if op == BinaryOp::Pow { bp - 1 } else { bp };
                let right = self.parse_expr(right_bp)?;
                left = AstNode::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                };
                continue;
            }

            if matches!(kind, TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket) {
                if precedence::POSTFIX <= min_bp {
                    break;
                }
                left = self.parse_postfix(left)?;
                continue;
            }

            break;
        }

        Ok(left)
    }

    fn parse_postfix(&mut self, target: AstNode) -> Result<AstNode, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Dot => {
                let name = self.expect(TokenKind::Identifier)?;
                Ok(AstNode::ObjLookup {
                    target: Box::new(target),
                    name: name.lexeme,
                })
            }
            TokenKind::LBracket => {
                let key = self.parse_expr(0)?;
                self.expect(TokenKind::RBracket)?;
                Ok(AstNode::Lookup {
                    target: Box::new(target),
                    key: Box::new(key),
                })
            }
            _ => self.parse_call(target),
        }
    }

    fn parse_call(&mut self, callee: AstNode) -> Result<AstNode, ParseError> {
        let mut args = Vec::new();
        let mut kwargs: Vec<(String, AstNode)> = Vec::new();
        while !self.check(TokenKind::RParen) {
            let pos = self.peek().pos;
            let expression = self.parse_expr(0)?;
            if self.match_kind(TokenKind::Assign) {
                let AstNode::Name(name) = expression else {
                    return Err(ParseError::InvalidKeywordTarget { pos });
                };
                if kwargs.iter().any(|(existing, _)| *existing == name) {
                    return Err(ParseError::DuplicateKeyword { name, pos });
                }
                let value = self.parse_expr(0)?;
                kwargs.push((name, value));
            } else if !kwargs.is_empty() {
                return Err(ParseError::PositionalAfterKeyword { pos });
            } else {
                args.push(expression);
            }
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(AstNode::Call {
            callee: Box::new(callee),
            args,
            kwargs,
        })
    }

    fn parse_prefix(&mut self) -> Result<AstNode, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Identifier => Ok(AstNode::Name(token.lexeme)),
            TokenKind::Integer => token
                .lexeme
                .parse::<BigInt>()
                .map(AstNode::Integer)
                .map_err(|_| ParseError::InvalidNumber {
                    literal: token.lexeme.clone(),
                    pos: token.pos,
                }),
            TokenKind::Float => token
                .lexeme
                .parse::<f64>()
                .map(AstNode::Float)
                .map_err(|_| ParseError::InvalidNumber {
                    literal: token.lexeme.clone(),
                    pos: token.pos,
                }),
            TokenKind::String => Ok(AstNode::String(token.lexeme)),
            TokenKind::True => Ok(AstNode::Bool(true)),
            TokenKind::False => Ok(AstNode::Bool(false)),
            TokenKind::None => Ok(AstNode::None),
            TokenKind::Not => self.parse_unary(UnaryOp::Not),
            TokenKind::Minus => self.parse_unary(UnaryOp::Neg),
            TokenKind::Plus => self.parse_unary(UnaryOp::Pos),
            TokenKind::Tilde => self.parse_unary(UnaryOp::Invert),
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::LBracket => {
                let items = self.parse_sequence(TokenKind::RBracket)?;
                Ok(AstNode::List(items))
            }
            TokenKind::LBrace => self.parse_dict(),
            _ => Err(ParseError::UnexpectedToken {
                expected: "expression".to_string(),
                found: describe(&token),
                pos: token.pos,
            }),
        }
    }

    fn parse_unary(&mut self, op: UnaryOp) -> Result<AstNode, ParseError> {
        let operand = self.parse_expr(precedence::unary(op))?;
        Ok(AstNode::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// `()` and any list containing a comma is a tuple; `(x)` is `x`.
    fn parse_parenthesized(&mut self) -> Result<AstNode, ParseError> {
        if self.match_kind(TokenKind::RParen) {
            return Ok(AstNode::Tuple(Vec::new()));
        }
        let first = self.parse_expr(0)?;
        if self.match_kind(TokenKind::RParen) {
            return Ok(first);
        }
        if !self.check(TokenKind::Comma) {
            return Err(self.unexpected("',' or ')'"));
        }
        self.advance();
        let mut items = vec![first];
        items.extend(self.parse_sequence(TokenKind::RParen)?);
        Ok(AstNode::Tuple(items))
    }

    /// Comma-separated expressions up to and including `close`; a trailing
    /// comma is accepted.
    fn parse_sequence(&mut self, close: TokenKind) -> Result<Vec<AstNode>, ParseError> {
        let mut items = Vec::new();
        while !self.check(close) {
            items.push(self.parse_expr(0)?);
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(close)?;
        Ok(items)
    }

    fn parse_dict(&mut self) -> Result<AstNode, ParseError> {
        let mut entries = Vec::new();
        while !self.check(TokenKind::RBrace) {
            let key = self.parse_expr(0)?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_expr(0)?;
            entries.push((key, value));
            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(AstNode::Dict(entries))
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        let token = self.advance();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected_label(kind),
                found: describe(&token),
                pos: token.pos,
            })
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: describe(token),
            pos: token.pos,
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.index]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.index].clone();
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        token
    }
}

fn bool_op(kind: TokenKind) -> Option<BoolOp> {
    match kind {
        TokenKind::Or => Some(BoolOp::Or),
        TokenKind::And => Some(BoolOp::And),
        _ => None,
    }
}

fn compare_op(kind: TokenKind) -> Option<CompareOp> {
    let op = match kind {
        TokenKind::EqEq => CompareOp::Eq,
        TokenKind::NotEq => CompareOp::Ne,
        TokenKind::Lt => CompareOp::Lt,
        TokenKind::Le => CompareOp::Le,
        TokenKind::Gt => CompareOp::Gt,
        TokenKind::Ge => CompareOp::Ge,
        TokenKind::In => CompareOp::In,
        TokenKind::NotIn => CompareOp::NotIn,
        TokenKind::Is => CompareOp::Is,
        TokenKind::IsNot => CompareOp::IsNot,
        _ => return None,
    };
    Some(op)
}

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::Pipe => BinaryOp::BitOr,
        TokenKind::Caret => BinaryOp::BitXor,
        TokenKind::Amp => BinaryOp::BitAnd,
        TokenKind::Shl => BinaryOp::Shl,
        TokenKind::Shr => BinaryOp::Shr,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::SlashSlash => BinaryOp::FloorDiv,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::StarStar => BinaryOp::Pow,
        _ => return None,
    };
    Some(op)
}

fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => "end of input".to_string(),
        TokenKind::String => format!("string {:?}", token.lexeme),
        _ => format!("'{}'", token.lexeme),
    }
}

fn expected_label(kind: TokenKind) -> String {
    let label = match kind {
        TokenKind::Eof => "end of input",
        TokenKind::Identifier => "name",
        TokenKind::RParen => "')'",
        TokenKind::RBracket => "']'",
        TokenKind::RBrace => "'}'",
        TokenKind::Colon => "':'",
        TokenKind::Else => "'else'",
        other => return format!("{other:?}"),
    };
    label.to_string()
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
